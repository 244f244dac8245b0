//! Decorative background animation behind the current-conditions panel.
//!
//! A scene owns its own timing state. The event loop drives it through
//! [`Scene::advance`] on frame ticks and tears it down with
//! [`Scene::dispose`]; nothing else in the app depends on it.

use std::{fmt::Debug, time::Duration};

use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::domain::weather::ConditionCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Idle,
    Running,
    Stopped,
    Disposed,
}

/// Lifecycle contract for background animations.
///
/// `start` and `stop` may be called any number of times. After `dispose`
/// every method is a no-op.
pub trait Scene: Debug {
    fn start(&mut self);
    fn stop(&mut self);
    fn dispose(&mut self);
    fn state(&self) -> SceneState;
    fn set_condition(&mut self, category: ConditionCategory);
    fn advance(&mut self, dt: Duration);
    fn render(&self, frame: &mut Frame, area: Rect);
}

#[derive(Debug, Clone, PartialEq)]
struct Cloud {
    /// Horizontal centre as a fraction of the area width; may leave `0..1`
    /// while drifting on or off screen.
    x: f32,
    /// Vertical position as a fraction of the area height.
    y: f32,
    /// Fraction of the width travelled per second.
    speed: f32,
    width: usize,
    rows: usize,
}

#[derive(Debug)]
pub struct CloudScene {
    state: SceneState,
    category: ConditionCategory,
    clouds: Vec<Cloud>,
    rng: StdRng,
}

impl Default for CloudScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudScene {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut scene = Self {
            state: SceneState::Idle,
            category: ConditionCategory::default(),
            clouds: Vec::new(),
            rng,
        };
        scene.populate();
        scene
    }

    #[must_use]
    pub fn cloud_count(&self) -> usize {
        self.clouds.len()
    }

    fn populate(&mut self) {
        let target = cloud_target(self.category);
        self.clouds.truncate(target);
        while self.clouds.len() < target {
            let cloud = self.spawn_cloud(None);
            self.clouds.push(cloud);
        }
    }

    fn spawn_cloud(&mut self, x: Option<f32>) -> Cloud {
        let rows = if self.rng.random_bool(0.5) { 3 } else { 2 };
        Cloud {
            x: x.unwrap_or_else(|| self.rng.random_range(0.0..1.0)),
            y: self.rng.random_range(0.0..0.6),
            speed: self.rng.random_range(0.01..0.04),
            width: self.rng.random_range(8..16),
            rows,
        }
    }

    fn paint(&self, width: usize, height: usize) -> Vec<Vec<char>> {
        let mut canvas = vec![vec![' '; width]; height];
        for cloud in &self.clouds {
            let cx = cloud.x * width as f32;
            if cx < -(cloud.width as f32) || cx > (width + cloud.width) as f32 {
                continue;
            }
            let shape = CloudShape {
                left: cx.round() as i64 - (cloud.width / 2) as i64,
                top: (cloud.y * height as f32) as usize,
                width: cloud.width,
            };
            for (row_idx, pattern) in cloud_patterns(cloud.rows).iter().enumerate() {
                if !paint_cloud_row(&mut canvas, pattern, row_idx, &shape) {
                    break;
                }
            }
        }
        canvas
    }
}

impl Scene for CloudScene {
    fn start(&mut self) {
        if matches!(self.state, SceneState::Idle | SceneState::Stopped) {
            self.state = SceneState::Running;
        }
    }

    fn stop(&mut self) {
        if self.state == SceneState::Running {
            self.state = SceneState::Stopped;
        }
    }

    fn dispose(&mut self) {
        self.state = SceneState::Disposed;
        self.clouds.clear();
    }

    fn state(&self) -> SceneState {
        self.state
    }

    fn set_condition(&mut self, category: ConditionCategory) {
        if self.state == SceneState::Disposed || self.category == category {
            return;
        }
        self.category = category;
        self.populate();
    }

    fn advance(&mut self, dt: Duration) {
        if self.state != SceneState::Running {
            return;
        }
        let dt = dt.as_secs_f32().clamp(0.0, 0.25);
        for idx in 0..self.clouds.len() {
            self.clouds[idx].x += self.clouds[idx].speed * dt;
            if self.clouds[idx].x > 1.25 {
                self.clouds[idx] = self.spawn_cloud(Some(-0.25));
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        if self.state == SceneState::Disposed || area.width == 0 || area.height == 0 {
            return;
        }
        let canvas = self.paint(usize::from(area.width), usize::from(area.height));
        let lines: Vec<Line> = canvas
            .into_iter()
            .map(|row| Line::from(row.into_iter().collect::<String>()))
            .collect();
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

fn cloud_target(category: ConditionCategory) -> usize {
    match category {
        ConditionCategory::Clear => 1,
        ConditionCategory::PartlyCloudy => 3,
        ConditionCategory::Drizzle | ConditionCategory::Showers | ConditionCategory::Snow => 4,
        ConditionCategory::Cloudy
        | ConditionCategory::Fog
        | ConditionCategory::Rain
        | ConditionCategory::Thunderstorm => 6,
    }
}

struct CloudShape {
    left: i64,
    top: usize,
    width: usize,
}

fn cloud_patterns(rows: usize) -> &'static [&'static [char]] {
    if rows >= 3 {
        &[
            &[' ', '░', '░', '▒', '▒', '░', '░', ' '],
            &['░', '▒', '▓', '▓', '▓', '▓', '▒', '░'],
            &[' ', ' ', '░', '▒', '▒', '░', ' ', ' '],
        ]
    } else {
        &[
            &[' ', '░', '▒', '▒', '▒', '░', ' '],
            &['░', '▒', '▓', '▓', '▒', '░', ' '],
        ]
    }
}

fn paint_cloud_row(
    canvas: &mut [Vec<char>],
    pattern: &[char],
    row_idx: usize,
    shape: &CloudShape,
) -> bool {
    let y = shape.top + row_idx;
    let Some(row) = canvas.get_mut(y) else {
        return false;
    };
    let pat_len = pattern.len();
    for col in 0..shape.width {
        let x = shape.left + col as i64;
        let Ok(x) = usize::try_from(x) else {
            continue;
        };
        let Some(cell) = row.get_mut(x) else {
            continue;
        };
        let ch = pattern[((col * pat_len) / shape.width.max(1)).min(pat_len - 1)];
        if ch != ' ' && *cell == ' ' {
            *cell = ch;
        }
    }
    true
}
