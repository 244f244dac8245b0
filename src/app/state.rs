use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, schedule_retry, start_frame_task, start_refresh_task},
        settings::{load_saved_location, remember_resolved},
    },
    cli::{Cli, IconMode},
    data::{
        forecast::ForecastClient,
        location::{LocationChain, ResolvedLocation},
    },
    domain::{
        alignment::{Alignment, Reference, resolve_start_index},
        weather::{ForecastBundle, LocationFix, Units, condition_category},
        window::{WindowCache, WindowUpdate},
    },
    resilience::{backoff::Backoff, freshness::RefreshMetadata},
    ui::scene::{CloudScene, Scene},
};

mod methods_fetch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub last_error: Option<String>,
    pub location: Option<ResolvedLocation>,
    pub weather: Option<ForecastBundle>,
    pub alignment: Option<Alignment>,
    pub window: WindowCache,
    pub refresh_meta: RefreshMetadata,
    pub units: Units,
    pub icon_mode: IconMode,
    pub backoff: Backoff,
    pub fetch_in_flight: bool,
    /// Bumped on every refresh; fetch results tagged with an older value are stale.
    pub generation: u64,
    pub scene: Option<Box<dyn Scene + Send>>,
    pub last_frame_at: Instant,
    pub frame_tick: u64,
    pub preference_path: Option<PathBuf>,
    pub remember_location: bool,
    location_chain: LocationChain,
    forecast_client: ForecastClient,
}

impl AppState {
    pub fn new(cli: &Cli) -> Self {
        let scene: Option<Box<dyn Scene + Send>> = if cli.no_animation {
            None
        } else {
            Some(Box::new(CloudScene::new()))
        };

        Self {
            mode: AppMode::Loading,
            running: true,
            loading_message: "Initializing...".to_string(),
            last_error: None,
            location: None,
            weather: None,
            alignment: None,
            window: WindowCache::new(cli.max_days()),
            refresh_meta: RefreshMetadata::default(),
            units: cli.units(),
            icon_mode: cli.icon_mode(),
            backoff: Backoff::from_secs(10, 300),
            fetch_in_flight: false,
            generation: 0,
            scene,
            last_frame_at: Instant::now(),
            frame_tick: 0,
            preference_path: None,
            remember_location: cli.remember,
            location_chain: LocationChain::from_cli(cli, None),
            forecast_client: ForecastClient::from_cli(cli),
        }
    }

    /// Attaches the saved-preference file: its content becomes the first link
    /// of the location chain and `--remember` writes back to it.
    #[must_use]
    pub fn with_preference(mut self, path: Option<PathBuf>) -> Self {
        let saved = path.as_deref().and_then(load_saved_location);
        self.location_chain = self.location_chain.clone().with_saved(saved);
        self.preference_path = path;
        self
    }

    #[must_use]
    pub fn with_location_chain(mut self, chain: LocationChain) -> Self {
        self.location_chain = chain;
        self
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => self.handle_bootstrap(tx, cli)?,
            AppEvent::TickFrame => self.handle_tick_frame(),
            AppEvent::TickRefresh => {
                self.realign(Reference::now());
                if self.mode != AppMode::Quit {
                    self.begin_refresh(tx);
                }
            }
            AppEvent::Input(input) => self.handle_input(input, tx).await?,
            AppEvent::LocationResolved {
                generation,
                resolved,
            } => {
                if self.is_current(generation) {
                    self.handle_location_resolved(tx, resolved);
                }
            }
            AppEvent::FetchSucceeded { generation, bundle } => {
                if self.is_current(generation) {
                    self.apply_forecast(bundle, Reference::now());
                }
            }
            AppEvent::FetchFailed { generation, error } => {
                if self.is_current(generation) {
                    self.handle_fetch_failed(tx, error);
                }
            }
            AppEvent::Quit => self.quit(),
        }

        Ok(())
    }

    fn handle_bootstrap(&mut self, tx: &mpsc::Sender<AppEvent>, cli: &Cli) -> Result<()> {
        cli.validate()?;
        if let Some(scene) = self.scene.as_mut() {
            scene.start();
            start_frame_task(tx.clone(), cli.fps);
        }
        start_refresh_task(tx.clone(), cli.refresh_interval);
        self.begin_refresh(tx);
        Ok(())
    }

    pub(crate) fn handle_tick_frame(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_at);
        self.last_frame_at = now;
        self.frame_tick = self.frame_tick.saturating_add(1);

        if let Some(scene) = self.scene.as_mut() {
            scene.advance(delta);
        }
        self.refresh_meta.reevaluate(Utc::now());
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => tx.send(AppEvent::Quit).await?,
                KeyCode::Char('r') => self.begin_refresh(tx),
                KeyCode::Char('f') => self.units = Units::Fahrenheit,
                KeyCode::Char('c') => self.units = Units::Celsius,
                _ => {}
            },
            Event::FocusLost => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.stop();
                }
            }
            Event::FocusGained => {
                if let Some(scene) = self.scene.as_mut() {
                    scene.start();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_location_resolved(
        &mut self,
        tx: &mpsc::Sender<AppEvent>,
        resolved: ResolvedLocation,
    ) {
        tracing::info!(
            label = %resolved.fix.label,
            origin = ?resolved.origin,
            "location resolved"
        );
        if self.remember_location {
            remember_resolved(self.preference_path.as_deref(), &resolved);
        }
        let fix = resolved.fix.clone();
        self.location = Some(resolved);
        self.loading_message = format!("Fetching weather for {}...", fix.label);
        self.fetch_forecast(tx, fix);
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        if generation == self.generation {
            return true;
        }
        tracing::debug!(
            generation,
            current = self.generation,
            "discarding superseded refresh result"
        );
        false
    }

    /// Runs the resolve/build steps for a freshly fetched bundle.
    pub fn apply_forecast(&mut self, bundle: ForecastBundle, reference: Reference) {
        // A day is identified by its date string; the memo key alone cannot
        // see a series that moved forward by a day.
        let series_changed = self.weather.as_ref().is_none_or(|previous| {
            previous.location.key() != bundle.location.key()
                || previous.daily.dates != bundle.daily.dates
        });
        if series_changed {
            self.window.invalidate();
        }

        if let Some(scene) = self.scene.as_mut() {
            scene.set_condition(condition_category(bundle.current_weather_code()));
        }
        self.fetch_in_flight = false;
        self.weather = Some(bundle);
        self.realign(reference);
        self.mode = AppMode::Ready;
        self.last_error = None;
        self.refresh_meta.mark_success(reference.instant);
        self.backoff.reset();
    }

    /// Re-resolves "today" for the current series; a day rollover moves the
    /// window without a new fetch.
    pub fn realign(&mut self, reference: Reference) -> Option<WindowUpdate> {
        let bundle = self.weather.as_ref()?;
        let alignment = resolve_start_index(&bundle.daily, reference);
        if alignment.is_degraded() && self.alignment.as_ref() != Some(&alignment) {
            tracing::warn!(
                step = ?alignment.step,
                index = alignment.start_index,
                today = alignment.today.as_deref().unwrap_or("-"),
                first = bundle.daily.dates.first().map_or("-", String::as_str),
                "forecast day alignment degraded"
            );
        }

        let update = self.window.refresh(
            &bundle.daily,
            alignment.start_index,
            reference.observer_offset,
        );
        if update == WindowUpdate::Rebuilt {
            tracing::debug!(
                start = alignment.start_index,
                days = self.window.days().len(),
                "forecast window rebuilt"
            );
        }
        self.alignment = Some(alignment);
        Some(update)
    }

    fn handle_fetch_failed(&mut self, tx: &mpsc::Sender<AppEvent>, err: String) {
        tracing::warn!(error = %err, "forecast refresh failed");
        self.fetch_in_flight = false;
        self.last_error = Some(err);
        self.mode = AppMode::Error;
        self.refresh_meta.mark_failure(Utc::now());
        schedule_retry(tx.clone(), self.backoff.next_delay());
    }

    pub(crate) fn quit(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.dispose();
        }
        self.mode = AppMode::Quit;
    }
}
