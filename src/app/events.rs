use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::{
    sync::mpsc::Sender,
    time::{interval, sleep},
};

use crate::{data::location::ResolvedLocation, domain::weather::ForecastBundle};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickRefresh,
    Input(Event),
    /// `generation` identifies the refresh that issued the request; results
    /// from a superseded refresh are dropped.
    LocationResolved {
        generation: u64,
        resolved: ResolvedLocation,
    },
    FetchSucceeded {
        generation: u64,
        bundle: ForecastBundle,
    },
    FetchFailed {
        generation: u64,
        error: String,
    },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_frame_task(tx: Sender<AppEvent>, fps: u8) {
    let fps = fps.max(15);
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

pub fn start_refresh_task(tx: Sender<AppEvent>, refresh_secs: u64) {
    tokio::spawn(async move {
        loop {
            sleep(jittered_interval(refresh_secs)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

pub fn schedule_retry(tx: Sender<AppEvent>, delay: Duration) {
    tokio::spawn(async move {
        sleep(delay.max(Duration::from_secs(1))).await;
        let _ = tx.send(AppEvent::TickRefresh).await;
    });
}

/// Refresh period with ±10% jitter, never below ten seconds.
#[must_use]
pub fn jittered_interval(refresh_secs: u64) -> Duration {
    let base = refresh_secs.max(10) as f32;
    let jitter = rand::rng().random_range(-0.1f32..0.1f32);
    Duration::from_secs_f32((base * (1.0 + jitter)).max(1.0))
}
