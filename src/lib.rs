pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod resilience;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::{
    io::{self, Stdout, Write},
    path::PathBuf,
};

use anyhow::Result;
use app::{
    events::{AppEvent, spawn_input_task},
    settings::{clear_saved_location, load_saved_location, preference_path, remember_resolved},
    state::{AppMode, AppState},
};
use cli::Cli;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::{forecast::ForecastClient, location::LocationChain};
use domain::{
    alignment::{Reference, resolve_start_index},
    window::build_window,
};
use futures::StreamExt;
use logging::LogTarget;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    logging::init(&LogTarget::for_cli(&cli))?;
    let preference = prepare_preference(&cli)?;

    if cli.one_shot {
        let report = one_shot_report(&cli, preference, Reference::now()).await?;
        print!("{report}");
        return Ok(());
    }

    let mut terminal = setup_terminal()?;
    let result = run_inner(&mut terminal, cli, preference).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Resolves the preference file location, honouring `--forget` first.
fn prepare_preference(cli: &Cli) -> Result<Option<PathBuf>> {
    let path = preference_path();
    if cli.forget
        && let Some(path) = path.as_deref()
    {
        clear_saved_location(path)?;
        tracing::info!(path = %path.display(), "saved location cleared");
    }
    Ok(path)
}

/// Resolves a location, fetches once and renders the aligned window as text.
pub async fn one_shot_report(
    cli: &Cli,
    preference: Option<PathBuf>,
    reference: Reference,
) -> Result<String> {
    let saved = preference.as_deref().and_then(load_saved_location);
    let resolved = LocationChain::from_cli(cli, saved).resolve().await;
    if cli.remember {
        remember_resolved(preference.as_deref(), &resolved);
    }

    let bundle = ForecastClient::from_cli(cli).fetch(resolved.fix).await?;
    let alignment = resolve_start_index(&bundle.daily, reference);
    if alignment.is_degraded() {
        tracing::warn!(step = ?alignment.step, "forecast day alignment degraded");
    }
    let days = build_window(
        &bundle.daily,
        alignment.start_index,
        cli.max_days(),
        reference.observer_offset,
    );
    Ok(ui::text::format_snapshot(
        &bundle,
        &alignment,
        &days,
        cli.units(),
        cli.icon_mode(),
    ))
}

async fn run_inner(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    cli: Cli,
    preference: Option<PathBuf>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input_stream = spawn_input_task();
    tokio::pin!(input_stream);
    let mut app = AppState::new(&cli).with_preference(preference);

    tx.send(AppEvent::Bootstrap).await?;

    while app.running {
        tokio::select! {
            maybe_input = input_stream.next() => {
                if let Some(input) = maybe_input {
                    app.handle_event(AppEvent::Input(input), &tx, &cli).await?;
                }
            }
            maybe_event = rx.recv() => {
                if let Some(event) = maybe_event {
                    app.handle_event(event, &tx, &cli).await?;
                }
            }
        }

        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.mode == AppMode::Quit {
            app.running = false;
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    enter_screen(&mut stdout)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    leave_screen(terminal.backend_mut())?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = leave_screen(&mut io::stdout());
        existing(panic);
    }));
}

/// Focus reporting drives the scene's stop/start on `FocusLost`/`FocusGained`.
fn enter_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, EnterAlternateScreen, EnableFocusChange)
}

fn leave_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, DisableFocusChange, LeaveAlternateScreen)
}
