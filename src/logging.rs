use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

/// Where diagnostics go. The full-screen UI owns the terminal, so it only
/// logs when a file is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(PathBuf),
    Stderr,
    Disabled,
}

impl LogTarget {
    #[must_use]
    pub fn for_cli(cli: &Cli) -> Self {
        match (&cli.log_file, cli.one_shot) {
            (Some(path), _) => Self::File(path.clone()),
            (None, true) => Self::Stderr,
            (None, false) => Self::Disabled,
        }
    }

    /// Level used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_directive(&self) -> &'static str {
        match self {
            Self::File(_) => "info",
            Self::Stderr | Self::Disabled => "warn",
        }
    }
}

pub fn init(target: &LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(target.default_directive()));

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init()
            .map_err(|err| anyhow!("failed to install logger: {err}")),
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|err| anyhow!("failed to install logger: {err}"))
        }
    }
}
