use std::{
    ffi::OsString,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    data::location::{LocationOrigin, ResolvedLocation},
    domain::weather::LocationFix,
};

pub const CONFIG_DIR_ENV: &str = "NIMBUS_WEATHER_CONFIG_DIR";
const PREFERENCE_FILE: &str = "location.json";

/// Where the saved location preference lives, if a home or override directory exists.
#[must_use]
pub fn preference_path() -> Option<PathBuf> {
    preference_path_from(std::env::var_os(CONFIG_DIR_ENV), std::env::var_os("HOME"))
}

fn preference_path_from(config_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = config_dir.filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(base).join(PREFERENCE_FILE));
    }
    let home = home.filter(|dir| !dir.is_empty())?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("nimbus-weather")
            .join(PREFERENCE_FILE),
    )
}

/// Reads the saved preference. A missing file is no preference; an unreadable
/// or corrupt one is logged and ignored.
#[must_use]
pub fn load_saved_location(path: &Path) -> Option<LocationFix> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "saved location unreadable");
            return None;
        }
    };
    match serde_json::from_str::<LocationFix>(&content) {
        Ok(fix) => Some(fix),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "saved location is corrupt");
            None
        }
    }
}

pub fn save_location(path: &Path, fix: &LocationFix) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating config directory failed")?;
    }
    let payload = serde_json::to_string_pretty(fix).context("serializing saved location failed")?;
    fs::write(path, payload).context("writing saved location failed")
}

pub fn clear_saved_location(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).context("removing saved location failed"),
    }
}

/// Saves a freshly resolved location for `--remember`. A location that was
/// itself loaded from the file is left alone. Failures only log.
pub fn remember_resolved(path: Option<&Path>, resolved: &ResolvedLocation) {
    if resolved.origin == LocationOrigin::Saved {
        return;
    }
    let Some(path) = path else {
        tracing::warn!("no config directory; location not saved");
        return;
    };
    match save_location(path, &resolved.fix) {
        Ok(()) => tracing::info!(path = %path.display(), "location saved"),
        Err(err) => tracing::warn!(error = %format!("{err:#}"), "saving location failed"),
    }
}
