//! Read-only settings file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context as _;
use booklog_core::Settings;

pub const SETTINGS_FILE: &str = "settings.json";

/// Loads settings from `path`. A missing file means defaults; keys absent from
/// the file keep their defaults.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("read settings {}", path.display()));
        }
    };

    let mut settings: Settings = serde_json::from_str(&raw)
        .with_context(|| format!("parse settings {}", path.display()))?;
    settings.normalize();
    Ok(settings)
}
