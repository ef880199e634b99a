//! Core domain types for Booklog.

use serde::{Deserialize, Serialize};

mod id;
mod library;

pub use id::{BookId, IdSource};
pub use library::{Book, Library};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub seed_samples: bool,
    pub id_source: IdSource,
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err("unknown theme"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            seed_samples: true,
            id_source: IdSource::Uuid,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        let level = self.log_level.trim().to_ascii_lowercase();
        self.log_level = if LOG_LEVELS.contains(&level.as_str()) {
            level
        } else {
            "info".to_string()
        };
    }
}

/// Coerces free-form page input to a count.
///
/// Parses the leading run of digits (an optional `+` is allowed), so `"12abc"`
/// is 12. Anything without leading digits, negative input, and values past
/// `u32::MAX` become 0.
pub fn parse_page_count(input: &str) -> u32 {
    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..digits_end].parse::<u32>().unwrap_or(0)
}
