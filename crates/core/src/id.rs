use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng as _;
use serde::{Deserialize, Serialize};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const FALLBACK_RANDOM_LEN: usize = 7;

/// Opaque identifier of a book record. Assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookId(String);

impl BookId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BookId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Where fresh book ids come from.
///
/// `Fallback` mirrors a time + random suffix scheme. It is not guaranteed to be
/// globally unique and exists for environments without a usable random UUID
/// source; `Library` still rejects duplicates inside one collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdSource {
    #[default]
    Uuid,
    Fallback,
}

impl IdSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdSource::Uuid => "uuid",
            IdSource::Fallback => "fallback",
        }
    }

    pub fn generate(&self) -> BookId {
        match self {
            IdSource::Uuid => BookId(uuid::Uuid::new_v4().to_string()),
            IdSource::Fallback => fallback_id(),
        }
    }
}

impl std::fmt::Display for IdSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IdSource {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "uuid" => Ok(IdSource::Uuid),
            "fallback" => Ok(IdSource::Fallback),
            _ => Err("unknown id source"),
        }
    }
}

fn fallback_id() -> BookId {
    let mut rng = rand::thread_rng();
    let random: String = (0..FALLBACK_RANDOM_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    BookId(format!("id-{random}-{}", to_base36(millis)))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}
