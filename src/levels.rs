use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::warn;

/// Swimmer skill tier. Gates which catalog entries are visible.
#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Default,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Level {
    /// Maps free-form user input onto a level. Unknown input is not an error,
    /// it falls back to `default`.
    pub fn resolve(input: &str, default: Level) -> Level {
        match Level::from_str(input.trim()) {
            Ok(level) => level,
            Err(_) => {
                warn!(
                    "Unknown level '{}', falling back to '{}'",
                    input.trim(),
                    default
                );
                default
            }
        }
    }
}
