use crate::allocator::{AllocationMode, Allocator, Workout};
use crate::catalog::{Catalog, Yards};
use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Target used when a yard range cannot be read.
pub const DEFAULT_TARGET_YARDS: Yards = 1000;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRequest {
    pub level: String,
    pub target: Yards,
    pub mode: AllocationMode,
    #[serde(default)]
    pub include_drills: bool,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Reads a yard target from user text.
///
/// `"1000"` is taken as-is, `"500-1500"` becomes the midpoint, both clamped
/// to at least 1. Empty or unreadable input gives [`DEFAULT_TARGET_YARDS`].
pub fn parse_yard_range(input: &str) -> Yards {
    let s = input.trim();
    if s.is_empty() {
        return DEFAULT_TARGET_YARDS;
    }

    let parsed = match s.split_once('-') {
        Some((lo, hi)) => match (lo.trim().parse::<i64>(), hi.trim().parse::<i64>()) {
            (Ok(lo), Ok(hi)) => Some((lo + hi) / 2),
            _ => None,
        },
        None => s.parse::<i64>().ok(),
    };

    match parsed {
        Some(yards) => Yards::try_from(yards.max(1)).unwrap_or(Yards::MAX),
        None => DEFAULT_TARGET_YARDS,
    }
}

/// Service entry: resolves the level, seeds the random source and runs the
/// requested allocation mode.
pub fn generate_workout(catalog: Arc<Catalog>, config: Config, request: &WorkoutRequest) -> Workout {
    let allocator = Allocator::new(catalog, config);
    let level = allocator.resolve_level(&request.level);

    let mut rng = match request.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    debug!("generate_workout: {:?} -> level {}", request, level);

    allocator.allocate(
        request.mode,
        level,
        request.target,
        request.include_drills,
        &mut rng,
    )
}
