use crate::catalog::Yards;
use crate::levels::Level;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::drills::DrillOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BlockKind {
    Main,
    Filler,
    Drill,
}

/// One chosen block of the main set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub distance: Yards,
    pub description: String,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(distance: Yards, description: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            distance,
            description: description.into(),
            kind,
        }
    }
}

/// The chosen warmup or cooldown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSegment {
    pub distance: Yards,
    pub description: String,
}

/// Ordered main-set items plus their running total.
///
/// The total is maintained by every mutator, so `total() == sum(items)` holds
/// at every observation point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MainAllocation {
    total_distance: Yards,
    items: Vec<Block>,
}

impl MainAllocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> Yards {
        self.total_distance
    }

    pub fn items(&self) -> &[Block] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, block: Block) {
        self.total_distance += block.distance;
        self.items.push(block);
    }

    /// Summed distance of the last `len` items.
    pub fn suffix_sum(&self, len: usize) -> Yards {
        let start = self.items.len().saturating_sub(len);
        self.items[start..].iter().map(|b| b.distance).sum()
    }

    /// Drops the last `len` items and appends `block` in their place.
    pub fn replace_suffix(&mut self, len: usize, block: Block) {
        let start = self.items.len().saturating_sub(len);
        let removed: Yards = self.items.drain(start..).map(|b| b.distance).sum();
        self.total_distance -= removed;
        self.push(block);
    }

    pub fn is_consistent(&self) -> bool {
        self.items.iter().map(|b| b.distance).sum::<Yards>() == self.total_distance
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case")]
pub enum AllocationMode {
    /// Target is warmup + main + cooldown combined
    GrandTotal,
    /// Target is the main set alone; warmup and cooldown sit on top
    MainOnly,
}

/// A fully assembled workout. A `None` segment was dropped to fit the target.
#[derive(Debug, Clone, Serialize)]
pub struct Workout {
    pub level: Level,
    pub mode: AllocationMode,
    pub target: Yards,
    pub warmup: Option<WorkoutSegment>,
    pub main: MainAllocation,
    pub cooldown: Option<WorkoutSegment>,
    /// `None` when drills were not requested.
    pub drill: Option<DrillOutcome>,
}

impl Workout {
    pub fn warmup_distance(&self) -> Yards {
        self.warmup.as_ref().map_or(0, |s| s.distance)
    }

    pub fn cooldown_distance(&self) -> Yards {
        self.cooldown.as_ref().map_or(0, |s| s.distance)
    }

    pub fn grand_total(&self) -> Yards {
        self.warmup_distance() + self.main.total() + self.cooldown_distance()
    }

    /// The distance the target is measured against: the main set alone in
    /// main-only mode, everything otherwise.
    pub fn achieved(&self) -> Yards {
        match self.mode {
            AllocationMode::GrandTotal => self.grand_total(),
            AllocationMode::MainOnly => self.main.total(),
        }
    }

    /// Signed difference `achieved - target`. Positive means overshoot.
    pub fn distance_from_target(&self) -> i64 {
        self.achieved() as i64 - self.target as i64
    }
}
