//! Read-only block catalog: `level -> distance -> description variants`,
//! kept separately for warmups, cooldowns, drills and main sets, plus a
//! level-independent table of small filler blocks.
//!
//! Tables are ordered vectors rather than maps so that the authored key order
//! survives loading. The drill injector iterates drills in that order.

mod builtin;

use crate::error::{SwimError, SwimResult};
use crate::levels::Level;
use fastrand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use strum_macros::{Display, EnumIter};
use tracing::info;

/// Distances are whole yards.
pub type Yards = u32;

pub type LevelTable = BTreeMap<Level, Vec<DistanceEntry>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub distance: Yards,
    pub variants: Vec<String>,
}

impl DistanceEntry {
    pub fn new(distance: Yards, variants: &[&str]) -> Self {
        Self {
            distance,
            variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Uniform pick among the interchangeable descriptions of this distance.
    pub fn pick_variant(&self, rng: &mut Rng) -> Option<&str> {
        if self.variants.is_empty() {
            return None;
        }
        let idx = rng.usize(..self.variants.len());
        Some(self.variants[idx].as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Category {
    Warmup,
    MainSet,
    Drill,
    Cooldown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub warmups: LevelTable,
    pub cooldowns: LevelTable,
    pub drills: LevelTable,
    pub main_sets: LevelTable,
    pub fillers: Vec<DistanceEntry>,
}

static SHARED: OnceLock<Arc<Catalog>> = OnceLock::new();

impl Catalog {
    /// The standard swim catalog compiled into the binary.
    pub fn builtin() -> Self {
        builtin::build()
    }

    /// Process-wide built-in catalog, initialised on first use.
    pub fn shared() -> Arc<Catalog> {
        SHARED.get_or_init(|| Arc::new(Catalog::builtin())).clone()
    }

    pub fn from_json_str(content: &str) -> SwimResult<Self> {
        let catalog: Catalog = serde_json::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SwimResult<Self> {
        let path = path.as_ref();
        info!("📂 Loading catalog from: {}", path.display());
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            "Catalog loaded: {} main-set levels, {} fillers",
            catalog.main_sets.len(),
            catalog.fillers.len()
        );
        Ok(catalog)
    }

    /// Structural checks for externally supplied catalogs. Missing levels and
    /// categories are allowed; the allocator degrades around them.
    pub fn validate(&self) -> SwimResult<()> {
        let tables = [
            (Category::Warmup, &self.warmups),
            (Category::Cooldown, &self.cooldowns),
            (Category::Drill, &self.drills),
            (Category::MainSet, &self.main_sets),
        ];

        for (category, table) in tables {
            for (level, entries) in table {
                for entry in entries {
                    check_entry(entry, &format!("{} / {}", category, level))?;
                }
            }
        }
        for entry in &self.fillers {
            check_entry(entry, "filler")?;
        }
        Ok(())
    }

    pub fn table(&self, category: Category) -> &LevelTable {
        match category {
            Category::Warmup => &self.warmups,
            Category::Cooldown => &self.cooldowns,
            Category::Drill => &self.drills,
            Category::MainSet => &self.main_sets,
        }
    }

    /// Entries for a level in catalog key order. Empty when the level is absent.
    pub fn entries(&self, category: Category, level: Level) -> &[DistanceEntry] {
        self.table(category)
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_level(&self, category: Category, level: Level) -> bool {
        !self.entries(category, level).is_empty()
    }

    pub fn fillers(&self) -> &[DistanceEntry] {
        &self.fillers
    }
}

fn check_entry(entry: &DistanceEntry, location: &str) -> SwimResult<()> {
    if entry.distance == 0 {
        return Err(SwimError::Validation(format!(
            "{}: zero-distance block",
            location
        )));
    }
    if entry.variants.is_empty() {
        return Err(SwimError::Validation(format!(
            "{}: distance {} has no descriptions",
            location, entry.distance
        )));
    }
    Ok(())
}
