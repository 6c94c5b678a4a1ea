pub mod drills;
pub mod greedy;
pub mod reconcile;
pub mod segment;
pub mod types;

pub use self::drills::{DrillCandidate, DrillOutcome, Placement};
pub use self::types::{AllocationMode, Block, BlockKind, MainAllocation, Workout, WorkoutSegment};

use crate::catalog::{Catalog, Category, DistanceEntry, Yards};
use crate::config::Config;
use crate::levels::Level;
use fastrand::Rng;
use std::sync::Arc;
use tracing::{info, warn};

/// Yardage-matching allocation engine.
///
/// Holds a shared read-only catalog and the allocation parameters. Each call
/// is independent; the only mutable input is the caller's random source, so a
/// seeded `Rng` makes results reproducible.
pub struct Allocator {
    catalog: Arc<Catalog>,
    config: Config,
}

impl Allocator {
    pub fn new(catalog: Arc<Catalog>, config: Config) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Case-insensitive level lookup with fallback to the configured default.
    pub fn resolve_level(&self, input: &str) -> Level {
        Level::resolve(input, self.config.allocation.default_level)
    }

    /// `target_main` covers the main set only. Warmup and cooldown are added
    /// on top and never dropped.
    pub fn allocate_main_only(&self, level: Level, target_main: Yards, rng: &mut Rng) -> Workout {
        let params = &self.config.allocation;

        let warmup = segment::select_minimal(&self.catalog, Category::Warmup, level, rng);
        let cooldown = segment::select_minimal(&self.catalog, Category::Cooldown, level, rng);

        let mut main = greedy::fill_main_set(
            self.main_entries(level),
            self.catalog.fillers(),
            i64::from(target_main),
            params.iteration_cap,
            rng,
        );
        reconcile::close_shortfall(
            &mut main,
            0,
            target_main,
            self.catalog.fillers(),
            params.rounding_unit,
            rng,
        );

        let workout = Workout {
            level,
            mode: AllocationMode::MainOnly,
            target: target_main,
            warmup: Some(warmup),
            main,
            cooldown: Some(cooldown),
            drill: None,
        };
        log_summary(&workout);
        workout
    }

    /// `target_total` covers warmup + main + cooldown. Segments that do not
    /// fit are dropped, warmup first.
    pub fn allocate_grand_total(
        &self,
        level: Level,
        target_total: Yards,
        include_drills: bool,
        rng: &mut Rng,
    ) -> Workout {
        let params = &self.config.allocation;

        let warmup = segment::select_minimal(&self.catalog, Category::Warmup, level, rng);
        let cooldown = segment::select_minimal(&self.catalog, Category::Cooldown, level, rng);
        let (warmup, cooldown, budget) = fit_segments(target_total, warmup, cooldown);

        let fixed = warmup.as_ref().map_or(0, |s| s.distance)
            + cooldown.as_ref().map_or(0, |s| s.distance);

        let mut main = greedy::fill_main_set(
            self.main_entries(level),
            self.catalog.fillers(),
            budget,
            params.iteration_cap,
            rng,
        );
        reconcile::close_shortfall(
            &mut main,
            fixed,
            target_total,
            self.catalog.fillers(),
            params.rounding_unit,
            rng,
        );

        let drill = include_drills.then(|| {
            drills::inject_drill(
                &mut main,
                fixed,
                target_total,
                self.level_entries(Category::Drill, level),
                params.rounding_unit,
                self.config.drills.max_drill_overshoot,
                rng,
            )
        });

        let workout = Workout {
            level,
            mode: AllocationMode::GrandTotal,
            target: target_total,
            warmup,
            main,
            cooldown,
            drill,
        };
        log_summary(&workout);
        workout
    }

    pub fn allocate(
        &self,
        mode: AllocationMode,
        level: Level,
        target: Yards,
        include_drills: bool,
        rng: &mut Rng,
    ) -> Workout {
        match mode {
            AllocationMode::MainOnly => self.allocate_main_only(level, target, rng),
            AllocationMode::GrandTotal => {
                self.allocate_grand_total(level, target, include_drills, rng)
            }
        }
    }

    fn main_entries(&self, level: Level) -> &[DistanceEntry] {
        self.level_entries(Category::MainSet, level)
    }

    /// Entries for `level`, or for the default level when the catalog has none.
    fn level_entries(&self, category: Category, level: Level) -> &[DistanceEntry] {
        if self.catalog.has_level(category, level) {
            return self.catalog.entries(category, level);
        }
        let fallback = self.config.allocation.default_level;
        warn!(
            "No {} entries for '{}', using default level '{}'",
            category, level, fallback
        );
        self.catalog.entries(category, fallback)
    }
}

/// Drops warmup, then cooldown, until the remaining main-set budget is
/// non-negative. Returns the kept segments and that budget.
fn fit_segments(
    target: Yards,
    warmup: WorkoutSegment,
    cooldown: WorkoutSegment,
) -> (Option<WorkoutSegment>, Option<WorkoutSegment>, i64) {
    let target = i64::from(target);
    let w = i64::from(warmup.distance);
    let c = i64::from(cooldown.distance);

    if target - w - c >= 0 {
        return (Some(warmup), Some(cooldown), target - w - c);
    }
    warn!("Target {} yds too short for warmup, dropping it", target);
    if target - c >= 0 {
        return (None, Some(cooldown), target - c);
    }
    warn!("Target {} yds too short for cooldown, dropping it", target);
    (None, None, target)
}

fn log_summary(workout: &Workout) {
    info!(
        "Allocated {} workout ({}): {} yds vs target {} ({:+})",
        workout.level,
        workout.mode,
        workout.achieved(),
        workout.target,
        workout.distance_from_target()
    );
}
