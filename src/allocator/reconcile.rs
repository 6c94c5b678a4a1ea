use super::greedy::buckets_descending;
use super::types::{Block, BlockKind, MainAllocation};
use crate::catalog::{DistanceEntry, Yards};
use fastrand::Rng;
use tracing::debug;

/// Closes an undershoot with a single filler block.
///
/// `fixed` is the distance outside the main set that counts toward `target`
/// (warmup + cooldown, or 0 when only the main set is measured). Fillers are
/// searched in ascending distance; a filler qualifies when the new total
/// reaches `target` and lands on the `rounding_unit` grid. The smallest
/// overshoot wins, ties going to the smaller filler. Returns the added
/// distance, or `None` when the shortfall is left as-is.
pub fn close_shortfall(
    main: &mut MainAllocation,
    fixed: Yards,
    target: Yards,
    fillers: &[DistanceEntry],
    rounding_unit: Yards,
    rng: &mut Rng,
) -> Option<Yards> {
    let achieved = fixed + main.total();
    if achieved >= target || rounding_unit == 0 {
        return None;
    }

    let mut ascending = buckets_descending(fillers);
    ascending.reverse();

    let mut best: Option<(Yards, usize)> = None;
    for (idx, bucket) in ascending.iter().enumerate() {
        let candidate = achieved + bucket.distance;
        if candidate < target || candidate % rounding_unit != 0 {
            continue;
        }
        let overshoot = candidate - target;
        if best.map_or(true, |(best_over, _)| overshoot < best_over) {
            best = Some((overshoot, idx));
        }
    }

    let Some((overshoot, idx)) = best else {
        debug!(
            "reconcile: no filler lands {} yds on the {}-yd grid, keeping shortfall",
            achieved, rounding_unit
        );
        return None;
    };

    let bucket = &ascending[idx];
    let description = bucket.pick(rng)?;
    main.push(Block::new(bucket.distance, description, BlockKind::Filler));
    debug!(
        "reconcile: +{} yds filler, {} -> {} (overshoot {})",
        bucket.distance,
        achieved,
        achieved + bucket.distance,
        overshoot
    );
    Some(bucket.distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn main_of(total: Yards) -> MainAllocation {
        let mut main = MainAllocation::new();
        main.push(Block::new(total, "BASE", BlockKind::Main));
        main
    }

    fn run(main: &mut MainAllocation, fixed: Yards, target: Yards) -> Option<Yards> {
        let catalog = Catalog::builtin();
        let mut rng = Rng::with_seed(11);
        close_shortfall(main, fixed, target, catalog.fillers(), 50, &mut rng)
    }

    #[test]
    fn test_rounds_up_to_grid_with_smallest_filler() {
        // 1525 achieved, 1537 wanted: +25 gives 1550 (overshoot 13).
        let mut main = main_of(1275);
        assert_eq!(run(&mut main, 250, 1537), Some(25));
        assert_eq!(main.total() + 250, 1550);
        assert!(main.is_consistent());
    }

    #[test]
    fn test_prefers_minimal_overshoot_over_first_fit() {
        // 1500 achieved, 1510 wanted: 25 -> 1525 off grid, 50 -> 1550 (40), 100 -> 1600 (90).
        let mut main = main_of(1500);
        assert_eq!(run(&mut main, 0, 1510), Some(50));
    }

    #[test]
    fn test_no_action_when_target_met() {
        let mut main = main_of(1000);
        assert_eq!(run(&mut main, 0, 1000), None);
        assert_eq!(run(&mut main, 0, 900), None);
        assert_eq!(main.len(), 1);
    }

    #[test]
    fn test_shortfall_kept_when_nothing_qualifies() {
        // Gap larger than every filler.
        let mut main = main_of(1000);
        assert_eq!(run(&mut main, 0, 1300), None);
        assert_eq!(main.total(), 1000);
    }

    #[test]
    fn test_off_grid_base_cannot_be_fixed() {
        // 1013 + {25, 50, 100} never lands on a multiple of 50.
        let mut main = main_of(1013);
        assert_eq!(run(&mut main, 0, 1020), None);
    }
}
