use super::types::{Block, BlockKind, MainAllocation};
use crate::catalog::{DistanceEntry, Yards};
use fastrand::Rng;
use tracing::{debug, warn};

/// All description variants available at one distance.
pub(crate) struct Bucket<'a> {
    pub distance: Yards,
    pub variants: Vec<&'a str>,
}

impl Bucket<'_> {
    pub fn pick(&self, rng: &mut Rng) -> Option<&str> {
        if self.variants.is_empty() {
            None
        } else {
            Some(self.variants[rng.usize(..self.variants.len())])
        }
    }
}

/// Groups entries by distance, largest first. Zero-distance entries and
/// entries without descriptions are dropped.
pub(crate) fn buckets_descending(entries: &[DistanceEntry]) -> Vec<Bucket<'_>> {
    let mut buckets: Vec<Bucket<'_>> = Vec::new();
    for entry in entries
        .iter()
        .filter(|e| e.distance > 0 && !e.variants.is_empty())
    {
        let variants = entry.variants.iter().map(String::as_str);
        match buckets.iter_mut().find(|b| b.distance == entry.distance) {
            Some(bucket) => bucket.variants.extend(variants),
            None => buckets.push(Bucket {
                distance: entry.distance,
                variants: variants.collect(),
            }),
        }
    }
    buckets.sort_by(|a, b| b.distance.cmp(&a.distance));
    buckets
}

/// Fills `budget` yards largest-block-first: main-set blocks while any fits,
/// then filler blocks. Never exceeds the budget. Any residual smaller than the
/// smallest filler is left for the reconciler.
pub fn fill_main_set(
    main_entries: &[DistanceEntry],
    filler_entries: &[DistanceEntry],
    budget: i64,
    iteration_cap: usize,
    rng: &mut Rng,
) -> MainAllocation {
    let mut allocation = MainAllocation::new();
    if budget <= 0 {
        return allocation;
    }

    let phases = [
        (buckets_descending(main_entries), BlockKind::Main),
        (buckets_descending(filler_entries), BlockKind::Filler),
    ];

    let mut remaining = budget;
    let mut picks = 0usize;

    for (buckets, kind) in &phases {
        loop {
            let Some(bucket) = buckets.iter().find(|b| i64::from(b.distance) <= remaining) else {
                break;
            };
            if picks >= iteration_cap {
                warn!(
                    "Iteration cap ({}) reached with {} yds unallocated",
                    iteration_cap, remaining
                );
                return allocation;
            }
            let Some(description) = bucket.pick(rng) else {
                break;
            };

            allocation.push(Block::new(bucket.distance, description, *kind));
            remaining -= i64::from(bucket.distance);
            picks += 1;
            debug!(
                "greedy: +{} yds ({}) -> {} remaining",
                bucket.distance, kind, remaining
            );
        }
    }

    if remaining > 0 {
        debug!("greedy: {} yds residual", remaining);
    }
    allocation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Category};
    use crate::levels::Level;

    fn fill(level: Level, budget: i64) -> MainAllocation {
        let catalog = Catalog::builtin();
        let mut rng = Rng::with_seed(42);
        fill_main_set(
            catalog.entries(Category::MainSet, level),
            catalog.fillers(),
            budget,
            200,
            &mut rng,
        )
    }

    fn distances(main: &MainAllocation) -> Vec<Yards> {
        main.items().iter().map(|b| b.distance).collect()
    }

    #[test]
    fn test_non_positive_budget_is_empty() {
        assert!(fill(Level::Advanced, 0).is_empty());
        assert!(fill(Level::Advanced, -300).is_empty());
    }

    #[test]
    fn test_largest_first_then_fillers() {
        let main = fill(Level::Intermediate, 1287);
        assert_eq!(distances(&main), vec![1000, 100, 100, 50, 25]);
        assert_eq!(main.total(), 1275);
        assert_eq!(main.items()[0].kind, BlockKind::Main);
        assert!(main.items()[1..].iter().all(|b| b.kind == BlockKind::Filler));
    }

    #[test]
    fn test_repeats_largest_block() {
        let main = fill(Level::Beginner, 4500);
        assert_eq!(distances(&main), vec![2000, 2000, 500]);
    }

    #[test]
    fn test_budget_below_smallest_filler() {
        let main = fill(Level::Beginner, 20);
        assert!(main.is_empty());
    }

    #[test]
    fn test_iteration_cap_returns_partial() {
        let catalog = Catalog::builtin();
        let mut rng = Rng::with_seed(3);
        let main = fill_main_set(&[], catalog.fillers(), 1000, 4, &mut rng);
        assert_eq!(main.len(), 4);
        assert_eq!(main.total(), 400);
    }

    #[test]
    fn test_zero_distance_blocks_are_ignored() {
        let zero = vec![DistanceEntry::new(0, &["NOTHING"])];
        let mut rng = Rng::with_seed(3);
        let main = fill_main_set(&zero, &zero, 500, 200, &mut rng);
        assert!(main.is_empty());
    }

    #[test]
    fn test_blocks_without_descriptions_are_skipped() {
        let mains = vec![
            DistanceEntry::new(1000, &[]),
            DistanceEntry::new(500, &["5x100"]),
        ];
        let fillers = vec![DistanceEntry::new(100, &["100 SWIM"])];
        let mut rng = Rng::with_seed(3);
        let main = fill_main_set(&mains, &fillers, 1000, 200, &mut rng);
        assert_eq!(distances(&main), vec![500, 500]);
        assert!(main.items().iter().all(|b| b.kind == BlockKind::Main));
    }

    #[test]
    fn test_cap_not_hit_when_budget_used_exactly() {
        // Two picks use up 2500 exactly, so the cap of 2 is never exceeded.
        let catalog = Catalog::builtin();
        let mut rng = Rng::with_seed(3);
        let main = fill_main_set(
            catalog.entries(Category::MainSet, Level::Beginner),
            catalog.fillers(),
            2500,
            2,
            &mut rng,
        );
        assert_eq!(distances(&main), vec![2000, 500]);
    }

    #[test]
    fn test_equal_distances_share_variants() {
        let entries = vec![
            DistanceEntry::new(100, &["A"]),
            DistanceEntry::new(100, &["B"]),
        ];
        let buckets = buckets_descending(&entries);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].variants, vec!["A", "B"]);
    }
}
