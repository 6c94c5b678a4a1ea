//! Drill injection: splices one drill block into an assembled main set.
//!
//! The search runs as a small state machine. Append candidates are offered
//! first, then suffix replacements. A candidate that lands at or under the
//! target settles the search immediately; a bounded overshoot is remembered as
//! a fallback. When the search ends without an immediate acceptance the best
//! fallback (smallest overshoot, first found on ties) is applied, otherwise
//! the allocation is left untouched.
//!
//! Every accepted candidate must be non-worsening (`|total - target|` does
//! not grow) and land on the rounding grid.

use super::types::{Block, BlockKind, MainAllocation};
use crate::catalog::{DistanceEntry, Yards};
use fastrand::Rng;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Placement {
    /// Drill appended after the last item.
    Append,
    /// The last `len` items are replaced by the drill.
    ReplaceSuffix { len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrillCandidate {
    pub placement: Placement,
    pub drill_distance: Yards,
    /// Total measured against the target after applying this candidate.
    pub total: Yards,
}

/// Terminal result of a drill search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DrillOutcome {
    Unchanged,
    AcceptedImmediate(DrillCandidate),
    AcceptedFallback(DrillCandidate),
}

impl DrillOutcome {
    pub fn applied(&self) -> Option<&DrillCandidate> {
        match self {
            Self::Unchanged => None,
            Self::AcceptedImmediate(c) | Self::AcceptedFallback(c) => Some(c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InjectorState {
    Searching { fallback: Option<DrillCandidate> },
    AcceptedImmediate(DrillCandidate),
    AcceptedFallback(DrillCandidate),
    Unchanged,
}

#[derive(Debug, Clone, Copy)]
struct Rules {
    current: Yards,
    target: Yards,
    rounding_unit: Yards,
    max_overshoot: Yards,
}

enum Verdict {
    Immediate,
    Fallback { overshoot: Yards },
    Reject,
}

impl Rules {
    fn judge(&self, total: Yards) -> Verdict {
        let gap_now = self.current.abs_diff(self.target);
        let gap_new = total.abs_diff(self.target);
        if gap_new > gap_now || self.rounding_unit == 0 || total % self.rounding_unit != 0 {
            return Verdict::Reject;
        }
        if total <= self.target {
            return Verdict::Immediate;
        }
        let overshoot = total - self.target;
        if overshoot <= self.max_overshoot {
            Verdict::Fallback { overshoot }
        } else {
            Verdict::Reject
        }
    }
}

impl InjectorState {
    fn is_searching(&self) -> bool {
        matches!(self, Self::Searching { .. })
    }

    fn offer(self, candidate: DrillCandidate, rules: &Rules) -> Self {
        let Self::Searching { fallback } = self else {
            return self;
        };
        match rules.judge(candidate.total) {
            Verdict::Immediate => Self::AcceptedImmediate(candidate),
            Verdict::Fallback { overshoot } => {
                let keep_old = fallback
                    .is_some_and(|old| old.total - rules.target <= overshoot);
                Self::Searching {
                    fallback: if keep_old { fallback } else { Some(candidate) },
                }
            }
            Verdict::Reject => self,
        }
    }

    /// Resolves a search that ran out of candidates.
    fn settle(self) -> Self {
        match self {
            Self::Searching {
                fallback: Some(candidate),
            } => Self::AcceptedFallback(candidate),
            Self::Searching { fallback: None } => Self::Unchanged,
            settled => settled,
        }
    }

    fn into_outcome(self) -> DrillOutcome {
        match self.settle() {
            Self::AcceptedImmediate(c) => DrillOutcome::AcceptedImmediate(c),
            Self::AcceptedFallback(c) => DrillOutcome::AcceptedFallback(c),
            _ => DrillOutcome::Unchanged,
        }
    }
}

/// Searches for a drill placement and applies it to `main`.
///
/// `fixed` is the distance outside the main set that counts toward `target`.
/// Drills are tried in catalog key order. Warmup and cooldown are never
/// touched.
pub fn inject_drill(
    main: &mut MainAllocation,
    fixed: Yards,
    target: Yards,
    drills: &[DistanceEntry],
    rounding_unit: Yards,
    max_overshoot: Yards,
    rng: &mut Rng,
) -> DrillOutcome {
    let outcome = search(main, fixed, target, drills, rounding_unit, max_overshoot);

    if let Some(candidate) = outcome.applied() {
        let description = drills
            .iter()
            .filter(|e| e.distance == candidate.drill_distance)
            .find_map(|e| e.pick_variant(rng))
            .unwrap_or("DRILL")
            .to_string();
        let block = Block::new(candidate.drill_distance, description, BlockKind::Drill);
        match candidate.placement {
            Placement::Append => main.push(block),
            Placement::ReplaceSuffix { len } => main.replace_suffix(len, block),
        }
        debug!("drills: applied {:?}", outcome);
    } else {
        debug!("drills: no qualifying placement, allocation unchanged");
    }

    outcome
}

/// Pure search over placements; does not mutate the allocation.
pub fn search(
    main: &MainAllocation,
    fixed: Yards,
    target: Yards,
    drills: &[DistanceEntry],
    rounding_unit: Yards,
    max_overshoot: Yards,
) -> DrillOutcome {
    let current = fixed + main.total();
    let rules = Rules {
        current,
        target,
        rounding_unit,
        max_overshoot,
    };

    // Already on target: nothing can be non-worsening and still change the set.
    let mut state = if current == target {
        InjectorState::Unchanged
    } else {
        InjectorState::Searching { fallback: None }
    };

    let drill_distances: Vec<Yards> = drills
        .iter()
        .filter(|e| e.distance > 0 && !e.variants.is_empty())
        .map(|e| e.distance)
        .collect();

    for &d in &drill_distances {
        if !state.is_searching() {
            break;
        }
        state = state.offer(
            DrillCandidate {
                placement: Placement::Append,
                drill_distance: d,
                total: current + d,
            },
            &rules,
        );
    }

    'replace: for &d in &drill_distances {
        for len in 1..=main.len() {
            if !state.is_searching() {
                break 'replace;
            }
            let suffix = main.suffix_sum(len);
            if suffix < d {
                continue;
            }
            state = state.offer(
                DrillCandidate {
                    placement: Placement::ReplaceSuffix { len },
                    drill_distance: d,
                    total: current - suffix + d,
                },
                &rules,
            );
        }
    }

    state.into_outcome()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alloc(distances: &[Yards]) -> MainAllocation {
        let mut main = MainAllocation::new();
        for &d in distances {
            main.push(Block::new(d, format!("{} SWIM", d), BlockKind::Filler));
        }
        main
    }

    fn drills(distances: &[Yards]) -> Vec<DistanceEntry> {
        distances
            .iter()
            .map(|&d| DistanceEntry::new(d, &["DRILL X"]))
            .collect()
    }

    #[test]
    fn test_on_target_is_unchanged() {
        let main = alloc(&[1000, 200]);
        let out = search(&main, 300, 1500, &drills(&[200, 400]), 50, 100);
        assert_eq!(out, DrillOutcome::Unchanged);
    }

    #[test]
    fn test_append_accepted_immediately() {
        let main = alloc(&[1000]);
        let out = search(&main, 250, 1500, &drills(&[200, 400]), 50, 100);
        assert_eq!(
            out,
            DrillOutcome::AcceptedImmediate(DrillCandidate {
                placement: Placement::Append,
                drill_distance: 200,
                total: 1450,
            })
        );
    }

    #[test]
    fn test_append_keeps_catalog_order() {
        // Both fit under the target; the first in catalog order wins.
        let main = alloc(&[500]);
        let out = search(&main, 0, 1000, &drills(&[400, 200]), 50, 100);
        assert_eq!(out.applied().map(|c| c.drill_distance), Some(400));
    }

    #[test]
    fn test_suffix_replacement_fallback() {
        // 1550 vs 1537: only a same-size swap of the 200-yd tail qualifies.
        let main = alloc(&[1000, 100, 100, 50, 25, 25]);
        let out = search(&main, 250, 1537, &drills(&[200, 400]), 50, 100);
        assert_eq!(
            out,
            DrillOutcome::AcceptedFallback(DrillCandidate {
                placement: Placement::ReplaceSuffix { len: 4 },
                drill_distance: 200,
                total: 1550,
            })
        );
    }

    #[test]
    fn test_overshoot_beyond_bound_rejected() {
        // Appending 200 to 1400 for a 1450 target lands 150 over.
        let main = alloc(&[1400]);
        let out = search(&main, 0, 1450, &drills(&[200]), 50, 100);
        assert_eq!(out, DrillOutcome::Unchanged);
    }

    #[test]
    fn test_off_grid_candidate_rejected() {
        let main = alloc(&[1000]);
        let out = search(&main, 0, 1400, &drills(&[175]), 50, 100);
        assert_eq!(out, DrillOutcome::Unchanged);
    }

    #[test]
    fn test_inject_applies_and_keeps_total_consistent() {
        let mut main = alloc(&[1000, 100, 100, 50, 25, 25]);
        let mut rng = Rng::with_seed(5);
        let out = inject_drill(&mut main, 250, 1537, &drills(&[200]), 50, 100, &mut rng);
        assert!(matches!(out, DrillOutcome::AcceptedFallback(_)));
        assert!(main.is_consistent());
        assert_eq!(main.total(), 1300);
        assert_eq!(main.items().last().map(|b| b.kind), Some(BlockKind::Drill));
    }

    #[test]
    fn test_fallback_prefers_smaller_overshoot() {
        // current 1370, target 1440 (gap 70). Append 130 -> 1500 (over 60),
        // append 80 -> 1450 (over 10). The later, tighter one wins.
        let main = alloc(&[1300, 70]);
        let out = search(&main, 0, 1440, &drills(&[130, 80]), 50, 100);
        assert_eq!(
            out,
            DrillOutcome::AcceptedFallback(DrillCandidate {
                placement: Placement::Append,
                drill_distance: 80,
                total: 1450,
            })
        );
    }

    #[test]
    fn test_worsening_candidates_rejected() {
        // current 1400, target 1420 (gap 20): 1450 and 1350 both move away.
        let main = alloc(&[1300, 100]);
        let out = search(&main, 0, 1420, &drills(&[50]), 50, 100);
        assert_eq!(out, DrillOutcome::Unchanged);
    }
}
