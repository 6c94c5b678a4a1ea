use super::types::WorkoutSegment;
use crate::catalog::{Catalog, Category};
use crate::levels::Level;
use fastrand::Rng;
use tracing::{debug, warn};

/// Picks the shortest warmup or cooldown for a level so the main set keeps as
/// much of the budget as possible. A level with no entries yields a
/// zero-distance placeholder instead of failing.
pub fn select_minimal(
    catalog: &Catalog,
    category: Category,
    level: Level,
    rng: &mut Rng,
) -> WorkoutSegment {
    let entries = catalog.entries(category, level);

    // min_by_key keeps the first of equal keys, i.e. catalog order.
    let Some(entry) = entries
        .iter()
        .filter(|e| !e.variants.is_empty())
        .min_by_key(|e| e.distance)
    else {
        warn!("No {} entries for level '{}', using placeholder", category, level);
        return placeholder(category);
    };

    // Several entries may share the minimal distance in hand-built catalogs.
    let variants: Vec<&str> = entries
        .iter()
        .filter(|e| e.distance == entry.distance)
        .flat_map(|e| e.variants.iter().map(String::as_str))
        .collect();

    if variants.is_empty() {
        return placeholder(category);
    }

    let description = variants[rng.usize(..variants.len())].to_string();
    debug!("{} -> {} yds: {}", category, entry.distance, description);

    WorkoutSegment {
        distance: entry.distance,
        description,
    }
}

fn placeholder(category: Category) -> WorkoutSegment {
    WorkoutSegment {
        distance: 0,
        description: category.to_string(),
    }
}
