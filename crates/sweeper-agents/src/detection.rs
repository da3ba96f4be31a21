//! Detection geometry shared by sweeper implementations.
//!
//! Rule: the nearest live object whose Euclidean distance from the sweeper
//! is at most `scale`. Equal distances go to the lowest index.

use sweeper_types::{GridPosition, ObjectKind};
use sweeper_world::WorldObject;

/// Index of the nearest live object within `scale` of `origin`.
///
/// Returns `None` for a negative or non-finite `scale`.
#[allow(clippy::cast_precision_loss)]
pub fn nearest_within(origin: GridPosition, objects: &[WorldObject], scale: f64) -> Option<usize> {
    if !scale.is_finite() || scale < 0.0 {
        return None;
    }
    let limit = scale * scale;

    nearest_matching(origin, objects, |_| true)
        .filter(|&(_, dist_sq)| (dist_sq as f64) <= limit)
        .map(|(index, _)| index)
}

/// Position of the nearest live object of `kind`, relative to `origin`.
pub fn nearest_offset(
    origin: GridPosition,
    objects: &[WorldObject],
    kind: ObjectKind,
) -> Option<(i32, i32)> {
    let (index, _) = nearest_matching(origin, objects, |obj| obj.kind() == kind)?;
    let target = objects.get(index)?.position();
    Some((
        target.x.saturating_sub(origin.x),
        target.y.saturating_sub(origin.y),
    ))
}

/// Nearest live object passing `filter`, with its squared distance.
fn nearest_matching(
    origin: GridPosition,
    objects: &[WorldObject],
    filter: impl Fn(&WorldObject) -> bool,
) -> Option<(usize, i64)> {
    let mut best: Option<(usize, i64)> = None;
    for (index, obj) in objects.iter().enumerate() {
        if !obj.is_alive() || !filter(obj) {
            continue;
        }
        let dist_sq = origin.distance_squared(obj.position());
        // Strict comparison keeps the lowest index on ties.
        if best.is_none_or(|(_, best_sq)| dist_sq < best_sq) {
            best = Some((index, dist_sq));
        }
    }
    best
}
