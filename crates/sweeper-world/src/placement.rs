//! Grid-aligned placement of world objects.
//!
//! Objects are laid out once at environment initialization: all mines first,
//! then super-mines, then rocks. Each coordinate is an independently drawn
//! cell index scaled by the cell size. Cells may be shared; nothing prevents
//! a rock from landing on a mine.
//!
//! Placement takes the RNG from the caller. [`place_seeded`] wraps a
//! `StdRng` so that one seed always reproduces the same layout.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use sweeper_types::ObjectKind;
use tracing::debug;

use crate::bounds::ArenaBounds;
use crate::error::WorldError;
use crate::object::WorldObject;

/// How many objects of each kind to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObjectCounts {
    /// Number of mines.
    pub mines: u32,
    /// Number of super-mines.
    pub super_mines: u32,
    /// Number of rocks.
    pub rocks: u32,
}

impl ObjectCounts {
    /// Count configured for `kind`.
    pub const fn of(&self, kind: ObjectKind) -> u32 {
        match kind {
            ObjectKind::Mine => self.mines,
            ObjectKind::SuperMine => self.super_mines,
            ObjectKind::Rock => self.rocks,
        }
    }

    /// Total number of objects across all kinds.
    pub const fn total(&self) -> u32 {
        self.mines
            .saturating_add(self.super_mines)
            .saturating_add(self.rocks)
    }
}

/// Place objects using the caller's RNG.
///
/// # Errors
///
/// Returns [`WorldError::ArithmeticOverflow`] if a cell origin cannot be
/// represented.
pub fn place_objects(
    bounds: &ArenaBounds,
    counts: ObjectCounts,
    rng: &mut impl Rng,
) -> Result<Vec<WorldObject>, WorldError> {
    let capacity = usize::try_from(counts.total()).unwrap_or(0);
    let mut objects = Vec::with_capacity(capacity);

    for kind in ObjectKind::ALL {
        for _ in 0..counts.of(kind) {
            let position = bounds.random_cell(rng)?;
            objects.push(WorldObject::new(kind, position));
        }
    }

    debug!(
        mines = counts.mines,
        super_mines = counts.super_mines,
        rocks = counts.rocks,
        "World objects placed"
    );

    Ok(objects)
}

/// Place objects from a fixed seed.
///
/// # Errors
///
/// See [`place_objects`].
pub fn place_seeded(
    bounds: &ArenaBounds,
    counts: ObjectCounts,
    seed: u64,
) -> Result<Vec<WorldObject>, WorldError> {
    let mut rng = StdRng::seed_from_u64(seed);
    place_objects(bounds, counts, &mut rng)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn counts() -> ObjectCounts {
        ObjectCounts {
            mines: 5,
            super_mines: 2,
            rocks: 3,
        }
    }

    #[test]
    fn places_every_kind_in_order() {
        let bounds = ArenaBounds::new(200, 200, 20).unwrap();
        let objects = place_seeded(&bounds, counts(), 42).unwrap();
        assert_eq!(objects.len(), 10);

        let kinds: Vec<ObjectKind> = objects.iter().map(WorldObject::kind).collect();
        assert!(kinds.iter().take(5).all(|k| *k == ObjectKind::Mine));
        assert!(kinds.iter().skip(5).take(2).all(|k| *k == ObjectKind::SuperMine));
        assert!(kinds.iter().skip(7).all(|k| *k == ObjectKind::Rock));
    }

    #[test]
    fn placed_objects_are_alive_and_aligned() {
        let bounds = ArenaBounds::new(200, 100, 20).unwrap();
        let objects = place_seeded(&bounds, counts(), 9).unwrap();
        for obj in &objects {
            assert!(obj.is_alive());
            assert!(bounds.contains(obj.position()));
            assert_eq!(obj.position().x % 20, 0);
            assert_eq!(obj.position().y % 20, 0);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let bounds = ArenaBounds::new(400, 400, 10).unwrap();
        let a = place_seeded(&bounds, counts(), 1234).unwrap();
        let b = place_seeded(&bounds, counts(), 1234).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_counts_place_nothing() {
        let bounds = ArenaBounds::new(100, 100, 10).unwrap();
        let objects = place_seeded(&bounds, ObjectCounts::default(), 0).unwrap();
        assert!(objects.is_empty());
    }
}
