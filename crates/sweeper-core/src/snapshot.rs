//! Read-only world snapshot for external renderers.

use sweeper_agents::Sweeper;
use sweeper_types::WorldSnapshot;
use sweeper_world::WorldObject;

use crate::arena::Arena;
use crate::clock::SimulationClock;

/// Copy the drawable state of `arena` at the clock's current position.
///
/// The first `elite_count` sweepers are flagged elite.
pub fn capture<A: Sweeper>(arena: &Arena<A>, clock: &SimulationClock) -> WorldSnapshot {
    let bounds = arena.bounds();
    WorldSnapshot {
        generation: clock.generation(),
        tick: clock.tick(),
        width: bounds.width(),
        height: bounds.height(),
        objects: arena.objects().iter().map(WorldObject::view).collect(),
        sweepers: arena
            .sweepers()
            .iter()
            .enumerate()
            .map(|(index, s)| s.view(arena.is_elite(index)))
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sweeper_agents::{GridSweeper, Scripted};
    use sweeper_types::{GridPosition, Heading, ObjectKind};
    use sweeper_world::{ArenaBounds, WorldObject};

    use super::*;

    #[test]
    fn elite_flags_cover_leading_sweepers() {
        let bounds = ArenaBounds::new(50, 50, 10).unwrap();
        let sweepers = (0..3)
            .map(|_| GridSweeper::new(bounds, GridPosition::new(0, 0), Heading::South, Scripted::new(Vec::new())))
            .collect();
        let mut objects = vec![WorldObject::new(ObjectKind::SuperMine, GridPosition::new(20, 30))];
        objects.first_mut().unwrap().die();

        let arena = Arena::new(bounds, sweepers, objects).unwrap().with_elite(2).unwrap();
        let clock = SimulationClock::from_parts(4, 9, 10).unwrap();
        let snap = capture(&arena, &clock);

        assert_eq!((snap.generation, snap.tick), (9, 4));
        assert_eq!((snap.width, snap.height), (50, 50));
        let elite: Vec<bool> = snap.sweepers.iter().map(|s| s.elite).collect();
        assert_eq!(elite, vec![true, true, false]);
        assert!(!snap.objects.first().unwrap().alive);
        assert_eq!(snap.objects.first().unwrap().kind, ObjectKind::SuperMine);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let bounds = ArenaBounds::new(20, 20, 10).unwrap();
        let sweeper = GridSweeper::new(bounds, GridPosition::new(10, 10), Heading::West, Scripted::new(Vec::new()));
        let arena = Arena::new(bounds, vec![sweeper], Vec::new()).unwrap();
        let clock = SimulationClock::new(1).unwrap();

        let json = serde_json::to_value(capture(&arena, &clock)).unwrap();
        assert_eq!(json["sweepers"][0]["heading"], "west");
        assert_eq!(json["sweepers"][0]["position"]["x"], 10);
    }
}
