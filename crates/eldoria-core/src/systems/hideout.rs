//! Hideout Behavior
//!
//! Roster upkeep, recruitment and memory sharing between residents.

use bevy_ecs::prelude::*;
use eldoria_events::{HunterSkill, SimEventKind};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;

use super::update::emit;
use crate::components::{Hideout, Hunter, HunterBundle, HunterMemory};
use crate::config::SimConfig;
use crate::world::{free_cell_near, spawn_at, Grid};

/// Run one tick of a hideout. Hideouts stay on the grid for the whole run.
pub fn update_hideout<R: Rng + ?Sized>(world: &mut World, entity: Entity, rng: &mut R) -> bool {
    let Some(mut roster) = world.get::<Hideout>(entity).map(|h| h.hunters.clone()) else {
        return true;
    };
    roster.retain(|hunter| world.get::<Hunter>(*hunter).is_some());

    if let Some(recruit) = try_recruit(world, entity, &roster, rng) {
        roster.push(recruit);
    }

    share_memories(world, &roster);

    if let Some(mut hideout) = world.get_mut::<Hideout>(entity) {
        hideout.hunters = roster;
    }
    true
}

/// Maybe bring in a new hunter with a skill already present in the roster
fn try_recruit<R: Rng + ?Sized>(
    world: &mut World,
    entity: Entity,
    roster: &[Entity],
    rng: &mut R,
) -> Option<Entity> {
    let config = world.resource::<SimConfig>().clone();
    let capacity = world.get::<Hideout>(entity)?.capacity;
    if roster.len() < config.hideout.min_residents_to_recruit || roster.len() >= capacity {
        return None;
    }

    let skills: BTreeSet<HunterSkill> = roster
        .iter()
        .filter_map(|hunter| world.get::<Hunter>(*hunter).map(|h| h.skill))
        .collect();
    if skills.len() < config.hideout.min_distinct_skills {
        return None;
    }
    if rng.gen::<f64>() >= config.hideout.recruit_probability {
        return None;
    }

    let skills: Vec<HunterSkill> = skills.into_iter().collect();
    let skill = *skills.choose(rng)?;

    let grid = world.resource::<Grid>();
    let home = grid.position_of(entity)?;
    let Some(spot) = free_cell_near(grid, home) else {
        tracing::trace!(?entity, %home, "no room to recruit");
        return None;
    };

    let hunter = Hunter::new(skill).with_stamina(config.hunter.max_stamina);
    let recruit = spawn_at(world, HunterBundle::new(hunter), spot)?;
    tracing::debug!(hideout = %home, position = %spot, ?skill, "hunter recruited");
    emit(
        world,
        SimEventKind::HunterRecruited {
            hideout: home,
            position: spot,
            skill,
        },
    );
    Some(recruit)
}

/// Give every resident the union of all residents' memories
fn share_memories(world: &mut World, roster: &[Entity]) {
    if roster.len() < 2 {
        return;
    }

    let mut shared = HunterMemory::new();
    for hunter in roster {
        if let Some(memory) = world.get::<HunterMemory>(*hunter) {
            shared.merge(memory);
        }
    }
    for hunter in roster {
        if let Some(mut memory) = world.get_mut::<HunterMemory>(*hunter) {
            *memory = shared.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use crate::setup::create_world;
    use crate::systems::update::TickEvents;
    use eldoria_events::{Position, TreasureType};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn test_world(recruit_probability: f64) -> World {
        let mut config = SimConfig::default();
        config.hideout.recruit_probability = recruit_probability;
        let mut world = create_world(12, 12, config, SmallRng::seed_from_u64(2)).unwrap();
        world.resource_mut::<TickEvents>().begin(1);
        world
    }

    fn hideout_with(world: &mut World, pos: Position, skills: &[(HunterSkill, Position)]) -> Entity {
        let hideout = spawn_at(world, HideoutBundle::new(Hideout::default()), pos).unwrap();
        for (skill, at) in skills {
            let hunter = spawn_at(world, HunterBundle::new(Hunter::new(*skill)), *at).unwrap();
            world.get_mut::<Hideout>(hideout).unwrap().add_hunter(hunter);
        }
        hideout
    }

    fn roster(world: &World, hideout: Entity) -> Vec<Entity> {
        world.get::<Hideout>(hideout).unwrap().hunters.clone()
    }

    #[test]
    fn test_recruits_next_to_hideout() {
        let mut world = test_world(1.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let hideout = hideout_with(
            &mut world,
            Position::new(6, 6),
            &[
                (HunterSkill::Navigation, Position::new(0, 0)),
                (HunterSkill::Stealth, Position::new(1, 0)),
            ],
        );

        assert!(update_hideout(&mut world, hideout, &mut rng));

        let hunters = roster(&world, hideout);
        assert_eq!(hunters.len(), 3);
        let recruit = hunters[2];
        assert_eq!(world.resource::<Grid>().position_of(recruit), Some(Position::new(5, 5)));
        let skill = world.get::<Hunter>(recruit).unwrap().skill;
        assert!(matches!(skill, HunterSkill::Navigation | HunterSkill::Stealth));
        assert_eq!(world.resource::<TickEvents>().events()[0].kind.label(), "hunter_recruited");
    }

    #[test]
    fn test_single_skill_roster_never_recruits() {
        let mut world = test_world(1.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let hideout = hideout_with(
            &mut world,
            Position::new(6, 6),
            &[
                (HunterSkill::Endurance, Position::new(0, 0)),
                (HunterSkill::Endurance, Position::new(1, 0)),
            ],
        );

        for _ in 0..20 {
            update_hideout(&mut world, hideout, &mut rng);
        }
        assert_eq!(roster(&world, hideout).len(), 2);
    }

    #[test]
    fn test_full_hideout_never_recruits() {
        let mut world = test_world(1.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let skills: Vec<(HunterSkill, Position)> = (0..5)
            .map(|i| (HunterSkill::all()[i % 3], Position::new(i, 0)))
            .collect();
        let hideout = hideout_with(&mut world, Position::new(6, 6), &skills);

        update_hideout(&mut world, hideout, &mut rng);
        assert_eq!(roster(&world, hideout).len(), 5);
    }

    #[test]
    fn test_recruit_fails_silently_when_surrounded() {
        let mut world = test_world(1.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let hideout = hideout_with(
            &mut world,
            Position::new(6, 6),
            &[
                (HunterSkill::Navigation, Position::new(0, 0)),
                (HunterSkill::Stealth, Position::new(1, 0)),
            ],
        );
        let cells = world.resource::<Grid>().neighborhood(Position::new(6, 6), 1);
        for cell in cells {
            spawn_at(&mut world, TreasureBundle::new(Treasure::new(TreasureType::Bronze)), cell);
        }

        assert!(update_hideout(&mut world, hideout, &mut rng));
        assert_eq!(roster(&world, hideout).len(), 2);
    }

    #[test]
    fn test_dead_residents_are_pruned() {
        let mut world = test_world(0.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let hideout = hideout_with(
            &mut world,
            Position::new(6, 6),
            &[
                (HunterSkill::Navigation, Position::new(0, 0)),
                (HunterSkill::Stealth, Position::new(1, 0)),
            ],
        );
        crate::world::despawn_at(&mut world, Position::new(0, 0));

        update_hideout(&mut world, hideout, &mut rng);
        assert_eq!(roster(&world, hideout).len(), 1);
    }

    #[test]
    fn test_residents_share_memory() {
        let mut world = test_world(0.0);
        let mut rng = SmallRng::seed_from_u64(1);
        let hideout = hideout_with(
            &mut world,
            Position::new(6, 6),
            &[
                (HunterSkill::Navigation, Position::new(0, 0)),
                (HunterSkill::Stealth, Position::new(1, 0)),
            ],
        );
        let hunters = roster(&world, hideout);
        let seen = world.spawn_empty().id();
        world.get_mut::<HunterMemory>(hunters[0]).unwrap().treasures.insert(Position::new(9, 9), seen);
        world.get_mut::<HunterMemory>(hunters[1]).unwrap().hideouts.insert(Position::new(6, 6), hideout);

        update_hideout(&mut world, hideout, &mut rng);

        let a = world.get::<HunterMemory>(hunters[0]).unwrap();
        let b = world.get::<HunterMemory>(hunters[1]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.treasures.len(), 1);
        assert_eq!(a.hideouts.len(), 1);
    }
}
