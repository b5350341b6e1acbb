//! World Creation
//!
//! Builds an ECS world around an empty grid and seeds it with hideouts,
//! hunters, treasures and knights.

use bevy_ecs::prelude::*;
use eldoria_events::{HunterSkill, Position, TreasureType};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::components::{
    Hideout, HideoutBundle, Hunter, HunterBundle, Knight, KnightBundle, Treasure, TreasureBundle,
};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::systems::{SimulationState, TickEvents};
use crate::world::{spawn_at, Grid};
use crate::SimRng;

/// How many of each entity kind were placed at seeding time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub hideouts: usize,
    pub hunters: usize,
    pub treasures: usize,
    pub knights: usize,
}

/// Create a world holding an empty grid and every resource the tick loop needs
pub fn create_world(
    width: usize,
    height: usize,
    config: SimConfig,
    rng: SmallRng,
) -> Result<World, SimError> {
    if width == 0 || height == 0 {
        return Err(SimError::InvalidDimensions { width, height });
    }
    config.validate()?;

    let mut world = World::new();
    world.insert_resource(Grid::new(width, height));
    world.insert_resource(config);
    world.insert_resource(SimRng(rng));
    world.insert_resource(SimulationState::default());
    world.insert_resource(TickEvents::new());
    Ok(world)
}

/// Pick a random empty cell: `attempts` blind probes first, then a uniform
/// choice among all empty cells.
pub fn random_empty_position<R: Rng + ?Sized>(
    grid: &Grid,
    rng: &mut R,
    attempts: usize,
    what: &'static str,
) -> Result<Position, SimError> {
    for _ in 0..attempts {
        let pos = Position::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
        if grid.is_empty(pos) {
            return Ok(pos);
        }
    }
    grid.empty_cells()
        .choose(rng)
        .copied()
        .ok_or(SimError::GridSaturated {
            width: grid.width(),
            height: grid.height(),
            what,
        })
}

/// Seed the world: hideouts with their starting hunters, then treasures,
/// then knights in proportion to the hunters.
pub fn populate<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> Result<SeedSummary, SimError> {
    let config = world
        .get_resource::<SimConfig>()
        .cloned()
        .ok_or(SimError::MissingResource("SimConfig"))?;
    let (width, height) = {
        let grid = world.get_resource::<Grid>().ok_or(SimError::MissingResource("Grid"))?;
        (grid.width(), grid.height())
    };
    let attempts = config.world.placement_attempts;
    let mut summary = SeedSummary::default();

    // Hideouts and their residents
    let hideout_count = rng.gen_range(config.world.min_hideouts..=config.world.max_hideouts);
    for _ in 0..hideout_count {
        let pos = random_empty_position(world.resource::<Grid>(), rng, attempts, "hideout")?;
        let hideout = spawn_at(world, HideoutBundle::new(Hideout::new(config.hideout.capacity)), pos)
            .ok_or(SimError::GridSaturated { width, height, what: "hideout" })?;
        summary.hideouts += 1;

        let residents = rng.gen_range(
            config.world.min_hunters_per_hideout..=config.world.max_hunters_per_hideout,
        );
        for _ in 0..residents {
            let skill = random_skill(rng);
            let spot = match free_cell_around(world.resource::<Grid>(), pos, rng) {
                Some(spot) => spot,
                None => random_empty_position(world.resource::<Grid>(), rng, attempts, "hunter")?,
            };
            let hunter = Hunter::new(skill).with_stamina(config.hunter.max_stamina);
            let entity = spawn_at(world, HunterBundle::new(hunter), spot)
                .ok_or(SimError::GridSaturated { width, height, what: "hunter" })?;
            if let Some(mut roster) = world.get_mut::<Hideout>(hideout) {
                roster.add_hunter(entity);
            }
            summary.hunters += 1;
        }
    }

    // Treasures
    let cells = (width * height) as f64;
    let min_treasures = (config.world.min_treasure_density * cells).floor() as usize;
    let max_treasures = (config.world.max_treasure_density * cells).floor() as usize;
    let treasure_count = rng.gen_range(min_treasures..=max_treasures);
    for _ in 0..treasure_count {
        let treasure_type = random_treasure_type(rng);
        let pos = random_empty_position(world.resource::<Grid>(), rng, attempts, "treasure")?;
        let treasure = Treasure::new(treasure_type).with_value(config.treasure.initial_value);
        spawn_at(world, TreasureBundle::new(treasure), pos)
            .ok_or(SimError::GridSaturated { width, height, what: "treasure" })?;
        summary.treasures += 1;
    }

    // Knights
    let hunters = summary.hunters as f64;
    let min_knights = ((config.world.min_knight_ratio * hunters).floor() as usize).max(1);
    let max_knights = ((config.world.max_knight_ratio * hunters).floor() as usize).max(1);
    let knight_count = rng.gen_range(min_knights..=max_knights);
    for _ in 0..knight_count {
        let pos = random_empty_position(world.resource::<Grid>(), rng, attempts, "knight")?;
        let knight = Knight::new().with_energy(config.knight.max_energy);
        spawn_at(world, KnightBundle::new(knight), pos)
            .ok_or(SimError::GridSaturated { width, height, what: "knight" })?;
        summary.knights += 1;
    }

    tracing::info!(
        hideouts = summary.hideouts,
        hunters = summary.hunters,
        treasures = summary.treasures,
        knights = summary.knights,
        "seeded {}x{} grid",
        width,
        height
    );
    Ok(summary)
}

/// A random free cell among the eight around `center`
fn free_cell_around<R: Rng + ?Sized>(grid: &Grid, center: Position, rng: &mut R) -> Option<Position> {
    let free: Vec<Position> = grid
        .neighborhood(center, 1)
        .into_iter()
        .filter(|pos| grid.is_empty(*pos))
        .collect();
    free.choose(rng).copied()
}

fn random_skill<R: Rng + ?Sized>(rng: &mut R) -> HunterSkill {
    HunterSkill::all()[rng.gen_range(0..HunterSkill::all().len())]
}

fn random_treasure_type<R: Rng + ?Sized>(rng: &mut R) -> TreasureType {
    TreasureType::all()[rng.gen_range(0..TreasureType::all().len())]
}
