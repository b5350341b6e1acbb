//! Text rendering of the grid

use bevy_ecs::prelude::*;

use crate::components::Symbol;
use crate::world::Grid;

/// Symbol for an empty cell
pub const EMPTY_CELL: char = '.';

/// One line per row (y), cells separated by single spaces
pub fn render_grid(world: &World) -> String {
    let Some(grid) = world.get_resource::<Grid>() else {
        return String::new();
    };

    let mut out = String::with_capacity(grid.cell_count() * 2);
    for y in 0..grid.height() {
        let row: Vec<String> = (0..grid.width())
            .map(|x| {
                grid.get_entity(eldoria_events::Position::new(x, y))
                    .and_then(|e| world.get::<Symbol>(e))
                    .map_or(EMPTY_CELL, |s| s.0)
                    .to_string()
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::*;
    use crate::world::spawn_at;
    use eldoria_events::{HunterSkill, Position, TreasureType};

    #[test]
    fn test_render_symbols() {
        let mut world = World::new();
        world.insert_resource(Grid::new(3, 2));
        spawn_at(&mut world, HideoutBundle::new(Hideout::default()), Position::new(0, 0));
        spawn_at(&mut world, HunterBundle::new(Hunter::new(HunterSkill::Navigation)), Position::new(1, 0));
        spawn_at(&mut world, TreasureBundle::new(Treasure::new(TreasureType::Gold)), Position::new(2, 1));
        spawn_at(&mut world, KnightBundle::new(Knight::new()), Position::new(0, 1));

        assert_eq!(render_grid(&world), "H N .\nK . G\n");
    }
}
