//! Toroidal Grid
//!
//! Cell occupancy plus the registry of live entities. The grid is the only
//! place entities are placed, moved or removed, so the cell array and the
//! registry always describe the same layout.
//!
//! Positions outside `width x height` are rejected: mutating operations fail
//! without touching anything and queries report nothing there.

use bevy_ecs::prelude::*;
use eldoria_events::Position;
use std::collections::HashMap;

/// Resource: the toroidal world grid
#[derive(Resource, Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major by x: index = x * height + y
    cells: Vec<Option<Entity>>,
    /// Live entities in registration order
    order: Vec<Entity>,
    positions: HashMap<Entity, Position>,
}

impl Grid {
    /// Create an empty grid. Both dimensions must be positive.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            order: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos).then(|| pos.x * self.height + pos.y)
    }

    /// Place `entity` at `pos`. Fails if the cell is taken, the position is
    /// off the grid, or the entity is already registered.
    pub fn add_entity(&mut self, entity: Entity, pos: Position) -> bool {
        let Some(idx) = self.index(pos) else {
            return false;
        };
        if self.cells[idx].is_some() || self.positions.contains_key(&entity) {
            return false;
        }

        self.cells[idx] = Some(entity);
        self.order.push(entity);
        self.positions.insert(entity, pos);
        true
    }

    /// Relocate whatever stands at `from` to `to`.
    pub fn move_entity(&mut self, from: Position, to: Position) -> bool {
        let (Some(from_idx), Some(to_idx)) = (self.index(from), self.index(to)) else {
            return false;
        };
        let Some(entity) = self.cells[from_idx] else {
            return false;
        };
        if self.cells[to_idx].is_some() {
            return false;
        }

        self.cells[from_idx] = None;
        self.cells[to_idx] = Some(entity);
        self.positions.insert(entity, to);
        true
    }

    /// Clear the cell at `pos` and deregister its entity, handing back the
    /// handle so the caller can despawn or repurpose it.
    pub fn remove_entity(&mut self, pos: Position) -> Option<Entity> {
        let idx = self.index(pos)?;
        let entity = self.cells[idx].take()?;

        self.positions.remove(&entity);
        if let Some(i) = self.order.iter().position(|e| *e == entity) {
            self.order.remove(i);
        }
        Some(entity)
    }

    pub fn get_entity(&self, pos: Position) -> Option<Entity> {
        self.index(pos).and_then(|idx| self.cells[idx])
    }

    /// True only for an in-bounds, unoccupied cell
    pub fn is_empty(&self, pos: Position) -> bool {
        self.index(pos).is_some_and(|idx| self.cells[idx].is_none())
    }

    pub fn position_of(&self, entity: Entity) -> Option<Position> {
        self.positions.get(&entity).copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.positions.contains_key(&entity)
    }

    /// Live entities in registration order
    pub fn entities(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_full(&self) -> bool {
        self.order.len() == self.cells.len()
    }

    /// All unoccupied cells, in row-major order
    pub fn empty_cells(&self) -> Vec<Position> {
        self.all_positions().filter(|p| self.is_empty(*p)).collect()
    }

    /// Every cell position, x outer, y inner
    pub fn all_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    /// Map signed coordinates back onto the torus
    pub fn wrap(&self, x: i64, y: i64) -> Position {
        Position::new(
            x.rem_euclid(self.width as i64) as usize,
            y.rem_euclid(self.height as i64) as usize,
        )
    }

    /// `pos` shifted by `(dx, dy)` with wrap-around
    pub fn offset(&self, pos: Position, dx: i64, dy: i64) -> Position {
        self.wrap(pos.x as i64 + dx, pos.y as i64 + dy)
    }

    /// Signed per-axis step count from `from` to `to` the short way round.
    /// An exact half-lap resolves to the positive direction.
    pub fn shortest_offset(&self, from: Position, to: Position) -> (i64, i64) {
        (
            shortest_axis(from.x, to.x, self.width),
            shortest_axis(from.y, to.y, self.height),
        )
    }

    /// Euclidean distance across the torus
    pub fn distance(&self, a: Position, b: Position) -> f64 {
        let (dx, dy) = self.shortest_offset(a, b);
        ((dx * dx + dy * dy) as f64).sqrt()
    }

    /// Chessboard distance across the torus
    pub fn chebyshev(&self, a: Position, b: Position) -> i64 {
        let (dx, dy) = self.shortest_offset(a, b);
        dx.abs().max(dy.abs())
    }

    /// True when `b` is one of the eight cells around `a`
    pub fn is_adjacent(&self, a: Position, b: Position) -> bool {
        a != b && self.chebyshev(a, b) <= 1
    }

    /// Cells in the square of `radius` around `center`, dx outer and dy
    /// inner, centre excluded. Small grids can wrap a cell in twice or
    /// bring the centre back; both are filtered.
    pub fn neighborhood(&self, center: Position, radius: i64) -> Vec<Position> {
        let mut cells = Vec::new();
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let pos = self.offset(center, dx, dy);
                if pos != center && !cells.contains(&pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}

fn shortest_axis(from: usize, to: usize, size: usize) -> i64 {
    let size = size as i64;
    let mut d = (to as i64 - from as i64).rem_euclid(size);
    if d > size / 2 {
        d -= size;
    }
    d
}
