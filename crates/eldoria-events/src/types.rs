//! Grid Coordinates and Entity Tags
//!
//! Small value types shared by the engine and its consumers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate on the grid.
///
/// Ordering is by `x`, then `y`, which keeps ordered maps keyed by
/// position stable from run to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Grade of a treasure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasureType {
    Bronze,
    Silver,
    Gold,
}

impl TreasureType {
    /// Returns all treasure grades.
    pub fn all() -> &'static [TreasureType] {
        &[TreasureType::Bronze, TreasureType::Silver, TreasureType::Gold]
    }

    /// Character used in the text grid.
    pub fn symbol(self) -> char {
        match self {
            TreasureType::Bronze => 'B',
            TreasureType::Silver => 'S',
            TreasureType::Gold => 'G',
        }
    }

    /// Per-grade growth rate. Informational only, the tick loop never applies it.
    pub fn value_increase(self) -> f64 {
        match self {
            TreasureType::Bronze => 0.03,
            TreasureType::Silver => 0.07,
            TreasureType::Gold => 0.13,
        }
    }
}

/// Specialisation of a treasure hunter.
///
/// Only the display symbol differs today; movement and detection bonuses
/// would key off this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HunterSkill {
    Navigation,
    Endurance,
    Stealth,
}

impl HunterSkill {
    /// Returns all hunter skills.
    pub fn all() -> &'static [HunterSkill] {
        &[HunterSkill::Navigation, HunterSkill::Endurance, HunterSkill::Stealth]
    }

    pub fn symbol(self) -> char {
        match self {
            HunterSkill::Navigation => 'N',
            HunterSkill::Endurance => 'E',
            HunterSkill::Stealth => 'S',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_treasure_symbols_and_rates() {
        assert_eq!(TreasureType::Bronze.symbol(), 'B');
        assert_eq!(TreasureType::Silver.symbol(), 'S');
        assert_eq!(TreasureType::Gold.symbol(), 'G');

        assert_eq!(TreasureType::Bronze.value_increase(), 0.03);
        assert_eq!(TreasureType::Silver.value_increase(), 0.07);
        assert_eq!(TreasureType::Gold.value_increase(), 0.13);
    }

    #[test]
    fn test_hunter_symbols() {
        assert_eq!(HunterSkill::Navigation.symbol(), 'N');
        assert_eq!(HunterSkill::Endurance.symbol(), 'E');
        assert_eq!(HunterSkill::Stealth.symbol(), 'S');
        assert_eq!(HunterSkill::all().len(), 3);
    }

    #[test]
    fn test_position_ordering() {
        let mut positions = vec![
            Position::new(2, 0),
            Position::new(0, 5),
            Position::new(0, 1),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![Position::new(0, 1), Position::new(0, 5), Position::new(2, 0)]
        );
        assert_eq!(Position::from((3, 4)).to_string(), "(3, 4)");
    }

    #[test]
    fn test_tag_serialization() {
        assert_eq!(serde_json::to_string(&TreasureType::Gold).unwrap(), r#""gold""#);
        assert_eq!(
            serde_json::from_str::<HunterSkill>(r#""stealth""#).unwrap(),
            HunterSkill::Stealth
        );
    }
}
