//! Simulation Events
//!
//! Notable things that happen during a tick. The engine collects them per
//! tick; the CLI can append them to a JSONL log.

use serde::{Deserialize, Serialize};

use crate::types::{HunterSkill, Position, TreasureType};

/// How a knight dealt with a caught hunter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatchOutcome {
    /// Light penalty
    Detain,
    /// Heavy penalty
    Challenge,
}

/// One event, stamped with the tick it happened in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub tick: u64,
    #[serde(flatten)]
    pub kind: SimEventKind,
}

impl SimEvent {
    pub fn new(tick: u64, kind: SimEventKind) -> Self {
        Self { tick, kind }
    }
}

/// Event payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEventKind {
    /// A hunter lifted a treasure off the grid
    TreasurePickedUp {
        hunter: Position,
        treasure: Position,
        treasure_type: TreasureType,
        value: f64,
    },
    /// A hunter handed its cargo to a hideout
    TreasureDeposited {
        hunter: Position,
        hideout: Position,
        treasure_type: TreasureType,
        value: f64,
    },
    /// A treasure lost all its value and vanished
    TreasureDecayed { position: Position, treasure_type: TreasureType },
    /// A hunter ran out of its grace period and left the grid
    HunterCollapsed { position: Position, skill: HunterSkill },
    /// A knight caught up with a hunter
    HunterCaught {
        knight: Position,
        hunter: Position,
        outcome: CatchOutcome,
        cargo_lost: bool,
    },
    /// A hideout took in a new hunter
    HunterRecruited {
        hideout: Position,
        position: Position,
        skill: HunterSkill,
    },
    /// A knight stopped to recover energy
    KnightRetreated { position: Position },
}

impl SimEventKind {
    /// Short snake_case label matching the serialized `type` tag.
    pub fn label(&self) -> &'static str {
        match self {
            SimEventKind::TreasurePickedUp { .. } => "treasure_picked_up",
            SimEventKind::TreasureDeposited { .. } => "treasure_deposited",
            SimEventKind::TreasureDecayed { .. } => "treasure_decayed",
            SimEventKind::HunterCollapsed { .. } => "hunter_collapsed",
            SimEventKind::HunterCaught { .. } => "hunter_caught",
            SimEventKind::HunterRecruited { .. } => "hunter_recruited",
            SimEventKind::KnightRetreated { .. } => "knight_retreated",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_is_flat_and_tagged() {
        let event = SimEvent::new(
            7,
            SimEventKind::HunterCaught {
                knight: Position::new(1, 2),
                hunter: Position::new(1, 3),
                outcome: CatchOutcome::Challenge,
                cargo_lost: true,
            },
        );

        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["tick"], 7);
        assert_eq!(json["type"], "hunter_caught");
        assert_eq!(json["outcome"], "challenge");
        assert_eq!(json["hunter"]["y"], 3);

        let back: SimEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_labels_match_tags() {
        let kinds = [
            SimEventKind::TreasureDecayed {
                position: Position::new(0, 0),
                treasure_type: TreasureType::Bronze,
            },
            SimEventKind::KnightRetreated { position: Position::new(0, 0) },
            SimEventKind::HunterRecruited {
                hideout: Position::new(0, 0),
                position: Position::new(0, 1),
                skill: HunterSkill::Endurance,
            },
        ];

        for kind in kinds {
            let json = serde_json::to_value(SimEvent::new(1, kind.clone())).unwrap();
            assert_eq!(json["type"], kind.label());
        }
    }
}
