//! Position snapshots and before/after movement diffs.
//!
//! A read-only consumer of the formation data: the UI captures a snapshot
//! around a transition and asks for the per-player movement vectors to
//! drive its slide animations. Nothing here mutates the aggregate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::definitions::formation_definition;
use crate::models::{Formation, FormationShape, Occupant, PairRole, PlayerId, TeamConfig};

/// One player's place in the formation's position order. The goalie ranks
/// first; pair-scheme occupants of the same pair share a rank and are told
/// apart by their label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPosition {
    pub position_index: usize,
    pub pair_role: Option<PairRole>,
}

pub type PositionMap = HashMap<PlayerId, CapturedPosition>;

/// Vertical direction of a movement in the rendered formation list; `Up`
/// means towards the goalie end of the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Movement vector for one player whose rank changed across a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMovement {
    pub from_position: usize,
    pub to_position: usize,
    pub distance: usize,
    pub direction: MoveDirection,
}

/// Snapshot every occupied position. Unknown configurations yield an empty
/// map rather than an error; animation hints are best-effort.
pub fn capture_player_positions(
    formation: &Formation,
    team_config: &TeamConfig,
    shape: FormationShape,
) -> PositionMap {
    let Ok(def) = formation_definition(team_config, shape) else {
        return PositionMap::new();
    };

    let mut positions = PositionMap::new();
    positions.insert(
        formation.goalie.clone(),
        CapturedPosition { position_index: 0, pair_role: None },
    );
    for entry in &formation.slots {
        let Some(position_index) = def.position_index(entry.slot) else {
            continue;
        };
        match &entry.occupant {
            Occupant::Single(id) => {
                positions.insert(id.clone(), CapturedPosition { position_index, pair_role: None });
            }
            Occupant::Pair { defender, attacker } => {
                if let Some(id) = defender {
                    positions.insert(
                        id.clone(),
                        CapturedPosition { position_index, pair_role: Some(PairRole::Defender) },
                    );
                }
                if let Some(id) = attacker {
                    positions.insert(
                        id.clone(),
                        CapturedPosition { position_index, pair_role: Some(PairRole::Attacker) },
                    );
                }
            }
        }
    }
    positions
}

/// Diff two snapshots into movement vectors. Players whose rank is
/// unchanged, or who appear in only one snapshot, are omitted. Empty
/// inputs produce an empty map.
pub fn player_animations(
    before: &PositionMap,
    after: &PositionMap,
) -> HashMap<PlayerId, PlayerMovement> {
    let mut movements = HashMap::new();
    for (id, was) in before {
        let Some(now) = after.get(id) else {
            continue;
        };
        if now.position_index == was.position_index {
            continue;
        }
        let (from_position, to_position) = (was.position_index, now.position_index);
        let direction = if to_position < from_position {
            MoveDirection::Up
        } else {
            MoveDirection::Down
        };
        movements.insert(
            id.clone(),
            PlayerMovement {
                from_position,
                to_position,
                distance: from_position.abs_diff(to_position),
                direction,
            },
        );
    }
    movements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchFormat, SlotEntry, SlotId, SubstitutionScheme};

    fn individual_formation() -> (Formation, TeamConfig, FormationShape) {
        let formation = Formation {
            goalie: "gk".into(),
            slots: vec![
                SlotEntry { slot: SlotId::LeftDefender, occupant: Occupant::Single("1".into()) },
                SlotEntry { slot: SlotId::RightDefender, occupant: Occupant::Single("2".into()) },
                SlotEntry { slot: SlotId::LeftAttacker, occupant: Occupant::Single("3".into()) },
                SlotEntry { slot: SlotId::RightAttacker, occupant: Occupant::Single("4".into()) },
                SlotEntry { slot: SlotId::Substitute(1), occupant: Occupant::Single("5".into()) },
                SlotEntry { slot: SlotId::Substitute(2), occupant: Occupant::Single("6".into()) },
            ],
        };
        let config =
            TeamConfig::new(MatchFormat::FiveVFive, 7, SubstitutionScheme::Individual);
        (formation, config, FormationShape::TwoTwo)
    }

    #[test]
    fn capture_ranks_goalie_first_and_bench_last() {
        let (formation, config, shape) = individual_formation();
        let map = capture_player_positions(&formation, &config, shape);
        assert_eq!(map[&"gk".to_string()].position_index, 0);
        assert_eq!(map[&"1".to_string()].position_index, 1);
        assert_eq!(map[&"5".to_string()].position_index, 5);
        assert_eq!(map[&"6".to_string()].position_index, 6);
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn capture_shares_index_across_pair_members() {
        let formation = Formation {
            goalie: "gk".into(),
            slots: vec![
                SlotEntry {
                    slot: SlotId::LeftPair,
                    occupant: Occupant::Pair {
                        defender: Some("d".into()),
                        attacker: Some("a".into()),
                    },
                },
                SlotEntry { slot: SlotId::RightPair, occupant: Occupant::empty_pair() },
                SlotEntry { slot: SlotId::SubPair, occupant: Occupant::empty_pair() },
            ],
        };
        let config = TeamConfig::new(MatchFormat::FiveVFive, 7, SubstitutionScheme::Pairs);
        let map = capture_player_positions(&formation, &config, FormationShape::TwoTwo);
        assert_eq!(map[&"d".to_string()].position_index, 1);
        assert_eq!(map[&"a".to_string()].position_index, 1);
        assert_eq!(map[&"d".to_string()].pair_role, Some(PairRole::Defender));
        assert_eq!(map[&"a".to_string()].pair_role, Some(PairRole::Attacker));
    }

    #[test]
    fn capture_tolerates_unknown_configuration() {
        let (formation, _, shape) = individual_formation();
        let bad_config =
            TeamConfig::new(MatchFormat::FiveVFive, 12, SubstitutionScheme::Individual);
        assert!(capture_player_positions(&formation, &bad_config, shape).is_empty());
    }

    #[test]
    fn diff_reports_only_moved_players() {
        let (formation, config, shape) = individual_formation();
        let before = capture_player_positions(&formation, &config, shape);

        let mut after_formation = formation.clone();
        // Player 5 comes on for player 1; player 6 shifts up; player 1
        // parks at the back of the bench.
        after_formation.set_single(SlotId::LeftDefender, "5".into());
        after_formation.set_single(SlotId::Substitute(1), "6".into());
        after_formation.set_single(SlotId::Substitute(2), "1".into());
        let after = capture_player_positions(&after_formation, &config, shape);

        let moves = player_animations(&before, &after);
        assert_eq!(moves.len(), 3);
        let up = &moves[&"5".to_string()];
        assert_eq!((up.from_position, up.to_position), (5, 1));
        assert_eq!(up.distance, 4);
        assert_eq!(up.direction, MoveDirection::Up);
        let down = &moves[&"1".to_string()];
        assert_eq!((down.from_position, down.to_position), (1, 6));
        assert_eq!(down.direction, MoveDirection::Down);
        assert!(!moves.contains_key(&"2".to_string()));
    }

    #[test]
    fn diff_of_empty_inputs_is_empty() {
        assert!(player_animations(&PositionMap::new(), &PositionMap::new()).is_empty());
        let (formation, config, shape) = individual_formation();
        let some = capture_player_positions(&formation, &config, shape);
        assert!(player_animations(&PositionMap::new(), &some).is_empty());
        assert!(player_animations(&some, &PositionMap::new()).is_empty());
    }
}
