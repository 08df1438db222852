//! JSON boundary for host-UI integration.
//!
//! The aggregate is owned by the caller; these helpers let it cross a
//! process or storage boundary wholesale. Restoring validates the
//! structural invariants so a corrupted snapshot is refused instead of
//! feeding the calculators inconsistent state.

use crate::error::Result;
use crate::models::GameState;

pub fn game_state_to_json(state: &GameState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn game_state_from_json(json: &str) -> Result<GameState> {
    let state: GameState = serde_json::from_str(json)?;
    state.validate()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Formation, FormationShape, MatchFormat, Occupant, Player, SlotEntry, SlotId,
        SubstitutionScheme, TeamConfig,
    };

    fn seven_player_state() -> GameState {
        let players: Vec<Player> = ["gk", "1", "2", "3", "4", "5", "6"]
            .iter()
            .map(|id| Player::new(*id, format!("Player {id}")))
            .collect();
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
        GameState::kickoff(
            players,
            TeamConfig::new(MatchFormat::FiveVFive, 7, SubstitutionScheme::Individual),
            FormationShape::TwoTwo,
            formation,
            1_000,
        )
        .expect("kickoff fixture")
    }

    #[test]
    fn aggregate_round_trips_through_json() {
        let state = seven_player_state();
        let json = game_state_to_json(&state).unwrap();
        let restored = game_state_from_json(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn restore_refuses_an_inconsistent_snapshot() {
        let mut state = seven_player_state();
        // Duplicate an id across two slots.
        state.formation.set_single(SlotId::RightDefender, "1".into());
        let json = serde_json::to_string(&state).unwrap();
        assert!(game_state_from_json(&json).is_err());
    }

    #[test]
    fn restore_refuses_malformed_json() {
        assert!(game_state_from_json("{not json").is_err());
    }
}
