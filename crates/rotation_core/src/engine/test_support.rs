//! Shared fixtures for the engine tests.

use crate::models::{
    Formation, FormationShape, GameState, MatchFormat, Occupant, Player, SlotEntry, SlotId,
    SubstitutionScheme, TeamConfig,
};

use super::Transition;

pub const KICKOFF_MS: i64 = 1_000;

/// 5v5 individual-scheme squad on the 2-2 shape: field players "1"-"4",
/// substitutes "5".. up to the squad size, goalie "gk". Kickoff at
/// `KICKOFF_MS`.
pub fn individual_state(squad_size: u8) -> GameState {
    assert!((6..=8).contains(&squad_size));
    let players: Vec<Player> = std::iter::once("gk".to_string())
        .chain((1..squad_size).map(|n| n.to_string()))
        .map(|id| {
            let name = format!("Player {id}");
            Player::new(id, name)
        })
        .collect();

    let mut slots = vec![
        SlotEntry { slot: SlotId::LeftDefender, occupant: Occupant::Single("1".into()) },
        SlotEntry { slot: SlotId::RightDefender, occupant: Occupant::Single("2".into()) },
        SlotEntry { slot: SlotId::LeftAttacker, occupant: Occupant::Single("3".into()) },
        SlotEntry { slot: SlotId::RightAttacker, occupant: Occupant::Single("4".into()) },
    ];
    for (index, id) in (5..squad_size).enumerate() {
        slots.push(SlotEntry {
            slot: SlotId::Substitute(index as u8 + 1),
            occupant: Occupant::Single(id.to_string()),
        });
    }
    let formation = Formation { goalie: "gk".into(), slots };

    GameState::kickoff(
        players,
        TeamConfig::new(MatchFormat::FiveVFive, squad_size, SubstitutionScheme::Individual),
        FormationShape::TwoTwo,
        formation,
        KICKOFF_MS,
    )
    .expect("individual kickoff fixture")
}

/// Pairs-scheme squad of 7: left pair "1"/"2", right pair "3"/"4",
/// substitute pair "5"/"6", goalie "gk".
pub fn pairs_state() -> GameState {
    let players: Vec<Player> = ["gk", "1", "2", "3", "4", "5", "6"]
        .iter()
        .map(|id| Player::new(*id, format!("Player {id}")))
        .collect();
    let formation = Formation {
        goalie: "gk".into(),
        slots: vec![
            SlotEntry {
                slot: SlotId::LeftPair,
                occupant: Occupant::Pair {
                    defender: Some("1".into()),
                    attacker: Some("2".into()),
                },
            },
            SlotEntry {
                slot: SlotId::RightPair,
                occupant: Occupant::Pair {
                    defender: Some("3".into()),
                    attacker: Some("4".into()),
                },
            },
            SlotEntry {
                slot: SlotId::SubPair,
                occupant: Occupant::Pair {
                    defender: Some("5".into()),
                    attacker: Some("6".into()),
                },
            },
        ],
    };

    GameState::kickoff(
        players,
        TeamConfig::new(MatchFormat::FiveVFive, 7, SubstitutionScheme::Pairs),
        FormationShape::TwoTwo,
        formation,
        KICKOFF_MS,
    )
    .expect("pairs kickoff fixture")
}

/// Unwrap an applied transition; panics with the rejection otherwise.
pub fn assert_applied(transition: Transition) -> GameState {
    match transition {
        Transition::Applied { state, .. } => state,
        other => panic!("expected an applied transition, got {other:?}"),
    }
}
