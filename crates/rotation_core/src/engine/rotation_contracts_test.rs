//! Aggregate-level contract gates: slot exclusivity, rotation-queue
//! conservation, and time conservation must survive arbitrary operation
//! interleavings.

use proptest::prelude::*;

use crate::models::{GameState, SlotId};

use super::test_support::{assert_applied, individual_state, pairs_state};
use super::Transition;

fn assert_contracts(state: &GameState) {
    state.validate().expect("aggregate contracts");
}

#[test]
fn contracts_hold_across_an_operation_storm() {
    let mut state = individual_state(8);
    assert_contracts(&state);

    let steps: Vec<Box<dyn Fn(&GameState, i64) -> Transition>> = vec![
        Box::new(|s, t| s.apply_substitution(t)),
        Box::new(|s, t| s.apply_position_switch(&"2".into(), &"3".into(), t)),
        Box::new(|s, t| s.apply_goalie_switch(&"4".into(), t)),
        Box::new(|s, _| s.apply_substitute_promotion(SlotId::Substitute(3))),
        Box::new(|s, t| s.apply_inactive_toggle(&"7".into(), t)),
        Box::new(|s, t| s.apply_substitution(t)),
        Box::new(|s, t| s.apply_inactive_toggle(&"7".into(), t)),
        Box::new(|s, t| s.apply_pause_change(t, true)),
        Box::new(|s, t| s.apply_substitution(t)),
        Box::new(|s, t| s.apply_pause_change(t, false)),
        Box::new(|s, t| s.apply_undo(t)),
    ];

    for (index, step) in steps.iter().enumerate() {
        let now_ms = 10_000 + index as i64 * 10_000;
        if let Transition::Applied { state: next, .. } = step(&state, now_ms) {
            state = next;
        }
        assert_contracts(&state);
    }
}

#[test]
fn time_is_conserved_across_pause_resume_substitute_interleavings() {
    let state = individual_state(7);
    let state = assert_applied(state.apply_pause_change(31_000, true));
    let state = assert_applied(state.apply_pause_change(41_000, false));
    let state = assert_applied(state.apply_substitution(51_000));
    let state = assert_applied(state.apply_pause_change(61_000, true));

    // Active spans: 1s-31s and 41s-61s. Every player must account for
    // exactly 50 seconds, whatever buckets they moved through.
    for player in &state.all_players {
        assert_eq!(
            player.stats.total_active_seconds(),
            50,
            "player {} lost or gained time",
            player.id
        );
    }
}

#[test]
fn pausing_then_substituting_never_double_counts() {
    let state = individual_state(7);
    let state = assert_applied(state.apply_pause_change(31_000, true));
    let state = assert_applied(state.apply_substitution(36_000));
    let state = assert_applied(state.apply_pause_change(41_000, false));
    let state = assert_applied(state.apply_pause_change(61_000, true));

    for player in &state.all_players {
        assert_eq!(
            player.stats.total_active_seconds(),
            50,
            "player {} double counted the paused interval",
            player.id
        );
    }
}

#[test]
fn undo_inverts_a_substitution_in_both_schemes() {
    for start in [individual_state(7), pairs_state()] {
        let subbed = assert_applied(start.apply_substitution(61_000));
        let undone = assert_applied(subbed.apply_undo(91_000));
        assert_eq!(undone.formation, start.formation);
        assert_eq!(undone.rotation_queue, start.rotation_queue);
        assert_eq!(undone.next_player_id_to_sub_out, start.next_player_id_to_sub_out);
        assert_eq!(
            undone.next_next_player_id_to_sub_out,
            start.next_next_player_id_to_sub_out
        );
        assert_eq!(
            undone.next_physical_pair_to_sub_out,
            start.next_physical_pair_to_sub_out
        );
        assert_contracts(&undone);
    }
}

#[test]
fn repeated_goalie_switches_conserve_the_queue() {
    let mut state = individual_state(7);
    for (index, keeper) in ["3", "5", "gk"].iter().enumerate() {
        let now_ms = 10_000 + index as i64 * 10_000;
        state = assert_applied(state.apply_goalie_switch(&(*keeper).to_string(), now_ms));
        assert_contracts(&state);
    }
    // Everyone rotated through goal and back; the queue still holds exactly
    // the six active outfield players.
    assert_eq!(state.rotation_queue.len(), 6);
    assert_eq!(state.formation.goalie, "gk");
}

proptest! {
    /// Any sequence of operations keeps the structural contracts intact on
    /// an individual-scheme squad.
    #[test]
    fn prop_random_individual_operations_preserve_contracts(
        ops in prop::collection::vec((0u8..10, 0usize..8, 0usize..8), 0..40)
    ) {
        let ids =
            ["gk", "1", "2", "3", "4", "5", "6", "7"].map(String::from);
        let sub_slots = [SlotId::Substitute(1), SlotId::Substitute(2), SlotId::Substitute(3)];
        let mut state = individual_state(8);

        for (step, (op, a, b)) in ops.into_iter().enumerate() {
            let now_ms = 2_000 + step as i64 * 1_000;
            let transition = match op {
                0 => state.apply_substitution(now_ms),
                1 => state.apply_position_switch(&ids[a], &ids[b], now_ms),
                2 => state.apply_goalie_switch(&ids[a], now_ms),
                3 => state.apply_inactive_toggle(&ids[a], now_ms),
                4 => state.apply_substitute_swap(sub_slots[a % 3], sub_slots[b % 3]),
                5 => state.apply_substitute_promotion(sub_slots[a % 3]),
                6 => state.apply_next_player_target(&ids[a]),
                7 => state.apply_pause_change(now_ms, true),
                8 => state.apply_pause_change(now_ms, false),
                _ => state.apply_undo(now_ms),
            };
            if let Transition::Applied { state: next, .. } = transition {
                state = next;
            }
            prop_assert!(state.validate().is_ok());
        }
    }

    /// Same guarantee for the pairs scheme.
    #[test]
    fn prop_random_pairs_operations_preserve_contracts(
        ops in prop::collection::vec((0u8..6, 0usize..7), 0..30)
    ) {
        let ids = ["gk", "1", "2", "3", "4", "5", "6"].map(String::from);
        let pair_slots = [SlotId::LeftPair, SlotId::RightPair, SlotId::SubPair];
        let mut state = pairs_state();

        for (step, (op, a)) in ops.into_iter().enumerate() {
            let now_ms = 2_000 + step as i64 * 1_000;
            let transition = match op {
                0 => state.apply_substitution(now_ms),
                1 => state.apply_pair_role_swap(pair_slots[a % 3], now_ms),
                2 => state.apply_goalie_switch(&ids[a], now_ms),
                3 => state.apply_next_pair_target(pair_slots[a % 3]),
                4 => state.apply_pause_change(now_ms, a % 2 == 0),
                _ => state.apply_undo(now_ms),
            };
            if let Transition::Applied { state: next, .. } = transition {
                state = next;
            }
            prop_assert!(state.validate().is_ok());
        }
    }
}
