//! Single-step reversal of the most recent substitution.

use crate::models::{role_for, PlayerRole, PlayerStatus, SlotId, StintClock};
use crate::time::{duration_seconds, undo_timer_target, EpochMs};

use super::{applied, GameState, RejectReason, Transition};

impl GameState {
    /// Put the board back as it stood before the last substitution.
    ///
    /// Formation, rotation queue, and next-pointers are restored from the
    /// snapshot; the players who came on get their pre-substitution stats
    /// back; the players who went off return to the field and are credited
    /// with the interval they sat out, as if the swap had never happened.
    pub fn apply_undo(&self, now_ms: EpochMs) -> Transition {
        let Some(snapshot) = self.last_substitution.clone() else {
            return Transition::Rejected(RejectReason::NothingToUndo);
        };

        let mut state = self.clone();
        state.formation = snapshot.formation_before.clone();
        state.rotation_queue = snapshot.rotation_queue_before.clone();
        state.next_player_id_to_sub_out = snapshot.next_player_id_before.clone();
        state.next_next_player_id_to_sub_out = snapshot.next_next_player_id_before.clone();
        state.next_physical_pair_to_sub_out = snapshot.next_physical_pair_before;
        state.next_pair_to_sub_out = snapshot.next_pair_before;
        state.sub_timer_seconds = undo_timer_target(
            snapshot.sub_timer_seconds_at_substitution,
            snapshot.timestamp_ms,
            now_ms,
        );

        // Players who came on at the substitution: back to their bench
        // stats exactly as captured, their field minutes discarded.
        for (id, stats) in &snapshot.coming_on_stats_before {
            if let Some(player) = state.player_mut(id) {
                player.stats = stats.clone();
            }
        }

        // Players who went off: back onto the field, the benched interval
        // credited to the role they return to.
        let paused = state.is_sub_timer_paused;
        for id in &snapshot.players_going_off {
            let Some((slot, pair_role)) = state.formation.locate(id) else {
                log::warn!("undo snapshot names player {id} absent from the restored formation");
                continue;
            };
            let role = role_for(slot, pair_role);
            let status = if slot == SlotId::Goalie {
                PlayerStatus::Goalie
            } else if slot.is_substitute() {
                PlayerStatus::Substitute
            } else {
                PlayerStatus::OnField
            };
            if let Some(player) = state.player_mut(id) {
                if !paused {
                    let elapsed = duration_seconds(snapshot.timestamp_ms, now_ms);
                    player.stats.time_on_field_seconds += elapsed;
                    match role {
                        PlayerRole::Defender => player.stats.time_as_defender_seconds += elapsed,
                        PlayerRole::Midfielder => {
                            player.stats.time_as_midfielder_seconds += elapsed
                        }
                        PlayerRole::Attacker => player.stats.time_as_attacker_seconds += elapsed,
                        _ => {}
                    }
                }
                player.stats.current_status = status;
                player.stats.current_role = role;
                player.stats.current_slot = Some(slot);
                player.stats.stint_clock = if paused {
                    StintClock::PausedFlushed
                } else {
                    StintClock::Running { started_at_ms: now_ms }
                };
            }
        }

        state.last_substitution = None;
        applied(state, snapshot.players_going_off.clone())
    }
}
