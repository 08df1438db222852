//! Bench management: inactive toggling with its cascading reorder, manual
//! substitute reordering, and manual next-unit targeting.

use crate::models::{PlayerId, PlayerStatus, SlotId, StintClock, SubstitutionScheme};
use crate::time::{stint, EpochMs};

use super::{applied, GameState, RejectReason, Transition};

impl GameState {
    /// Park a substitute outside the rotation, or bring them back in.
    ///
    /// Deactivating relocates the player to the lowest-priority substitute
    /// slot (everyone behind shifts up one) and drops them from the
    /// rotation queue. Reactivating puts them in the highest-priority slot
    /// (everyone else shifts down one) and re-queues them as the first
    /// substitute to come on, never as next off the field.
    pub fn apply_inactive_toggle(&self, id: &PlayerId, now_ms: EpochMs) -> Transition {
        if self.team_config.scheme != SubstitutionScheme::Individual {
            return Transition::Rejected(RejectReason::WrongScheme);
        }
        let Some(player) = self.player(id) else {
            return Transition::Rejected(RejectReason::UnknownPlayer);
        };
        if player.stats.current_status != PlayerStatus::Substitute {
            return Transition::Rejected(RejectReason::NotASubstitute);
        }
        let def = match self.definition() {
            Ok(def) => def,
            Err(reason) => return Transition::Rejected(reason),
        };

        let deactivating = !player.stats.is_inactive;
        let mut state = self.clone();
        let paused = state.is_sub_timer_paused;

        let mut new_bench = state.bench_order(def);
        new_bench.retain(|bench_id| bench_id != id);

        if deactivating {
            new_bench.push(id.clone());
            state.rotation_queue.remove(id);
            if let Some(p) = state.player_mut(id) {
                stint::close_stint(&mut p.stats, now_ms, paused);
                p.stats.stint_clock = StintClock::Stopped;
                p.stats.is_inactive = true;
            }
        } else {
            new_bench.insert(0, id.clone());
            let field_count = state
                .rotation_queue
                .iter()
                .filter(|queued| {
                    self.player(queued)
                        .is_some_and(|p| p.stats.current_status == PlayerStatus::OnField)
                })
                .count();
            state.rotation_queue.insert_at(field_count, id.clone());
            if let Some(p) = state.player_mut(id) {
                p.stats.is_inactive = false;
                p.stats.stint_clock = if paused {
                    StintClock::PausedFlushed
                } else {
                    StintClock::Running { started_at_ms: now_ms }
                };
            }
        }

        state.write_bench(def, &new_bench);
        state.recompute_next_pointers();
        state.last_substitution = None;
        applied(state, vec![id.clone()])
    }

    /// Swap the occupants of two named substitute slots.
    pub fn apply_substitute_swap(&self, slot_a: SlotId, slot_b: SlotId) -> Transition {
        let def = match self.definition() {
            Ok(def) => def,
            Err(reason) => return Transition::Rejected(reason),
        };
        if self.team_config.scheme != SubstitutionScheme::Individual
            || def.substitute_count() < 2
        {
            return Transition::Rejected(RejectReason::WrongScheme);
        }
        if slot_a == slot_b {
            return Transition::Unchanged;
        }
        if !def.is_substitute_slot(slot_a) || !def.is_substitute_slot(slot_b) {
            return Transition::Rejected(RejectReason::UnknownSlot);
        }
        let (Some(first), Some(second)) = (
            self.formation.single(slot_a).cloned(),
            self.formation.single(slot_b).cloned(),
        ) else {
            log::warn!("substitute slot unexpectedly empty");
            return Transition::Rejected(RejectReason::InconsistentState);
        };
        if !self.is_active_player(&first) || !self.is_active_player(&second) {
            return Transition::Rejected(RejectReason::InactivePlayer);
        }

        let mut state = self.clone();
        state.formation.set_single(slot_a, second.clone());
        state.formation.set_single(slot_b, first.clone());
        if let Some(p) = state.player_mut(&first) {
            p.stats.current_slot = Some(slot_b);
        }
        if let Some(p) = state.player_mut(&second) {
            p.stats.current_slot = Some(slot_a);
        }
        state.rotation_queue.swap_ids(&first, &second);
        state.last_substitution = None;

        applied(state, vec![first, second])
    }

    /// Promote one substitute slot's occupant to the front of the bench;
    /// everyone between the front and the vacated slot shifts back by one.
    pub fn apply_substitute_promotion(&self, target: SlotId) -> Transition {
        let def = match self.definition() {
            Ok(def) => def,
            Err(reason) => return Transition::Rejected(reason),
        };
        if self.team_config.scheme != SubstitutionScheme::Individual
            || def.substitute_count() < 2
        {
            return Transition::Rejected(RejectReason::WrongScheme);
        }
        if !def.is_substitute_slot(target) {
            return Transition::Rejected(RejectReason::UnknownSlot);
        }
        if def.first_substitute_slot() == Some(target) {
            return Transition::Unchanged;
        }
        let Some(id) = self.formation.single(target).cloned() else {
            log::warn!("substitute slot unexpectedly empty");
            return Transition::Rejected(RejectReason::InconsistentState);
        };
        if !self.is_active_player(&id) {
            return Transition::Rejected(RejectReason::InactivePlayer);
        }

        let mut state = self.clone();
        let mut new_bench = state.bench_order(def);
        new_bench.retain(|bench_id| *bench_id != id);
        new_bench.insert(0, id.clone());
        state.write_bench(def, &new_bench);

        // Mirror the new bench priority in the rotation queue: the promoted
        // player becomes the first substitute to come on.
        state.rotation_queue.remove(&id);
        let field_count = state
            .rotation_queue
            .iter()
            .filter(|queued| {
                self.player(queued)
                    .is_some_and(|p| p.stats.current_status == PlayerStatus::OnField)
            })
            .count();
        state.rotation_queue.insert_at(field_count, id.clone());
        state.last_substitution = None;

        applied(state, vec![id])
    }

    /// Manually choose which player goes off at the next substitution.
    pub fn apply_next_player_target(&self, target: &PlayerId) -> Transition {
        if self.team_config.scheme != SubstitutionScheme::Individual {
            return Transition::Rejected(RejectReason::WrongScheme);
        }
        let Some(player) = self.player(target) else {
            return Transition::Rejected(RejectReason::UnknownPlayer);
        };
        if player.stats.current_status != PlayerStatus::OnField {
            return Transition::Rejected(RejectReason::NotOnField);
        }
        if self.next_player_id_to_sub_out.as_ref() == Some(target) {
            return Transition::Unchanged;
        }

        let mut state = self.clone();
        state.next_player_id_to_sub_out = Some(target.clone());
        applied(state, vec![target.clone()])
    }

    /// Manually choose which field pair goes off at the next substitution.
    pub fn apply_next_pair_target(&self, target: SlotId) -> Transition {
        if self.team_config.scheme != SubstitutionScheme::Pairs {
            return Transition::Rejected(RejectReason::WrongScheme);
        }
        if !target.is_field_pair() {
            return Transition::Rejected(RejectReason::UnknownSlot);
        }
        if self.next_physical_pair_to_sub_out == Some(target) {
            return Transition::Unchanged;
        }

        let mut state = self.clone();
        state.next_physical_pair_to_sub_out = Some(target);
        state.next_pair_to_sub_out = Some(target);
        let highlights =
            self.formation.occupant(target).map(|occ| occ.ids()).unwrap_or_default();
        applied(state, highlights)
    }
}
