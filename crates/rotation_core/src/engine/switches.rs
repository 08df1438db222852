//! In-place exchanges: two field players trading slots, the goalie trading
//! places with an outfield player, and the defender/attacker label swap
//! inside one pair.

use crate::models::{
    role_for, Occupant, PairRole, PlayerId, PlayerRole, PlayerStatus, SlotId,
    SubstitutionScheme,
};
use crate::time::EpochMs;

use super::{applied, GameState, RejectReason, Transition};

impl GameState {
    /// Swap two on-field players' slots, reassigning their roles to match.
    pub fn apply_position_switch(
        &self,
        first: &PlayerId,
        second: &PlayerId,
        now_ms: EpochMs,
    ) -> Transition {
        if first == second {
            return Transition::Rejected(RejectReason::SamePlayer);
        }
        for id in [first, second] {
            let Some(player) = self.player(id) else {
                return Transition::Rejected(RejectReason::UnknownPlayer);
            };
            if player.id == self.formation.goalie
                || player.stats.current_status == PlayerStatus::Goalie
            {
                return Transition::Rejected(RejectReason::GoalieInvolved);
            }
            if player.stats.current_status != PlayerStatus::OnField {
                return Transition::Rejected(RejectReason::NotOnField);
            }
        }
        let (Some((slot_a, pair_a)), Some((slot_b, pair_b))) =
            (self.formation.locate(first), self.formation.locate(second))
        else {
            log::warn!("on-field player missing from the formation");
            return Transition::Rejected(RejectReason::InconsistentState);
        };

        let mut state = self.clone();
        match self.team_config.scheme {
            SubstitutionScheme::Individual => {
                state.formation.set_single(slot_a, second.clone());
                state.formation.set_single(slot_b, first.clone());
            }
            SubstitutionScheme::Pairs => {
                let (Some(label_a), Some(label_b)) = (pair_a, pair_b) else {
                    log::warn!("pairs-scheme field player without a pair label");
                    return Transition::Rejected(RejectReason::InconsistentState);
                };
                state.formation.set_pair_member(slot_a, label_a, Some(second.clone()));
                state.formation.set_pair_member(slot_b, label_b, Some(first.clone()));
            }
        }

        let role_for_first = role_for(slot_b, pair_b);
        let role_for_second = role_for(slot_a, pair_a);
        state.reassign_field_player(first, role_for_first, slot_b, now_ms);
        state.reassign_field_player(second, role_for_second, slot_a, now_ms);

        // The board changed shape; the pending undo snapshot no longer
        // describes a state this one can roll back to.
        state.last_substitution = None;
        applied(state, vec![first.clone(), second.clone()])
    }

    /// Close the stint only when the role actually changes; a same-role
    /// slot change (left back to right back) keeps the stint running.
    fn reassign_field_player(
        &mut self,
        id: &PlayerId,
        role: PlayerRole,
        slot: SlotId,
        now_ms: EpochMs,
    ) {
        let changed = self.player(id).map(|p| p.stats.current_role != role);
        match changed {
            Some(true) => {
                self.transition_player(id, PlayerStatus::OnField, role, Some(slot), now_ms)
            }
            Some(false) => {
                if let Some(player) = self.player_mut(id) {
                    player.stats.current_slot = Some(slot);
                }
            }
            None => {}
        }
    }

    /// Exchange the goalie with an active outfield player. The former
    /// goalie inherits the new goalie's slot and, crucially, the exact
    /// rotation-queue index the new goalie vacates.
    pub fn apply_goalie_switch(&self, new_goalie: &PlayerId, now_ms: EpochMs) -> Transition {
        let Some(candidate) = self.player(new_goalie) else {
            return Transition::Rejected(RejectReason::UnknownPlayer);
        };
        if self.formation.goalie == *new_goalie {
            return Transition::Rejected(RejectReason::AlreadyGoalie);
        }
        if candidate.stats.is_inactive {
            return Transition::Rejected(RejectReason::InactivePlayer);
        }
        let Some((slot, pair_role)) = self.formation.locate(new_goalie) else {
            log::warn!("goalie candidate {new_goalie} holds no slot");
            return Transition::Rejected(RejectReason::InconsistentState);
        };

        let former_goalie = self.formation.goalie.clone();
        let mut state = self.clone();

        let Some(vacated_index) = state.rotation_queue.remove(new_goalie) else {
            log::warn!("goalie candidate {new_goalie} missing from the rotation queue");
            return Transition::Rejected(RejectReason::InconsistentState);
        };
        state.rotation_queue.insert_at(vacated_index, former_goalie.clone());

        state.formation.goalie = new_goalie.clone();
        match pair_role {
            Some(label) => state.formation.set_pair_member(slot, label, Some(former_goalie.clone())),
            None => state.formation.set_single(slot, former_goalie.clone()),
        }

        let vacated_status = if slot.is_substitute() {
            PlayerStatus::Substitute
        } else {
            PlayerStatus::OnField
        };
        state.transition_player(
            &former_goalie,
            vacated_status,
            role_for(slot, pair_role),
            Some(slot),
            now_ms,
        );
        state.transition_player(
            new_goalie,
            PlayerStatus::Goalie,
            PlayerRole::Goalie,
            Some(SlotId::Goalie),
            now_ms,
        );

        // Re-derive any next-pointer the new goalie was holding.
        if state.next_player_id_to_sub_out.as_ref() == Some(new_goalie) {
            state.next_player_id_to_sub_out = state.rotation_queue.head().cloned();
        }
        if state.next_next_player_id_to_sub_out.as_ref() == Some(new_goalie) {
            state.next_next_player_id_to_sub_out = state.rotation_queue.get(1).cloned();
        }

        state.last_substitution = None;
        applied(state, vec![former_goalie, new_goalie.clone()])
    }

    /// Swap the defender/attacker labels inside one pair. Field pairs swap
    /// their time-tracking roles going forward; substitute-pair members keep
    /// the substitute role whatever their label.
    pub fn apply_pair_role_swap(&self, pair: SlotId, now_ms: EpochMs) -> Transition {
        if self.team_config.scheme != SubstitutionScheme::Pairs {
            return Transition::Rejected(RejectReason::WrongScheme);
        }
        if !pair.is_pair() {
            return Transition::Rejected(RejectReason::UnknownSlot);
        }
        let Some((defender, attacker)) =
            self.formation.occupant(pair).and_then(Occupant::complete_pair)
        else {
            return Transition::Rejected(RejectReason::IncompletePair);
        };

        let mut state = self.clone();
        if let Some(occ) = state.formation.occupant_mut(pair) {
            *occ = Occupant::Pair {
                defender: Some(attacker.clone()),
                attacker: Some(defender.clone()),
            };
        }
        if pair.is_field_pair() {
            state.transition_player(
                &defender,
                PlayerStatus::OnField,
                role_for(pair, Some(PairRole::Attacker)),
                Some(pair),
                now_ms,
            );
            state.transition_player(
                &attacker,
                PlayerStatus::OnField,
                role_for(pair, Some(PairRole::Defender)),
                Some(pair),
                now_ms,
            );
        }

        state.last_substitution = None;
        applied(state, vec![defender, attacker])
    }
}
