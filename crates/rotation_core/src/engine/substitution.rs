//! Ordinary timed substitution: the carousel step.
//!
//! The outgoing unit comes from the next-pointer (a single field player in
//! the individual scheme, a whole field pair in the pairs scheme); the
//! incoming unit is the front of the substitute stack. Each substitution
//! writes an undo snapshot and advances the rotation order.

use crate::definitions::FormationDefinition;
use crate::models::{
    role_for, LastSubstitution, Occupant, PairRole, PlayerRole, PlayerStatus, SlotId,
    SubstitutionScheme,
};
use crate::time::EpochMs;

use super::{applied, GameState, RejectReason, Transition};

impl GameState {
    /// Swap the due unit off the field for the front of the bench.
    pub fn apply_substitution(&self, now_ms: EpochMs) -> Transition {
        let def = match self.definition() {
            Ok(def) => def,
            Err(reason) => return Transition::Rejected(reason),
        };
        match self.team_config.scheme {
            SubstitutionScheme::Individual => self.individual_substitution(def, now_ms),
            SubstitutionScheme::Pairs => self.pairs_substitution(now_ms),
        }
    }

    fn individual_substitution(&self, def: &FormationDefinition, now_ms: EpochMs) -> Transition {
        let Some(outgoing_id) = self.next_player_id_to_sub_out.clone() else {
            return Transition::Rejected(RejectReason::NoSubstitutionPending);
        };
        let Some(outgoing) = self.player(&outgoing_id) else {
            log::warn!("next-to-sub pointer names unknown player {outgoing_id}");
            return Transition::Rejected(RejectReason::InconsistentState);
        };
        if outgoing.stats.current_status != PlayerStatus::OnField {
            log::warn!("next-to-sub pointer names off-field player {outgoing_id}");
            return Transition::Rejected(RejectReason::InconsistentState);
        }
        let out_slot = match outgoing.stats.current_slot {
            Some(slot) if def.is_field_slot(slot) => slot,
            other => {
                log::warn!("outgoing player {outgoing_id} holds no field slot ({other:?})");
                return Transition::Rejected(RejectReason::InconsistentState);
            }
        };

        let bench = self.bench_order(def);
        let Some(incoming_id) = bench.iter().find(|id| self.is_active_player(id)).cloned()
        else {
            return Transition::Rejected(RejectReason::NoSubstitutionPending);
        };
        let incoming_stats = match self.player(&incoming_id) {
            Some(p) => p.stats.clone(),
            None => {
                log::warn!("bench slot names unknown player {incoming_id}");
                return Transition::Rejected(RejectReason::InconsistentState);
            }
        };

        let snapshot = LastSubstitution {
            timestamp_ms: now_ms,
            formation_before: self.formation.clone(),
            rotation_queue_before: self.rotation_queue.clone(),
            next_player_id_before: self.next_player_id_to_sub_out.clone(),
            next_next_player_id_before: self.next_next_player_id_to_sub_out.clone(),
            next_physical_pair_before: self.next_physical_pair_to_sub_out,
            next_pair_before: self.next_pair_to_sub_out,
            players_going_off: vec![outgoing_id.clone()],
            players_coming_on: vec![incoming_id.clone()],
            coming_on_stats_before: vec![(incoming_id.clone(), incoming_stats)],
            scheme: SubstitutionScheme::Individual,
            sub_timer_seconds_at_substitution: self.sub_timer_seconds,
        };

        let mut state = self.clone();

        // Incoming player takes the vacated field slot.
        state.formation.set_single(out_slot, incoming_id.clone());

        // Bench shuffles up: remaining actives advance one slot and the
        // outgoing player parks behind them. Inactive players keep their
        // positions at the bottom of the stack.
        let mut new_bench: Vec<_> = bench.into_iter().filter(|id| *id != incoming_id).collect();
        let insert_at = new_bench.iter().filter(|id| state.is_active_player(id)).count();
        new_bench.insert(insert_at, outgoing_id.clone());
        state.write_bench(def, &new_bench);

        let outgoing_bench_slot = def.substitute_slots.get(insert_at).copied();
        state.transition_player(
            &outgoing_id,
            PlayerStatus::Substitute,
            PlayerRole::Substitute,
            outgoing_bench_slot,
            now_ms,
        );
        state.transition_player(
            &incoming_id,
            PlayerStatus::OnField,
            role_for(out_slot, None),
            Some(out_slot),
            now_ms,
        );

        state.rotation_queue.move_to_back(&outgoing_id);
        state.recompute_next_pointers();
        state.last_substitution = Some(snapshot);
        state.sub_timer_seconds = 0;

        applied(state, vec![incoming_id])
    }

    fn pairs_substitution(&self, now_ms: EpochMs) -> Transition {
        let Some(out_pair) = self.next_physical_pair_to_sub_out else {
            return Transition::Rejected(RejectReason::NoSubstitutionPending);
        };
        if !out_pair.is_field_pair() {
            log::warn!("next-pair pointer names non-field slot {out_pair:?}");
            return Transition::Rejected(RejectReason::InconsistentState);
        }
        let Some((defender_out, attacker_out)) =
            self.formation.occupant(out_pair).and_then(Occupant::complete_pair)
        else {
            return Transition::Rejected(RejectReason::IncompletePair);
        };
        let Some((defender_in, attacker_in)) =
            self.formation.occupant(SlotId::SubPair).and_then(Occupant::complete_pair)
        else {
            return Transition::Rejected(RejectReason::IncompletePair);
        };

        let incoming_stats: Vec<_> = [&defender_in, &attacker_in]
            .iter()
            .filter_map(|id| self.player(id).map(|p| ((*id).clone(), p.stats.clone())))
            .collect();
        if incoming_stats.len() != 2 {
            log::warn!("substitute pair names players missing from the squad");
            return Transition::Rejected(RejectReason::InconsistentState);
        }

        let snapshot = LastSubstitution {
            timestamp_ms: now_ms,
            formation_before: self.formation.clone(),
            rotation_queue_before: self.rotation_queue.clone(),
            next_player_id_before: self.next_player_id_to_sub_out.clone(),
            next_next_player_id_before: self.next_next_player_id_to_sub_out.clone(),
            next_physical_pair_before: self.next_physical_pair_to_sub_out,
            next_pair_before: self.next_pair_to_sub_out,
            players_going_off: vec![defender_out.clone(), attacker_out.clone()],
            players_coming_on: vec![defender_in.clone(), attacker_in.clone()],
            coming_on_stats_before: incoming_stats,
            scheme: SubstitutionScheme::Pairs,
            sub_timer_seconds_at_substitution: self.sub_timer_seconds,
        };

        let mut state = self.clone();

        if let Some(occ) = state.formation.occupant_mut(out_pair) {
            *occ = Occupant::Pair {
                defender: Some(defender_in.clone()),
                attacker: Some(attacker_in.clone()),
            };
        }
        if let Some(occ) = state.formation.occupant_mut(SlotId::SubPair) {
            *occ = Occupant::Pair {
                defender: Some(defender_out.clone()),
                attacker: Some(attacker_out.clone()),
            };
        }

        for id in [&defender_out, &attacker_out] {
            state.transition_player(
                id,
                PlayerStatus::Substitute,
                PlayerRole::Substitute,
                Some(SlotId::SubPair),
                now_ms,
            );
        }
        state.transition_player(
            &defender_in,
            PlayerStatus::OnField,
            role_for(out_pair, Some(PairRole::Defender)),
            Some(out_pair),
            now_ms,
        );
        state.transition_player(
            &attacker_in,
            PlayerStatus::OnField,
            role_for(out_pair, Some(PairRole::Attacker)),
            Some(out_pair),
            now_ms,
        );

        state.rotation_queue.move_to_back(&defender_out);
        state.rotation_queue.move_to_back(&attacker_out);

        let flipped = out_pair.opposite_field_pair();
        state.next_physical_pair_to_sub_out = flipped;
        state.next_pair_to_sub_out = flipped;
        state.last_substitution = Some(snapshot);
        state.sub_timer_seconds = 0;

        applied(state, vec![defender_in, attacker_in])
    }
}
