//! Rotation and substitution calculators.
//!
//! Every operation is a pure transform on the aggregate: it either returns
//! a fresh `GameState` (plus the ids worth highlighting in the UI) or
//! reports why nothing happened. Recognized misuse never panics and never
//! mutates the input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::definitions::{formation_definition, FormationDefinition};
use crate::models::{
    GameState, PlayerId, PlayerRole, PlayerStatus, SlotId, SubstitutionScheme,
};
use crate::time::stint;
use crate::time::EpochMs;

pub mod animation;

mod bench;
mod substitution;
mod switches;
mod undo;

#[cfg(test)]
mod rotation_contracts_test;
#[cfg(test)]
mod test_support;

/// Why an operation was refused. All of these leave the aggregate untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    UnknownPlayer,
    SamePlayer,
    GoalieInvolved,
    AlreadyGoalie,
    InactivePlayer,
    NotASubstitute,
    NotOnField,
    WrongScheme,
    UnknownSlot,
    IncompletePair,
    NoSubstitutionPending,
    NothingToUndo,
    MissingDefinition,
    InconsistentState,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::UnknownPlayer => "player not found in the squad",
            RejectReason::SamePlayer => "both ids refer to the same player",
            RejectReason::GoalieInvolved => "the goalie cannot take part in this operation",
            RejectReason::AlreadyGoalie => "player is already in goal",
            RejectReason::InactivePlayer => "player is inactive",
            RejectReason::NotASubstitute => "player is not in a substitute slot",
            RejectReason::NotOnField => "player is not on the field",
            RejectReason::WrongScheme => "operation does not apply to this substitution scheme",
            RejectReason::UnknownSlot => "slot is not part of this formation",
            RejectReason::IncompletePair => "pair slot is not fully occupied",
            RejectReason::NoSubstitutionPending => "no unit is queued to come off",
            RejectReason::NothingToUndo => "no substitution to undo",
            RejectReason::MissingDefinition => "no formation definition for this configuration",
            RejectReason::InconsistentState => "aggregate state is internally inconsistent",
        };
        f.write_str(text)
    }
}

/// Outcome of one calculator operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The operation took effect; `state` replaces the caller's aggregate.
    Applied { state: GameState, players_to_highlight: Vec<PlayerId> },
    /// Benign no-op (e.g., promoting the slot that is already frontmost).
    Unchanged,
    /// Recognized misuse; the input aggregate stays authoritative.
    Rejected(RejectReason),
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }

    pub fn state(&self) -> Option<&GameState> {
        match self {
            Transition::Applied { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Consume the transition, yielding the new aggregate when applied.
    pub fn into_state(self) -> Option<GameState> {
        match self {
            Transition::Applied { state, .. } => Some(state),
            _ => None,
        }
    }
}

/// Wrap an applied transition, recording the highlight list on the
/// aggregate itself as well.
pub(crate) fn applied(mut state: GameState, players_to_highlight: Vec<PlayerId>) -> Transition {
    state.players_to_highlight = players_to_highlight.clone();
    #[cfg(feature = "strict_contracts")]
    if let Err(err) = state.validate() {
        panic!("aggregate contract violated after transition: {err}");
    }
    Transition::Applied { state, players_to_highlight }
}

impl GameState {
    pub(crate) fn definition(&self) -> Result<&'static FormationDefinition, RejectReason> {
        formation_definition(&self.team_config, self.selected_formation_shape).map_err(|err| {
            log::warn!("formation definition lookup failed: {err}");
            RejectReason::MissingDefinition
        })
    }

    pub(crate) fn is_active_player(&self, id: &str) -> bool {
        self.player(id).is_some_and(|p| !p.stats.is_inactive)
    }

    /// Bench occupants in substitute-slot order.
    pub(crate) fn bench_order(&self, def: &FormationDefinition) -> Vec<PlayerId> {
        def.substitute_slots
            .iter()
            .filter_map(|slot| self.formation.single(*slot).cloned())
            .collect()
    }

    /// Write a bench ordering back into the substitute slots and refresh the
    /// affected players' slot back-references.
    pub(crate) fn write_bench(&mut self, def: &FormationDefinition, order: &[PlayerId]) {
        for (index, slot) in def.substitute_slots.iter().enumerate() {
            if let Some(id) = order.get(index) {
                self.formation.set_single(*slot, id.clone());
                let slot = *slot;
                if let Some(player) = self.player_mut(id) {
                    player.stats.current_slot = Some(slot);
                }
            }
        }
    }

    /// Move a player into a new (status, role, slot), closing the old stint
    /// and opening the next one. While the substitution clock is paused the
    /// stint clock is restarted without accumulating; the pause handler
    /// already flushed time up to the pause instant.
    pub(crate) fn transition_player(
        &mut self,
        id: &PlayerId,
        status: PlayerStatus,
        role: PlayerRole,
        slot: Option<SlotId>,
        now_ms: EpochMs,
    ) {
        let paused = self.is_sub_timer_paused;
        if let Some(player) = self.player_mut(id) {
            if paused {
                stint::reset_stint_clock(&mut player.stats, now_ms);
            } else {
                stint::close_stint(&mut player.stats, now_ms, false);
                if !player.stats.stint_clock.is_running() {
                    stint::start_stint(&mut player.stats, now_ms);
                }
            }
            player.stats.current_status = status;
            player.stats.current_role = role;
            player.stats.current_slot = slot;
        }
    }

    /// Re-derive the individual-scheme next pointers from the queue head.
    pub(crate) fn recompute_next_pointers(&mut self) {
        if self.team_config.scheme == SubstitutionScheme::Individual {
            self.next_player_id_to_sub_out = self.rotation_queue.head().cloned();
            self.next_next_player_id_to_sub_out = self.rotation_queue.get(1).cloned();
        }
    }

    /// Pause or resume the substitution clock for the whole squad. Pausing
    /// flushes every running stint into the counters; resuming restarts the
    /// clock for every non-inactive player.
    pub fn apply_pause_change(&self, now_ms: EpochMs, pausing: bool) -> Transition {
        if pausing == self.is_sub_timer_paused {
            return Transition::Unchanged;
        }
        let mut state = self.clone();
        state.apply_pause_to_players(now_ms, pausing);
        applied(state, Vec::new())
    }
}
