use serde::{Deserialize, Serialize};

use crate::definitions::formation_definition;
use crate::error::RotationError;
use crate::time::stint;

use super::formation::{role_for, Formation, SlotId};
use super::player::{Player, PlayerId, PlayerStats, PlayerStatus, StintClock};
use super::team_config::{FormationShape, SubstitutionScheme, TeamConfig};

/// Fairness-ordered sequence of active non-goalie players. The head is the
/// player about to be substituted out; bench players sit behind every field
/// player and come on in queue order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RotationQueue(Vec<PlayerId>);

impl RotationQueue {
    pub fn new(ids: Vec<PlayerId>) -> Self {
        RotationQueue(ids)
    }

    pub fn head(&self) -> Option<&PlayerId> {
        self.0.first()
    }

    pub fn get(&self, index: usize) -> Option<&PlayerId> {
        self.0.get(index)
    }

    pub fn position_of(&self, id: &PlayerId) -> Option<usize> {
        self.0.iter().position(|q| q == id)
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.0.iter().any(|q| q == id)
    }

    /// Remove a player, returning the index they held.
    pub fn remove(&mut self, id: &PlayerId) -> Option<usize> {
        let idx = self.position_of(id)?;
        self.0.remove(idx);
        Some(idx)
    }

    pub fn insert_at(&mut self, index: usize, id: PlayerId) {
        let index = index.min(self.0.len());
        self.0.insert(index, id);
    }

    pub fn push_back(&mut self, id: PlayerId) {
        self.0.push(id);
    }

    /// Send a player to the back of the queue.
    pub fn move_to_back(&mut self, id: &PlayerId) {
        if self.remove(id).is_some() {
            self.0.push(id.clone());
        }
    }

    /// Swap the queue positions of two players.
    pub fn swap_ids(&mut self, a: &PlayerId, b: &PlayerId) {
        if let (Some(ia), Some(ib)) = (self.position_of(a), self.position_of(b)) {
            self.0.swap(ia, ib);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlayerId> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[PlayerId] {
        &self.0
    }
}

/// Undo snapshot written by every ordinary substitution and consumed by the
/// next undo. Captures everything needed to put the board back exactly as
/// it was the moment before the swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastSubstitution {
    pub timestamp_ms: i64,
    pub formation_before: Formation,
    pub rotation_queue_before: RotationQueue,
    pub next_player_id_before: Option<PlayerId>,
    pub next_next_player_id_before: Option<PlayerId>,
    pub next_physical_pair_before: Option<SlotId>,
    pub next_pair_before: Option<SlotId>,
    pub players_going_off: Vec<PlayerId>,
    pub players_coming_on: Vec<PlayerId>,
    /// Deep copy of the incoming players' stats taken before the swap.
    pub coming_on_stats_before: Vec<(PlayerId, PlayerStats)>,
    pub scheme: SubstitutionScheme,
    pub sub_timer_seconds_at_substitution: u32,
}

/// The root aggregate threaded through every calculator call. Owned by the
/// caller; every operation is a pure transform producing a fresh aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub formation: Formation,
    pub all_players: Vec<Player>,
    pub team_config: TeamConfig,
    pub selected_formation_shape: FormationShape,
    pub rotation_queue: RotationQueue,
    pub next_player_id_to_sub_out: Option<PlayerId>,
    pub next_next_player_id_to_sub_out: Option<PlayerId>,
    pub next_physical_pair_to_sub_out: Option<SlotId>,
    pub next_pair_to_sub_out: Option<SlotId>,
    pub players_to_highlight: Vec<PlayerId>,
    pub is_sub_timer_paused: bool,
    pub last_substitution: Option<LastSubstitution>,
    pub sub_timer_seconds: u32,
}

impl GameState {
    /// Build the aggregate for kickoff: validates the squad against the
    /// formation definition, zeroes every counter, fixes `started_match_as`,
    /// opens the first stints, and seeds the rotation queue (field players
    /// in slot order, then substitutes in slot order).
    pub fn kickoff(
        players: Vec<Player>,
        team_config: TeamConfig,
        shape: FormationShape,
        formation: Formation,
        now_ms: i64,
    ) -> Result<GameState, RotationError> {
        let def = formation_definition(&team_config, shape)?;

        let expected: Vec<SlotId> =
            def.field_slots.iter().chain(def.substitute_slots.iter()).copied().collect();
        let actual: Vec<SlotId> = formation.slots.iter().map(|e| e.slot).collect();
        if expected != actual {
            return Err(RotationError::InvalidSquad(format!(
                "formation slots {:?} do not match the {} {} layout",
                actual,
                team_config.format.code(),
                shape.code()
            )));
        }

        if players.len() != team_config.squad_size as usize {
            return Err(RotationError::InvalidSquad(format!(
                "expected {} players, found {}",
                team_config.squad_size,
                players.len()
            )));
        }

        let mut players = players;
        for player in &mut players {
            let (slot, pair_role) = formation.locate(&player.id).ok_or_else(|| {
                RotationError::InvalidSquad(format!("player {} holds no slot", player.id))
            })?;
            let status = if slot == SlotId::Goalie {
                PlayerStatus::Goalie
            } else if slot.is_substitute() {
                PlayerStatus::Substitute
            } else {
                PlayerStatus::OnField
            };
            player.stats = PlayerStats {
                is_inactive: false,
                current_status: status,
                current_role: role_for(slot, pair_role),
                current_slot: Some(slot),
                stint_clock: StintClock::Running { started_at_ms: now_ms },
                started_match_as: Some(status),
                ..PlayerStats::default()
            };
        }

        let mut queue_ids: Vec<PlayerId> = Vec::new();
        for slot in def.field_slots.iter().chain(def.substitute_slots.iter()) {
            if let Some(occ) = formation.occupant(*slot) {
                queue_ids.extend(occ.ids());
            }
        }

        let (next_player, next_next, next_pair) = match team_config.scheme {
            SubstitutionScheme::Individual => {
                (queue_ids.first().cloned(), queue_ids.get(1).cloned(), None)
            }
            SubstitutionScheme::Pairs => (None, None, Some(SlotId::LeftPair)),
        };

        let state = GameState {
            formation,
            all_players: players,
            team_config,
            selected_formation_shape: shape,
            rotation_queue: RotationQueue::new(queue_ids),
            next_player_id_to_sub_out: next_player,
            next_next_player_id_to_sub_out: next_next,
            next_physical_pair_to_sub_out: next_pair,
            next_pair_to_sub_out: next_pair,
            players_to_highlight: Vec::new(),
            is_sub_timer_paused: false,
            last_substitution: None,
            sub_timer_seconds: 0,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.all_players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.all_players.iter_mut().find(|p| p.id == id)
    }

    /// Apply a substitution-clock pause or resume across the whole squad.
    /// Pausing flushes every running stint into the counters; resuming
    /// restarts the clock for every non-inactive player.
    pub(crate) fn apply_pause_to_players(&mut self, now_ms: i64, pausing: bool) {
        for player in &mut self.all_players {
            stint::handle_pause_change(&mut player.stats, now_ms, pausing);
        }
        self.is_sub_timer_paused = pausing;
    }

    /// Structural invariants of the aggregate: a known formation layout,
    /// slot exclusivity (every selected player holds exactly one position),
    /// rotation-queue conservation, and player back-references that agree
    /// with the formation.
    pub fn validate(&self) -> Result<(), RotationError> {
        formation_definition(&self.team_config, self.selected_formation_shape)?;

        let mut occupied = self.formation.assigned_ids();
        occupied.push(self.formation.goalie.clone());
        let mut seen = std::collections::HashSet::new();
        for id in &occupied {
            if !seen.insert(id.clone()) {
                return Err(RotationError::InvalidSquad(format!(
                    "player {} occupies more than one position",
                    id
                )));
            }
        }
        if occupied.len() != self.all_players.len() {
            return Err(RotationError::InvalidSquad(format!(
                "{} positions occupied for a squad of {}",
                occupied.len(),
                self.all_players.len()
            )));
        }
        for player in &self.all_players {
            if !seen.contains(&player.id) {
                return Err(RotationError::InvalidSquad(format!(
                    "player {} holds no position",
                    player.id
                )));
            }
        }

        for player in &self.all_players {
            let located = self.formation.locate(&player.id).map(|(slot, _)| slot);
            if player.stats.current_slot != located {
                return Err(RotationError::InvalidSquad(format!(
                    "player {} back-reference {:?} disagrees with formation {:?}",
                    player.id, player.stats.current_slot, located
                )));
            }
        }

        let expected_queue: std::collections::HashSet<&PlayerId> = self
            .all_players
            .iter()
            .filter(|p| !p.stats.is_inactive && p.id != self.formation.goalie)
            .map(|p| &p.id)
            .collect();
        let queued: std::collections::HashSet<&PlayerId> = self.rotation_queue.iter().collect();
        if queued != expected_queue || self.rotation_queue.len() != expected_queue.len() {
            return Err(RotationError::InvalidSquad(
                "rotation queue does not hold exactly the active non-goalie players".to_string(),
            ));
        }

        Ok(())
    }
}
