use serde::{Deserialize, Serialize};

use super::formation::SlotId;

/// Player identifier, supplied and owned by the caller.
pub type PlayerId = String;

/// Where a player currently is in the rotation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    OnField,
    #[default]
    Substitute,
    Goalie,
}

/// Time-tracking role. Field roles map to their own counters; `Substitute`
/// and `Goalie` accrue into the bench/goal counters regardless of any
/// pair label a slot may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Goalie,
    Defender,
    Midfielder,
    Attacker,
    #[default]
    Substitute,
}

/// Stint clock for a single player.
///
/// A stint is a maximal interval in one (status, role) pair. Pausing flushes
/// the running stint into the counters and parks the clock; only a resume or
/// an explicit restart may start a new stint after that. Encoding the parked
/// state as its own variant means no accumulation path can read a stale
/// start timestamp between a pause and the next resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StintClock {
    /// No stint in progress (pre-kickoff, or an inactive substitute).
    #[default]
    Stopped,
    /// Stint running since the given epoch timestamp.
    Running { started_at_ms: i64 },
    /// Clock paused; accumulated time already flushed into the counters.
    PausedFlushed,
}

impl StintClock {
    /// Start of the current stint, `0` when no stint is running.
    pub fn started_at_ms(&self) -> i64 {
        match self {
            StintClock::Running { started_at_ms } => *started_at_ms,
            _ => 0,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, StintClock::Running { .. })
    }
}

/// Mutable per-player rotation state and cumulative time counters.
///
/// Counters are whole seconds. `current_slot` is a back-reference from the
/// player to the formation slot currently held; the formation remains the
/// single owner of slot assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayerStats {
    pub is_inactive: bool,
    pub current_status: PlayerStatus,
    pub current_role: PlayerRole,
    pub current_slot: Option<SlotId>,
    pub stint_clock: StintClock,
    pub time_on_field_seconds: u32,
    pub time_as_defender_seconds: u32,
    pub time_as_midfielder_seconds: u32,
    pub time_as_attacker_seconds: u32,
    pub time_as_sub_seconds: u32,
    pub time_as_goalie_seconds: u32,
    /// Fixed at kickoff, never touched afterwards.
    pub started_match_as: Option<PlayerStatus>,
}

impl PlayerStats {
    /// Total accounted active time across every bucket a player can be in.
    pub fn total_active_seconds(&self) -> u32 {
        self.time_on_field_seconds + self.time_as_sub_seconds + self.time_as_goalie_seconds
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Player { id: id.into(), name: name.into(), stats: PlayerStats::default() }
    }
}
