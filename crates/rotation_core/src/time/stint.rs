//! Stint accounting for a single player.
//!
//! A stint is a maximal interval in one (status, role) pair. The functions
//! here are the only writers of the time counters; the rotation calculators
//! call them at every transition boundary.
//!
//! Pause interaction: pausing flushes the running stint into the counters
//! and parks the clock as `PausedFlushed`. A substitution that happens while
//! paused must restart the clock WITHOUT accumulating (`reset_stint_clock`);
//! running the accumulate path there would count the already-flushed
//! interval a second time.

use crate::models::{PlayerRole, PlayerStats, PlayerStatus, StintClock};

use super::calculator::{duration_seconds, EpochMs};

fn accumulate(stats: &mut PlayerStats, elapsed_seconds: u32) {
    match stats.current_status {
        PlayerStatus::OnField => {
            stats.time_on_field_seconds += elapsed_seconds;
            match stats.current_role {
                PlayerRole::Defender => stats.time_as_defender_seconds += elapsed_seconds,
                PlayerRole::Midfielder => stats.time_as_midfielder_seconds += elapsed_seconds,
                PlayerRole::Attacker => stats.time_as_attacker_seconds += elapsed_seconds,
                role => {
                    log::warn!(
                        "on-field player with role {:?}; no role bucket credited",
                        role
                    );
                }
            }
        }
        PlayerStatus::Substitute => stats.time_as_sub_seconds += elapsed_seconds,
        PlayerStatus::Goalie => stats.time_as_goalie_seconds += elapsed_seconds,
    }
}

/// Accumulate the running stint into the counters and restart it at `now`.
/// No-op while the clock is paused, stopped, or not yet started.
pub fn update_time_stats(stats: &mut PlayerStats, now_ms: EpochMs, is_paused: bool) {
    let started_at = match stats.stint_clock {
        StintClock::Running { started_at_ms } => started_at_ms,
        _ => return,
    };
    if is_paused {
        return;
    }
    accumulate(stats, duration_seconds(started_at, now_ms));
    stats.stint_clock = StintClock::Running { started_at_ms: now_ms };
}

/// Open a stint at `now` for the player's current (status, role).
pub fn start_stint(stats: &mut PlayerStats, now_ms: EpochMs) {
    stats.stint_clock = StintClock::Running { started_at_ms: now_ms };
}

/// Close the running stint at a transition boundary, crediting its elapsed
/// time. The caller changes status/role afterwards and opens the next stint.
pub fn close_stint(stats: &mut PlayerStats, now_ms: EpochMs, is_paused: bool) {
    update_time_stats(stats, now_ms, is_paused);
}

/// Restart the stint clock WITHOUT accumulating. Mandatory whenever a
/// transition happens while the substitution clock is paused: the pause
/// handler has already flushed time up to the pause instant.
pub fn reset_stint_clock(stats: &mut PlayerStats, now_ms: EpochMs) {
    stats.stint_clock = StintClock::Running { started_at_ms: now_ms };
}

/// Pause or resume the clock. Pausing flushes the running stint and parks
/// the clock; resuming restarts it for any non-inactive player.
pub fn handle_pause_change(stats: &mut PlayerStats, now_ms: EpochMs, pausing: bool) {
    if pausing {
        if let StintClock::Running { started_at_ms } = stats.stint_clock {
            accumulate(stats, duration_seconds(started_at_ms, now_ms));
            stats.stint_clock = StintClock::PausedFlushed;
        }
    } else if !stats.is_inactive {
        stats.stint_clock = StintClock::Running { started_at_ms: now_ms };
    }
}
