//! Pure arithmetic over epoch timestamps. Every function is total: invalid
//! input yields zero (or the untouched original value), never an error.

/// Milliseconds since the Unix epoch, always supplied by the caller.
pub type EpochMs = i64;

/// `start > 0 && end >= start`.
pub fn is_valid_time_range(start_ms: EpochMs, end_ms: EpochMs) -> bool {
    start_ms > 0 && end_ms >= start_ms
}

/// Elapsed whole seconds between two timestamps, rounded to nearest.
/// Returns 0 for any invalid range.
pub fn duration_seconds(start_ms: EpochMs, end_ms: EpochMs) -> u32 {
    if !is_valid_time_range(start_ms, end_ms) {
        return 0;
    }
    ((end_ms - start_ms) as f64 / 1000.0).round() as u32
}

/// Time accumulation is skipped while the clock is paused or before a stint
/// has started.
pub fn should_skip_time_calculation(is_paused: bool, stint_start_ms: EpochMs) -> bool {
    is_paused || stint_start_ms <= 0
}

/// Duration of the stint running since `stint_start_ms`, or 0 when paused
/// or not started.
pub fn current_stint_duration(is_paused: bool, stint_start_ms: EpochMs, now_ms: EpochMs) -> u32 {
    if should_skip_time_calculation(is_paused, stint_start_ms) {
        return 0;
    }
    duration_seconds(stint_start_ms, now_ms)
}

/// Substitution-clock value an undone substitution should restore: the value
/// captured at substitution time plus everything elapsed since. Falls back
/// to the captured value when the substitution timestamp is invalid.
pub fn undo_timer_target(
    value_at_substitution: u32,
    substitution_ms: EpochMs,
    now_ms: EpochMs,
) -> u32 {
    if !is_valid_time_range(substitution_ms, now_ms) {
        return value_at_substitution;
    }
    value_at_substitution + duration_seconds(substitution_ms, now_ms)
}
