pub mod calculator;
pub mod stint;

pub use calculator::{
    current_stint_duration, duration_seconds, is_valid_time_range,
    should_skip_time_calculation, undo_timer_target, EpochMs,
};
