// Game timing constants
pub const TICK_INTERVAL_MS: u64 = 100;
pub const TICKS_PER_SECOND: u32 = 10;
pub const INPUT_POLL_MS: u64 = 50;

// Scheduled-action delays, in ticks
pub const OPPONENT_REPLY_TICKS: u32 = 8;
pub const ROLLBACK_TICKS: u32 = 10;
pub const SOLUTION_STEP_TICKS: u32 = 8;

/// How long Correct feedback stays on the status bar (1 second)
pub const FEEDBACK_TICKS: u32 = 10;
