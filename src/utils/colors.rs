/// ANSI color helper utilities for terminal output.
use crate::core::completion::RewardState;
use crate::models::Period;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const WHITE: &str = "\x1b[37m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

pub fn color_for_period(period: Period) -> &'static str {
    match period {
        Period::Morning => YELLOW,
        Period::Afternoon => CYAN,
        Period::Evening => MAGENTA,
    }
}

/// Locked → grey, unlocked → green, redeemed → blue
pub fn color_for_reward(state: RewardState) -> &'static str {
    match state {
        RewardState::Locked => GREY,
        RewardState::Unlocked => GREEN,
        RewardState::Redeemed => BLUE,
    }
}

/// Grey out empty values (`""`, `--:--`).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

pub fn colorize_done(value: &str, done: bool) -> String {
    if done {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{WHITE}{value}{RESET}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_time_is_grey() {
        assert_eq!(colorize_optional("--:--"), format!("{GREY}--:--{RESET}"));
        assert_eq!(colorize_optional("08:00"), "08:00");
    }
}
