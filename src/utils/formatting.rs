//! Formatting utilities used for CLI output.

use crate::core::completion::Progress;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Left-aligned padding counted in characters, not bytes.
pub fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

/// First eight characters of an id, enough to tell activities apart on screen.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}

pub fn check_mark(done: bool) -> &'static str {
    if done { "[x]" } else { "[ ]" }
}

/// `███░░░ 3/6` style bar.
pub fn progress_bar(p: Progress, width: usize) -> String {
    let filled = if p.total == 0 {
        0
    } else {
        (p.done * width) / p.total
    };
    format!(
        "{}{} {}/{}",
        "█".repeat(filled),
        "░".repeat(width - filled),
        p.done,
        p.total
    )
}
