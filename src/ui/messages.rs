//! User-facing console messages.
//!
//! Every line starts with a coloured icon. Errors go to stderr, the rest to
//! stdout so command output stays pipeable.

use std::fmt;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Success,
    Warning,
    Error,
    Party,
}

impl Tone {
    fn color(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[34m",
            Tone::Success => "\x1b[32m",
            Tone::Warning => "\x1b[33m",
            Tone::Error => "\x1b[31m",
            Tone::Party => "\x1b[35m",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Tone::Info => "ℹ️",
            Tone::Success => "✅",
            Tone::Warning => "⚠️",
            Tone::Error => "❌",
            Tone::Party => "🎉",
        }
    }
}

fn emit(tone: Tone, msg: impl fmt::Display) {
    // celebrations keep the whole line coloured
    let line = match tone {
        Tone::Party => format!("{}{}{} {}{}", tone.color(), BOLD, tone.icon(), msg, RESET),
        _ => format!("{}{}{} {}{}", tone.color(), BOLD, tone.icon(), RESET, msg),
    };

    match tone {
        Tone::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    emit(Tone::Info, msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    emit(Tone::Success, msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    emit(Tone::Warning, msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    emit(Tone::Error, msg);
}

/// Reward unlocked or day completed.
pub fn celebrate<T: fmt::Display>(msg: T) {
    emit(Tone::Party, msg);
}

/// Section title above a day or week view
pub fn header<T: fmt::Display>(msg: T) {
    let title = msg.to_string();
    let rule = "─".repeat(title.chars().count().max(12));
    println!("{}{}{}\n{}{}", Tone::Info.color(), BOLD, title, rule, RESET);
}
