use crate::db::log::read_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const OP_WIDTH: usize = 60;

static ANSI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap());

fn strip_ansi(s: &str) -> String {
    ANSI.replace_all(s, "").into_owned()
}

/// Colour of an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "init" | "seed" => Colour::RGB(255, 153, 51),
        "schedule" => Colour::Green,
        "restore" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "mode" | "pin" | "settings" => Colour::Yellow,
        other if other.starts_with("reward_") => Colour::Cyan,
        other if other.starts_with("routine_") => Colour::Blue,
        other if other.starts_with("picto_") || other.starts_with("people_") => Colour::Blue,
        _ => Colour::White,
    }
}

/// `op (target)` cut to `width` visible characters, operation word coloured.
fn render_op(operation: &str, target: &str, width: usize) -> String {
    let plain = if target.is_empty() {
        operation.to_string()
    } else {
        format!("{operation} ({target})")
    };

    let visible = if plain.chars().count() > width {
        let mut s: String = plain.chars().take(width.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = read_log(&pool.conn)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);
                let op = render_op(&e.operation, &e.target, OP_WIDTH);
                (e.id, date, op, e.message)
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| strip_ansi(&r.2).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH);

        println!("📜 Internal log:\n");

        for (id, date, op, message) in rows {
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&op).chars().count()));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                op,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_targets_are_cut_without_counting_colour_codes() {
        let target = "x".repeat(80);
        let out = render_op("schedule", &target, 20);
        let visible = strip_ansi(&out);
        assert_eq!(visible.chars().count(), 20);
        assert!(visible.starts_with("schedule ("));
        assert!(visible.ends_with("..."));
    }
}
