//! `week` and `day`: read-only views of the schedule.

use super::{open_store, parse_day, Store};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::collaborators::{ConsoleSpeaker, speak_if_enabled};
use crate::core::completion::{day_progress, period_progress};
use crate::errors::AppResult;
use crate::models::{Activity, Period};
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET, color_for_period, color_for_reward, colorize_done, colorize_optional};
use crate::utils::date::{day_key, format_week_range, parse_day_key, shift_week, today, weekday_name};
use crate::utils::formatting::{bold, check_mark, pad_right, progress_bar, short_id};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Week { date, offset } => {
            let mut d = match date {
                Some(s) => parse_day(s)?,
                None => today(),
            };
            if let Some(n) = offset {
                d = shift_week(d, *n);
            }
            let store = open_store(cfg, Some(d))?;
            print_week(&store, cfg);
        }
        Commands::Day { date, speak } => {
            let d = match date {
                Some(s) => parse_day(s)?,
                None => today(),
            };
            let store = open_store(cfg, Some(d))?;
            print_day(&store, cfg);

            let settings = store.settings();
            if *speak || settings.auto_speak {
                let speaker = ConsoleSpeaker;
                for a in store.day() {
                    speak_if_enabled(
                        &speaker,
                        settings.voice_enabled,
                        &a.display_label(store.pictograms()),
                        &settings.voice_language,
                    );
                }
            }
        }
        _ => {}
    }
    Ok(())
}

fn activity_line(store: &Store, pos: usize, a: &Activity) -> String {
    let settings = store.settings();
    let library = store.pictograms();
    let glyph = store.pictogram_or_placeholder(&a.pictogram_id).glyph();

    let mut label = if settings.show_text {
        a.display_label(library)
    } else {
        String::new()
    };
    if settings.high_contrast {
        label = bold(&label);
    }

    let mut line = format!(
        "  {:>2}. {} {} {} {}",
        pos,
        check_mark(a.is_done),
        colorize_optional(&a.time_str()),
        glyph,
        colorize_done(&label, a.is_done)
    );
    if let Some(notes) = &a.notes {
        line.push_str(&format!(" {GREY}({notes}){RESET}"));
    }
    line.push_str(&format!(" {GREY}#{}{RESET}", short_id(&a.id)));
    line
}

/// One day grouped by period, with progress and reward state.
pub fn print_day(store: &Store, cfg: &Config) {
    let date = store.selected_date();
    let day = store.day();

    header(format!(
        "{} {} [{}]",
        weekday_name(date, &cfg.locale),
        day_key(date),
        store.mode().as_str()
    ));

    if day.is_empty() {
        println!("{GREY}  (no activities){RESET}");
        return;
    }

    for period in Period::ALL {
        let p = period_progress(day, period);
        let reward = match (store.reward(period), store.reward_state(period)) {
            (Some(r), Some(state)) => format!(
                "  🎁 {} {} {}[{}]{}",
                r.label,
                r.emoji,
                color_for_reward(state),
                state.as_str(),
                RESET
            ),
            _ => String::new(),
        };
        if p.total == 0 && reward.is_empty() {
            continue;
        }

        println!(
            "{}{}{} {}{}",
            color_for_period(period),
            pad_right(period.label(&cfg.locale), 9),
            RESET,
            progress_bar(p, 10),
            reward
        );

        // positions are day-wide so they can be passed back to other commands
        for (i, a) in day.iter().enumerate() {
            if a.period == period {
                println!("{}", activity_line(store, i + 1, a));
            }
        }
    }

    let total = day_progress(day);
    println!("\n{} {}%", bold("Total:"), total.percent());
}

/// Monday..Sunday of the selected week.
pub fn print_week(store: &Store, cfg: &Config) {
    header(format_week_range(store.selected_date(), &cfg.locale));

    for (key, acts) in store.visible_days() {
        let Some(date) = parse_day_key(&key) else {
            continue;
        };
        let marker = if date == store.today() { "▶" } else { " " };
        println!(
            "{} {} {}  {}",
            marker,
            pad_right(weekday_name(date, &cfg.locale), 10),
            key,
            progress_bar(day_progress(&acts), 10)
        );

        for (i, a) in acts.iter().enumerate() {
            println!("{}", activity_line(store, i + 1, a));
        }
    }
}
