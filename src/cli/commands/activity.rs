//! Activity commands: add, toggle, edit, move, del, clear and copy.

use super::{default_period, open_store, parse_day, parse_period, resolve_activity, resolve_pictogram};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::collaborators::{ConsoleSpeaker, speak_if_enabled};
use crate::core::completion::Celebration;
use crate::core::schedule::Direction;
use crate::errors::{AppError, AppResult};
use crate::models::{Activity, ActivityPatch, Period};
use crate::ui::messages::{celebrate, info, success};
use crate::utils::date::{day_key, weekday_name};
use crate::utils::formatting::short_id;
use crate::utils::time::{parse_optional_time, parse_time};

fn optional_text(s: &Option<String>) -> Option<Option<String>> {
    s.as_ref()
        .map(|v| Some(v.trim().to_string()).filter(|v| !v.is_empty()))
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Add {
            date,
            picto,
            time,
            period,
            label,
            notes,
        } => {
            let d = parse_day(date)?;
            let mut store = open_store(cfg, Some(d))?;

            let picto_id = resolve_pictogram(store.pictograms(), picto)?;
            let time = parse_optional_time(time.as_ref())?;
            let period = match period {
                Some(p) => parse_period(p)?,
                None => time.map(Period::from_time).unwrap_or_else(|| default_period(cfg)),
            };

            let mut activity = Activity::new(&picto_id, period)
                .with_time(time)
                .with_label(label.clone());
            activity.notes = notes.clone().filter(|n| !n.trim().is_empty());

            let a = store.add_activity(activity)?;
            success(format!(
                "Added '{}' on {} ({}) #{}",
                a.display_label(store.pictograms()),
                day_key(d),
                a.period.as_str(),
                short_id(&a.id)
            ));
        }

        Commands::Toggle { date, activity } => {
            let d = parse_day(date)?;
            let mut store = open_store(cfg, Some(d))?;
            let id = resolve_activity(store.day(), activity)?;

            let (done, fired) = store.toggle_activity(&id)?;
            let label = store
                .day()
                .iter()
                .find(|a| a.id == id)
                .map(|a| a.display_label(store.pictograms()))
                .unwrap_or_default();

            if done {
                success(format!("Done: {label}"));
            } else {
                info(format!("Not done: {label}"));
            }

            let settings = store.settings();
            if done && settings.auto_speak {
                speak_if_enabled(&ConsoleSpeaker, settings.voice_enabled, &label, &settings.voice_language);
            }

            for c in fired {
                match c {
                    Celebration::RewardUnlocked { period, label, emoji } => celebrate(format!(
                        "{} complete! Reward unlocked: {} {}",
                        period.label(&cfg.locale),
                        label,
                        emoji
                    )),
                    Celebration::DayComplete => celebrate(format!(
                        "Every activity of {} is done!",
                        weekday_name(d, &cfg.locale)
                    )),
                }
            }
        }

        Commands::Edit {
            date,
            activity,
            picto,
            time,
            no_time,
            period,
            label,
            notes,
        } => {
            let d = parse_day(date)?;
            let mut store = open_store(cfg, Some(d))?;
            let id = resolve_activity(store.day(), activity)?;

            let time = if *no_time {
                Some(None)
            } else {
                match time {
                    Some(t) => Some(Some(parse_time(t).ok_or_else(|| AppError::InvalidTime(t.clone()))?)),
                    None => None,
                }
            };

            let patch = ActivityPatch {
                pictogram_id: match picto {
                    Some(p) => Some(resolve_pictogram(store.pictograms(), p)?),
                    None => None,
                },
                custom_label: optional_text(label),
                time,
                period: period.as_deref().map(parse_period).transpose()?,
                notes: optional_text(notes),
            };

            if patch.is_empty() {
                info("Nothing to change.");
                return Ok(());
            }
            store.update_activity(&id, &patch)?;
            success(format!("Updated activity #{}", short_id(&id)));
        }

        Commands::Move {
            date,
            activity,
            up,
            down,
        } => {
            let direction = match (*up, *down) {
                (true, false) => Direction::Up,
                (false, true) => Direction::Down,
                _ => return Err(AppError::MissingField("--up or --down".to_string())),
            };

            let d = parse_day(date)?;
            let mut store = open_store(cfg, Some(d))?;
            let id = resolve_activity(store.day(), activity)?;
            let pos = store.move_activity(&id, direction)?;
            success(format!("Activity #{} is now at position {}", short_id(&id), pos + 1));
        }

        Commands::Del { date, activity } => {
            let d = parse_day(date)?;
            let mut store = open_store(cfg, Some(d))?;
            let id = resolve_activity(store.day(), activity)?;
            let removed = store.delete_activity(&id)?;
            success(format!(
                "Deleted '{}' from {}",
                removed.display_label(store.pictograms()),
                day_key(d)
            ));
        }

        Commands::Clear { date } => {
            let d = parse_day(date)?;
            let mut store = open_store(cfg, Some(d))?;
            let n = store.clear_day()?;
            success(format!("Removed {n} activities from {}", day_key(d)));
        }

        Commands::Copy { from, to } => {
            let source = parse_day(from)?;
            let mut store = open_store(cfg, Some(source))?;

            match to {
                None => {
                    info(format!("Valid destinations for {}:", day_key(source)));
                    for d in store.copy_destinations() {
                        println!("  {} {}", weekday_name(d, &cfg.locale), day_key(d));
                    }
                }
                Some(t) => {
                    let target = parse_day(t)?;
                    let n = store.copy_day_to(target)?;
                    success(format!(
                        "Copied {n} activities from {} to {}",
                        day_key(source),
                        day_key(target)
                    ));
                }
            }
        }

        _ => {}
    }

    Ok(())
}
