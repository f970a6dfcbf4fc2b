//! Week slice of the yearly schedule, and the activity operations built on it.
//!
//! The yearly map is the only source of truth. Reading a week is a pure
//! lookup with an all-empty default; writing replaces exactly one week, the
//! one containing the date given at call time.

use crate::errors::{AppError, AppResult};
use crate::models::{Activity, ActivityPatch, WeekSchedule, YearlySchedule};
use crate::utils::date::{day_key, week_days, week_key};
use chrono::NaiveDate;

/// New contents for a week: a full replacement or a function of the old week.
pub enum WeekUpdate<'a> {
    Replace(WeekSchedule),
    Map(Box<dyn FnOnce(WeekSchedule) -> WeekSchedule + 'a>),
}

impl<'a> WeekUpdate<'a> {
    pub fn map<F>(f: F) -> Self
    where
        F: FnOnce(WeekSchedule) -> WeekSchedule + 'a,
    {
        WeekUpdate::Map(Box::new(f))
    }
}

/// The week containing `date`, or seven empty days if it was never written.
pub fn current_week(yearly: &YearlySchedule, date: NaiveDate) -> WeekSchedule {
    yearly
        .get(&week_key(date))
        .cloned()
        .unwrap_or_else(|| WeekSchedule::empty_for(date))
}

/// Write one week back into the yearly map. Returns the week key written.
pub fn write_week(yearly: &mut YearlySchedule, date: NaiveDate, update: WeekUpdate<'_>) -> String {
    let key = week_key(date);
    let next = match update {
        WeekUpdate::Replace(w) => w,
        WeekUpdate::Map(f) => f(current_week(yearly, date)),
    };
    yearly.insert(key.clone(), next);
    key
}

/// Monday..Sunday of the week containing `date`, with their activities.
/// Entries stored under other day keys are not listed.
pub fn visible_days(week: &WeekSchedule, date: NaiveDate) -> Vec<(String, Vec<Activity>)> {
    week_days(date)
        .into_iter()
        .map(|k| {
            let acts = week.day(&k).to_vec();
            (k, acts)
        })
        .collect()
}

pub fn add_activity(week: &mut WeekSchedule, date: NaiveDate, activity: Activity) {
    week.day_mut(&day_key(date)).push(activity);
}

/// Flip `is_done` of one activity; returns the new value.
pub fn toggle_done(week: &mut WeekSchedule, date: NaiveDate, activity_id: &str) -> AppResult<bool> {
    let activity = week
        .day_mut(&day_key(date))
        .iter_mut()
        .find(|a| a.id == activity_id)
        .ok_or_else(|| AppError::ActivityNotFound(activity_id.to_string()))?;

    activity.is_done = !activity.is_done;
    Ok(activity.is_done)
}

pub fn update_activity(
    week: &mut WeekSchedule,
    date: NaiveDate,
    activity_id: &str,
    patch: &ActivityPatch,
) -> AppResult<()> {
    let activity = week
        .day_mut(&day_key(date))
        .iter_mut()
        .find(|a| a.id == activity_id)
        .ok_or_else(|| AppError::ActivityNotFound(activity_id.to_string()))?;

    patch.apply(activity);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Swap an activity with its neighbour. Moving past either end is a no-op.
/// Returns the new position.
pub fn move_activity(
    week: &mut WeekSchedule,
    date: NaiveDate,
    activity_id: &str,
    direction: Direction,
) -> AppResult<usize> {
    let day = week.day_mut(&day_key(date));
    let idx = day
        .iter()
        .position(|a| a.id == activity_id)
        .ok_or_else(|| AppError::ActivityNotFound(activity_id.to_string()))?;

    let target = match direction {
        Direction::Up if idx > 0 => idx - 1,
        Direction::Down if idx + 1 < day.len() => idx + 1,
        _ => return Ok(idx),
    };

    day.swap(idx, target);
    Ok(target)
}

pub fn delete_activity(
    week: &mut WeekSchedule,
    date: NaiveDate,
    activity_id: &str,
) -> AppResult<Activity> {
    let day = week.day_mut(&day_key(date));
    let idx = day
        .iter()
        .position(|a| a.id == activity_id)
        .ok_or_else(|| AppError::ActivityNotFound(activity_id.to_string()))?;

    Ok(day.remove(idx))
}

/// Remove every activity of a day; returns how many were removed.
pub fn clear_day(week: &mut WeekSchedule, date: NaiveDate) -> usize {
    let day = week.day_mut(&day_key(date));
    let n = day.len();
    day.clear();
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn seeded_week(date: NaiveDate, n: usize) -> (WeekSchedule, Vec<String>) {
        let mut w = WeekSchedule::empty_for(date);
        let mut ids = Vec::new();
        for _ in 0..n {
            let a = Activity::new("play", Period::Afternoon);
            ids.push(a.id.clone());
            add_activity(&mut w, date, a);
        }
        (w, ids)
    }

    #[test]
    fn untouched_week_reads_empty() {
        let yearly = YearlySchedule::default();
        let w = current_week(&yearly, d(2025, 3, 12));
        assert_eq!(w.keys().count(), 7);
        assert_eq!(w.activity_count(), 0);
        assert!(yearly.is_empty());
    }

    #[test]
    fn write_touches_only_the_week_of_the_date() {
        let mut yearly = YearlySchedule::default();
        let a = d(2025, 3, 12);
        let b = d(2025, 3, 19);

        write_week(
            &mut yearly,
            b,
            WeekUpdate::map(|mut w| {
                add_activity(&mut w, d(2025, 3, 19), Activity::new("read", Period::Evening));
                w
            }),
        );
        let before = serde_json::to_string(yearly.get(&week_key(b)).unwrap()).unwrap();

        let key = write_week(
            &mut yearly,
            a,
            WeekUpdate::map(|mut w| {
                add_activity(&mut w, a, Activity::new("lunch", Period::Afternoon));
                w
            }),
        );

        assert_eq!(key, "2025-W11");
        assert_eq!(yearly.len(), 2);
        assert_eq!(
            serde_json::to_string(yearly.get(&week_key(b)).unwrap()).unwrap(),
            before
        );
        assert_eq!(yearly.day(a, "2025-03-12").len(), 1);
    }

    #[test]
    fn replace_update_stores_given_week() {
        let mut yearly = YearlySchedule::default();
        let date = d(2024, 12, 31);
        let (w, _) = seeded_week(date, 2);
        let key = write_week(&mut yearly, date, WeekUpdate::Replace(w.clone()));
        assert_eq!(key, "2025-W01");
        assert_eq!(yearly.get("2025-W01"), Some(&w));
    }

    #[test]
    fn stale_day_keys_are_hidden_not_lost() {
        let date = d(2025, 3, 12);
        let mut w = WeekSchedule::empty_for(date);
        w.day_mut("2025-01-01")
            .push(Activity::new("park", Period::Morning));

        let visible = visible_days(&w, date);
        assert_eq!(visible.len(), 7);
        assert!(visible.iter().all(|(_, acts)| acts.is_empty()));
        assert_eq!(w.activity_count(), 1);
    }

    #[test]
    fn toggle_twice_restores_and_spares_siblings() {
        let date = d(2025, 3, 12);
        let (mut w, ids) = seeded_week(date, 3);
        let snapshot = w.clone();

        assert!(toggle_done(&mut w, date, &ids[1]).unwrap());
        let day = w.day("2025-03-12");
        assert!(!day[0].is_done && day[1].is_done && !day[2].is_done);

        assert!(!toggle_done(&mut w, date, &ids[1]).unwrap());
        assert_eq!(w, snapshot);
    }

    #[test]
    fn move_and_delete() {
        let date = d(2025, 3, 12);
        let (mut w, ids) = seeded_week(date, 3);

        assert_eq!(move_activity(&mut w, date, &ids[0], Direction::Up).unwrap(), 0);
        assert_eq!(move_activity(&mut w, date, &ids[0], Direction::Down).unwrap(), 1);
        assert_eq!(w.day("2025-03-12")[0].id, ids[1]);

        let removed = delete_activity(&mut w, date, &ids[2]).unwrap();
        assert_eq!(removed.id, ids[2]);
        assert!(matches!(
            delete_activity(&mut w, date, &ids[2]),
            Err(AppError::ActivityNotFound(_))
        ));

        assert_eq!(clear_day(&mut w, date), 2);
        assert!(w.day("2025-03-12").is_empty());
    }
}
