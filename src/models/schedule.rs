use super::activity::Activity;
use crate::utils::date::{week_days, week_key};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day key (`YYYY-MM-DD`) → ordered activities. Absent keys read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekSchedule {
    days: BTreeMap<String, Vec<Activity>>,
}

impl WeekSchedule {
    /// One empty sequence per weekday (Monday..Sunday) of the date's week.
    pub fn empty_for(date: NaiveDate) -> Self {
        Self {
            days: week_days(date)
                .into_iter()
                .map(|k| (k, Vec::new()))
                .collect(),
        }
    }

    pub fn day(&self, key: &str) -> &[Activity] {
        self.days.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Mutable sequence for a day, materialized empty if absent.
    pub fn day_mut(&mut self, key: &str) -> &mut Vec<Activity> {
        self.days.entry(key.to_string()).or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.days.keys()
    }

    pub fn activity_count(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }
}

/// ISO week key (`YYYY-Www`) → week. Untouched weeks are not materialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearlySchedule {
    weeks: BTreeMap<String, WeekSchedule>,
}

impl YearlySchedule {
    pub fn get(&self, week: &str) -> Option<&WeekSchedule> {
        self.weeks.get(week)
    }

    pub fn insert(&mut self, week: String, schedule: WeekSchedule) {
        self.weeks.insert(week, schedule);
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Activities of a single day, looked up through its week.
    pub fn day(&self, date: NaiveDate, day_key: &str) -> &[Activity] {
        self.weeks
            .get(&week_key(date))
            .map(|w| w.day(day_key))
            .unwrap_or(&[])
    }

    pub fn activity_count(&self) -> usize {
        self.weeks.values().map(WeekSchedule::activity_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::period::Period;

    #[test]
    fn empty_week_has_seven_days() {
        let d = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        let w = WeekSchedule::empty_for(d);
        assert_eq!(w.keys().count(), 7);
        assert!(w.day("2024-10-14").is_empty());
        assert!(w.day("1999-01-01").is_empty());
    }

    #[test]
    fn week_serializes_as_plain_map() {
        let mut w = WeekSchedule::default();
        w.day_mut("2024-10-14")
            .push(Activity::new("lunch", Period::Afternoon));
        let json = serde_json::to_value(&w).unwrap();
        assert!(json["2024-10-14"].is_array());
        assert_eq!(w.activity_count(), 1);
    }
}
