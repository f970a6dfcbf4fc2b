//! Calendar helpers: ISO week keys, week boundaries and local day keys.
//!
//! Day keys (`YYYY-MM-DD`) are always built from the local calendar fields of a
//! date, and parsed back from explicit year/month/day components, never through
//! a UTC round-trip.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAYS_ES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miércoles",
    "Jueves",
    "Viernes",
    "Sábado",
    "Domingo",
];

pub const WEEKDAYS_EN: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// ISO-8601 week key (`YYYY-Www`).
///
/// The week belongs to the year of its Thursday: move to the Thursday of the
/// date's week, then count whole weeks from the first Thursday of that year.
pub fn week_key(date: NaiveDate) -> String {
    let back = date.weekday().num_days_from_monday() as i64;
    let thursday = date - chrono::Duration::days(back) + chrono::Duration::days(3);

    let year = thursday.year();
    // Jan 1 always exists
    let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(thursday);
    let to_thu = (3 + 7 - jan1.weekday().num_days_from_monday() as i64) % 7;
    let first_thursday = jan1 + chrono::Duration::days(to_thu);

    let diff = (thursday - first_thursday).num_days() as f64;
    let week = 1 + (diff / 7.0).round() as i64;

    format!("{}-W{:02}", year, week)
}

pub fn is_same_week(d1: NaiveDate, d2: NaiveDate) -> bool {
    week_key(d1) == week_key(d2)
}

/// Monday of the date's week.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Monday 00:00:00.000 of the date's week (local wall clock).
pub fn start_of_week(date: NaiveDate) -> NaiveDateTime {
    monday_of(date).and_time(NaiveTime::MIN)
}

/// Sunday 23:59:59.999 of the date's week (local wall clock).
pub fn end_of_week(date: NaiveDate) -> NaiveDateTime {
    let sunday = monday_of(date) + chrono::Duration::days(6);
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    sunday.and_time(last)
}

/// The seven dates Monday..Sunday of the date's week.
pub fn week_dates(date: NaiveDate) -> Vec<NaiveDate> {
    let monday = monday_of(date);
    (0..7).map(|i| monday + chrono::Duration::days(i)).collect()
}

/// The seven day keys Monday..Sunday of the date's week.
pub fn week_days(date: NaiveDate) -> Vec<String> {
    week_dates(date).into_iter().map(day_key).collect()
}

pub fn shift_week(date: NaiveDate, weeks: i64) -> NaiveDate {
    date + chrono::Duration::days(7 * weeks)
}

/// Day key for a calendar date.
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Day key of a timestamp, using the calendar fields of its own time zone.
pub fn to_local_date_string<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    day_key(dt.date_naive())
}

/// Parse a `YYYY-MM-DD` day key from its explicit components.
pub fn parse_day_key(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().split('-');
    let (y, m, d) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return None;
    }

    let year = y.parse::<i32>().ok()?;
    let month = m.parse::<u32>().ok()?;
    let day = d.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse a date argument: a day key, or one of `today`, `tomorrow`, `yesterday`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    match s.trim().to_ascii_lowercase().as_str() {
        "today" | "hoy" => Some(today()),
        "tomorrow" | "mañana" => today().checked_add_days(Days::new(1)),
        "yesterday" | "ayer" => today().checked_sub_days(Days::new(1)),
        other => parse_day_key(other),
    }
}

pub fn weekday_name(date: NaiveDate, locale: &str) -> &'static str {
    let idx = date.weekday().num_days_from_monday() as usize;
    if is_english(locale) {
        WEEKDAYS_EN[idx]
    } else {
        WEEKDAYS_ES[idx]
    }
}

fn is_english(locale: &str) -> bool {
    locale.to_ascii_lowercase().starts_with("en")
}

fn month_name(month: u32, locale: &str) -> &'static str {
    let idx = (month.saturating_sub(1) as usize).min(11);
    if is_english(locale) {
        MONTHS_EN[idx]
    } else {
        MONTHS_ES[idx]
    }
}

/// Human readable range of the date's week, e.g. `14 – 20 de octubre de 2024`
/// or `October 14 – 20, 2024`.
pub fn format_week_range(date: NaiveDate, locale: &str) -> String {
    let start = monday_of(date);
    let end = start + chrono::Duration::days(6);

    let (sm, em) = (month_name(start.month(), locale), month_name(end.month(), locale));

    if is_english(locale) {
        if start.year() != end.year() {
            format!(
                "{} {}, {} – {} {}, {}",
                sm,
                start.day(),
                start.year(),
                em,
                end.day(),
                end.year()
            )
        } else if start.month() != end.month() {
            format!("{} {} – {} {}, {}", sm, start.day(), em, end.day(), end.year())
        } else {
            format!("{} {} – {}, {}", sm, start.day(), end.day(), end.year())
        }
    } else if start.year() != end.year() {
        format!(
            "{} de {} de {} – {} de {} de {}",
            start.day(),
            sm,
            start.year(),
            end.day(),
            em,
            end.year()
        )
    } else if start.month() != end.month() {
        format!(
            "{} de {} – {} de {} de {}",
            start.day(),
            sm,
            end.day(),
            em,
            end.year()
        )
    } else {
        format!("{} – {} de {} de {}", start.day(), end.day(), em, end.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn week_key_year_boundaries() {
        assert_eq!(week_key(d(2024, 12, 31)), "2025-W01");
        assert_eq!(week_key(d(2023, 1, 1)), "2022-W52");
        assert_eq!(week_key(d(2021, 1, 3)), "2020-W53");
        assert_eq!(week_key(d(2024, 10, 14)), "2024-W42");
    }

    #[test]
    fn week_key_matches_chrono_iso_week() {
        let mut day = d(2019, 12, 1);
        while day < d(2027, 1, 31) {
            let iso = day.iso_week();
            assert_eq!(
                week_key(day),
                format!("{}-W{:02}", iso.year(), iso.week()),
                "mismatch on {day}"
            );
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn same_week_is_stable_inside_week() {
        for date in week_dates(d(2025, 1, 1)) {
            assert!(is_same_week(date, d(2024, 12, 30)));
        }
        assert!(!is_same_week(d(2025, 1, 5), d(2025, 1, 6)));
    }

    #[test]
    fn week_boundaries() {
        let start = start_of_week(d(2024, 10, 17));
        let end = end_of_week(d(2024, 10, 17));
        assert_eq!(start.date(), d(2024, 10, 14));
        assert_eq!(start.time(), NaiveTime::MIN);
        assert_eq!(end.date(), d(2024, 10, 20));
        assert_eq!(end.time().hour(), 23);
        assert_eq!(end.time().nanosecond(), 999_000_000);
        // Sunday belongs to the week that started on the previous Monday
        assert_eq!(start_of_week(d(2024, 10, 20)).date(), d(2024, 10, 14));
    }

    #[test]
    fn local_date_string_uses_own_calendar_fields() {
        // 23:30 in UTC-5 is already the next day in UTC
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = west.with_ymd_and_hms(2024, 3, 9, 23, 30, 0).unwrap();
        assert_eq!(to_local_date_string(&dt), "2024-03-09");
        assert_eq!(
            to_local_date_string(&dt.with_timezone(&chrono::Utc)),
            "2024-03-10"
        );
    }

    #[test]
    fn day_key_parsing_is_strict() {
        assert_eq!(parse_day_key("2024-02-29"), Some(d(2024, 2, 29)));
        assert_eq!(parse_day_key("2023-02-29"), None);
        assert_eq!(parse_day_key("2024-2-9"), None);
        assert_eq!(parse_day_key("2024-02-09T00:00"), None);
        assert_eq!(day_key(d(2024, 2, 9)), "2024-02-09");
    }

    #[test]
    fn week_days_monday_first() {
        let days = week_days(d(2024, 10, 16));
        assert_eq!(days.first().unwrap(), "2024-10-14");
        assert_eq!(days.last().unwrap(), "2024-10-20");
        assert_eq!(days.len(), 7);
    }

    #[test]
    fn week_range_formats() {
        assert_eq!(
            format_week_range(d(2024, 10, 16), "es"),
            "14 – 20 de octubre de 2024"
        );
        assert_eq!(
            format_week_range(d(2024, 10, 30), "en-US"),
            "October 28 – November 3, 2024"
        );
        assert_eq!(
            format_week_range(d(2024, 12, 31), "en"),
            "December 30, 2024 – January 5, 2025"
        );
    }
}
