//! Time utilities: parsing HH:MM, sort keys, and the serde adapter used by
//! activity documents.

use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;

/// Activities without a time sort as if scheduled at the end of the day.
pub fn late_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

pub fn format_time(t: &NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

pub fn sort_key(t: Option<NaiveTime>) -> NaiveTime {
    t.unwrap_or_else(late_day)
}

/// Serialize `Option<NaiveTime>` as `"HH:MM"`. Unparseable input reads as no time;
/// imported routines are checked before they get here.
pub mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_str(&super::format_time(t)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        Ok(raw.as_deref().and_then(super::parse_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hh_mm() {
        assert_eq!(parse_time("08:05"), NaiveTime::from_hms_opt(8, 5, 0));
        assert_eq!(parse_time(" 19:30 "), NaiveTime::from_hms_opt(19, 30, 0));
        assert_eq!(parse_time("25:00"), None);
        assert_eq!(parse_time("noon"), None);
    }

    #[test]
    fn missing_time_sorts_late() {
        let early = parse_time("21:00");
        assert!(sort_key(early) < sort_key(None));
    }
}
