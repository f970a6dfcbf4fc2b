use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Coarse time of day used to group activities and gate rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Morning,
    Afternoon,
    Evening,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Morning, Period::Afternoon, Period::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
        }
    }

    pub fn label(&self, locale: &str) -> &'static str {
        let english = locale.to_ascii_lowercase().starts_with("en");
        match (self, english) {
            (Period::Morning, true) => "Morning",
            (Period::Afternoon, true) => "Afternoon",
            (Period::Evening, true) => "Evening",
            (Period::Morning, false) => "Mañana",
            (Period::Afternoon, false) => "Tarde",
            (Period::Evening, false) => "Noche",
        }
    }

    /// Helper: convert input code from CLI (english or spanish, any case)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "m" | "morning" | "mañana" | "manana" => Some(Period::Morning),
            "a" | "afternoon" | "t" | "tarde" => Some(Period::Afternoon),
            "e" | "evening" | "n" | "noche" | "night" => Some(Period::Evening),
            _ => None,
        }
    }

    /// Before 12:00 morning, before 18:00 afternoon, evening otherwise.
    pub fn from_time(t: NaiveTime) -> Self {
        match t.hour() {
            0..=11 => Period::Morning,
            12..=17 => Period::Afternoon,
            _ => Period::Evening,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_times() {
        assert_eq!(Period::from_code("Tarde"), Some(Period::Afternoon));
        assert_eq!(Period::from_code("M"), Some(Period::Morning));
        assert_eq!(Period::from_code("later"), None);

        let t = |h| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        assert_eq!(Period::from_time(t(11)), Period::Morning);
        assert_eq!(Period::from_time(t(12)), Period::Afternoon);
        assert_eq!(Period::from_time(t(18)), Period::Evening);
    }
}
