use super::period::Period;
use super::pictogram::{Pictogram, PictogramLibrary};
use crate::utils::time::{format_time, hhmm_opt};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A scheduled occurrence of a pictogram on a day.
///
/// `pictogram_id` is a weak reference: the pictogram may be missing from the
/// library, in which case lookups fall back to the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub pictogram_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_label: Option<String>,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub period: Period,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Activity {
    pub fn new(pictogram_id: &str, period: Period) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pictogram_id: pictogram_id.to_string(),
            custom_label: None,
            time: None,
            period,
            is_done: false,
            notes: None,
        }
    }

    pub fn with_time(mut self, time: Option<NaiveTime>) -> Self {
        self.time = time;
        self
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.custom_label = label.filter(|l| !l.trim().is_empty());
        self
    }

    /// Copy with a fresh identity and `is_done` reset, optionally re-stamped
    /// to another period.
    pub fn fresh_copy(&self, period: Option<Period>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            is_done: false,
            period: period.unwrap_or(self.period),
            ..self.clone()
        }
    }

    pub fn pictogram<'a>(&self, library: &'a PictogramLibrary) -> Option<&'a Pictogram> {
        library.get(&self.pictogram_id)
    }

    /// Custom label, else the pictogram label, else the placeholder label.
    pub fn display_label(&self, library: &PictogramLibrary) -> String {
        if let Some(label) = &self.custom_label {
            return label.clone();
        }
        self.pictogram(library)
            .map(|p| p.label.clone())
            .unwrap_or_else(|| Pictogram::placeholder().label)
    }

    pub fn time_str(&self) -> String {
        self.time
            .as_ref()
            .map(format_time)
            .unwrap_or_else(|| "--:--".to_string())
    }
}

/// Partial edit of an activity. `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct ActivityPatch {
    pub pictogram_id: Option<String>,
    pub custom_label: Option<Option<String>>,
    pub time: Option<Option<NaiveTime>>,
    pub period: Option<Period>,
    pub notes: Option<Option<String>>,
}

impl ActivityPatch {
    pub fn apply(&self, a: &mut Activity) {
        if let Some(p) = &self.pictogram_id {
            a.pictogram_id = p.clone();
        }
        if let Some(l) = &self.custom_label {
            a.custom_label = l.clone().filter(|l| !l.trim().is_empty());
        }
        if let Some(t) = self.time {
            a.time = t;
        }
        if let Some(p) = self.period {
            a.period = p;
        }
        if let Some(n) = &self.notes {
            a.notes = n.clone().filter(|n| !n.trim().is_empty());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pictogram_id.is_none()
            && self.custom_label.is_none()
            && self.time.is_none()
            && self.period.is_none()
            && self.notes.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::pictogram::default_library;
    use crate::utils::time::parse_time;

    #[test]
    fn wire_format_uses_hh_mm() {
        let a = Activity::new("breakfast", Period::Morning).with_time(parse_time("08:00"));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["time"], "08:00");
        assert_eq!(json["pictogramId"], "breakfast");
        assert_eq!(json["isDone"], false);
        assert!(json.get("customLabel").is_none());

        let back: Activity = serde_json::from_value(json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn label_falls_back_to_placeholder() {
        let lib = default_library();
        let known = Activity::new("breakfast", Period::Morning);
        let missing = Activity::new("deleted-picto", Period::Morning);
        let custom = missing.clone().with_label(Some("Piscina".into()));

        assert_eq!(known.display_label(&lib), "Desayuno");
        assert_eq!(missing.display_label(&lib), "?");
        assert_eq!(custom.display_label(&lib), "Piscina");
    }

    #[test]
    fn fresh_copy_resets_state() {
        let mut a = Activity::new("read", Period::Evening);
        a.is_done = true;
        let c = a.fresh_copy(Some(Period::Morning));
        assert_ne!(c.id, a.id);
        assert!(!c.is_done);
        assert_eq!(c.period, Period::Morning);
        assert_eq!(c.pictogram_id, a.pictogram_id);
    }
}
