use super::activity::Activity;
use super::period::Period;
use super::pictogram::Pictogram;
use crate::utils::time::hhmm_opt;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One entry of a routine template. Carries no identity or completion state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateActivity {
    pub pictogram_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, with = "hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&Activity> for TemplateActivity {
    fn from(a: &Activity) -> Self {
        Self {
            pictogram_id: a.pictogram_id.clone(),
            label: a.custom_label.clone(),
            time: a.time,
            period: a.period,
            notes: a.notes.clone(),
        }
    }
}

impl TemplateActivity {
    /// Materialize as a new, not-done activity stamped with `period`.
    pub fn instantiate(&self, period: Period) -> Activity {
        Activity {
            id: uuid::Uuid::new_v4().to_string(),
            pictogram_id: self.pictogram_id.clone(),
            custom_label: self.label.clone(),
            time: self.time,
            period,
            is_done: false,
            notes: self.notes.clone(),
        }
    }
}

/// Saved routine in the local library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub activities: Vec<TemplateActivity>,
    /// Pictograms the activities need, kept for previews on other devices.
    #[serde(default)]
    pub pictograms: Vec<Pictogram>,
    pub created_at: String,
}

/// Portable form of a routine, as written to and read from files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub activities: Vec<TemplateActivity>,
    #[serde(default)]
    pub pictograms: Vec<Pictogram>,
}

impl From<&RoutineTemplate> for RoutineDocument {
    fn from(t: &RoutineTemplate) -> Self {
        Self {
            name: t.name.clone(),
            description: t.description.clone(),
            activities: t.activities.clone(),
            pictograms: t.pictograms.clone(),
        }
    }
}
