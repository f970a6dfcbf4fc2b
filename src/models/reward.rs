use super::period::Period;
use serde::{Deserialize, Serialize};

/// Reward attached to one period of one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub day_key: String,
    pub period: Period,
    pub label: String,
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_redeemed: bool,
}

impl Reward {
    pub fn matches(&self, day_key: &str, period: Period) -> bool {
        self.day_key == day_key && self.period == period
    }
}
