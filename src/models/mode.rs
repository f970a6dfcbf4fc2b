use serde::{Deserialize, Serialize};

/// Caregiver (`Adult`) or child-facing (`Child`) mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    #[default]
    Adult,
    Child,
}

impl AppMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppMode::Adult => "adult",
            AppMode::Child => "child",
        }
    }

    pub fn is_child(&self) -> bool {
        matches!(self, AppMode::Child)
    }
}
