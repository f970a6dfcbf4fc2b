use serde::{Deserialize, Serialize};

pub const DEFAULT_PIN: &str = "1234";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub high_contrast: bool,
    pub show_text: bool,
    pub voice_enabled: bool,
    pub auto_speak: bool,
    pub voice_language: String,
    pub pin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_answer: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            show_text: true,
            voice_enabled: true,
            auto_speak: false,
            voice_language: "es-ES".to_string(),
            pin: DEFAULT_PIN.to_string(),
            security_question: None,
            security_answer: None,
        }
    }
}

/// Partial settings update; only `Some` fields are merged.
#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub high_contrast: Option<bool>,
    pub show_text: Option<bool>,
    pub voice_enabled: Option<bool>,
    pub auto_speak: Option<bool>,
    pub voice_language: Option<String>,
}

impl SettingsPatch {
    pub fn apply(&self, s: &mut AppSettings) {
        if let Some(v) = self.high_contrast {
            s.high_contrast = v;
        }
        if let Some(v) = self.show_text {
            s.show_text = v;
        }
        if let Some(v) = self.voice_enabled {
            s.voice_enabled = v;
        }
        if let Some(v) = self.auto_speak {
            s.auto_speak = v;
        }
        if let Some(v) = &self.voice_language {
            s.voice_language = v.clone();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.high_contrast.is_none()
            && self.show_text.is_none()
            && self.voice_enabled.is_none()
            && self.auto_speak.is_none()
            && self.voice_language.is_none()
    }
}

/// A PIN is exactly four ASCII digits.
pub fn is_valid_pin(pin: &str) -> bool {
    pin.len() == 4 && pin.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_documents_fill_new_fields() {
        let s: AppSettings = serde_json::from_str(r#"{"highContrast":true,"pin":"4321"}"#).unwrap();
        assert!(s.high_contrast);
        assert_eq!(s.pin, "4321");
        assert!(s.show_text);
        assert_eq!(s.voice_language, "es-ES");
    }

    #[test]
    fn patch_merges_only_given_fields() {
        let mut s = AppSettings::default();
        SettingsPatch {
            auto_speak: Some(true),
            ..Default::default()
        }
        .apply(&mut s);
        assert!(s.auto_speak);
        assert!(s.voice_enabled);
        assert_eq!(s.pin, DEFAULT_PIN);
    }

    #[test]
    fn pin_shape() {
        assert!(is_valid_pin("0007"));
        assert!(!is_valid_pin("123"));
        assert!(!is_valid_pin("12a4"));
        assert!(!is_valid_pin("١٢٣٤"));
    }
}
