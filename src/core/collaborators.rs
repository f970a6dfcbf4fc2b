//! External services the planner consumes but does not implement: image
//! search, speech and routine generation. Their failures never reach the
//! stored state; callers turn them into a message and an empty result.

use crate::errors::{AppError, AppResult};
use crate::models::{Category, Period};
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Keyword search in the external pictogram catalog; returns catalog ids.
pub trait PictogramSearch {
    fn search(&self, keyword: &str) -> AppResult<Vec<u32>>;
}

pub trait SpeechSynthesizer {
    fn speak(&self, text: &str, language: &str) -> AppResult<()>;
}

/// One entry of a generated routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedItem {
    pub label: String,
    /// Search keyword for the catalog image.
    #[serde(default)]
    pub keyword: String,
    /// Icon name used when no catalog image is found.
    #[serde(default)]
    pub icon: String,
    #[serde(default = "default_category")]
    pub category: Category,
    pub period: Period,
    #[serde(default)]
    pub time: Option<String>,
}

fn default_category() -> Category {
    Category::Other
}

pub trait RoutineGenerator {
    fn generate(&self, prompt: &str) -> AppResult<Vec<GeneratedItem>>;
}

/// Run a generator and swallow its failure into a warning.
pub fn generate_or_empty(generator: &dyn RoutineGenerator, prompt: &str) -> Vec<GeneratedItem> {
    match generator.generate(prompt) {
        Ok(items) => items,
        Err(e) => {
            warning(format!("Routine generation failed: {e}"));
            Vec::new()
        }
    }
}

/// First catalog hit for a keyword, or `None` on no result or failure.
pub fn first_catalog_hit(search: &dyn PictogramSearch, keyword: &str) -> Option<u32> {
    if keyword.trim().is_empty() {
        return None;
    }
    match search.search(keyword) {
        Ok(ids) => ids.first().copied(),
        Err(e) => {
            warning(format!("Pictogram search failed for '{keyword}': {e}"));
            None
        }
    }
}

/// Speak only when voice feedback is enabled; failures become a warning.
pub fn speak_if_enabled(speaker: &dyn SpeechSynthesizer, enabled: bool, text: &str, language: &str) {
    if !enabled {
        return;
    }
    if let Err(e) = speaker.speak(text, language) {
        warning(format!("Speech unavailable: {e}"));
    }
}

/// Terminal stand-in for speech output.
pub struct ConsoleSpeaker;

impl SpeechSynthesizer for ConsoleSpeaker {
    fn speak(&self, text: &str, language: &str) -> AppResult<()> {
        println!("🔊 [{language}] {text}");
        Ok(())
    }
}

/// Reads a previously generated routine (a JSON list of items) from a file.
pub struct FileGenerator {
    pub path: PathBuf,
}

impl RoutineGenerator for FileGenerator {
    fn generate(&self, _prompt: &str) -> AppResult<Vec<GeneratedItem>> {
        let raw = fs::read_to_string(&self.path)?;
        serde_json::from_str(&raw).map_err(|e| AppError::External(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl RoutineGenerator for Offline {
        fn generate(&self, _prompt: &str) -> AppResult<Vec<GeneratedItem>> {
            Err(AppError::External("network unreachable".into()))
        }
    }

    impl PictogramSearch for Offline {
        fn search(&self, _keyword: &str) -> AppResult<Vec<u32>> {
            Err(AppError::External("network unreachable".into()))
        }
    }

    #[test]
    fn failures_produce_no_results() {
        assert!(generate_or_empty(&Offline, "rutina de mañana").is_empty());
        assert_eq!(first_catalog_hit(&Offline, "desayuno"), None);
    }

    #[test]
    fn generated_items_parse_with_defaults() {
        let items: Vec<GeneratedItem> =
            serde_json::from_str(r#"[{"label":"Desayuno","period":"morning","time":"08:00"}]"#).unwrap();
        assert_eq!(items[0].category, Category::Other);
        assert_eq!(items[0].time.as_deref(), Some("08:00"));
    }
}
