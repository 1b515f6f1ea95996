//! Tracker configuration.
//!
//! Pages can override any field with an inline JSON block:
//!
//! ```html
//! <script type="application/json" id="lesson-progress-config">
//!   { "totalLessons": 20, "selectors": { "lessonEntry": ".toc li" } }
//! </script>
//! ```
//!
//! Missing fields fall back to [`TrackerConfig::default`].

use log::LevelFilter;
use serde::Deserialize;

use crate::store::DEFAULT_STORAGE_KEY;

/// `id` of the optional inline config element.
pub const CONFIG_ELEMENT_ID: &str = "lesson-progress-config";

/// Number of lessons in the course, used as the progress bar denominator.
pub const DEFAULT_TOTAL_LESSONS: u32 = 13;

/// Distance from the bottom of the document (CSS px) that counts as "read".
pub const DEFAULT_COMPLETION_THRESHOLD: f64 = 200.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    pub storage_key: String,
    /// Independent of how many entries a listing page actually shows.
    pub total_lessons: u32,
    pub completion_threshold: f64,
    pub log_level: String,
    pub selectors: Selectors,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            total_lessons: DEFAULT_TOTAL_LESSONS,
            completion_threshold: DEFAULT_COMPLETION_THRESHOLD,
            log_level: "warn".to_string(),
            selectors: Selectors::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parsed `log_level`; unknown names fall back to `Warn`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}

/// CSS selectors for the markup the tracker reads.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selectors {
    pub lesson_entry: String,
    pub lesson_container: String,
    pub progress_container: String,
    pub progress_fill: String,
    pub progress_text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            lesson_entry: ".lesson-card".to_string(),
            lesson_container: ".lesson-container".to_string(),
            progress_container: ".overall-progress".to_string(),
            progress_fill: ".progress-bar-fill".to_string(),
            progress_text: ".progress-text".to_string(),
        }
    }
}
