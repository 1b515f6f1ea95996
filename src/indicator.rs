//! How a lesson's status is presented next to its listing entry.
//!
//! Kept free of DOM types so the attribute values can be tested natively; the
//! `dom` module copies [`Indicator::attributes`] onto a `<div>` and
//! [`Indicator::glyph`] into its `<span class="progress-icon">` child.

use crate::status::{LessonId, LessonStatus};

/// Element the indicator is rendered as.
pub const INDICATOR_TAG: &str = "div";

/// Class every indicator carries, alongside its status class.
pub const INDICATOR_CLASS: &str = "progress-indicator";

/// Class of the child `<span>` holding the glyph.
pub const ICON_CLASS: &str = "progress-icon";

/// Attribute holding the lesson id, used to find an indicator again.
pub const LESSON_ID_ATTR: &str = "data-lesson-id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Indicator {
    pub lesson: LessonId,
    pub status: LessonStatus,
}

impl Indicator {
    pub fn new(lesson: LessonId, status: LessonStatus) -> Self {
        Self { lesson, status }
    }

    /// What an existing indicator is restyled to when its lesson completes.
    pub fn completed(lesson: LessonId) -> Self {
        Self::new(lesson, LessonStatus::Completed)
    }

    pub fn glyph(&self) -> &'static str {
        match self.status {
            LessonStatus::NotStarted => "○",
            LessonStatus::InProgress => "◐",
            LessonStatus::Completed => "✓",
        }
    }

    /// Accessible name, used as `aria-label`.
    pub fn label(&self) -> &'static str {
        match self.status {
            LessonStatus::NotStarted => "Not started",
            LessonStatus::InProgress => "In progress",
            LessonStatus::Completed => "Completed",
        }
    }

    pub fn status_class(&self) -> &'static str {
        match self.status {
            LessonStatus::NotStarted => "status-not-started",
            LessonStatus::InProgress => "status-in-progress",
            LessonStatus::Completed => "status-completed",
        }
    }

    /// Full `class` attribute value.
    pub fn class_name(&self) -> String {
        format!("{INDICATOR_CLASS} {}", self.status_class())
    }

    /// `title` tooltip, e.g. `Lesson 2: In progress`.
    pub fn tooltip(&self) -> String {
        match self.lesson.number() {
            Some(n) => format!("Lesson {n}: {}", self.label()),
            None => format!("{}: {}", self.lesson, self.label()),
        }
    }

    /// Every attribute set on the indicator element, in the order applied.
    pub fn attributes(&self) -> [(&'static str, String); 5] {
        [
            ("class", self.class_name()),
            (LESSON_ID_ATTR, self.lesson.to_string()),
            ("role", "img".to_string()),
            ("aria-label", self.label().to_string()),
            ("title", self.tooltip()),
        ]
    }

    /// Selector matching this lesson's indicator anywhere in the document.
    pub fn selector_for(lesson: &LessonId) -> String {
        format!("[{LESSON_ID_ATTR}=\"{lesson}\"]")
    }
}
