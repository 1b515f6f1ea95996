//! Page mode detection.
//!
//! The tracker decides once, at load, what kind of page it is running on and
//! dispatches on the result.

use std::sync::OnceLock;

use regex::Regex;

use crate::status::LessonId;

/// What the current document looks like to the tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageMode {
    /// Course index with `entries` lesson entries.
    Listing { entries: usize },
    /// A single lesson page. `listing_entries` is non-zero when a lesson list
    /// is rendered in the same document, e.g. a sidebar table of contents.
    Lesson {
        lesson: LessonId,
        listing_entries: usize,
    },
    Neither,
}

/// Markup facts gathered from the document.
#[derive(Clone, Copy, Debug)]
pub struct PageMarkers<'a> {
    pub lesson_entries: usize,
    pub has_lesson_container: bool,
    /// `location.pathname`
    pub path: &'a str,
}

impl PageMode {
    /// A lesson container on a recognized lesson path makes a lesson page;
    /// any listing entries on it are carried along and rendered too.
    pub fn detect(markers: &PageMarkers<'_>) -> Self {
        if markers.has_lesson_container {
            if let Some(lesson) = lesson_id_from_path(markers.path) {
                return PageMode::Lesson {
                    lesson,
                    listing_entries: markers.lesson_entries,
                };
            }
        }
        if markers.lesson_entries > 0 {
            return PageMode::Listing {
                entries: markers.lesson_entries,
            };
        }
        PageMode::Neither
    }

    /// Listing entries to decorate, whichever mode carries them.
    pub fn listing_entries(&self) -> usize {
        match self {
            PageMode::Listing { entries } => *entries,
            PageMode::Lesson {
                listing_entries, ..
            } => *listing_entries,
            PageMode::Neither => 0,
        }
    }
}

fn lesson_path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Final segment: leading digits, a hyphen, anything, then an extension.
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:^|/)(\d+)-[^/]*\.[A-Za-z0-9]+$").expect("lesson path pattern is valid")
    })
}

/// `/course/07-intro.html` -> `lesson-07`. `None` for paths that are not lessons.
pub fn lesson_id_from_path(path: &str) -> Option<LessonId> {
    let captures = lesson_path_pattern().captures(path)?;
    let number = captures.get(1)?.as_str().parse().ok()?;
    Some(LessonId::from_number(number))
}
