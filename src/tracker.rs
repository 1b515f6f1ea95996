//! Operations shared by both page modes and the JS entry points.
//!
//! `Tracker` knows nothing about the DOM: the `dom` module reads markup and
//! scroll positions, calls in here, and writes the returned values back.

use crate::config::TrackerConfig;
use crate::indicator::Indicator;
use crate::latch::{CompletionLatch, LatchState, ScrollMetrics};
use crate::status::{LessonId, ProgressRecord};
use crate::store::{KeyValueStore, ProgressRepository};
use crate::summary::ProgressSummary;

pub struct Tracker<S> {
    repo: ProgressRepository<S>,
    config: TrackerConfig,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(store: S, config: TrackerConfig) -> Self {
        Self {
            repo: ProgressRepository::new(store, config.storage_key.clone()),
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn repository(&self) -> &ProgressRepository<S> {
        &self.repo
    }

    pub fn load_progress(&self) -> ProgressRecord {
        self.repo.load()
    }

    /// No-op for lessons already in progress or completed.
    pub fn mark_started(&self, lesson: &LessonId) -> ProgressRecord {
        self.repo.update(|record| record.mark_started(lesson))
    }

    pub fn mark_completed(&self, lesson: &LessonId) -> ProgressRecord {
        self.repo.update(|record| record.mark_completed(lesson))
    }

    /// Progress bar values from freshly loaded state.
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary::from_record(&self.repo.load(), self.config.total_lessons)
    }

    /// Indicators for a listing page with `entries` entries, in document order.
    pub fn listing(&self, entries: usize) -> Vec<Indicator> {
        let record = self.repo.load();
        (0..entries)
            .map(|index| {
                let lesson = LessonId::from_position(index);
                let status = record.status(&lesson);
                Indicator::new(lesson, status)
            })
            .collect()
    }

    /// Click on the listing entry at 0-based `index`.
    pub fn select_entry(&self, index: usize) -> ProgressRecord {
        self.mark_started(&LessonId::from_position(index))
    }

    /// Lesson page load: mark the lesson started and arm completion detection.
    pub fn begin_lesson(&self, lesson: LessonId) -> LessonSession {
        self.mark_started(&lesson);
        log::debug!("lesson {lesson} opened");
        LessonSession {
            lesson,
            latch: CompletionLatch::new(self.config.completion_threshold),
        }
    }

    /// Scroll event on a lesson page. Returns the fresh summary when this
    /// observation completes the lesson, `None` otherwise.
    pub fn observe_scroll(
        &self,
        session: &mut LessonSession,
        metrics: &ScrollMetrics,
    ) -> Option<ProgressSummary> {
        if !session.latch.observe(metrics) {
            return None;
        }
        self.mark_completed(&session.lesson);
        log::info!("lesson {} completed", session.lesson);
        Some(self.summary())
    }
}

/// Per-page state of an open lesson.
#[derive(Clone, Debug)]
pub struct LessonSession {
    lesson: LessonId,
    latch: CompletionLatch,
}

impl LessonSession {
    pub fn lesson(&self) -> &LessonId {
        &self.lesson
    }

    pub fn latch_state(&self) -> LatchState {
        self.latch.state()
    }
}
