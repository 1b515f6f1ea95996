//! Lesson status model.
//!
//! The persisted record is a flat `lesson-NN -> status` map. Statuses only move
//! forward (`NotStarted < InProgress < Completed`); every mutation goes through
//! [`ProgressRecord::advance`], which refuses to go backwards.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Completion state of a single lesson. Ordering follows the lifecycle.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LessonStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl LessonStatus {
    /// The string stored in localStorage and exposed to page scripts.
    pub fn as_str(self) -> &'static str {
        match self {
            LessonStatus::NotStarted => "not-started",
            LessonStatus::InProgress => "in-progress",
            LessonStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const LESSON_PREFIX: &str = "lesson-";

/// Lesson identifier, `lesson-NN` with a two-digit minimum.
///
/// Deserialization is not validated: keys written by other scripts are kept
/// verbatim so they survive a load/save cycle.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(String);

impl LessonId {
    pub fn from_number(number: u32) -> Self {
        Self(format!("{LESSON_PREFIX}{number:02}"))
    }

    /// Identifier for the entry at 0-based `index` on the listing page.
    pub fn from_position(index: usize) -> Self {
        Self::from_number(index as u32 + 1)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Sequence number, if the identifier is well formed.
    pub fn number(&self) -> Option<u32> {
        self.0.strip_prefix(LESSON_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid lesson id {0:?}: expected `lesson-<number>`")]
pub struct ParseLessonIdError(String);

impl FromStr for LessonId {
    type Err = ParseLessonIdError;

    /// Accepts `lesson-<digits>` and normalizes the padding (`lesson-7` -> `lesson-07`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix(LESSON_PREFIX)
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| ParseLessonIdError(s.to_string()))?;
        let number = digits
            .parse()
            .map_err(|_| ParseLessonIdError(s.to_string()))?;
        Ok(Self::from_number(number))
    }
}

/// Snapshot of every lesson's status. Missing entries read as `NotStarted`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord {
    entries: BTreeMap<LessonId, LessonStatus>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, lesson: &LessonId) -> LessonStatus {
        self.entries.get(lesson).copied().unwrap_or_default()
    }

    /// Move `lesson` forward to `target`. Returns whether the record changed.
    pub fn advance(&mut self, lesson: &LessonId, target: LessonStatus) -> bool {
        if self.status(lesson) >= target {
            return false;
        }
        self.entries.insert(lesson.clone(), target);
        true
    }

    pub fn mark_started(&mut self, lesson: &LessonId) -> bool {
        self.advance(lesson, LessonStatus::InProgress)
    }

    pub fn mark_completed(&mut self, lesson: &LessonId) -> bool {
        self.advance(lesson, LessonStatus::Completed)
    }

    /// Number of `lesson-01..=lesson-{total}` whose status is exactly `Completed`.
    pub fn completed_count(&self, total: u32) -> u32 {
        (1..=total)
            .filter(|&n| self.status(&LessonId::from_number(n)) == LessonStatus::Completed)
            .count() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LessonId, LessonStatus)> {
        self.entries.iter().map(|(id, status)| (id, *status))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy)]
    enum Op {
        Start(u32),
        Complete(u32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u32..=5).prop_map(Op::Start),
            (1u32..=5).prop_map(Op::Complete),
        ]
    }

    fn apply(record: &mut ProgressRecord, op: Op) -> bool {
        match op {
            Op::Start(n) => record.mark_started(&LessonId::from_number(n)),
            Op::Complete(n) => record.mark_completed(&LessonId::from_number(n)),
        }
    }

    proptest! {
        #[test]
        fn status_never_decreases(ops in prop::collection::vec(op(), 0..40)) {
            let mut record = ProgressRecord::new();
            for op in ops {
                let before: Vec<_> = (1..=5)
                    .map(|n| record.status(&LessonId::from_number(n)))
                    .collect();
                apply(&mut record, op);
                for n in 1..=5 {
                    prop_assert!(record.status(&LessonId::from_number(n)) >= before[n as usize - 1]);
                }
            }
        }

        #[test]
        fn repeating_an_op_changes_nothing(ops in prop::collection::vec(op(), 1..20)) {
            let mut record = ProgressRecord::new();
            for op in ops {
                apply(&mut record, op);
                let snapshot = record.clone();
                prop_assert!(!apply(&mut record, op));
                prop_assert_eq!(&record, &snapshot);
            }
        }
    }
}
