//! Aggregate course progress shown in the progress bar.

use crate::status::ProgressRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: u32,
    pub total: u32,
}

impl ProgressSummary {
    /// Counts `lesson-01..=lesson-{total}`; entries outside that range are ignored.
    pub fn from_record(record: &ProgressRecord, total: u32) -> Self {
        Self {
            completed: record.completed_count(total),
            total,
        }
    }

    /// Completed share rounded to the nearest whole percent. 0 when `total` is 0.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// CSS width for the fill element.
    pub fn fill_width(&self) -> String {
        format!("{}%", self.percent())
    }

    pub fn message(&self) -> String {
        format!("{} of {} lessons completed", self.completed, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::LessonId;

    fn summary(completed: u32, total: u32) -> ProgressSummary {
        ProgressSummary { completed, total }
    }

    #[test]
    fn percent_of_thirteen() {
        assert_eq!(summary(0, 13).percent(), 0);
        assert_eq!(summary(1, 13).percent(), 8);
        assert_eq!(summary(2, 13).percent(), 15);
        assert_eq!(summary(7, 13).percent(), 54);
        assert_eq!(summary(13, 13).percent(), 100);
    }

    #[test]
    fn halves_round_up() {
        assert_eq!(summary(1, 8).percent(), 13); // 12.5
    }

    #[test]
    fn zero_total_is_zero_percent() {
        assert_eq!(summary(0, 0).percent(), 0);
    }

    #[test]
    fn text_and_width() {
        let s = summary(1, 13);
        assert_eq!(s.message(), "1 of 13 lessons completed");
        assert_eq!(s.fill_width(), "8%");
    }

    #[test]
    fn counts_only_completed_lessons_in_range() {
        let mut record = ProgressRecord::new();
        record.mark_completed(&LessonId::from_number(1));
        record.mark_completed(&LessonId::from_number(5));
        record.mark_started(&LessonId::from_number(6));
        record.mark_completed(&LessonId::from_number(40));
        assert_eq!(
            ProgressSummary::from_record(&record, 13),
            summary(2, 13)
        );
    }
}
