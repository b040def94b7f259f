//! Scheduling constraints supplied by the user: working hours, a lunch
//! break, and recurring study blocks. Treated as read-only input; invalid
//! ranges (start >= end) degrade to "no constraint" instead of erroring.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DAY_START: u8 = 0;
pub const DAY_END: u8 = 24;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHours {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl WorkingHours {
    fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= DAY_END
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LunchBreak {
    pub start: u8,
    pub end: u8,
}

impl LunchBreak {
    fn is_valid(&self) -> bool {
        self.start < self.end && self.end <= DAY_END
    }
}

/// A recurring focused-work window on specific days of the week.
/// Days are numbered 0-6 with 0 = Sunday, matching the wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StudyBlock {
    pub days_of_week: BTreeSet<u8>,
    pub start_hour: u8,
    pub end_hour: u8,
}

impl StudyBlock {
    fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour && self.end_hour <= DAY_END
    }

    pub fn applies_on(&self, day: NaiveDate) -> bool {
        self.days_of_week
            .contains(&(day.weekday().num_days_from_sunday() as u8))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSet {
    pub working_hours: WorkingHours,
    pub lunch_break: LunchBreak,
    #[serde(default)]
    pub study_blocks: Vec<StudyBlock>,
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            working_hours: WorkingHours {
                start_hour: 9,
                end_hour: 17,
            },
            lunch_break: LunchBreak { start: 12, end: 13 },
            study_blocks: Vec::new(),
        }
    }
}

impl ConstraintSet {
    /// Effective working window; an invalid range opens up the full day.
    pub fn hours(&self) -> (u8, u8) {
        if self.working_hours.is_valid() {
            (self.working_hours.start_hour, self.working_hours.end_hour)
        } else {
            (DAY_START, DAY_END)
        }
    }

    /// Effective lunch window, or `None` when the configured range is invalid.
    pub fn lunch(&self) -> Option<(u8, u8)> {
        if self.lunch_break.is_valid() {
            Some((self.lunch_break.start, self.lunch_break.end))
        } else {
            None
        }
    }

    /// Valid study blocks for the given day, earliest first.
    pub fn blocks_for(&self, day: NaiveDate) -> Vec<&StudyBlock> {
        let mut blocks: Vec<&StudyBlock> = self
            .study_blocks
            .iter()
            .filter(|block| block.is_valid() && block.applies_on(day))
            .collect();
        blocks.sort_by_key(|block| (block.start_hour, block.end_hour));
        blocks
    }

    pub fn is_lunch_hour(&self, hour: u8) -> bool {
        self.lunch()
            .map(|(start, end)| hour >= start && hour < end)
            .unwrap_or(false)
    }

    pub fn is_study_hour(&self, hour: u8, day: NaiveDate) -> bool {
        self.blocks_for(day)
            .iter()
            .any(|block| hour >= block.start_hour && hour < block.end_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn monday() -> NaiveDate {
        // 2026-03-02 is a Monday.
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn invalid_working_hours_fall_back_to_full_day() {
        let mut constraints = ConstraintSet::default();
        constraints.working_hours = WorkingHours {
            start_hour: 17,
            end_hour: 9,
        };
        assert_eq!(constraints.hours(), (DAY_START, DAY_END));
    }

    #[test]
    fn invalid_lunch_is_ignored() {
        let mut constraints = ConstraintSet::default();
        constraints.lunch_break = LunchBreak { start: 13, end: 13 };
        assert_eq!(constraints.lunch(), None);
        assert!(!constraints.is_lunch_hour(13));
    }

    #[test]
    fn blocks_filter_by_weekday_and_sort_by_start() {
        let mut constraints = ConstraintSet::default();
        constraints.study_blocks = vec![
            StudyBlock {
                days_of_week: [1u8].into_iter().collect(), // Monday
                start_hour: 15,
                end_hour: 17,
            },
            StudyBlock {
                days_of_week: [1u8, 3].into_iter().collect(),
                start_hour: 9,
                end_hour: 11,
            },
            StudyBlock {
                days_of_week: [6u8].into_iter().collect(), // Saturday only
                start_hour: 10,
                end_hour: 12,
            },
            StudyBlock {
                days_of_week: [1u8].into_iter().collect(),
                start_hour: 14,
                end_hour: 14, // invalid, skipped
            },
        ];

        let starts: Vec<u8> = constraints
            .blocks_for(monday())
            .iter()
            .map(|block| block.start_hour)
            .collect();
        assert_eq!(starts, vec![9, 15]);
        assert!(constraints.is_study_hour(10, monday()));
        assert!(!constraints.is_study_hour(12, monday()));
    }

    #[test]
    fn deserializes_the_wire_shape() {
        let json = r#"{
            "workingHours": {"startHour": 8, "endHour": 18},
            "lunchBreak": {"start": 12, "end": 13},
            "studyBlocks": [{"daysOfWeek": [1, 2], "startHour": 16, "endHour": 18}]
        }"#;
        let constraints: ConstraintSet = serde_json::from_str(json).unwrap();
        assert_eq!(constraints.hours(), (8, 18));
        assert_eq!(constraints.study_blocks.len(), 1);
    }
}
