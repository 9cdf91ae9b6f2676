use chrono::{Datelike, NaiveDate};

use crate::model::draft::DraftTask;
use crate::ops::draft::PlanBoard;

/// Fixed bucket sizes for plan position, matching the breakdown service's
/// generation grid. These are plan-relative, not calendar-exact: month 2 of
/// a plan starts 30 days in, whatever the calendar says.
const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_WEEK: i64 = 7;

/// Whole days elapsed since the goal was created, midnight to midnight,
/// clamped to zero for clock skew.
pub fn elapsed_days(created_at: NaiveDate, today: NaiveDate) -> i64 {
    (today - created_at).num_days().max(0)
}

/// ISO week number for a date; the `week_number` anchor for manually
/// created weekly and daily tasks.
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Which entry in each plan bucket is "current" for a goal.
///
/// Used only for highlighting and auto-scroll; every period stays
/// inspectable regardless of the cursor. `None` means the bucket is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodCursor {
    pub year: Option<usize>,
    pub month: Option<usize>,
    pub week: Option<usize>,
}

impl PeriodCursor {
    /// Classify "now" against a goal's plan board.
    ///
    /// Each index is `min(len - 1, elapsed / bucket)`: the cursor saturates
    /// at the last entry once the plan horizon is exceeded.
    pub fn classify(board: &PlanBoard, created_at: NaiveDate, today: NaiveDate) -> Self {
        let elapsed = elapsed_days(created_at, today);
        PeriodCursor {
            year: bucket_index(board.yearly.len(), elapsed, DAYS_PER_YEAR),
            month: bucket_index(board.monthly.len(), elapsed, DAYS_PER_MONTH),
            week: bucket_index(board.weekly.len(), elapsed, DAYS_PER_WEEK),
        }
    }

    /// Daily tasks belonging to the current week.
    ///
    /// Matches on the current weekly task's `week_number`. Deliberately
    /// permissive: when the week cursor is absent, the weekly anchor has no
    /// week number, or a daily task has none, the task is included rather
    /// than hidden. Daily tasks must not silently disappear to a
    /// classification edge case.
    pub fn current_daily<'a>(&self, board: &'a PlanBoard) -> Vec<&'a DraftTask> {
        let current_week = self
            .week
            .and_then(|index| board.weekly.get(index))
            .and_then(|weekly| weekly.week_number);

        let Some(current_week) = current_week else {
            return board.daily.iter().collect();
        };

        board
            .daily
            .iter()
            .filter(|task| task.week_number.is_none() || task.week_number == Some(current_week))
            .collect()
    }
}

fn bucket_index(len: usize, elapsed: i64, bucket_days: i64) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(((elapsed / bucket_days) as usize).min(len - 1))
}
