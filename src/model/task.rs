use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Wire-level task kind as stored by the persistence API.
///
/// Yearly goals have no wire variant of their own: the breakdown service
/// stores them as monthly tasks whose title carries a year marker
/// (`N年目の目標:`). See [`PeriodKind`] for the internal view that promotes
/// the marker to a real variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Monthly,
    Weekly,
    Daily,
}

/// Plan bucket used for display and review ordering.
///
/// Derived from [`TaskType`] plus the year-marker convention; never sent on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodKind {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

/// Kanban column state, finer-grained than (and independent of) `is_done`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// Task priority shown on the daily board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Mid,
    Low,
}

/// A persisted task as returned by the goals API.
///
/// `month`, `week_number`, and `date` are period anchors; which of them is
/// meaningful depends on `task_type`. `status` and `priority` were added in
/// a later API revision and default when the server omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub goal_id: Option<i64>,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title: String,
    pub month: Option<u32>,
    pub week_number: Option<u32>,
    pub date: Option<NaiveDate>,
    pub is_done: bool,
    #[serde(default)]
    pub carried_over: bool,
    pub tags: Option<String>,
    /// Newline-delimited bullet lines; the source of derived subtasks.
    pub note: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
