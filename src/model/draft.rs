use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{PeriodKind, Priority, Task, TaskStatus, TaskType};
use crate::parse::{parse_subtasks, year_goal_marker};

/// The in-memory, display-facing view of a persisted [`Task`].
///
/// Rebuilt from scratch on every render from the current task list; it has
/// no lifecycle of its own and is never persisted. `subtasks` is derived
/// from the bullet lines of `note`, and `period_kind` promotes the
/// year-marker title convention to an explicit field.
///
/// Serialized (for the revision-chat payload) with the wire field set the
/// AI service expects; `period_kind` stays internal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DraftTask {
    pub task_id: i64,
    pub task_type: TaskType,
    #[serde(skip)]
    pub period_kind: PeriodKind,
    pub title: String,
    pub note: Option<String>,
    pub date: Option<NaiveDate>,
    pub month: Option<u32>,
    pub week_number: Option<u32>,
    pub subtasks: Vec<String>,
    pub status: TaskStatus,
    pub priority: Priority,
}

impl DraftTask {
    /// Derive the draft view of one persisted task.
    pub fn from_task(task: &Task) -> Self {
        let subtasks = task
            .note
            .as_deref()
            .map(parse_subtasks)
            .unwrap_or_default();

        let period_kind = match task.task_type {
            TaskType::Monthly if year_goal_marker(&task.title).is_some() => PeriodKind::Yearly,
            TaskType::Monthly => PeriodKind::Monthly,
            TaskType::Weekly => PeriodKind::Weekly,
            TaskType::Daily => PeriodKind::Daily,
        };

        DraftTask {
            task_id: task.id,
            task_type: task.task_type,
            period_kind,
            title: task.title.clone(),
            note: task.note.clone(),
            date: task.date,
            month: task.month,
            week_number: task.week_number,
            subtasks,
            status: task.status,
            priority: task.priority,
        }
    }
}
