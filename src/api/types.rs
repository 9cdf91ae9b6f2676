//! Request and response payloads for the task/goal persistence API.
//!
//! These mirror the server's JSON exactly; the crate is a consumer and
//! defines no wire format of its own.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::draft::DraftTask;
use crate::model::proposal::{RevisionChatMessage, TaskRevisionProposal};
use crate::model::task::{Priority, Task, TaskStatus, TaskType};

/// `POST /goals` body.
#[derive(Debug, Clone, Serialize)]
pub struct GoalCreate {
    pub user_id: i64,
    pub title: String,
    pub deadline: Option<NaiveDate>,
}

/// `POST /tasks` body, for manual task creation.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCreate {
    pub user_id: i64,
    pub goal_id: Option<i64>,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub week_number: Option<u32>,
    pub month: Option<u32>,
    pub status: TaskStatus,
    pub priority: Priority,
}

/// `PUT /tasks/{id}` body. Only the populated fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

/// Filters for `GET /tasks`. `user_id` is added by the client.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskQuery {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_number: Option<u32>,
}

/// `POST /goals/{id}/tasks/breakdown` body. The defaults match the
/// service's generation grid: 12 months of 4 weeks of 7 days.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownRequest {
    pub months: u32,
    pub weeks_per_month: u32,
    pub days_per_week: u32,
    pub persist: bool,
    pub current_situation: Option<String>,
}

impl Default for BreakdownRequest {
    fn default() -> Self {
        BreakdownRequest {
            months: 12,
            weeks_per_month: 4,
            days_per_week: 7,
            persist: true,
            current_situation: None,
        }
    }
}

/// One generated task in a breakdown response (not yet persisted shape).
#[derive(Debug, Clone, Deserialize)]
pub struct BreakdownTask {
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub title: String,
    pub month: Option<u32>,
    pub week_number: Option<u32>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

/// Which engine produced an AI response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiSource {
    Gemini,
    Fallback,
}

/// `POST /goals/{id}/tasks/breakdown` response.
#[derive(Debug, Clone, Deserialize)]
pub struct BreakdownResponse {
    pub source: AiSource,
    pub monthly: Vec<BreakdownTask>,
    pub weekly: Vec<BreakdownTask>,
    pub daily: Vec<BreakdownTask>,
}

/// `POST /goals/{id}/tasks/revision-chat` body. Draft tasks are sent so the
/// AI sees the reconciled view, accepted edits included.
#[derive(Debug, Clone, Serialize)]
pub struct RevisionChatRequest {
    pub message: String,
    pub draft_tasks: Vec<DraftTask>,
    pub chat_history: Vec<RevisionChatMessage>,
}

/// `POST /goals/{id}/tasks/revision-chat` response. The proposals here are
/// untrusted input to the reconciler, not something the client computes.
#[derive(Debug, Clone, Deserialize)]
pub struct RevisionChatResponse {
    pub source: AiSource,
    pub assistant_message: String,
    pub proposals: Vec<TaskRevisionProposal>,
}

/// `POST /goals/{id}/tasks/revisions/apply` body.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyRevisionsRequest {
    pub accepted_proposals: Vec<TaskRevisionProposal>,
}

/// `POST /goals/{id}/tasks/revisions/apply` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyRevisionsResponse {
    pub updated_tasks: Vec<Task>,
}
