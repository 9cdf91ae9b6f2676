use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::api::session::AuthSession;
use crate::api::types::{
    ApplyRevisionsRequest, ApplyRevisionsResponse, BreakdownRequest, BreakdownResponse,
    GoalCreate, RevisionChatRequest, RevisionChatResponse, TaskCreate, TaskQuery, TaskUpdate,
};
use crate::model::goal::Goal;
use crate::model::proposal::TaskRevisionProposal;
use crate::model::task::Task;
use crate::ops::review::RevisionStore;

/// Error type for API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    BaseUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The free plan's daily breakdown quota is exhausted; the UI offers an
    /// upgrade instead of a generic failure message.
    #[error("daily breakdown limit reached on the free plan")]
    FreeLimitReached,
    #[error("server returned {status}: {detail}")]
    Server { status: StatusCode, detail: String },
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

const FREE_LIMIT_DETAIL: &str = "FREE_LIMIT_REACHED";

/// Typed client for the task/goal persistence and AI breakdown API.
///
/// Holds an explicit [`AuthSession`]; every request carries its bearer
/// token and `user_id` where the API expects one. The client is cheap to
/// clone (the underlying connection pool is shared).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: AuthSession,
}

impl ApiClient {
    /// Build a client for the API at `base_url` acting as `session`'s user.
    pub fn new(base_url: &str, session: AuthSession) -> Result<Self, ApiError> {
        // A base without a trailing slash would swallow its last path
        // segment in joins.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Ok(ApiClient {
            http: reqwest::Client::new(),
            base_url: Url::parse(&normalized)?,
            session,
        })
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// Map a non-success response into an [`ApiError`], surfacing the
    /// free-plan quota condition as its own variant.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_default();
        if detail == FREE_LIMIT_DETAIL {
            return Err(ApiError::FreeLimitReached);
        }
        Err(ApiError::Server { status, detail })
    }

    // -----------------------------------------------------------------------
    // Goals
    // -----------------------------------------------------------------------

    pub async fn fetch_goals(&self) -> Result<Vec<Goal>, ApiError> {
        tracing::debug!(user_id = self.session.user_id, "fetching goals");
        let response = self
            .http
            .get(self.endpoint("goals")?)
            .bearer_auth(&self.session.access_token)
            .query(&[("user_id", self.session.user_id)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_goal(
        &self,
        title: &str,
        deadline: Option<NaiveDate>,
    ) -> Result<Goal, ApiError> {
        let body = GoalCreate {
            user_id: self.session.user_id,
            title: title.to_string(),
            deadline,
        };
        let response = self
            .http
            .post(self.endpoint("goals")?)
            .bearer_auth(&self.session.access_token)
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_goal(&self, goal_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("goals/{goal_id}"))?)
            .bearer_auth(&self.session.access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    pub async fn fetch_goal_tasks(&self, goal_id: i64) -> Result<Vec<Task>, ApiError> {
        tracing::debug!(goal_id, "fetching goal tasks");
        let response = self
            .http
            .get(self.endpoint(&format!("goals/{goal_id}/tasks"))?)
            .bearer_auth(&self.session.access_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // -----------------------------------------------------------------------
    // Breakdown and revision chat
    // -----------------------------------------------------------------------

    /// Ask the AI service to decompose a goal into its full task plan.
    pub async fn generate_breakdown(
        &self,
        goal_id: i64,
        request: &BreakdownRequest,
    ) -> Result<BreakdownResponse, ApiError> {
        tracing::debug!(goal_id, months = request.months, "requesting breakdown");
        let response = self
            .http
            .post(self.endpoint(&format!("goals/{goal_id}/tasks/breakdown"))?)
            .bearer_auth(&self.session.access_token)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Create a goal and immediately generate its breakdown.
    pub async fn create_goal_and_breakdown(
        &self,
        title: &str,
        deadline: Option<NaiveDate>,
        current_situation: Option<String>,
    ) -> Result<(Goal, BreakdownResponse), ApiError> {
        let goal = self.create_goal(title, deadline).await?;
        let request = BreakdownRequest {
            current_situation,
            ..BreakdownRequest::default()
        };
        let breakdown = self.generate_breakdown(goal.id, &request).await?;
        Ok((goal, breakdown))
    }

    /// Send a revision-chat message with the reconciled draft view and the
    /// conversation so far. The response's proposals are untrusted input
    /// for the reconciler.
    pub async fn revision_chat(
        &self,
        goal_id: i64,
        request: &RevisionChatRequest,
    ) -> Result<RevisionChatResponse, ApiError> {
        tracing::debug!(goal_id, drafts = request.draft_tasks.len(), "revision chat");
        let response = self
            .http
            .post(self.endpoint(&format!("goals/{goal_id}/tasks/revision-chat"))?)
            .bearer_auth(&self.session.access_token)
            .json(request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    pub async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        let response = self
            .http
            .get(self.endpoint("tasks")?)
            .bearer_auth(&self.session.access_token)
            .query(&[("user_id", self.session.user_id)])
            .query(query)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_task(&self, mut task: TaskCreate) -> Result<Task, ApiError> {
        task.user_id = self.session.user_id;
        let response = self
            .http
            .post(self.endpoint("tasks")?)
            .bearer_auth(&self.session.access_token)
            .json(&task)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update_task(&self, task_id: i64, update: &TaskUpdate) -> Result<Task, ApiError> {
        let response = self
            .http
            .put(self.endpoint(&format!("tasks/{task_id}"))?)
            .bearer_auth(&self.session.access_token)
            .json(update)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.endpoint(&format!("tasks/{task_id}"))?)
            .bearer_auth(&self.session.access_token)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Flip a task's coarse done flag.
    pub async fn toggle_task_done(&self, task_id: i64) -> Result<Task, ApiError> {
        let response = self
            .http
            .patch(self.endpoint(&format!("tasks/{task_id}/done"))?)
            .bearer_auth(&self.session.access_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Roll an unfinished daily task over to the next day.
    pub async fn carry_over_task(&self, task_id: i64) -> Result<Task, ApiError> {
        let response = self
            .http
            .post(self.endpoint(&format!("tasks/{task_id}/carry-over"))?)
            .bearer_auth(&self.session.access_token)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

#[async_trait]
impl RevisionStore for ApiClient {
    async fn apply_revisions(
        &self,
        goal_id: i64,
        accepted: &[TaskRevisionProposal],
    ) -> Result<Vec<Task>, ApiError> {
        tracing::debug!(goal_id, count = accepted.len(), "applying accepted revisions");
        let body = ApplyRevisionsRequest {
            accepted_proposals: accepted.to_vec(),
        };
        let response = self
            .http
            .post(self.endpoint(&format!("goals/{goal_id}/tasks/revisions/apply"))?)
            .bearer_auth(&self.session.access_token)
            .json(&body)
            .send()
            .await?;
        let parsed: ApplyRevisionsResponse = Self::check(response).await?.json().await?;
        Ok(parsed.updated_tasks)
    }
}
