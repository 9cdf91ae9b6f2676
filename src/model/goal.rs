use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A long-term goal. `created_at` anchors all period classification for the
/// goal's plan; the server cascades task deletion when a goal is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
