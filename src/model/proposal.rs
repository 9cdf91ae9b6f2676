use serde::{Deserialize, Serialize};

/// What a proposal edits: a period task's title, or a single subtask line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalTarget {
    Monthly,
    Weekly,
    Daily,
    Subtask,
}

/// One AI-suggested edit to one task, pending user accept/reject.
///
/// `subtask_index` is meaningful only when `target_type` is
/// [`ProposalTarget::Subtask`]. The reconciler treats an out-of-range or
/// missing index as a no-op rather than an error; the target may have been
/// edited or deleted since the proposal was generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRevisionProposal {
    pub proposal_id: String,
    pub target_task_id: i64,
    pub target_type: ProposalTarget,
    pub subtask_index: Option<usize>,
    pub before: String,
    pub after: String,
    pub reason: String,
}

/// A recorded user verdict on a proposal. Undecided proposals are simply
/// absent from the decision map, not a third variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Rejected,
}

/// Speaker role in the revision chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the revision chat, accumulated client-side and echoed back to
/// the AI service so it sees the full conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevisionChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl RevisionChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        RevisionChatMessage {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        RevisionChatMessage {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}
