use async_trait::async_trait;
use indexmap::IndexMap;

use crate::api::ApiError;
use crate::model::proposal::{Decision, TaskRevisionProposal};
use crate::model::task::Task;

/// Persistence seam for accepted proposals. The production implementation
/// is [`crate::api::ApiClient`]; tests inject failing stores to exercise
/// the rollback path.
#[async_trait]
pub trait RevisionStore: Send + Sync {
    /// Persist the given accepted proposals for a goal, returning the tasks
    /// the server actually updated.
    async fn apply_revisions(
        &self,
        goal_id: i64,
        accepted: &[TaskRevisionProposal],
    ) -> Result<Vec<Task>, ApiError>;
}

/// Error type for review-session operations.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("unknown proposal: {0}")]
    UnknownProposal(String),
    /// The persistence call failed; the decision has already been rolled
    /// back to undecided.
    #[error("failed to apply proposal {proposal_id}")]
    ApplyFailed {
        proposal_id: String,
        #[source]
        source: ApiError,
    },
}

/// Guided accept/reject review of revision proposals for one goal.
///
/// Owns the live proposal list and the decision map. Decisions are recorded
/// optimistically: accepting records the decision, then awaits the
/// persistence call, rolling the entry back to undecided on failure. A
/// decided proposal is excluded from undecided selection, and `decide`
/// takes `&mut self`, so the same proposal can never have two apply calls
/// in flight.
///
/// Per-proposal state machine:
/// undecided → accepted → (confirmed: dropped from tracking | failed:
/// undecided); undecided → rejected (local-only, stays tracked so it is not
/// re-prompted); accepted/rejected → undecided via [`ReviewSession::reset`].
#[derive(Debug, Clone)]
pub struct ReviewSession {
    goal_id: i64,
    proposals: Vec<TaskRevisionProposal>,
    decisions: IndexMap<String, Decision>,
}

impl ReviewSession {
    pub fn new(goal_id: i64) -> Self {
        ReviewSession {
            goal_id,
            proposals: Vec::new(),
            decisions: IndexMap::new(),
        }
    }

    pub fn goal_id(&self) -> i64 {
        self.goal_id
    }

    /// Live proposals in arrival order.
    pub fn proposals(&self) -> &[TaskRevisionProposal] {
        &self.proposals
    }

    /// The decision map. Undecided proposals are absent.
    pub fn decisions(&self) -> &IndexMap<String, Decision> {
        &self.decisions
    }

    pub fn decision(&self, proposal_id: &str) -> Option<Decision> {
        self.decisions.get(proposal_id).copied()
    }

    /// Merge a fresh batch from the revision chat.
    ///
    /// For every task targeted by the batch, an existing *undecided*
    /// proposal for that task is superseded (dropped). Decided proposals
    /// are left untouched; the batch only replaces live entries.
    pub fn merge_batch(&mut self, incoming: Vec<TaskRevisionProposal>) {
        // Within a batch, the last proposal per target wins, upholding the
        // one-live-proposal-per-task invariant.
        let mut latest: IndexMap<i64, TaskRevisionProposal> = IndexMap::new();
        for proposal in incoming {
            latest.insert(proposal.target_task_id, proposal);
        }
        let decisions = &self.decisions;
        self.proposals.retain(|p| {
            decisions.contains_key(&p.proposal_id) || !latest.contains_key(&p.target_task_id)
        });
        self.proposals.extend(latest.into_values());
    }

    /// Proposal ids in review order: the order their target tasks appear in
    /// the reconciled display order, with proposals whose target is not
    /// displayed appended at the end in arrival order.
    pub fn review_order(&self, display_order: &[i64]) -> Vec<String> {
        let mut ordered = Vec::with_capacity(self.proposals.len());
        for task_id in display_order {
            for proposal in self.proposals.iter().filter(|p| p.target_task_id == *task_id) {
                if !ordered.contains(&proposal.proposal_id) {
                    ordered.push(proposal.proposal_id.clone());
                }
            }
        }
        for proposal in &self.proposals {
            if !ordered.contains(&proposal.proposal_id) {
                ordered.push(proposal.proposal_id.clone());
            }
        }
        ordered
    }

    /// The first undecided proposal in review order, if any.
    pub fn first_undecided(&self, order: &[String]) -> Option<String> {
        order
            .iter()
            .find(|id| !self.decisions.contains_key(*id))
            .cloned()
    }

    /// Auto-advance target after deciding `current`: the next undecided
    /// proposal after it in review order, wrapping to the front, or `None`
    /// when the review is complete.
    pub fn next_undecided(&self, order: &[String], current: &str) -> Option<String> {
        let position = order.iter().position(|id| id == current)?;
        order[position + 1..]
            .iter()
            .chain(&order[..position])
            .find(|id| !self.decisions.contains_key(*id))
            .cloned()
    }

    /// True when every live proposal has a decision.
    pub fn is_complete(&self) -> bool {
        self.proposals
            .iter()
            .all(|p| self.decisions.contains_key(&p.proposal_id))
    }

    /// Record a decision for a proposal.
    ///
    /// Rejection is purely local and always succeeds. Acceptance persists
    /// exactly that one proposal through `store`; on success the proposal
    /// graduates from tracking (the next task fetch already reflects it)
    /// and the server's updated tasks are returned, on failure the decision
    /// entry is removed so the proposal reverts to undecided.
    pub async fn decide(
        &mut self,
        proposal_id: &str,
        decision: Decision,
        store: &dyn RevisionStore,
    ) -> Result<Vec<Task>, ReviewError> {
        let Some(proposal) = self
            .proposals
            .iter()
            .find(|p| p.proposal_id == proposal_id)
            .cloned()
        else {
            return Err(ReviewError::UnknownProposal(proposal_id.to_string()));
        };

        self.decisions.insert(proposal_id.to_string(), decision);
        if decision == Decision::Rejected {
            return Ok(Vec::new());
        }

        match store
            .apply_revisions(self.goal_id, std::slice::from_ref(&proposal))
            .await
        {
            Ok(updated_tasks) => {
                self.decisions.shift_remove(proposal_id);
                self.proposals.retain(|p| p.proposal_id != proposal_id);
                Ok(updated_tasks)
            }
            Err(source) => {
                self.decisions.shift_remove(proposal_id);
                tracing::warn!(proposal_id, error = %source, "apply failed, decision reverted");
                Err(ReviewError::ApplyFailed {
                    proposal_id: proposal_id.to_string(),
                    source,
                })
            }
        }
    }

    /// Return a proposal to undecided so it reappears in the review queue.
    ///
    /// A newer proposal may have arrived for the same task while this one
    /// sat decided; reviving both would break the one-live-proposal-per-task
    /// invariant, so a superseded entry is dropped instead of revived.
    pub fn reset(&mut self, proposal_id: &str) {
        self.decisions.shift_remove(proposal_id);
        let Some(target_task_id) = self
            .proposals
            .iter()
            .find(|p| p.proposal_id == proposal_id)
            .map(|p| p.target_task_id)
        else {
            return;
        };
        let superseded = self.proposals.iter().any(|p| {
            p.proposal_id != proposal_id
                && p.target_task_id == target_task_id
                && !self.decisions.contains_key(&p.proposal_id)
        });
        if superseded {
            self.proposals.retain(|p| p.proposal_id != proposal_id);
        }
    }

    /// Drop all proposal and decision state. Called when the goal is
    /// deleted or the active goal changes.
    pub fn clear(&mut self) {
        self.proposals.clear();
        self.decisions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::proposal::ProposalTarget;

    fn proposal(id: &str, task_id: i64) -> TaskRevisionProposal {
        TaskRevisionProposal {
            proposal_id: id.to_string(),
            target_task_id: task_id,
            target_type: ProposalTarget::Monthly,
            subtask_index: None,
            before: "old".to_string(),
            after: "new".to_string(),
            reason: "test".to_string(),
        }
    }

    /// Store that always succeeds and records nothing.
    struct OkStore;

    #[async_trait]
    impl RevisionStore for OkStore {
        async fn apply_revisions(
            &self,
            _goal_id: i64,
            _accepted: &[TaskRevisionProposal],
        ) -> Result<Vec<Task>, ApiError> {
            Ok(Vec::new())
        }
    }

    /// Store that always fails with a server error.
    struct FailStore;

    #[async_trait]
    impl RevisionStore for FailStore {
        async fn apply_revisions(
            &self,
            _goal_id: i64,
            _accepted: &[TaskRevisionProposal],
        ) -> Result<Vec<Task>, ApiError> {
            Err(ApiError::Server {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                detail: "boom".to_string(),
            })
        }
    }

    #[test]
    fn test_merge_batch_supersedes_undecided_only() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("old-a", 10), proposal("old-b", 20)]);
        session
            .decisions
            .insert("old-b".to_string(), Decision::Rejected);

        session.merge_batch(vec![proposal("new-a", 10), proposal("new-b", 20)]);

        let ids: Vec<&str> = session.proposals().iter().map(|p| p.proposal_id.as_str()).collect();
        // old-a (undecided, same target) superseded; old-b (decided) kept.
        assert_eq!(ids, vec!["old-b", "new-a", "new-b"]);

        let live_for_10: Vec<&str> = session
            .proposals()
            .iter()
            .filter(|p| p.target_task_id == 10)
            .map(|p| p.proposal_id.as_str())
            .collect();
        assert_eq!(live_for_10, vec!["new-a"]);
    }

    #[test]
    fn test_merge_batch_dedupes_within_batch() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("first", 10), proposal("second", 10)]);
        let ids: Vec<&str> = session.proposals().iter().map(|p| p.proposal_id.as_str()).collect();
        assert_eq!(ids, vec!["second"]);
    }

    #[test]
    fn test_review_order_follows_display_order() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![
            proposal("p-daily", 30),
            proposal("p-monthly", 10),
            proposal("p-orphan", 99),
            proposal("p-weekly", 20),
        ]);
        let order = session.review_order(&[10, 20, 30]);
        assert_eq!(order, vec!["p-monthly", "p-weekly", "p-daily", "p-orphan"]);
    }

    #[test]
    fn test_next_undecided_wraps() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("a", 1), proposal("b", 2), proposal("c", 3)]);
        let order = session.review_order(&[1, 2, 3]);

        assert_eq!(session.next_undecided(&order, "b").as_deref(), Some("c"));

        session.decisions.insert("c".to_string(), Decision::Rejected);
        // Nothing after b is undecided → wrap to a.
        assert_eq!(session.next_undecided(&order, "b").as_deref(), Some("a"));

        session.decisions.insert("a".to_string(), Decision::Accepted);
        assert_eq!(session.next_undecided(&order, "b"), None);
    }

    #[tokio::test]
    async fn test_reject_is_local_only() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("p1", 5)]);

        // FailStore would error if the network were touched.
        let updated = session
            .decide("p1", Decision::Rejected, &FailStore)
            .await
            .unwrap();
        assert!(updated.is_empty());
        assert_eq!(session.decision("p1"), Some(Decision::Rejected));
        // Still tracked so it is not re-prompted.
        assert_eq!(session.proposals().len(), 1);
        assert!(session.is_complete());
    }

    #[tokio::test]
    async fn test_accept_graduates_proposal() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("p1", 5), proposal("p2", 6)]);

        session.decide("p1", Decision::Accepted, &OkStore).await.unwrap();
        assert_eq!(session.decision("p1"), None);
        assert_eq!(session.proposals().len(), 1);
        assert_eq!(session.proposals()[0].proposal_id, "p2");
    }

    #[tokio::test]
    async fn test_accept_failure_rolls_back_to_undecided() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("p1", 5)]);

        let err = session
            .decide("p1", Decision::Accepted, &FailStore)
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::ApplyFailed { .. }));
        assert_eq!(session.decision("p1"), None);
        // Proposal stays live for another attempt.
        assert_eq!(session.proposals().len(), 1);
        assert!(!session.is_complete());
    }

    #[tokio::test]
    async fn test_decide_unknown_proposal() {
        let mut session = ReviewSession::new(1);
        let err = session
            .decide("nope", Decision::Accepted, &OkStore)
            .await
            .unwrap_err();
        assert!(matches!(err, ReviewError::UnknownProposal(_)));
    }

    #[test]
    fn test_reset_returns_to_undecided() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("p1", 5)]);
        session.decisions.insert("p1".to_string(), Decision::Rejected);

        session.reset("p1");
        assert_eq!(session.decision("p1"), None);

        let order = session.review_order(&[5]);
        assert_eq!(session.first_undecided(&order).as_deref(), Some("p1"));
    }

    #[test]
    fn test_reset_drops_stale_proposal_when_target_has_a_newer_one() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("old", 10)]);
        session.decisions.insert("old".to_string(), Decision::Rejected);

        // A new round proposes another edit for the same task; the decided
        // entry is kept, per supersession rules.
        session.merge_batch(vec![proposal("new", 10)]);

        // Un-deciding the stale entry must not leave two live proposals
        // for task 10.
        session.reset("old");
        let live: Vec<&str> = session
            .proposals()
            .iter()
            .filter(|p| p.target_task_id == 10 && session.decision(&p.proposal_id).is_none())
            .map(|p| p.proposal_id.as_str())
            .collect();
        assert_eq!(live, vec!["new"]);
        // The stale proposal is gone from tracking entirely.
        assert!(!session.proposals().iter().any(|p| p.proposal_id == "old"));
    }

    #[test]
    fn test_reset_revives_when_target_has_no_other_live_proposal() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("p1", 10)]);
        session.decisions.insert("p1".to_string(), Decision::Rejected);

        session.reset("p1");
        assert_eq!(session.decision("p1"), None);
        assert_eq!(session.proposals().len(), 1);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut session = ReviewSession::new(1);
        session.merge_batch(vec![proposal("p1", 5)]);
        session.decisions.insert("p1".to_string(), Decision::Accepted);
        session.clear();
        assert!(session.proposals().is_empty());
        assert!(session.decisions().is_empty());
    }
}
