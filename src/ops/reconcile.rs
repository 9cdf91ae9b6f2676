use indexmap::IndexMap;

use crate::model::draft::DraftTask;
use crate::model::proposal::{Decision, ProposalTarget, TaskRevisionProposal};
use crate::parse::serialize_subtasks;

/// Apply every accepted proposal onto the base draft tasks, returning a new
/// list. The input is never mutated; callers detect changes by reference.
///
/// Recomputes from scratch each call, so it is idempotent: the source of
/// each edit is the proposal's `after` text, not the previous output.
/// Accepted proposals target disjoint tasks (or disjoint subtask indices),
/// so application order is immaterial.
///
/// Total over malformed input: a proposal whose target task is gone, whose
/// subtask index is out of range, or whose index is missing entirely is a
/// silent no-op rather than an error.
pub fn apply_accepted(
    draft_tasks: &[DraftTask],
    proposals: &[TaskRevisionProposal],
    decisions: &IndexMap<String, Decision>,
) -> Vec<DraftTask> {
    let mut reconciled = draft_tasks.to_vec();

    for proposal in proposals {
        if decisions.get(&proposal.proposal_id) != Some(&Decision::Accepted) {
            continue;
        }
        let Some(target) = reconciled
            .iter_mut()
            .find(|task| task.task_id == proposal.target_task_id)
        else {
            // Target deleted upstream; skip.
            continue;
        };

        match proposal.target_type {
            ProposalTarget::Subtask => {
                let Some(index) = proposal.subtask_index else {
                    continue;
                };
                if index < target.subtasks.len() {
                    target.subtasks[index] = proposal.after.clone();
                    // Re-serialize so consumers reading `note` see the edit.
                    target.note = Some(serialize_subtasks(&target.subtasks));
                }
            }
            ProposalTarget::Monthly | ProposalTarget::Weekly | ProposalTarget::Daily => {
                target.title = proposal.after.clone();
            }
        }
    }

    reconciled
}
