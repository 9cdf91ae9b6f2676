use crate::model::draft::DraftTask;
use crate::model::task::{PeriodKind, Task};

/// Build the draft view of a goal's full task list.
///
/// Pure transform: output order mirrors input order, nothing is sorted or
/// dropped. Re-run on every render from the current persisted list.
pub fn build_draft_tasks(tasks: &[Task]) -> Vec<DraftTask> {
    tasks.iter().map(DraftTask::from_task).collect()
}

/// Reconciled draft tasks partitioned into the four plan buckets.
///
/// The yearly bucket holds monthly-typed tasks carrying the year marker;
/// the monthly bucket holds the rest. Within a bucket, tasks keep the order
/// they arrived in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanBoard {
    pub yearly: Vec<DraftTask>,
    pub monthly: Vec<DraftTask>,
    pub weekly: Vec<DraftTask>,
    pub daily: Vec<DraftTask>,
}

impl PlanBoard {
    /// Split reconciled draft tasks into buckets by period kind.
    pub fn partition(tasks: Vec<DraftTask>) -> Self {
        let mut board = PlanBoard::default();
        for task in tasks {
            match task.period_kind {
                PeriodKind::Yearly => board.yearly.push(task),
                PeriodKind::Monthly => board.monthly.push(task),
                PeriodKind::Weekly => board.weekly.push(task),
                PeriodKind::Daily => board.daily.push(task),
            }
        }
        board
    }

    /// Task ids in display (and proposal-review) order:
    /// yearly → monthly → weekly → daily, each bucket in its natural order.
    pub fn display_order(&self) -> Vec<i64> {
        self.yearly
            .iter()
            .chain(&self.monthly)
            .chain(&self.weekly)
            .chain(&self.daily)
            .map(|task| task.task_id)
            .collect()
    }

    /// All buckets flattened in display order.
    pub fn iter(&self) -> impl Iterator<Item = &DraftTask> {
        self.yearly
            .iter()
            .chain(&self.monthly)
            .chain(&self.weekly)
            .chain(&self.daily)
    }
}
