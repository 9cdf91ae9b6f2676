pub mod draft;
pub mod period;
pub mod reconcile;
pub mod review;

pub use draft::{PlanBoard, build_draft_tasks};
pub use period::{PeriodCursor, elapsed_days, iso_week_number};
pub use reconcile::apply_accepted;
pub use review::{ReviewError, ReviewSession, RevisionStore};
