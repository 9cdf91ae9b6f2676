pub mod marker;
pub mod note;

pub use marker::{strip_plan_prefix, year_goal_marker};
pub use note::{parse_subtasks, serialize_subtasks};
