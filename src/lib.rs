//! Core logic for a goal-tracking planner: long-term goals are broken down
//! by an AI service into yearly/monthly/weekly/daily tasks, and revised
//! through a conversational accept/reject workflow.
//!
//! The crate is organized around one deterministic pipeline:
//! persisted tasks + pending proposals + decision map → displayed task tree.
//!
//! - [`model`] — canonical task, goal, and proposal types
//! - [`parse`] — subtask note parsing and the year-marker title convention
//! - [`ops`] — draft building, proposal reconciliation, period
//!   classification, and the review session controller
//! - [`api`] — typed client for the task/goal persistence service

pub mod api;
pub mod model;
pub mod ops;
pub mod parse;
