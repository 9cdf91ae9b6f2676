pub mod client;
pub mod session;
pub mod types;

pub use client::{ApiClient, ApiError};
pub use session::AuthSession;
pub use types::*;
