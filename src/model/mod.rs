pub mod draft;
pub mod goal;
pub mod proposal;
pub mod task;

pub use draft::*;
pub use goal::*;
pub use proposal::*;
pub use task::*;
