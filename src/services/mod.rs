// Service modules
pub mod controller;
pub mod placeholder;
pub mod progress;
pub mod submitter;

pub use controller::{ControllerState, GenerationController};
pub use progress::ProgressAnimator;
pub use submitter::{HttpJobSubmitter, JobSubmitter};
