// Request/Response models
pub mod generation;
pub mod history;
pub mod preferences;
