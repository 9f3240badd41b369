use std::time::Duration;

/// Input problems caught before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("A video is already being generated, please wait")]
    Busy,

    #[error("Please enter a video description")]
    EmptyPrompt,

    #[error("Description too short, please enter at least {min} characters")]
    PromptTooShort { min: usize, actual: usize },

    #[error("Invalid request: {0}")]
    InvalidParameters(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Generation rejected: {0}")]
    ApiLogic(String),

    #[error("No video available yet")]
    NoVideo,
}

impl GenerationError {
    /// Timeouts resolve through the same path as transport failures.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Message suitable for the error panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::Transport(TransportError::Status { detail, .. }) if !detail.trim().is_empty() => {
                format!("Video generation failed: {}", detail.trim())
            }
            Self::Transport(_) => {
                "Could not reach the video service, please try again".to_string()
            }
            Self::Timeout(_) => "The video service took too long to respond".to_string(),
            Self::ApiLogic(message) => message.clone(),
            Self::NoVideo => self.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// Helper type for results
pub type Result<T> = std::result::Result<T, GenerationError>;
