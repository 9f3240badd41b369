use crate::error::TransportError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Video style tag
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VideoStyle {
    #[default]
    Realistic,
    Anime,
    Cinematic,
    #[serde(rename = "3d-animation")]
    ThreeDAnimation,
    Artistic,
    Cartoon,
}

impl VideoStyle {
    pub const ALL: [VideoStyle; 6] = [
        Self::Realistic,
        Self::Anime,
        Self::Cinematic,
        Self::ThreeDAnimation,
        Self::Artistic,
        Self::Cartoon,
    ];

    pub fn from_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "realistic" => Some(Self::Realistic),
            "anime" => Some(Self::Anime),
            "cinematic" => Some(Self::Cinematic),
            "3d-animation" => Some(Self::ThreeDAnimation),
            "artistic" => Some(Self::Artistic),
            "cartoon" => Some(Self::Cartoon),
            _ => None,
        }
    }

    /// Lenient parse: unknown or absent tags fall back to `Realistic`.
    pub fn from_tag_or_default(s: Option<&str>) -> Self {
        s.and_then(Self::from_tag).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realistic => "realistic",
            Self::Anime => "anime",
            Self::Cinematic => "cinematic",
            Self::ThreeDAnimation => "3d-animation",
            Self::Artistic => "artistic",
            Self::Cartoon => "cartoon",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Realistic => "Realistic",
            Self::Anime => "Anime",
            Self::Cinematic => "Cinematic",
            Self::ThreeDAnimation => "3D Animation",
            Self::Artistic => "Artistic",
            Self::Cartoon => "Cartoon",
        }
    }
}

impl std::fmt::Display for VideoStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Video generation request as entered by the user
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct GenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub style: VideoStyle,
    #[validate(range(min = 1, message = "length must be at least one second"))]
    pub length_seconds: u32,
    #[validate(length(min = 1, message = "aspect ratio is required"))]
    pub aspect_ratio: String,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            style: VideoStyle::default(),
            length_seconds: default_length_seconds(),
            aspect_ratio: default_aspect_ratio(),
        }
    }

    pub fn trimmed_prompt(&self) -> &str {
        self.prompt.trim()
    }
}

/// Ready-made prompts offered next to the input box
pub const EXAMPLE_PROMPTS: [&str; 5] = [
    "A panda eating bamboo on a mountain in the early morning with sunlight shining through mist",
    "Future city with skyscrapers, flying cars and robots moving on the streets",
    "Sunset beach scene with gentle waves, golden sand and seagulls flying",
    "Tropical rainforest with large waterfall, wildlife and lush vegetation",
    "New Year's Eve fireworks display in Tokyo with large crowds",
];

/// Example prompt by 1-based index, as listed to the user.
pub fn example_prompt(index: usize) -> Option<&'static str> {
    index.checked_sub(1).and_then(|i| EXAMPLE_PROMPTS.get(i).copied())
}

pub fn default_length_seconds() -> u32 {
    5
}

pub fn default_aspect_ratio() -> String {
    "16:9".to_string()
}

/// Body POSTed to the generation endpoint
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmitPayload {
    pub prompt: String,
    pub style: VideoStyle,
    pub length: u32,
    pub aspect_ratio: String,
}

impl From<&GenerationRequest> for SubmitPayload {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            prompt: request.trimmed_prompt().to_string(),
            style: request.style,
            length: request.length_seconds,
            aspect_ratio: request.aspect_ratio.clone(),
        }
    }
}

/// Response body exactly as the endpoint sends it
#[derive(Debug, Deserialize)]
pub struct RawSubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    // Queue identifiers and the like; logged, never interpreted
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Validated outcome of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResponse {
    Accepted {
        job_id: String,
        metadata: serde_json::Map<String, serde_json::Value>,
    },
    Rejected {
        message: Option<String>,
    },
}

impl TryFrom<RawSubmitResponse> for SubmitResponse {
    type Error = TransportError;

    fn try_from(raw: RawSubmitResponse) -> Result<Self, Self::Error> {
        if !raw.success {
            return Ok(Self::Rejected {
                message: raw.error.filter(|m| !m.trim().is_empty()),
            });
        }

        match raw.job_id {
            Some(job_id) if !job_id.trim().is_empty() => Ok(Self::Accepted {
                job_id,
                metadata: raw.metadata,
            }),
            _ => Err(TransportError::Malformed(
                "success response is missing job_id".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
}

/// Result of a successful submission
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerationJob {
    pub job_id: String,
    pub status: JobStatus,
    pub style: VideoStyle,
    pub preview_url: String,
}
