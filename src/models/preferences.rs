use super::generation::{
    default_aspect_ratio, default_length_seconds, GenerationRequest, VideoStyle,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Saved form selections
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub video_style: Option<VideoStyle>,
    #[serde(default)]
    pub video_length: Option<u32>,
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

impl Preferences {
    /// Build a request for `prompt`, filling each unset option from the saved
    /// preferences and then from the built-in defaults.
    pub fn request_for(
        &self,
        prompt: impl Into<String>,
        style: Option<VideoStyle>,
        length_seconds: Option<u32>,
        aspect_ratio: Option<String>,
    ) -> GenerationRequest {
        GenerationRequest {
            prompt: prompt.into(),
            style: style.or(self.video_style).unwrap_or_default(),
            length_seconds: length_seconds
                .or(self.video_length)
                .unwrap_or_else(default_length_seconds),
            aspect_ratio: aspect_ratio
                .or_else(|| self.aspect_ratio.clone())
                .unwrap_or_else(default_aspect_ratio),
        }
    }
}
