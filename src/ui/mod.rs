//! Rendering seam between the controller and whatever draws the page.
//!
//! The controller only emits declarative transitions; implementors decide how
//! to draw them. `ConsoleRenderer` backs the command-line binary.

mod console;

pub use console::ConsoleRenderer;

use crate::{models::generation::VideoStyle, services::progress::ProgressUpdate};
use serde::Serialize;

const TITLE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// Everything the result panel shows after a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessView {
    pub job_id: String,
    pub title: String,
    pub duration: String,
    pub style: String,
    pub aspect_ratio: String,
    pub preview_url: String,
}

impl SuccessView {
    pub fn new(
        job_id: impl Into<String>,
        prompt: &str,
        length_seconds: u32,
        style: VideoStyle,
        aspect_ratio: impl Into<String>,
        preview_url: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            title: panel_title(prompt),
            duration: format!("{}s", length_seconds),
            style: style.display_name().to_string(),
            aspect_ratio: aspect_ratio.into(),
            preview_url: preview_url.into(),
        }
    }
}

/// First 50 characters of the prompt followed by an ellipsis.
pub fn panel_title(prompt: &str) -> String {
    let head: String = prompt.chars().take(TITLE_MAX_CHARS).collect();
    format!("{}...", head)
}

pub trait Renderer: Send + Sync {
    fn show_busy(&self, busy: bool);

    fn show_progress(&self, update: ProgressUpdate);

    fn hide_progress(&self);

    fn show_success(&self, view: &SuccessView);

    fn show_error(&self, message: &str);

    fn notify(&self, level: NotificationLevel, message: &str);
}
