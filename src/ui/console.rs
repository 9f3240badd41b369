use super::{NotificationLevel, Renderer, SuccessView};
use crate::services::progress::ProgressUpdate;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, error, info, warn};

// Redraw the progress line only when it moves by at least this many points
const PROGRESS_STEP: u32 = 5;
const NOT_SHOWN: u32 = u32::MAX;

/// Terminal renderer: user-facing lines go to stdout, diagnostics to tracing.
#[derive(Debug)]
pub struct ConsoleRenderer {
    last_drawn: AtomicU32,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self {
            last_drawn: AtomicU32::new(NOT_SHOWN),
        }
    }
}

impl Default for ConsoleRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for ConsoleRenderer {
    fn show_busy(&self, busy: bool) {
        debug!(busy, "Generate button state changed");
        if busy {
            println!("⚡ Generating...");
        }
    }

    fn show_progress(&self, update: ProgressUpdate) {
        let percent = update.percent.floor() as u32;
        let bucket = percent - percent % PROGRESS_STEP;
        let previous = self.last_drawn.swap(bucket, Ordering::Relaxed);
        if previous != bucket || percent == 100 {
            println!("[{:>3}%] {}", percent, update.stage.label());
        }
    }

    fn hide_progress(&self) {
        self.last_drawn.store(NOT_SHOWN, Ordering::Relaxed);
    }

    fn show_success(&self, view: &SuccessView) {
        info!(job_id = %view.job_id, "Rendering generation result");
        println!("🎬 {}", view.title);
        println!(
            "   duration: {}  style: {}  ratio: {}",
            view.duration, view.style, view.aspect_ratio
        );
        println!("   job id:   {}", view.job_id);
        println!("   preview:  {}", view.preview_url);
    }

    fn show_error(&self, message: &str) {
        error!("Generation failed: {}", message);
        eprintln!("✖ {}", message);
    }

    fn notify(&self, level: NotificationLevel, message: &str) {
        match level {
            NotificationLevel::Error => warn!("{}", message),
            _ => debug!(?level, "{}", message),
        }
        let icon = match level {
            NotificationLevel::Success => "✔",
            NotificationLevel::Error => "✖",
            NotificationLevel::Warning => "!",
            NotificationLevel::Info => "i",
        };
        println!("{} {}", icon, message);
    }
}
