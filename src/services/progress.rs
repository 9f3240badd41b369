use crate::{config::ProgressConfig, ui::Renderer};
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::debug;

// Animation must leave room for the real completion to snap to 100
const MAX_CAP: f32 = 99.0;

/// Display-only stage derived from the progress percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStage {
    TextAnalysis,
    ImageSynthesis,
    MotionCreation,
    Finalizing,
}

impl ProgressStage {
    pub fn for_percent(percent: f32) -> Self {
        if percent <= 25.0 {
            Self::TextAnalysis
        } else if percent <= 50.0 {
            Self::ImageSynthesis
        } else if percent <= 75.0 {
            Self::MotionCreation
        } else {
            Self::Finalizing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TextAnalysis => "Text Analysis",
            Self::ImageSynthesis => "AI Generating Images",
            Self::MotionCreation => "Creating Video Motion",
            Self::Finalizing => "Adding Sound & Finalizing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub percent: f32,
    pub stage: ProgressStage,
}

impl ProgressUpdate {
    pub fn at(percent: f32) -> Self {
        Self {
            percent,
            stage: ProgressStage::for_percent(percent),
        }
    }

    pub fn complete() -> Self {
        Self::at(100.0)
    }
}

/// Time-driven progress indicator for one submission.
///
/// Owns its ticking task. `complete` and `fail` consume the animator, and
/// dropping it aborts the task, so a timer never outlives its submission.
pub struct ProgressAnimator {
    handle: JoinHandle<()>,
    value: watch::Receiver<f32>,
    renderer: Arc<dyn Renderer>,
    completion_hold: Duration,
}

impl ProgressAnimator {
    pub fn start(config: &ProgressConfig, renderer: Arc<dyn Renderer>) -> Self {
        let (tx, value) = watch::channel(0.0_f32);
        let tick = config.tick();
        let increment = config.increment;
        let cap = config.cap.clamp(0.0, MAX_CAP);

        renderer.show_progress(ProgressUpdate::at(0.0));

        let task_renderer = renderer.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick of a tokio interval completes immediately
            ticker.tick().await;

            let mut progress = 0.0_f32;
            while progress < cap {
                ticker.tick().await;
                progress = (progress + increment).min(cap);
                tx.send_replace(progress);
                task_renderer.show_progress(ProgressUpdate::at(progress));
            }
            debug!(progress, "Progress animation reached its cap");
        });

        Self {
            handle,
            value,
            renderer,
            completion_hold: config.completion_hold(),
        }
    }

    pub fn current(&self) -> f32 {
        *self.value.borrow()
    }

    /// Abort the ticking task and wait until it can no longer render.
    async fn halt(&mut self) -> f32 {
        self.handle.abort();
        let _ = (&mut self.handle).await;
        self.current()
    }

    /// Success path: snap to 100%, then hide once the hold elapses.
    ///
    /// The returned handle owns the pending hide. The caller keeps it and
    /// cancels it before the next animation starts.
    pub async fn complete(mut self) -> PendingHide {
        let reached = self.halt().await;
        debug!(reached, "Progress completed");
        self.renderer.show_progress(ProgressUpdate::complete());

        let renderer = self.renderer.clone();
        let hold = self.completion_hold;
        PendingHide(tokio::spawn(async move {
            tokio::time::sleep(hold).await;
            renderer.hide_progress();
        }))
    }

    /// Failure path: hide immediately without reaching 100%.
    pub async fn fail(mut self) -> f32 {
        let reached = self.halt().await;
        self.renderer.hide_progress();
        reached
    }
}

/// Hide scheduled by [`ProgressAnimator::complete`] that has not fired yet
#[derive(Debug)]
pub struct PendingHide(JoinHandle<()>);

impl PendingHide {
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }

    /// Cancel the hide and wait until it can no longer render.
    pub async fn cancel(self) {
        self.0.abort();
        let _ = self.0.await;
    }
}

impl Drop for ProgressAnimator {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
