use crate::{
    config::{Config, GenerationConfig, ProgressConfig},
    error::{GenerationError, Result, StoreError, ValidationError},
    models::{
        generation::{GenerationJob, GenerationRequest, JobStatus, SubmitPayload, SubmitResponse},
        history::HistoryEntry,
        preferences::Preferences,
    },
    services::{
        progress::{PendingHide, ProgressAnimator},
        submitter::JobSubmitter,
    },
    store::LocalStore,
    ui::{NotificationLevel, Renderer, SuccessView},
};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};
use tracing::{error, info, instrument, warn};
use validator::Validate;

const REJECTED_WITHOUT_REASON: &str = "Video generation failed, please try again";

/// Snapshot of the controller's session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControllerState {
    pub is_generating: bool,
    pub current_job_id: Option<String>,
    pub current_video_url: Option<String>,
}

#[derive(Debug, Default)]
struct CurrentVideo {
    job_id: Option<String>,
    video_url: Option<String>,
}

/// Holds the single-flight flag for one submission and clears it on drop,
/// whichever way the submission ends.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
    renderer: &'a dyn Renderer,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.renderer.show_busy(false);
    }
}

/// Drives one generation request at a time: validate, submit, animate, resolve.
pub struct GenerationController {
    config: GenerationConfig,
    progress: ProgressConfig,
    submitter: Arc<dyn JobSubmitter>,
    renderer: Arc<dyn Renderer>,
    store: Arc<dyn LocalStore>,
    in_flight: AtomicBool,
    current: Mutex<CurrentVideo>,
    // Hide left behind by the last successful animation
    pending_hide: Mutex<Option<PendingHide>>,
}

impl GenerationController {
    pub fn new(
        config: &Config,
        submitter: Arc<dyn JobSubmitter>,
        renderer: Arc<dyn Renderer>,
        store: Arc<dyn LocalStore>,
    ) -> Self {
        Self {
            config: config.generation.clone(),
            progress: config.progress.clone(),
            submitter,
            renderer,
            store,
            in_flight: AtomicBool::new(false),
            current: Mutex::new(CurrentVideo::default()),
            pending_hide: Mutex::new(None),
        }
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn state(&self) -> ControllerState {
        let current = self.current();
        ControllerState {
            is_generating: self.is_generating(),
            current_job_id: current.job_id.clone(),
            current_video_url: current.video_url.clone(),
        }
    }

    fn current(&self) -> MutexGuard<'_, CurrentVideo> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_pending_hide(&self) -> Option<PendingHide> {
        self.pending_hide
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Run one full request cycle.
    ///
    /// Validation failures return before any network call. Once validation
    /// passes, exactly one history entry is recorded and the in-flight flag
    /// is cleared before this returns.
    #[instrument(skip(self, request), fields(style = %request.style, length = request.length_seconds))]
    pub async fn submit(&self, request: GenerationRequest) -> Result<GenerationJob> {
        let guard = match self.begin(&request) {
            Ok(guard) => guard,
            Err(e) => {
                let level = match e {
                    ValidationError::Busy => NotificationLevel::Warning,
                    _ => NotificationLevel::Error,
                };
                self.renderer.notify(level, &e.to_string());
                return Err(e.into());
            }
        };

        if let Some(pending) = self.take_pending_hide() {
            pending.cancel().await;
        }

        self.renderer.show_busy(true);
        info!(
            target: "analytics",
            event = "generation_started",
            style = %request.style,
            length = request.length_seconds,
            aspect_ratio = %request.aspect_ratio
        );

        let animator = ProgressAnimator::start(&self.progress, self.renderer.clone());
        let outcome = self.call_submitter(&request).await;

        let result = match outcome {
            Ok(job_id) => {
                let pending = animator.complete().await;
                *self
                    .pending_hide
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(pending);
                Ok(self.resolve_success(&request, job_id))
            }
            Err(e) => {
                let reached = animator.fail().await;
                error!(progress = reached, "Generation failed: {}", e);
                info!(target: "analytics", event = "generation_failed", reason = %e);
                self.renderer.show_error(&e.user_message());
                Err(e)
            }
        };

        let job_id = result.as_ref().ok().map(|job| job.job_id.clone());
        self.record_history(&request, job_id).await;

        drop(guard);
        result
    }

    fn begin(
        &self,
        request: &GenerationRequest,
    ) -> std::result::Result<FlightGuard<'_>, ValidationError> {
        if self.is_generating() {
            return Err(ValidationError::Busy);
        }

        let prompt = request.trimmed_prompt();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }

        let chars = prompt.chars().count();
        if chars < self.config.min_prompt_chars {
            return Err(ValidationError::PromptTooShort {
                min: self.config.min_prompt_chars,
                actual: chars,
            });
        }

        request
            .validate()
            .map_err(|e| ValidationError::InvalidParameters(e.to_string()))?;

        if chars > self.config.max_prompt_chars {
            warn!(
                chars,
                max = self.config.max_prompt_chars,
                "Prompt exceeds the input limit, submitting anyway"
            );
        }

        // Loses only to a submission that started after the check above
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ValidationError::Busy)?;

        Ok(FlightGuard {
            flag: &self.in_flight,
            renderer: self.renderer.as_ref(),
        })
    }

    async fn call_submitter(&self, request: &GenerationRequest) -> Result<String> {
        let payload = SubmitPayload::from(request);
        let timeout = self.config.request_timeout();

        match tokio::time::timeout(timeout, self.submitter.submit(&payload)).await {
            Ok(Ok(SubmitResponse::Accepted { job_id, .. })) => Ok(job_id),
            Ok(Ok(SubmitResponse::Rejected { message })) => Err(GenerationError::ApiLogic(
                message.unwrap_or_else(|| REJECTED_WITHOUT_REASON.to_string()),
            )),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(GenerationError::Timeout(timeout)),
        }
    }

    fn resolve_success(&self, request: &GenerationRequest, job_id: String) -> GenerationJob {
        let preview_url = request.style.preview_url().to_string();

        {
            let mut current = self.current();
            current.job_id = Some(job_id.clone());
            current.video_url = Some(preview_url.clone());
        }

        let view = SuccessView::new(
            job_id.clone(),
            request.trimmed_prompt(),
            request.length_seconds,
            request.style,
            request.aspect_ratio.clone(),
            preview_url.clone(),
        );
        self.renderer.show_success(&view);
        self.renderer
            .notify(NotificationLevel::Success, "Video generated successfully!");
        info!(target: "analytics", event = "generation_succeeded", job_id = %job_id);

        GenerationJob {
            job_id,
            status: JobStatus::Queued,
            style: request.style,
            preview_url,
        }
    }

    async fn record_history(&self, request: &GenerationRequest, job_id: Option<String>) {
        let entry = HistoryEntry::new(
            request.trimmed_prompt(),
            request.style,
            request.length_seconds,
            job_id,
        );
        // History is best effort; a storage failure never fails the submission
        if let Err(e) = self.store.append_history(entry).await {
            error!("Error saving history: {}", e);
        }
    }

    /// Preview URL of the last successful generation.
    pub fn download_target(&self) -> Result<String> {
        let url = self.current().video_url.clone().ok_or(GenerationError::NoVideo)?;
        info!(target: "analytics", event = "video_download", url = %url);
        Ok(url)
    }

    /// Shareable link for the last successful generation.
    pub fn share_link(&self, origin: &str) -> Result<String> {
        let job_id = self.current().job_id.clone().ok_or(GenerationError::NoVideo)?;
        info!(target: "analytics", event = "video_share", job_id = %job_id);
        Ok(format!("{}/video/{}", origin.trim_end_matches('/'), job_id))
    }

    pub async fn history(&self) -> std::result::Result<Vec<HistoryEntry>, StoreError> {
        self.store.load_history().await
    }

    /// Saved preferences, or defaults when they cannot be read.
    pub async fn preferences(&self) -> Preferences {
        match self.store.load_preferences().await {
            Ok(preferences) => preferences,
            Err(e) => {
                error!("Error loading preferences: {}", e);
                Preferences::default()
            }
        }
    }

    pub async fn save_preferences(
        &self,
        preferences: &Preferences,
    ) -> std::result::Result<(), StoreError> {
        self.store.save_preferences(preferences).await?;
        info!(
            target: "analytics",
            event = "preferences_saved",
            theme = preferences.theme.as_str()
        );
        Ok(())
    }
}
