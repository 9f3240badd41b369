use crate::models::history::MAX_HISTORY_CAPACITY;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub generation: GenerationConfig,
    #[validate(nested)]
    pub progress: ProgressConfig,
    #[validate(nested)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerationConfig {
    pub endpoint_url: String,
    #[validate(range(min = 1, message = "request_timeout_ms must be positive"))]
    pub request_timeout_ms: u64,
    #[validate(range(min = 1, message = "connect_timeout_ms must be positive"))]
    pub connect_timeout_ms: u64,
    // Shortest accepted prompt, counted in characters after trimming
    #[validate(range(min = 1, message = "min_prompt_chars must be at least 1"))]
    pub min_prompt_chars: usize,
    // Soft limit: longer prompts are logged, not rejected
    pub max_prompt_chars: usize,
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_version: Option<String>,
}

impl GenerationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProgressConfig {
    #[validate(range(min = 1, message = "tick_ms must be positive"))]
    pub tick_ms: u64,
    #[validate(range(exclusive_min = 0.0, message = "increment must be positive"))]
    pub increment: f32,
    #[validate(range(min = 0.0, max = 99.0, message = "cap must be between 0 and 99"))]
    pub cap: f32,
    pub completion_hold_ms: u64,
}

impl ProgressConfig {
    pub fn tick(&self) -> Duration {
        // tokio intervals panic on a zero period
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn completion_hold(&self) -> Duration {
        Duration::from_millis(self.completion_hold_ms)
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            increment: 0.5,
            cap: 95.0,
            completion_hold_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    #[validate(range(
        min = 1,
        max = MAX_HISTORY_CAPACITY,
        message = "history_capacity must be between 1 and 50"
    ))]
    pub history_capacity: usize,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        // Load .env file if it exists (for environment variable overrides)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default(
                "generation.endpoint_url",
                "https://api.starkvideo.ai/v1/videos/generate",
            )?
            .set_default("generation.request_timeout_ms", 30_000)?
            .set_default("generation.connect_timeout_ms", 10_000)?
            .set_default("generation.min_prompt_chars", 3)?
            .set_default("generation.max_prompt_chars", 500)?
            .set_default("progress.tick_ms", 100)?
            .set_default("progress.increment", 0.5)?
            .set_default("progress.cap", 95.0)?
            .set_default("progress.completion_hold_ms", 500)?
            .set_default("storage.data_dir", ".starkvideo")?
            .set_default("storage.history_capacity", 50)?
            // config.yml is optional; defaults above cover every key
            .add_source(config::File::with_name("config").required(false))
            // Allow environment variables to override config file
            .add_source(
                config::Environment::with_prefix("STARKVIDEO")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Config = config.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    /// Reject values the controller cannot run with.
    pub fn check(&self) -> Result<(), config::ConfigError> {
        self.validate()
            .map_err(|e| config::ConfigError::Message(format!("Invalid configuration: {}", e)))
    }
}
