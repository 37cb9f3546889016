use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Comentaria";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tunables for the classification pipeline.
///
/// Defaults mirror the production service: up to 1000 comments per
/// analysis, batches of 8, comment text capped at 250 chars for token
/// economy, and inter-batch pacing to respect remote rate limits.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Hard cap on comments per analysis; excess is dropped, not queued.
    pub max_comments: usize,
    /// Comments per remote classification request.
    pub batch_size: usize,
    /// Per-comment text limit (chars) before transmission.
    pub prompt_text_limit: usize,
    /// Pause after a successfully classified batch.
    pub batch_pause: Duration,
    /// Longer pause after a batch-level failure.
    pub error_backoff: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_comments: 1000,
            batch_size: 8,
            prompt_text_limit: 250,
            batch_pause: Duration::from_millis(2500),
            error_backoff: Duration::from_secs(5),
        }
    }
}

impl AnalysisConfig {
    /// Disable inter-batch pacing. Intended for tests and offline runs.
    pub fn without_pacing(mut self) -> Self {
        self.batch_pause = Duration::ZERO;
        self.error_backoff = Duration::ZERO;
        self
    }
}
