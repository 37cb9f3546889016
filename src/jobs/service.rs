//! Analysis service — job submission, background workers, status polls.
//!
//! One detached worker thread per submitted job drives the stages in
//! order: collect → classify + aggregate → generate. Stage transitions
//! are checkpointed in the shared store so pollers observe intermediate
//! progress; any stage failure moves the job to `error` and stops the
//! worker. There are no retries and no cancellation.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use uuid::Uuid;

use crate::pipeline::classification::BatchClassifier;
use crate::pipeline::stats::aggregate;

use super::store::JobStore;
use super::traits::{CommentCollector, ReportGenerator};
use super::types::{Job, JobStatus};
use super::JobError;

/// Accepted YouTube URL shapes.
static YOUTUBE_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https?://(?:www\.)?youtube\.com/watch\?v=[a-zA-Z0-9_-]+",
        r"^https?://youtu\.be/[a-zA-Z0-9_-]+",
        r"^https?://(?:www\.)?youtube\.com/embed/[a-zA-Z0-9_-]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid pattern"))
    .collect()
});

/// Whether a reference looks like a YouTube video URL.
pub fn is_valid_video_ref(video_ref: &str) -> bool {
    YOUTUBE_URL_PATTERNS.iter().any(|p| p.is_match(video_ref))
}

/// Entry point for analysis requests.
pub struct AnalysisService {
    store: Arc<JobStore>,
    collector: Arc<dyn CommentCollector>,
    generator: Arc<dyn ReportGenerator>,
    classifier: Arc<BatchClassifier>,
}

impl AnalysisService {
    pub fn new(
        collector: Arc<dyn CommentCollector>,
        generator: Arc<dyn ReportGenerator>,
        classifier: Arc<BatchClassifier>,
    ) -> Self {
        Self {
            store: Arc::new(JobStore::new()),
            collector,
            generator,
            classifier,
        }
    }

    /// Submit an analysis request.
    ///
    /// Validates the video reference, registers the job as `pending` and
    /// spawns its worker; returns the job id without waiting for any
    /// stage. Invalid references are rejected before any job exists.
    pub fn submit(&self, video_ref: &str) -> Result<String, JobError> {
        let video_ref = video_ref.trim();
        if video_ref.is_empty() {
            return Err(JobError::InvalidVideoRef(
                "video reference is required".to_string(),
            ));
        }
        if !is_valid_video_ref(video_ref) {
            return Err(JobError::InvalidVideoRef(video_ref.to_string()));
        }

        let id = short_job_id();
        self.store
            .insert(Job::new(id.clone(), video_ref.to_string()))?;

        tracing::info!(job_id = %id, video_ref, "Analysis job submitted");

        let store = self.store.clone();
        let collector = self.collector.clone();
        let generator = self.generator.clone();
        let classifier = self.classifier.clone();
        let worker_id = id.clone();
        let worker_ref = video_ref.to_string();
        // Detached on purpose: jobs run to completion or error and cannot
        // be interrupted by the caller.
        std::thread::spawn(move || {
            run_analysis(store, collector, generator, classifier, worker_id, worker_ref);
        });

        Ok(id)
    }

    /// Current state of a job. Read-only; unknown ids are a not-found
    /// condition, never a crash.
    pub fn status(&self, id: &str) -> Result<Job, JobError> {
        self.store.snapshot(id)
    }

    /// Number of jobs tracked by this process (all states).
    pub fn active_jobs(&self) -> usize {
        self.store.len()
    }
}

/// Worker body: drives one job through its stages.
///
/// Free function over `Arc` handles so a pooled executor could drive it
/// the same way the per-job thread does.
fn run_analysis(
    store: Arc<JobStore>,
    collector: Arc<dyn CommentCollector>,
    generator: Arc<dyn ReportGenerator>,
    classifier: Arc<BatchClassifier>,
    job_id: String,
    video_ref: String,
) {
    let fail = |error: &str| {
        tracing::error!(job_id = %job_id, error, "Analysis job failed");
        if let Err(e) = store.fail(&job_id, error) {
            tracing::warn!(job_id = %job_id, error = %e, "Could not record job failure");
        }
    };

    if let Err(e) = store.advance(
        &job_id,
        JobStatus::Collecting,
        "Coletando comentários do YouTube...",
    ) {
        tracing::warn!(job_id = %job_id, error = %e, "Worker could not start");
        return;
    }

    let comments = match collector.collect(&video_ref) {
        Ok(comments) => comments,
        Err(e) => return fail(&e.to_string()),
    };
    tracing::info!(job_id = %job_id, collected = comments.len(), "Comments collected");

    if store
        .advance(
            &job_id,
            JobStatus::Analyzing,
            "Classificando comentários com IA...",
        )
        .is_err()
    {
        return;
    }

    let classified = classifier.classify(comments);
    let report = aggregate(&classified, &video_ref);
    tracing::info!(
        job_id = %job_id,
        total = report.total_comments,
        success_rate = report.summary.success_rate,
        predominant = %report.summary.predominant_category,
        "Classification finished"
    );

    if store
        .advance(&job_id, JobStatus::Generating, "Gerando relatório...")
        .is_err()
    {
        return;
    }

    match generator.generate(&report) {
        Ok(generated) => {
            if let Err(e) = store.complete(&job_id, generated, "Análise concluída!") {
                tracing::warn!(job_id = %job_id, error = %e, "Could not record completion");
            } else {
                tracing::info!(job_id = %job_id, "Analysis job completed");
            }
        }
        Err(e) => fail(&e.to_string()),
    }
}

/// Short, URL-friendly job id (first uuid group).
fn short_job_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}
