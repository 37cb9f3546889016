//! In-memory job store.
//!
//! One writer per key (the job's own worker), any number of concurrent
//! readers (status pollers). Jobs live for the process lifetime; there is
//! no persistence.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::pipeline::stats::GeneratedReport;

use super::types::{Job, JobStatus};
use super::JobError;

/// Concurrency-safe map from job id to job record.
#[derive(Default)]
pub struct JobStore {
    jobs: RwLock<HashMap<String, Job>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, job: Job) -> Result<(), JobError> {
        let mut jobs = self.jobs.write().map_err(|_| JobError::StorePoisoned)?;
        jobs.insert(job.id.clone(), job);
        Ok(())
    }

    /// Move a job to the next stage, setting its checkpoint and message.
    /// Rejects transitions outside the legal chain.
    pub fn advance(&self, id: &str, status: JobStatus, message: &str) -> Result<(), JobError> {
        self.update(id, |job| {
            if !job.status.can_transition_to(status) {
                return Err(JobError::IllegalTransition {
                    from: job.status,
                    to: status,
                });
            }
            job.status = status;
            job.progress = status.checkpoint();
            job.message = message.to_string();
            Ok(())
        })
    }

    /// Terminal success: `generating → completed` with the report handle.
    pub fn complete(
        &self,
        id: &str,
        report: GeneratedReport,
        message: &str,
    ) -> Result<(), JobError> {
        self.update(id, |job| {
            if !job.status.can_transition_to(JobStatus::Completed) {
                return Err(JobError::IllegalTransition {
                    from: job.status,
                    to: JobStatus::Completed,
                });
            }
            job.status = JobStatus::Completed;
            job.progress = JobStatus::Completed.checkpoint();
            job.message = message.to_string();
            job.report_ref = Some(report);
            Ok(())
        })
    }

    /// Terminal failure: progress resets to 0 and the collaborator's
    /// message is preserved verbatim in `error`.
    pub fn fail(&self, id: &str, error: &str) -> Result<(), JobError> {
        self.update(id, |job| {
            if !job.status.can_transition_to(JobStatus::Error) {
                return Err(JobError::IllegalTransition {
                    from: job.status,
                    to: JobStatus::Error,
                });
            }
            job.status = JobStatus::Error;
            job.progress = 0;
            job.message = "Erro no processamento".to_string();
            job.error = Some(error.to_string());
            Ok(())
        })
    }

    /// Idempotent read; never blocks on in-flight stage work.
    pub fn snapshot(&self, id: &str) -> Result<Job, JobError> {
        let jobs = self.jobs.read().map_err(|_| JobError::StorePoisoned)?;
        jobs.get(id)
            .cloned()
            .ok_or_else(|| JobError::NotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.jobs.read().map(|jobs| jobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Job) -> Result<(), JobError>,
    ) -> Result<(), JobError> {
        let mut jobs = self.jobs.write().map_err(|_| JobError::StorePoisoned)?;
        let job = jobs
            .get_mut(id)
            .ok_or_else(|| JobError::NotFound(id.to_string()))?;
        mutate(job)
    }
}
