//! Job lifecycle types.

use serde::{Deserialize, Serialize};

use crate::pipeline::stats::GeneratedReport;

/// Stage of one analysis job.
///
/// Legal transitions: `Pending → Collecting → Analyzing → Generating →
/// Completed`, plus `Error` from any non-terminal state. `Completed` and
/// `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Collecting,
    Analyzing,
    Generating,
    Completed,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Collecting => "collecting",
            Self::Analyzing => "analyzing",
            Self::Generating => "generating",
            Self::Completed => "completed",
            Self::Error => "error",
        }
    }

    /// Fixed progress checkpoint exposed to pollers.
    pub fn checkpoint(&self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Collecting => 20,
            Self::Analyzing => 50,
            Self::Generating => 80,
            Self::Completed => 100,
            Self::Error => 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        match (self, next) {
            (Self::Pending, Self::Collecting)
            | (Self::Collecting, Self::Analyzing)
            | (Self::Analyzing, Self::Generating)
            | (Self::Generating, Self::Completed) => true,
            (from, Self::Error) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One end-to-end analysis request.
///
/// Written only by the job's own worker; polled concurrently by status
/// readers, which always receive a clone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    /// 0-100, always one of the fixed checkpoints.
    pub progress: u8,
    pub message: String,
    pub video_ref: String,
    /// UTC creation timestamp, `%Y-%m-%dT%H:%M:%SZ`.
    pub created_at: String,
    /// Set on completion: handle to the generated report.
    pub report_ref: Option<GeneratedReport>,
    /// Set on failure: the collaborator's message, verbatim.
    pub error: Option<String>,
}

impl Job {
    pub fn new(id: String, video_ref: String) -> Self {
        Self {
            id,
            status: JobStatus::Pending,
            progress: 0,
            message: "Iniciando análise...".to_string(),
            video_ref,
            created_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            report_ref: None,
            error: None,
        }
    }
}
