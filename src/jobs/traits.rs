//! Collaborator seams consumed by the orchestrator.
//!
//! Comment collection and report generation are external capabilities;
//! the traits keep the orchestrator testable and transport-agnostic.

use thiserror::Error;

use crate::pipeline::classification::RawComment;
use crate::pipeline::stats::{AnalysisReport, GeneratedReport};

/// Fetches the ordered comment sequence for a video.
///
/// Collection is all-or-nothing: on failure no partial sequence is
/// returned and the job fails.
pub trait CommentCollector: Send + Sync {
    fn collect(&self, video_ref: &str) -> Result<Vec<RawComment>, CollectorError>;
}

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Erro ao coletar comentários: {0}")]
    Failed(String),

    #[error("Timeout - vídeo pode ter muitos comentários")]
    Timeout,
}

/// Renders an analysis report into a downloadable artifact.
pub trait ReportGenerator: Send + Sync {
    fn generate(&self, report: &AnalysisReport) -> Result<GeneratedReport, GeneratorError>;
}

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Erro no serviço de relatórios: {0}")]
    Failed(String),
}
