pub mod batch;
pub mod fallback;
pub mod openai;
pub mod parser;
pub mod prompt;
pub mod types;

pub use batch::*;
pub use fallback::*;
pub use openai::*;
pub use parser::*;
pub use types::*;

use thiserror::Error;

/// Errors from the remote classification client.
///
/// These never surface as job failures: the batch classifier absorbs them
/// into per-comment fallback statuses.
#[derive(Error, Debug)]
pub enum ClassificationError {
    #[error("Classification service unreachable at {0}")]
    Connection(String),

    #[error("Classification service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
