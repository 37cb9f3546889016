pub mod service;
pub mod store;
pub mod traits;
pub mod types;

pub use service::*;
pub use store::*;
pub use traits::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobError {
    #[error("Invalid video reference: {0}")]
    InvalidVideoRef(String),

    #[error("Job not found: {0}")]
    NotFound(String),

    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition { from: types::JobStatus, to: types::JobStatus },

    #[error("Job store lock poisoned")]
    StorePoisoned,
}
