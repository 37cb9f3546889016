//! Comentaria — asynchronous sentiment analysis for YouTube comments.
//!
//! The pipeline classifies each collected comment into one of nine fixed
//! sentiment categories through a remote language model, degrading to a
//! deterministic keyword classifier when the remote call fails, then
//! aggregates a category-complete statistics report. Each analysis runs
//! as an independent background job whose progress is polled through
//! [`jobs::AnalysisService`].
//!
//! Comment collection, report rendering and the HTTP surface are external
//! collaborators behind the traits in [`jobs::traits`].

pub mod config;
pub mod jobs;
pub mod pipeline;
