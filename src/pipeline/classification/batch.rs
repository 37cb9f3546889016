//! Batch classifier — the remote/fallback reconciliation loop.
//!
//! Sends comments to the remote service in contiguous batches and settles
//! every comment with a category plus a status recording where the
//! category came from. Remote failures never abort the pipeline: they
//! degrade the affected batch to the deterministic fallback classifier.

use std::sync::Arc;

use crate::config::AnalysisConfig;

use super::fallback::fallback_classify;
use super::openai::ChatClient;
use super::parser::{parse_batch_reply, BatchOutcome};
use super::prompt::{build_batch_prompt, SYSTEM_PROMPT};
use super::types::{Category, ClassificationStatus, Comment, RawComment};

/// Classifies comment sequences in batches against a `ChatClient`.
pub struct BatchClassifier {
    client: Arc<dyn ChatClient>,
    config: AnalysisConfig,
}

impl BatchClassifier {
    pub fn new(client: Arc<dyn ChatClient>, config: AnalysisConfig) -> Self {
        Self { client, config }
    }

    /// Classify a comment sequence.
    ///
    /// Guarantees: the output has the same order as the input truncated to
    /// `max_comments`, and every element carries a category and a status.
    pub fn classify(&self, mut comments: Vec<RawComment>) -> Vec<Comment> {
        if comments.len() > self.config.max_comments {
            tracing::info!(
                collected = comments.len(),
                limit = self.config.max_comments,
                "Truncating comment sequence to the analysis limit"
            );
            comments.truncate(self.config.max_comments);
        }

        let total = comments.len();
        let mut classified = Vec::with_capacity(total);
        let batch_size = self.config.batch_size.max(1);
        let batch_count = total.div_ceil(batch_size);

        for (batch_no, batch) in comments.chunks(batch_size).enumerate() {
            let first_id = batch_no * batch_size + 1;
            let outcome = self.classify_batch(batch, first_id);
            let failed = !matches!(outcome, BatchOutcome::Classified(_));

            classified.extend(reconcile(batch, first_id, outcome));

            tracing::info!(
                batch = batch_no + 1,
                batches = batch_count,
                processed = classified.len(),
                total,
                "Batch settled"
            );

            // Deliberate pacing before the next request; back off harder
            // after a batch-level failure.
            if batch_no + 1 < batch_count {
                let pause = if failed {
                    self.config.error_backoff
                } else {
                    self.config.batch_pause
                };
                if !pause.is_zero() {
                    std::thread::sleep(pause);
                }
            }
        }

        classified
    }

    fn classify_batch(&self, batch: &[RawComment], first_id: usize) -> BatchOutcome {
        let user_prompt = build_batch_prompt(batch, first_id, self.config.prompt_text_limit);
        match self.client.complete(SYSTEM_PROMPT, &user_prompt) {
            Ok(reply) => parse_batch_reply(&reply),
            Err(e) => BatchOutcome::Unreachable(e.to_string()),
        }
    }
}

/// Apply the reconciliation rules to one batch.
fn reconcile(batch: &[RawComment], first_id: usize, outcome: BatchOutcome) -> Vec<Comment> {
    match outcome {
        BatchOutcome::Classified(mapping) => batch
            .iter()
            .enumerate()
            .map(|(offset, raw)| {
                let id = first_id + offset;
                let (category, status) = match mapping.get(&id) {
                    None => (
                        fallback_classify(&raw.text),
                        ClassificationStatus::FallbackMissingId,
                    ),
                    Some(label) => match Category::parse(label) {
                        Some(category) => (category, ClassificationStatus::Success),
                        None => (
                            fallback_classify(&raw.text),
                            ClassificationStatus::FallbackInvalidCategory,
                        ),
                    },
                };
                settle(raw, id, category, status)
            })
            .collect(),
        BatchOutcome::Malformed(reason) => {
            tracing::warn!(
                first_id,
                size = batch.len(),
                reason,
                "Unparsable batch reply, degrading to fallback"
            );
            degrade(batch, first_id, ClassificationStatus::FallbackJsonError)
        }
        BatchOutcome::Unreachable(reason) => {
            tracing::warn!(
                first_id,
                size = batch.len(),
                reason,
                "Batch request failed, degrading to fallback"
            );
            degrade(batch, first_id, ClassificationStatus::FallbackRequestError)
        }
    }
}

fn degrade(batch: &[RawComment], first_id: usize, status: ClassificationStatus) -> Vec<Comment> {
    batch
        .iter()
        .enumerate()
        .map(|(offset, raw)| {
            let category = fallback_classify(&raw.text);
            settle(raw, first_id + offset, category, status)
        })
        .collect()
}

fn settle(
    raw: &RawComment,
    id: usize,
    category: Category,
    status: ClassificationStatus,
) -> Comment {
    Comment {
        original_index: id,
        text: raw.text.clone(),
        author: raw.author.clone(),
        like_count: raw.like_count,
        category,
        status,
    }
}
