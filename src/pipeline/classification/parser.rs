//! Parsing of remote batch-classification replies.
//!
//! The remote contract is `{"classificacoes": [{"id": N, "categoria": "<label>"}]}`.
//! Models occasionally wrap the object in prose or code fences, so
//! extraction is lenient; the outcome is always an explicit tagged variant
//! rather than an optimistically parsed value.

use std::collections::HashMap;

use serde::Deserialize;

/// Outcome of one remote batch call, as seen by the reconciler.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Reply parsed; map of comment id to the raw category label.
    Classified(HashMap<usize, String>),
    /// Reply received but its payload could not be parsed as JSON.
    Malformed(String),
    /// No reply at all (transport failure, API error).
    Unreachable(String),
}

#[derive(Deserialize)]
struct RawReply {
    #[serde(default)]
    classificacoes: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct RawEntry {
    id: usize,
    categoria: String,
}

/// Parse a model reply into `Classified` or `Malformed`.
///
/// Extraction candidates are tried in order (whole reply, fenced block,
/// outermost brace slice) until one parses, so prose before or after the
/// object is tolerated. A valid JSON object without the `classificacoes`
/// key yields an empty map (every comment then reconciles as missing-id).
/// Entries that fail to deserialize are skipped; duplicate ids keep the
/// first entry.
pub fn parse_batch_reply(raw: &str) -> BatchOutcome {
    let candidates = json_candidates(raw);
    if candidates.is_empty() {
        return BatchOutcome::Malformed("no JSON object in reply".to_string());
    }

    let mut last_error = String::new();
    for candidate in candidates {
        match serde_json::from_str::<RawReply>(candidate) {
            Ok(reply) => {
                let mut mapping = HashMap::with_capacity(reply.classificacoes.len());
                for value in reply.classificacoes {
                    if let Ok(entry) = serde_json::from_value::<RawEntry>(value) {
                        mapping.entry(entry.id).or_insert(entry.categoria);
                    }
                }
                return BatchOutcome::Classified(mapping);
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    BatchOutcome::Malformed(last_error)
}

/// Slices of the reply that may hold the JSON object, most specific last.
fn json_candidates(raw: &str) -> Vec<&str> {
    let mut candidates = Vec::new();

    let trimmed = raw.trim();
    if trimmed.starts_with('{') {
        candidates.push(trimmed);
    }

    if let Some(fence_start) = raw.find("```json") {
        let body = &raw[fence_start + 7..];
        if let Some(fence_end) = body.find("```") {
            candidates.push(body[..fence_end].trim());
        }
    }

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if end > start {
            candidates.push(raw[start..=end].trim());
        }
    }

    candidates
}
