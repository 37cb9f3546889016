//! Report types produced by the statistics aggregator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pipeline::classification::Category;

/// A short example shown under a category in the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentExample {
    /// Comment text, truncated to 100 chars with `...` when longer.
    pub text: String,
    pub author: String,
    pub like_count: u64,
}

/// Per-category statistics. The report always carries all nine, in
/// canonical category order, even at zero occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: Category,
    pub quantity: u32,
    /// `quantity / total * 100`, rounded to 2 decimals; 0.0 when total is 0.
    pub percentage: f64,
    /// First three comments seen for this category, in input order.
    pub examples: Vec<CommentExample>,
}

/// Headline numbers derived from the distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Category with the highest quantity; ties break toward the earlier
    /// category in canonical order. `não identificáveis` when empty.
    pub predominant_category: Category,
    pub predominant_percentage: f64,
    /// Share of comments classified by the remote service (0-100).
    pub success_rate: f64,
    /// Number of categories with at least one comment.
    pub categories_found: u32,
    /// Categories with at least one comment, in canonical order.
    pub active_categories: Vec<Category>,
}

/// Remote-vs-fallback quality breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub success_count: u32,
    pub fallback_count: u32,
    /// Counts keyed by the exact classification-status label.
    pub status_breakdown: BTreeMap<String, u32>,
}

/// Complete, category-complete analysis report for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub video_ref: String,
    pub total_comments: u32,
    /// UTC timestamp of aggregation, `%Y-%m-%dT%H:%M:%SZ`.
    pub analyzed_at: String,
    pub summary: ReportSummary,
    pub categories: Vec<CategoryStats>,
    pub quality: QualityMetrics,
}

/// Output of the external report-generation collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedReport {
    pub report_id: String,
    pub size_kb: u64,
}
