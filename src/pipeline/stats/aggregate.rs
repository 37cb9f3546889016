//! Statistics aggregation over a classified comment sequence.
//!
//! Counts and percentages are order-independent; example selection is not
//! (first three per category, in input order). That asymmetry is part of
//! the contract.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::pipeline::classification::prompt::truncate_chars;
use crate::pipeline::classification::{Category, Comment};

use super::types::{
    AnalysisReport, CategoryStats, CommentExample, QualityMetrics, ReportSummary,
};

/// Examples kept per category.
const EXAMPLE_LIMIT: usize = 3;

/// Example text cap before the ellipsis is appended.
const EXAMPLE_TEXT_LIMIT: usize = 100;

/// Build the complete report for a classified sequence.
///
/// All nine categories appear in the output regardless of what the input
/// contains; an empty input yields a zero report with `não identificáveis`
/// as the predominant category.
pub fn aggregate(classified: &[Comment], video_ref: &str) -> AnalysisReport {
    let total = classified.len() as u32;

    let mut quantities = [0u32; Category::ALL.len()];
    let mut examples: Vec<Vec<CommentExample>> = vec![Vec::new(); Category::ALL.len()];
    let mut status_breakdown: BTreeMap<String, u32> = BTreeMap::new();
    let mut success_count = 0u32;

    for comment in classified {
        let idx = comment.category.ordinal();
        quantities[idx] += 1;

        if !comment.status.is_fallback() {
            success_count += 1;
        }
        *status_breakdown
            .entry(comment.status.as_str().to_string())
            .or_insert(0) += 1;

        if examples[idx].len() < EXAMPLE_LIMIT {
            examples[idx].push(make_example(comment));
        }
    }

    let categories: Vec<CategoryStats> = Category::ALL
        .iter()
        .enumerate()
        .map(|(idx, &category)| CategoryStats {
            category,
            quantity: quantities[idx],
            percentage: percentage(quantities[idx], total),
            examples: std::mem::take(&mut examples[idx]),
        })
        .collect();

    let summary = summarize(&quantities, total, success_count);
    let fallback_count = total - success_count;

    AnalysisReport {
        video_ref: video_ref.to_string(),
        total_comments: total,
        analyzed_at: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        summary,
        categories,
        quality: QualityMetrics {
            success_count,
            fallback_count,
            status_breakdown,
        },
    }
}

fn summarize(quantities: &[u32], total: u32, success_count: u32) -> ReportSummary {
    let active_categories: Vec<Category> = Category::ALL
        .iter()
        .copied()
        .filter(|c| quantities[c.ordinal()] > 0)
        .collect();

    // Ties break toward the earlier category in canonical order, hence
    // the strict comparison over the ordered scan.
    let (predominant_category, predominant_quantity) = if total == 0 {
        (Category::NaoIdentificaveis, 0)
    } else {
        let mut best = (Category::ALL[0], quantities[0]);
        for &category in &Category::ALL[1..] {
            let quantity = quantities[category.ordinal()];
            if quantity > best.1 {
                best = (category, quantity);
            }
        }
        best
    };

    ReportSummary {
        predominant_category,
        predominant_percentage: percentage(predominant_quantity, total),
        success_rate: percentage(success_count, total),
        categories_found: active_categories.len() as u32,
        active_categories,
    }
}

fn make_example(comment: &Comment) -> CommentExample {
    let truncated = truncate_chars(&comment.text, EXAMPLE_TEXT_LIMIT);
    let text = if truncated.len() < comment.text.len() {
        format!("{truncated}...")
    } else {
        comment.text.clone()
    };
    CommentExample {
        text,
        author: comment.author.clone(),
        like_count: comment.like_count,
    }
}

/// Two-decimal percentage; 0.0 when the denominator is 0.
fn percentage(quantity: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(f64::from(quantity) / f64::from(total) * 100.0)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
