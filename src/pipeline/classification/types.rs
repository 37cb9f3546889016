//! Core types for comment classification.
//!
//! A `RawComment` comes from the collection stage with no category;
//! classification turns it into a `Comment` carrying exactly one of the
//! nine fixed categories plus a record of how that category was obtained.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════
// Category Enum
// ═══════════════════════════════════════════

/// The nine fixed sentiment categories.
///
/// Declaration order is load-bearing: it is the report enumeration order
/// and the tie-break order for the predominant category. Do not reorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "alegria")]
    Alegria,
    #[serde(rename = "gracejo")]
    Gracejo,
    #[serde(rename = "ira")]
    Ira,
    #[serde(rename = "aversão")]
    Aversao,
    #[serde(rename = "revolta")]
    Revolta,
    #[serde(rename = "explicativo")]
    Explicativo,
    #[serde(rename = "conteúdo vulgar")]
    ConteudoVulgar,
    #[serde(rename = "ódio")]
    Odio,
    #[serde(rename = "não identificáveis")]
    NaoIdentificaveis,
}

impl Category {
    /// All categories in canonical (tie-break) order.
    pub const ALL: [Category; 9] = [
        Self::Alegria,
        Self::Gracejo,
        Self::Ira,
        Self::Aversao,
        Self::Revolta,
        Self::Explicativo,
        Self::ConteudoVulgar,
        Self::Odio,
        Self::NaoIdentificaveis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alegria => "alegria",
            Self::Gracejo => "gracejo",
            Self::Ira => "ira",
            Self::Aversao => "aversão",
            Self::Revolta => "revolta",
            Self::Explicativo => "explicativo",
            Self::ConteudoVulgar => "conteúdo vulgar",
            Self::Odio => "ódio",
            Self::NaoIdentificaveis => "não identificáveis",
        }
    }

    /// Parse a category label as produced by the remote service.
    /// Case-insensitive on the canonical Portuguese labels.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == normalized)
    }

    /// Position in `ALL`; used as a counter index by the aggregator.
    pub fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════
// Classification Status
// ═══════════════════════════════════════════

/// How a comment's category was obtained.
///
/// `Success` means the remote service supplied a valid category; every
/// other variant records the specific reason the deterministic fallback
/// classifier was used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationStatus {
    Success,
    FallbackInvalidCategory,
    FallbackMissingId,
    FallbackJsonError,
    FallbackRequestError,
}

impl ClassificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::FallbackInvalidCategory => "fallback-invalid-category",
            Self::FallbackMissingId => "fallback-missing-id",
            Self::FallbackJsonError => "fallback-json-error",
            Self::FallbackRequestError => "fallback-request-error",
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::Success)
    }
}

impl std::fmt::Display for ClassificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ═══════════════════════════════════════════
// Comments
// ═══════════════════════════════════════════

/// A collected comment, not yet classified. Sequence order is significant
/// end-to-end: it drives the remote-protocol ids and example selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawComment {
    pub text: String,
    pub author: String,
    pub like_count: u64,
}

/// A fully classified comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// 1-based position in the (truncated) input sequence. Also the id
    /// used to tag this comment in the remote classification protocol.
    pub original_index: usize,
    pub text: String,
    pub author: String,
    pub like_count: u64,
    pub category: Category,
    pub status: ClassificationStatus,
}
