//! Deterministic keyword fallback classifier.
//!
//! Used whenever the remote service cannot supply a valid category for a
//! comment. Pure function: identical text always yields the identical
//! category.

use super::types::Category;

/// Ranked (category, keywords) table scanned top to bottom; the first
/// entry whose keyword list contains a substring of the lower-cased text
/// wins.
///
/// The ranking is part of the classifier's contract: several lists share
/// tokens (e.g. "kkk" appears under both alegria and gracejo, "pqp" and
/// "merda" under both ira and conteúdo vulgar), so reordering entries
/// changes the result for ambiguous inputs. The order below preserves the
/// behavior of the original keyword table.
const FALLBACK_RANKING: &[(Category, &[&str])] = &[
    (
        Category::Alegria,
        &[
            "kkk", "haha", "legal", "incrível", "amei", "adorei", "parabéns", "top", "massa",
            "show", "perfeito", "lindo",
        ],
    ),
    (
        Category::Ira,
        &[
            "raiva", "pqp", "droga", "idiota", "burro", "estúpido", "merda", "puto", "irritado",
        ],
    ),
    (
        Category::Gracejo,
        &[
            "kkk", "kk", "rs", "lol", "piada", "engraçado", "zoando", "brincando", "kkkk",
            "hilário",
        ],
    ),
    (
        Category::Explicativo,
        &[
            "porque", "assim", "então", "primeiro", "segundo", "terceiro", "explicando", "como",
            "quando", "onde",
        ],
    ),
    (
        Category::ConteudoVulgar,
        &[
            "porra", "caralho", "pqp", "merda", "buceta", "puto", "fdp", "cu", "cacete",
        ],
    ),
    (
        Category::Odio,
        &[
            "odeio", "nojo", "lixo", "horrível", "desgraça", "maldito", "morte", "matar",
            "imbecil",
        ],
    ),
    (
        Category::Aversao,
        &[
            "não gosto", "ruim", "péssimo", "terrível", "chato", "detesto", "vergonha",
        ],
    ),
    (
        Category::Revolta,
        &[
            "absurdo", "revoltante", "injusto", "ridículo", "palhaçada", "inadmissível",
            "inaceitável",
        ],
    ),
];

/// Classify a comment by keyword heuristics.
///
/// Returns `não identificáveis` for empty text or when no keyword matches.
pub fn fallback_classify(text: &str) -> Category {
    if text.is_empty() {
        return Category::NaoIdentificaveis;
    }

    let lower = text.to_lowercase();
    for (category, keywords) in FALLBACK_RANKING {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return *category;
        }
    }

    Category::NaoIdentificaveis
}
