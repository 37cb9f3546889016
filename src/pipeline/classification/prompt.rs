//! Prompt construction for remote batch classification.

use super::types::RawComment;

/// System prompt: category definitions, Brazilian-Portuguese disambiguation
/// rules and the strict JSON output contract the parser relies on.
pub const SYSTEM_PROMPT: &str = "\
Você é um especialista em análise de sentimentos para comentários do YouTube \
brasileiro. Sua missão é classificar cada comentário com alta precisão.

CATEGORIAS OBRIGATÓRIAS (escolha exatamente uma por comentário):
- alegria: felicidade, satisfação, elogios, empolgação, gratidão, admiração
- gracejo: humor, piadas, ironia, sarcasmo, brincadeiras, memes, zoação amigável
- ira: raiva, indignação, irritação, agressividade, briga, hostilidade
- aversão: desagrado, crítica negativa, desgosto, insatisfação, repulsa
- revolta: protesto, inconformismo, indignação social, injustiça, rebeldia
- explicativo: informações, esclarecimentos, perguntas, ensino, dados, instruções
- conteúdo vulgar: palavrões, linguagem sexual explícita, obscenidades, grosserias
- ódio: ofensas pessoais, discriminação, preconceito, ameaças, xingamentos direcionados
- não identificáveis: neutros, ambíguos, incompreensíveis, spam, sem contexto emocional claro

INSTRUÇÕES CRÍTICAS:
- Analise o CONTEXTO e INTENÇÃO por trás das palavras
- Considere gírias brasileiras e expressões regionais
- \"kkkk\", \"kkk\", \"rsrs\" = gracejo (não alegria)
- Palavrões em contexto de humor = gracejo (não vulgar)
- Palavrões agressivos = vulgar ou ódio
- Críticas construtivas = explicativo
- Críticas destrutivas = aversão

Responda APENAS em JSON válido:
{\"classificacoes\": [{\"id\": 1, \"categoria\": \"alegria\"}, {\"id\": 2, \"categoria\": \"gracejo\"}]}";

/// Build the user prompt for one batch.
///
/// Comments are listed as `{id}. "{text}"` with ids 1-based and global to
/// the whole truncated sequence (`first_id` is the id of the batch's first
/// comment). Text is capped at `text_limit` chars for token economy.
pub fn build_batch_prompt(batch: &[RawComment], first_id: usize, text_limit: usize) -> String {
    let mut lines = Vec::with_capacity(batch.len());
    for (offset, comment) in batch.iter().enumerate() {
        let text = truncate_chars(&comment.text, text_limit);
        lines.push(format!("{}. \"{}\"", first_id + offset, text));
    }
    format!(
        "Classifique estes comentários do YouTube:\n\n{}",
        lines.join("\n")
    )
}

/// Truncate to at most `max_chars` characters, never splitting a char.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(text: &str) -> RawComment {
        RawComment {
            text: text.to_string(),
            author: "autor".to_string(),
            like_count: 0,
        }
    }

    #[test]
    fn prompt_numbers_are_global_not_batch_local() {
        let batch = vec![comment("primeiro"), comment("segundo")];
        let prompt = build_batch_prompt(&batch, 9, 250);
        assert!(prompt.contains("9. \"primeiro\""));
        assert!(prompt.contains("10. \"segundo\""));
    }

    #[test]
    fn prompt_truncates_long_text() {
        let batch = vec![comment(&"a".repeat(300))];
        let prompt = build_batch_prompt(&batch, 1, 250);
        assert!(prompt.contains(&format!("1. \"{}\"", "a".repeat(250))));
        assert!(!prompt.contains(&"a".repeat(251)));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "ãçõ".repeat(100);
        let cut = truncate_chars(&text, 250);
        assert_eq!(cut.chars().count(), 250);
        // Short text passes through unchanged.
        assert_eq!(truncate_chars("curto", 250), "curto");
    }

    #[test]
    fn system_prompt_names_all_nine_categories() {
        use crate::pipeline::classification::types::Category;
        for cat in Category::ALL {
            assert!(
                SYSTEM_PROMPT.contains(cat.as_str()),
                "system prompt missing category {cat}"
            );
        }
    }

    #[test]
    fn system_prompt_pins_json_contract() {
        assert!(SYSTEM_PROMPT.contains("\"classificacoes\""));
        assert!(SYSTEM_PROMPT.contains("\"categoria\""));
    }
}
