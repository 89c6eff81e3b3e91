//! # Regra de Tratamento — "Mr. Smith"
//!
//! Regra puramente léxica/sintática (não depende dos rótulos do tagger):
//!
//! - **Tratamento + nome próprio**: `"Dr."` seguido de um token PROPN gera
//!   `"Dr. Smith"`. A palavra `"called"` conta como tratamento (`"called Rahim"`).
//! - **Tratamento colado**: um token como `"mr.smith"` é quebrado no ponto e
//!   normalizado para `"Mr. Smith"`.
//!
//! A mesma lista de tratamentos filtra depois os candidatos a lugar: nada que
//! comece com um tratamento pode sair como lugar.

use std::collections::BTreeSet;

use regex::Regex;

use crate::tagger::{AnnotatedToken, PartOfSpeech};

/// Marcadores de tratamento, na forma canônica
pub const TITLE_MARKERS: [&str; 7] = ["Mr.", "Mrs.", "Ms.", "Miss", "Dr.", "Prof.", "called"];

/// Verifica se o candidato começa com algum marcador (comparação exata, com caixa)
pub fn starts_with_title(candidate: &str) -> bool {
    TITLE_MARKERS.iter().any(|title| candidate.starts_with(title))
}

/// Extrator de nomes precedidos por tratamento
#[derive(Debug, Clone)]
pub struct TitleRule {
    /// Casa um token inteiro com algum marcador, ignorando caixa
    pattern: Regex,
}

impl TitleRule {
    pub fn new() -> Self {
        let alternatives: Vec<String> = TITLE_MARKERS.iter().map(|t| regex::escape(t)).collect();
        let pattern = Regex::new(&format!("(?i)^(?:{})$", alternatives.join("|")))
            .expect("marcadores de tratamento formam um regex válido");
        Self { pattern }
    }

    pub fn is_title(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Aplica os dois padrões a cada token; resultados repetidos colapsam.
    pub fn extract(&self, tokens: &[AnnotatedToken]) -> BTreeSet<String> {
        let mut names = BTreeSet::new();

        for (i, token) in tokens.iter().enumerate() {
            // 1. "Mr." + PROPN
            if self.is_title(token.text()) {
                if let Some(next) = tokens.get(i + 1) {
                    if next.pos == PartOfSpeech::Propn {
                        names.insert(format!("{} {}", token.text(), next.text()));
                    }
                }
            }

            // 2. "mr.smith" (exatamente um ponto, duas partes não vazias)
            let parts: Vec<&str> = token.text().split('.').collect();
            if let [title, name] = parts[..] {
                if title.is_empty() || name.is_empty() {
                    continue;
                }
                let title = capitalize(title);
                if self.is_title(&format!("{}.", title)) {
                    names.insert(format!("{}. {}", title, capitalize(name)));
                }
            }
        }

        names
    }
}

impl Default for TitleRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Primeira letra maiúscula, demais minúsculas ("sMITH" → "Smith")
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{Document, PartOfSpeech::*};

    #[test]
    fn test_title_followed_by_proper_noun() {
        let doc = Document::annotate("Dr. Smith met Alice", &[(Propn, None), (Propn, None), (Verb, None), (Propn, None)]);
        let names = TitleRule::new().extract(&doc.tokens);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Dr. Smith"]);
    }

    #[test]
    fn test_title_keeps_written_case() {
        let doc = Document::annotate("ask dr. Okafor", &[(Verb, None), (Propn, None), (Propn, None)]);
        let names = TitleRule::new().extract(&doc.tokens);
        assert!(names.contains("dr. Okafor"));
    }

    #[test]
    fn test_title_needs_proper_noun() {
        let doc = Document::annotate("Mr. nobody", &[(Propn, None), (Noun, None)]);
        assert!(TitleRule::new().extract(&doc.tokens).is_empty());

        // Tratamento no fim do texto
        let doc = Document::annotate("thanks Dr.", &[(Noun, None), (Propn, None)]);
        assert!(TitleRule::new().extract(&doc.tokens).is_empty());
    }

    #[test]
    fn test_called_counts_as_title() {
        let doc = Document::annotate("a man called Rahim", &[(Det, None), (Noun, None), (Verb, None), (Propn, None)]);
        let names = TitleRule::new().extract(&doc.tokens);
        assert!(names.contains("called Rahim"));
    }

    #[test]
    fn test_glued_title() {
        let doc = Document::annotate("mr.smith called them", &[(Noun, None), (Verb, None), (Pron, None)]);
        let names = TitleRule::new().extract(&doc.tokens);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["Mr. Smith"]);
    }

    #[test]
    fn test_glued_title_rejects_other_shapes() {
        let rule = TitleRule::new();
        for text in ["mr.", "foo.bar", "dr.a.b", "miss.jones"] {
            let doc = Document::annotate(text, &[(Noun, None)]);
            assert!(rule.extract(&doc.tokens).is_empty(), "{text}");
        }
    }

    #[test]
    fn test_starts_with_title() {
        assert!(starts_with_title("Dr. Smith"));
        assert!(starts_with_title("called Rahim"));
        assert!(!starts_with_title("Boston"));
        assert!(!starts_with_title("dr. Smith"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("sMITH"), "Smith");
        assert_eq!(capitalize("é"), "É");
        assert_eq!(capitalize(""), "");
    }
}
