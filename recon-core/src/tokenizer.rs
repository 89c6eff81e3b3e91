//! # Tokenizador para textos em inglês
//!
//! Divide o texto bruto em tokens (palavras e pontuações) preservando a posição
//! original de cada um, para que spans de gazetteer possam devolver o texto
//! exatamente como foi escrito.
//!
//! ## Esquema de Tokenização
//!
//! - Fronteiras de palavra do Unicode (UAX #29), via `unicode-segmentation`.
//! - Espaços são descartados.
//! - Abreviações de tratamento recuperam o ponto: `"Dr. Smith"` vira `"Dr."`, `"Smith"`.
//! - Palavras coladas por ponto continuam juntas: `"mr.smith"` é um único token.
//! - O possessivo é separado: `"Alice's"` vira `"Alice"`, `"'s"`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use recon_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Dr. Smith met Alice.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, vec!["Dr.", "Smith", "met", "Alice", "."]);
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
///
/// Mantém a referência exata de sua posição (`start`, `end`) para permitir
/// reconstruir o texto de um span sem alterar a formatação original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Smith", ",", "Dr.").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Abreviações que não devem ter o ponto tratado como fim de sentença
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "mt", "gen", "col",
    "capt", "sgt", "lt", "rev", "hon", "gov", "sen", "rep", "pres", "vs",
    "etc", "inc", "ltd", "co", "corp", "ave", "blvd",
];

/// Sufixos possessivos separados da palavra (como faz a maioria dos tokenizadores de inglês)
const POSSESSIVES: &[&str] = &["'s", "\u{2019}s"];

/// Tokeniza um texto.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (start, word) in text.split_word_bound_indices() {
        if word.chars().all(char::is_whitespace) {
            continue;
        }
        let end = start + word.len();

        // Reata o ponto a uma abreviação imediatamente anterior ("Dr" + "." -> "Dr.")
        if word == "." {
            if let Some(prev) = tokens.last_mut() {
                if prev.end == start && is_abbreviation(&prev.text) {
                    prev.text.push('.');
                    prev.end = end;
                    continue;
                }
            }
        }

        match split_possessive(word) {
            Some(base_len) => {
                push_token(&mut tokens, &word[..base_len], start, start + base_len);
                push_token(&mut tokens, &word[base_len..], start + base_len, end);
            }
            None => push_token(&mut tokens, word, start, end),
        }
    }

    tokens
}

fn is_abbreviation(word: &str) -> bool {
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Retorna o tamanho (em bytes) da base quando a palavra termina em possessivo
fn split_possessive(word: &str) -> Option<usize> {
    let lower = word.to_lowercase();
    POSSESSIVES.iter().find_map(|suffix| {
        if lower.ends_with(suffix) && word.len() > suffix.len() {
            Some(word.len() - suffix.len())
        } else {
            None
        }
    })
}

fn push_token(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    let index = tokens.len();
    tokens.push(Token {
        text: text.to_string(),
        start,
        end,
        index,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(
            texts("Jamal met Umar at the park yesterday."),
            vec!["Jamal", "met", "Umar", "at", "the", "park", "yesterday", "."]
        );
    }

    #[test]
    fn test_tokenize_keeps_title_period() {
        assert_eq!(texts("Dr. Smith and mrs. Jones"), vec!["Dr.", "Smith", "and", "mrs.", "Jones"]);
    }

    #[test]
    fn test_tokenize_glued_title() {
        // O ponto entre letras não quebra a palavra
        assert_eq!(texts("mr.smith called them"), vec!["mr.smith", "called", "them"]);
    }

    #[test]
    fn test_tokenize_possessive() {
        assert_eq!(texts("Alice's book"), vec!["Alice", "'s", "book"]);
    }

    #[test]
    fn test_offsets_and_indices() {
        let text = "Visit  New York.";
        let tokens = tokenize(text);
        assert_eq!(tokens.len(), 4);
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.index, i);
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }
}
