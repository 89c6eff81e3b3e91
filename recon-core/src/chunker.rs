//! # Chunker de Nomes Próprios
//!
//! Junta tokens PROPN consecutivos em um único candidato ("New York",
//! "Jane Smith"). O chunk é emitido sempre que aparece um token que não
//! entra nele, e ao fim da sequência.
//!
//! ## Variantes
//!
//! | Variante                | Quem interrompe o chunk                             |
//! |-------------------------|-----------------------------------------------------|
//! | pessoa                  | PROPN com rótulo presente e diferente de PERSON     |
//! | lugar, `ExcludeDuring`  | PROPN com rótulo presente e fora de {GPE, LOC}      |
//! | lugar, `FilterAfter`    | ninguém; o chunk inteiro é descartado depois se for |
//! |                         | (em lowercase) o nome de uma pessoa conhecida       |
//!
//! As duas variantes de lugar **não** são equivalentes. Em `"Dr. Smith Boston"`
//! com "Smith" rotulado como PERSON, `ExcludeDuring` quebra o chunk em "Smith";
//! `FilterAfter` mantém `"Dr. Smith Boston"` inteiro e só o descarta se o texto
//! completo for uma pessoa conhecida.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::tagger::{AnnotatedToken, EntityLabel};

/// Momento em que candidatos a lugar que são pessoas são removidos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacePolicy {
    /// Tokens com rótulo que não é de lugar interrompem o chunk
    ExcludeDuring,
    /// Chunks inteiros iguais a pessoas conhecidas são descartados
    FilterAfter,
}

impl PlacePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            PlacePolicy::ExcludeDuring => "exclude_during",
            PlacePolicy::FilterAfter => "filter_after",
        }
    }
}

impl Default for PlacePolicy {
    fn default() -> Self {
        PlacePolicy::FilterAfter
    }
}

impl fmt::Display for PlacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PlacePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "exclude_during" => Ok(PlacePolicy::ExcludeDuring),
            "filter_after" => Ok(PlacePolicy::FilterAfter),
            _ => Err(Error::InvalidSetting {
                key: "place_policy".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Primitiva comum: agrupa PROPN consecutivos que não estão excluídos.
///
/// Um token excluído interrompe o chunk exatamente como um token que não é
/// nome próprio. Chunks vazios após `trim` não são emitidos.
pub fn chunk_proper_nouns<F>(tokens: &[AnnotatedToken], excluded: F) -> Vec<String>
where
    F: Fn(&AnnotatedToken) -> bool,
{
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in tokens {
        if token.is_proper_noun() && !excluded(token) {
            current.push(token.text());
        } else {
            flush(&mut current, &mut chunks);
        }
    }
    flush(&mut current, &mut chunks);

    chunks
}

fn flush(current: &mut Vec<&str>, chunks: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let text = current.join(" ");
    let text = text.trim();
    if !text.is_empty() {
        chunks.push(text.to_string());
    }
    current.clear();
}

/// Chunks candidatos a pessoa: rótulos que não são PERSON interrompem
pub fn person_chunks(tokens: &[AnnotatedToken]) -> Vec<String> {
    chunk_proper_nouns(tokens, |token| match token.entity_label {
        None | Some(EntityLabel::Person) => false,
        Some(EntityLabel::Gpe | EntityLabel::Loc | EntityLabel::Org | EntityLabel::Misc) => true,
    })
}

/// Chunks candidatos a lugar, excluindo durante o agrupamento
pub fn place_chunks_excluding(tokens: &[AnnotatedToken]) -> Vec<String> {
    chunk_proper_nouns(tokens, |token| match token.entity_label {
        None | Some(EntityLabel::Gpe | EntityLabel::Loc) => false,
        Some(EntityLabel::Person | EntityLabel::Org | EntityLabel::Misc) => true,
    })
}

/// Chunks candidatos a lugar, filtrados depois do agrupamento.
///
/// `known_persons` deve estar em lowercase; a comparação é com o chunk inteiro.
pub fn place_chunks_filtered(tokens: &[AnnotatedToken], known_persons: &HashSet<String>) -> Vec<String> {
    chunk_proper_nouns(tokens, |_| false)
        .into_iter()
        .filter(|chunk| !known_persons.contains(&chunk.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{Document, EntityLabel::*, PartOfSpeech::*};

    fn dr_smith_boston() -> Document {
        Document::annotate(
            "Dr. Smith Boston",
            &[(Propn, None), (Propn, Some(Person)), (Propn, Some(Gpe))],
        )
    }

    #[test]
    fn test_plain_chunking() {
        let doc = Document::annotate(
            "Jane Smith visited New York yesterday",
            &[(Propn, None), (Propn, None), (Verb, None), (Propn, None), (Propn, None), (Adv, None)],
        );
        assert_eq!(chunk_proper_nouns(&doc.tokens, |_| false), vec!["Jane Smith", "New York"]);
    }

    #[test]
    fn test_trailing_chunk_is_flushed() {
        let doc = Document::annotate("met Alice", &[(Verb, None), (Propn, None)]);
        assert_eq!(chunk_proper_nouns(&doc.tokens, |_| false), vec!["Alice"]);
    }

    #[test]
    fn test_person_chunks_split_on_place_label() {
        let doc = dr_smith_boston();
        assert_eq!(person_chunks(&doc.tokens), vec!["Dr. Smith"]);
    }

    #[test]
    fn test_place_chunks_excluding_split_on_person_label() {
        let doc = dr_smith_boston();
        assert_eq!(place_chunks_excluding(&doc.tokens), vec!["Dr.", "Boston"]);
    }

    #[test]
    fn test_place_chunks_filtered_keep_whole_chunk() {
        let doc = dr_smith_boston();
        let known: HashSet<String> = ["smith".to_string()].into_iter().collect();
        // Só o texto completo conta: "smith" não derruba "Dr. Smith Boston"
        assert_eq!(place_chunks_filtered(&doc.tokens, &known), vec!["Dr. Smith Boston"]);

        let known: HashSet<String> = ["dr. smith boston".to_string()].into_iter().collect();
        assert!(place_chunks_filtered(&doc.tokens, &known).is_empty());
    }

    #[test]
    fn test_place_chunks_filtered_case_insensitive() {
        let doc = Document::annotate("Jamal met Umar", &[(Propn, None), (Verb, None), (Propn, None)]);
        let known: HashSet<String> = ["jamal".to_string()].into_iter().collect();
        assert_eq!(place_chunks_filtered(&doc.tokens, &known), vec!["Umar"]);
    }

    #[test]
    fn test_repeated_chunks_are_kept_in_order() {
        let doc = Document::annotate("Paris and Paris", &[(Propn, None), (Cconj, None), (Propn, None)]);
        assert_eq!(chunk_proper_nouns(&doc.tokens, |_| false), vec!["Paris", "Paris"]);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("exclude-during".parse::<PlacePolicy>().unwrap(), PlacePolicy::ExcludeDuring);
        assert_eq!("filter_after".parse::<PlacePolicy>().unwrap(), PlacePolicy::FilterAfter);
        assert!("sometimes".parse::<PlacePolicy>().is_err());
        assert_eq!(PlacePolicy::default().to_string(), "filter_after");
    }
}
