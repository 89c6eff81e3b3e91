//! # Analisador Léxico — Serviço de NLP Embutido
//!
//! Implementação própria do contrato [`NlpService`] para quando nenhum tagger
//! estatístico está disponível. Combina três fontes de conhecimento:
//!
//! 1. **Classe gramatical**: palavras funcionais em listas fechadas; o resto é
//!    decidido por capitalização e sufixos ("-ly", "-ing", "-ed").
//! 2. **Léxicos**: nomes de pessoas, lugares e organizações (embutidos no tier
//!    `fast`; o tier `accurate` acrescenta um léxico externo em JSON).
//! 3. **Pistas de contexto**: tratamento antes do nome ("Dr. Smith" → PERSON) e
//!    preposição de lugar antes do nome ("in Springfield" → GPE).
//!
//! Entidades só são atribuídas a sequências de nomes próprios (PROPN).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::corpus;
use crate::error::{Error, Result};
use crate::nlp::{ModelTier, NlpService};
use crate::syntax::attach_dependencies;
use crate::tagger::{spans_from_labels, AnnotatedToken, Document, EntityLabel, PartOfSpeech};
use crate::tokenizer::{tokenize, Token};

/// Tratamentos que precedem nomes de pessoas (lowercase)
const HONORIFICS: &[&str] = &["mr.", "mrs.", "ms.", "miss", "dr.", "prof."];

/// Símbolos que não são pontuação
const SYMBOLS: &[char] = &['$', '%', '&', '@', '#', '+', '=', '<', '>', '€', '£', '§', '©'];

/// Léxico externo do tier `accurate`.
///
/// Formato do arquivo:
/// ```json
/// { "persons": ["Rahim"], "places": ["Springfield"], "organizations": ["Acme"] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconModel {
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub places: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
}

impl LexiconModel {
    /// Lê o léxico de um arquivo JSON
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::InvalidModel {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.persons.len() + self.places.len() + self.organizations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Analisador baseado em léxicos e heurísticas ortográficas
pub struct LexicalAnalyzer {
    tier: ModelTier,
    /// Nomes de pessoas (lowercase, uma palavra por entrada)
    person_names: HashSet<String>,
    /// Lugares (lowercase, pode ser múltiplas palavras)
    place_names: Vec<Vec<String>>,
    /// Organizações (lowercase, pode ser múltiplas palavras)
    org_names: Vec<Vec<String>>,
}

impl LexicalAnalyzer {
    /// Analisador do tier `fast`, só com os léxicos embutidos. Nunca falha.
    pub fn fast() -> Self {
        let mut analyzer = Self {
            tier: ModelTier::Fast,
            person_names: HashSet::new(),
            place_names: Vec::new(),
            org_names: Vec::new(),
        };
        for name in corpus::PERSON_NAMES {
            analyzer.add_person(name);
        }
        for name in corpus::PLACE_NAMES {
            analyzer.add_place(name);
        }
        for name in corpus::ORGANIZATION_NAMES {
            analyzer.add_org(name);
        }
        analyzer
    }

    /// Analisador do tier `accurate`: léxicos embutidos + léxico externo
    pub fn with_lexicon(model: &LexiconModel) -> Self {
        let mut analyzer = Self::fast();
        analyzer.tier = ModelTier::Accurate;
        for name in &model.persons {
            analyzer.add_person(name);
        }
        for name in &model.places {
            analyzer.add_place(name);
        }
        for name in &model.organizations {
            analyzer.add_org(name);
        }
        info!(entries = model.len(), "léxico externo carregado");
        analyzer
    }

    pub fn tier(&self) -> ModelTier {
        self.tier
    }

    /// Cada palavra do nome conta como nome de pessoa ("Jane Smith" → "jane", "smith")
    pub fn add_person(&mut self, name: &str) {
        for word in name.split_whitespace() {
            self.person_names.insert(word.to_lowercase());
        }
    }

    pub fn add_place(&mut self, name: &str) {
        let parts: Vec<String> = name.split_whitespace().map(|p| p.to_lowercase()).collect();
        if !parts.is_empty() {
            self.place_names.push(parts);
        }
    }

    pub fn add_org(&mut self, name: &str) {
        let parts: Vec<String> = name.split_whitespace().map(|p| p.to_lowercase()).collect();
        if !parts.is_empty() {
            self.org_names.push(parts);
        }
    }

    /// Atribui uma classe gramatical a cada token
    fn tag_pos(&self, tokens: &[Token], lowered: &[String]) -> Vec<PartOfSpeech> {
        tokens
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let text = token.text.as_str();
                let lower = lowered[i].as_str();

                if !text.chars().any(char::is_alphanumeric) {
                    return if text.chars().all(|c| SYMBOLS.contains(&c)) {
                        PartOfSpeech::Sym
                    } else {
                        PartOfSpeech::Punct
                    };
                }
                if text.chars().any(|c| c.is_ascii_digit())
                    && text.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ':'))
                {
                    return PartOfSpeech::Num;
                }
                if is_honorific(text, lower) {
                    return PartOfSpeech::Propn;
                }
                if let Some(pos) = closed_class(lower) {
                    return pos;
                }

                let capitalized = is_capitalized(text);
                // "miss Boston", "Tell Miss Jones": verbos comuns sem sufixo
                if corpus::VERBS.contains(&lower) && (!capitalized || is_sentence_start(tokens, i)) {
                    return PartOfSpeech::Verb;
                }
                let suffix_class = suffix_class(lower);
                if capitalized {
                    // No início da frase, "Visiting" ainda é verbo
                    if is_sentence_start(tokens, i) && suffix_class != PartOfSpeech::Noun {
                        return suffix_class;
                    }
                    return PartOfSpeech::Propn;
                }
                suffix_class
            })
            .collect()
    }

    /// Rotula sequências de nomes próprios (sem os tratamentos)
    fn label_entities(&self, tokens: &mut [AnnotatedToken], lowered: &[String]) {
        let n = tokens.len();
        let mut i = 0;

        while i < n {
            if !is_name_token(&tokens[i], &lowered[i]) {
                i += 1;
                continue;
            }
            let mut end = i + 1;
            while end < n && is_name_token(&tokens[end], &lowered[end]) {
                end += 1;
            }

            if let Some(label) = self.classify_run(tokens, lowered, i, end) {
                for token in &mut tokens[i..end] {
                    token.entity_label = Some(label);
                }
            }
            i = end;
        }
    }

    fn classify_run(
        &self,
        tokens: &[AnnotatedToken],
        lowered: &[String],
        start: usize,
        end: usize,
    ) -> Option<EntityLabel> {
        let previous = start.checked_sub(1).map(|p| lowered[p].as_str());

        // 1. Tratamento: "Dr. Smith"
        if let Some(p) = start.checked_sub(1) {
            if is_honorific(tokens[p].text(), &lowered[p]) {
                return Some(EntityLabel::Person);
            }
        }
        // 2. Léxico de pessoas (basta a primeira palavra: "Jane Doe")
        if self.person_names.contains(&lowered[start]) {
            return Some(EntityLabel::Person);
        }
        // 3. Léxicos de lugares e organizações (n-gramas a partir do início)
        if phrase_at(&self.place_names, &lowered[start..end]) {
            return Some(EntityLabel::Gpe);
        }
        if phrase_at(&self.org_names, &lowered[start..end]) {
            return Some(EntityLabel::Org);
        }
        // 4. Preposição de lugar: "in Springfield"
        if previous.map(|p| corpus::PLACE_PREPOSITIONS.contains(&p)).unwrap_or(false) {
            return Some(EntityLabel::Gpe);
        }
        None
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::fast()
    }
}

impl NlpService for LexicalAnalyzer {
    fn analyze(&self, text: &str) -> Document {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Document::empty(text);
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.text.to_lowercase()).collect();
        let pos = self.tag_pos(&tokens, &lowered);

        let mut annotated: Vec<AnnotatedToken> = tokens
            .into_iter()
            .zip(pos)
            .map(|(token, pos)| AnnotatedToken {
                token,
                pos,
                entity_label: None,
                dependency: None,
            })
            .collect();
        self.label_entities(&mut annotated, &lowered);
        attach_dependencies(&mut annotated);

        let entities = spans_from_labels(text, &annotated);
        Document {
            text: text.to_string(),
            tokens: annotated,
            entities,
        }
    }

    fn name(&self) -> &str {
        match self.tier {
            ModelTier::Accurate => "lexical-accurate",
            ModelTier::Fast => "lexical-fast",
        }
    }
}

fn closed_class(lower: &str) -> Option<PartOfSpeech> {
    let tables: [(&[&str], PartOfSpeech); 8] = [
        (corpus::DETERMINERS, PartOfSpeech::Det),
        (corpus::PRONOUNS, PartOfSpeech::Pron),
        (corpus::ADPOSITIONS, PartOfSpeech::Adp),
        (corpus::AUXILIARIES, PartOfSpeech::Aux),
        (corpus::COORDINATORS, PartOfSpeech::Cconj),
        (corpus::SUBORDINATORS, PartOfSpeech::Sconj),
        (corpus::PARTICLES, PartOfSpeech::Part),
        (corpus::ADVERBS, PartOfSpeech::Adv),
    ];
    tables
        .iter()
        .find(|(words, _)| words.contains(&lower))
        .map(|(_, pos)| *pos)
}

fn suffix_class(lower: &str) -> PartOfSpeech {
    if lower.len() > 4 && lower.ends_with("ly") {
        PartOfSpeech::Adv
    } else if lower.len() > 4 && (lower.ends_with("ing") || lower.ends_with("ed")) {
        PartOfSpeech::Verb
    } else {
        PartOfSpeech::Noun
    }
}

fn is_sentence_start(tokens: &[Token], i: usize) -> bool {
    i == 0 || matches!(tokens[i - 1].text.as_str(), "." | "!" | "?")
}

fn is_name_token(token: &AnnotatedToken, lower: &str) -> bool {
    token.is_proper_noun() && !is_honorific(token.text(), lower)
}

fn is_capitalized(text: &str) -> bool {
    text.chars().next().map(char::is_uppercase).unwrap_or(false)
}

/// "Miss" e "dr." são tratamentos; "miss" (o verbo) não
fn is_honorific(text: &str, lower: &str) -> bool {
    HONORIFICS.contains(&lower) && (text.ends_with('.') || is_capitalized(text))
}

/// Algum n-grama do léxico casa com o início da sequência?
fn phrase_at(phrases: &[Vec<String>], run: &[String]) -> bool {
    phrases
        .iter()
        .any(|parts| parts.len() <= run.len() && parts.iter().zip(run).all(|(a, b)| a == b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(doc: &Document) -> Vec<(&str, EntityLabel)> {
        doc.entities.iter().map(|e| (e.text.as_str(), e.label)).collect()
    }

    #[test]
    fn test_known_first_names() {
        let doc = LexicalAnalyzer::fast().analyze("Jamal met Umar at the park yesterday.");
        assert_eq!(
            labels(&doc),
            vec![("Jamal", EntityLabel::Person), ("Umar", EntityLabel::Person)]
        );
        // "park" é minúsculo: não é nome próprio
        assert_eq!(doc.tokens[5].pos, PartOfSpeech::Noun);
        assert_eq!(doc.tokens[4].pos, PartOfSpeech::Det);
    }

    #[test]
    fn test_honorific_marks_person() {
        let doc = LexicalAnalyzer::fast().analyze("Dr. Okafor arrived.");
        assert_eq!(doc.tokens[0].text(), "Dr.");
        assert_eq!(doc.tokens[0].pos, PartOfSpeech::Propn);
        assert_eq!(doc.tokens[0].entity_label, None);
        assert_eq!(labels(&doc), vec![("Okafor", EntityLabel::Person)]);
    }

    #[test]
    fn test_places_from_lexicon_and_preposition() {
        let doc = LexicalAnalyzer::fast().analyze("She flew from New York to Springfield.");
        assert_eq!(
            labels(&doc),
            vec![("New York", EntityLabel::Gpe), ("Springfield", EntityLabel::Gpe)]
        );
    }

    #[test]
    fn test_sentence_start_function_word() {
        let doc = LexicalAnalyzer::fast().analyze("The Nile is long.");
        assert_eq!(doc.tokens[0].pos, PartOfSpeech::Det);
        assert_eq!(doc.tokens[1].pos, PartOfSpeech::Propn);
        assert!(doc.entities.is_empty());
    }

    #[test]
    fn test_lexicon_model_extends_fast_tier() {
        let model = LexiconModel {
            persons: vec!["Rahim".to_string()],
            places: vec!["Sylhet".to_string()],
            organizations: vec![],
        };
        let analyzer = LexicalAnalyzer::with_lexicon(&model);
        assert_eq!(analyzer.tier(), ModelTier::Accurate);

        let doc = analyzer.analyze("Rahim visited Sylhet");
        assert_eq!(
            labels(&doc),
            vec![("Rahim", EntityLabel::Person), ("Sylhet", EntityLabel::Gpe)]
        );
    }

    #[test]
    fn test_lexicon_model_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.json");
        std::fs::write(&path, r#"{"persons": ["Rahim"]}"#).unwrap();

        let model = LexiconModel::load(&path).unwrap();
        assert_eq!(model.persons, vec!["Rahim".to_string()]);
        assert!(model.places.is_empty());

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(LexiconModel::load(&path), Err(Error::InvalidModel { .. })));
    }

    #[test]
    fn test_lowercase_miss_is_a_verb() {
        let doc = LexicalAnalyzer::fast().analyze("I miss Boston.");
        assert_eq!(doc.tokens[1].pos, PartOfSpeech::Verb);
        assert_eq!(labels(&doc), vec![("Boston", EntityLabel::Gpe)]);
    }

    #[test]
    fn test_sentence_initial_verb_is_not_a_name() {
        let doc = LexicalAnalyzer::fast().analyze("Tell Miss Jones about it.");
        assert_eq!(doc.tokens[0].pos, PartOfSpeech::Verb);
        assert_eq!(doc.tokens[1].pos, PartOfSpeech::Propn);
        assert_eq!(doc.tokens[1].entity_label, None);
        assert_eq!(labels(&doc), vec![("Jones", EntityLabel::Person)]);
    }

    #[test]
    fn test_every_token_gets_a_dependency() {
        let analyzer = LexicalAnalyzer::fast();
        for (_, text) in corpus::demo_texts() {
            let doc = analyzer.analyze(text);
            assert!(!doc.tokens.is_empty());
            for token in &doc.tokens {
                let dep = token.dependency.as_ref().expect("dependência ausente");
                assert!(dep.head < doc.tokens.len());
            }
            assert!(doc.tokens.iter().any(|t| t.dependency.as_ref().unwrap().relation == "ROOT"));
        }

        let doc = analyzer.analyze("Dr. Smith met Alice.");
        let smith = doc.tokens[1].dependency.as_ref().unwrap();
        assert_eq!(smith.relation, "nsubj");
        assert_eq!(doc.tokens[smith.head].text(), "met");
    }

    #[test]
    fn test_empty_text() {
        let doc = LexicalAnalyzer::fast().analyze("  ");
        assert!(doc.tokens.is_empty());
        assert!(doc.entities.is_empty());
    }
}
