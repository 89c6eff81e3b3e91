//! # Gazetteers e Casamento de Frases
//!
//! Um gazetteer é uma lista fixa de nomes conhecidos (um por linha, em
//! arquivo texto UTF-8). O [`PhraseMatcher`] procura esses nomes no documento
//! comparando tokens em lowercase: um nome de N palavras precisa casar com N
//! tokens consecutivos.
//!
//! ## Ciclo de vida
//!
//! Os gazetteers são lidos uma única vez na inicialização e nunca mais mudam.
//! Arquivo ausente não é erro fatal: o gazetteer fica vazio e a extração
//! segue em modo degradado.

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::tagger::Document;
use crate::tokenizer::tokenize;

/// Lista de nomes conhecidos, na forma em que foram escritos no arquivo
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gazetteer {
    names: Vec<String>,
}

impl Gazetteer {
    /// Cria um gazetteer a partir de nomes em memória (linhas em branco são ignoradas)
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    /// Lê um gazetteer de arquivo: um nome por linha.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_names(raw.lines()))
    }

    /// Como [`Gazetteer::load`], mas devolve um gazetteer vazio se o arquivo não puder ser lido.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(gazetteer) => {
                info!(path = %path.display(), names = gazetteer.len(), "gazetteer carregado");
                gazetteer
            }
            Err(err) => {
                warn!(%err, "gazetteer indisponível, seguindo sem ele");
                Self::default()
            }
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Casador de frases compilado a partir de um gazetteer.
///
/// Cada nome é tokenizado uma única vez com o mesmo tokenizador do
/// documento e guardado em lowercase.
#[derive(Debug, Clone, Default)]
pub struct PhraseMatcher {
    patterns: Vec<Vec<String>>,
}

impl PhraseMatcher {
    pub fn compile(gazetteer: &Gazetteer) -> Self {
        let patterns = gazetteer
            .names()
            .iter()
            .map(|name| {
                tokenize(name)
                    .into_iter()
                    .map(|t| t.text.to_lowercase())
                    .collect::<Vec<_>>()
            })
            .filter(|parts| !parts.is_empty())
            .collect();
        Self { patterns }
    }

    /// Procura todas as ocorrências de todos os padrões.
    ///
    /// Devolve o texto original de cada ocorrência (com a caixa do documento).
    /// Um padrão não sobrepõe a si mesmo, mas ocorrências de padrões
    /// diferentes podem se sobrepor ("Jamal" e "Jamal Khan" saem ambos).
    pub fn find(&self, document: &Document) -> Vec<String> {
        let lowered: Vec<String> = document
            .tokens
            .iter()
            .map(|t| t.text().to_lowercase())
            .collect();

        let mut matches = Vec::new();
        for pattern in &self.patterns {
            let mut i = 0;
            while i + pattern.len() <= lowered.len() {
                if lowered[i..i + pattern.len()] == pattern[..] {
                    matches.push(document.span_text(i, i + pattern.len()).to_string());
                    i += pattern.len();
                } else {
                    i += 1;
                }
            }
        }
        matches
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Os dois gazetteers do sistema (pessoas e lugares) e seus casadores.
///
/// Construído uma vez e passado por referência ao motor de reconciliação.
#[derive(Debug, Clone, Default)]
pub struct Gazetteers {
    pub persons: Gazetteer,
    pub places: Gazetteer,
    pub person_matcher: PhraseMatcher,
    pub place_matcher: PhraseMatcher,
}

impl Gazetteers {
    pub fn new(persons: Gazetteer, places: Gazetteer) -> Self {
        let person_matcher = PhraseMatcher::compile(&persons);
        let place_matcher = PhraseMatcher::compile(&places);
        Self {
            persons,
            places,
            person_matcher,
            place_matcher,
        }
    }

    /// Lê os dois arquivos; qualquer um deles pode faltar.
    pub fn load(person_path: &Path, place_path: &Path) -> Self {
        Self::new(
            Gazetteer::load_or_empty(person_path),
            Gazetteer::load_or_empty(place_path),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{Document, PartOfSpeech};

    fn doc(text: &str) -> Document {
        Document::annotate(text, &[])
    }

    #[test]
    fn test_from_names_skips_blank_lines() {
        let gaz = Gazetteer::from_names(["Alice", "  ", "", " Jane Smith "]);
        assert_eq!(gaz.names(), &["Alice".to_string(), "Jane Smith".to_string()]);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("names.txt");
        std::fs::write(&path, "Alice\n\nJane Smith\r\n").unwrap();

        let gaz = Gazetteer::load(&path).unwrap();
        assert_eq!(gaz.len(), 2);
        assert_eq!(gaz.names()[1], "Jane Smith");
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("places.txt");

        assert!(matches!(Gazetteer::load(&path), Err(Error::Io { .. })));
        assert!(Gazetteer::load_or_empty(&path).is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive_and_keeps_original_case() {
        let matcher = PhraseMatcher::compile(&Gazetteer::from_names(["alice", "new york"]));
        let found = matcher.find(&doc("ALICE flew to New York."));
        assert_eq!(found, vec!["ALICE".to_string(), "New York".to_string()]);
    }

    #[test]
    fn test_multiword_requires_consecutive_tokens() {
        let matcher = PhraseMatcher::compile(&Gazetteer::from_names(["Jane Smith"]));
        assert!(matcher.find(&doc("Jane met Smith")).is_empty());
        assert_eq!(matcher.find(&doc("jane smith")), vec!["jane smith".to_string()]);
    }

    #[test]
    fn test_overlapping_patterns_all_reported() {
        let matcher = PhraseMatcher::compile(&Gazetteer::from_names(["Jamal", "Jamal Khan"]));
        let found = matcher.find(&doc("Jamal Khan and Jamal"));
        assert_eq!(
            found,
            vec!["Jamal".to_string(), "Jamal".to_string(), "Jamal Khan".to_string()]
        );
    }

    #[test]
    fn test_empty_document_has_no_matches() {
        let gazetteers = Gazetteers::new(Gazetteer::from_names(["Alice"]), Gazetteer::default());
        assert_eq!(gazetteers.person_matcher.len(), 1);
        assert!(gazetteers.place_matcher.is_empty());
        assert!(gazetteers.person_matcher.find(&Document::empty("")).is_empty());

        let annotated = Document::annotate("Alice", &[(PartOfSpeech::Propn, None)]);
        assert_eq!(gazetteers.person_matcher.find(&annotated), vec!["Alice".to_string()]);
    }
}
