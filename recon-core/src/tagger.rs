//! # Anotação de Tokens: Classe Gramatical e Rótulos de Entidade
//!
//! Define o que o serviço de NLP devolve para um texto: tokens com classe
//! gramatical (POS), rótulo de entidade opcional e dependência sintática
//! opcional, além dos spans de entidade já identificados.
//!
//! ## Rótulos de Entidade
//!
//! | Rótulo  | Significado                  | Exemplos                 |
//! |---------|------------------------------|--------------------------|
//! | PERSON  | Pessoa                       | Jamal, Jane Smith        |
//! | GPE     | Entidade geopolítica         | Boston, France           |
//! | LOC     | Local não-político           | Everest, the Nile        |
//! | ORG     | Organização                  | Google, NASA             |
//! | MISC    | Qualquer outro tipo          | Olympics, COVID-19       |
//!
//! A ausência de rótulo é `None` no token, e não uma variante do enum: assim
//! as regras de exclusão do chunker ficam exaustivas no `match`.

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Classes gramaticais universais (Universal Dependencies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    /// Nome próprio. É a única classe que o chunker agrupa.
    Propn,
    Noun,
    Verb,
    Adj,
    Adv,
    Pron,
    Det,
    Adp,
    Aux,
    Cconj,
    Sconj,
    Part,
    Num,
    Punct,
    Sym,
    X,
}

impl PartOfSpeech {
    /// Nome da classe como string (para exibição)
    pub fn name(&self) -> &'static str {
        match self {
            PartOfSpeech::Propn => "PROPN",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::Adj => "ADJ",
            PartOfSpeech::Adv => "ADV",
            PartOfSpeech::Pron => "PRON",
            PartOfSpeech::Det => "DET",
            PartOfSpeech::Adp => "ADP",
            PartOfSpeech::Aux => "AUX",
            PartOfSpeech::Cconj => "CCONJ",
            PartOfSpeech::Sconj => "SCONJ",
            PartOfSpeech::Part => "PART",
            PartOfSpeech::Num => "NUM",
            PartOfSpeech::Punct => "PUNCT",
            PartOfSpeech::Sym => "SYM",
            PartOfSpeech::X => "X",
        }
    }
}

/// Rótulos de entidade produzidos pelo tagger estatístico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// **Pessoa**: nomes de pessoas reais ou fictícias.
    Person,
    /// **Entidade geopolítica**: países, cidades, estados.
    Gpe,
    /// **Local**: montanhas, rios, regiões sem status político.
    Loc,
    /// **Organização**: empresas, agências, instituições.
    Org,
    /// **Miscelânea**: eventos, produtos, obras.
    Misc,
}

impl EntityLabel {
    /// Nome do rótulo como string (para serialização e UI)
    pub fn name(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Org => "ORG",
            EntityLabel::Misc => "MISC",
        }
    }

    /// Tenta parsear a partir de string (ex: "GPE" → Some(Gpe))
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "PERSON" => Some(EntityLabel::Person),
            "GPE" => Some(EntityLabel::Gpe),
            "LOC" => Some(EntityLabel::Loc),
            "ORG" => Some(EntityLabel::Org),
            "MISC" => Some(EntityLabel::Misc),
            _ => None,
        }
    }

    /// GPE e LOC contam como lugar
    pub fn is_place(&self) -> bool {
        matches!(self, EntityLabel::Gpe | EntityLabel::Loc)
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Relação de dependência sintática de um token com seu núcleo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Nome da relação (ex: "nsubj", "compound", "ROOT")
    pub relation: String,
    /// Índice do token núcleo
    pub head: usize,
}

/// Um token com as anotações do serviço de NLP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub token: Token,
    pub pos: PartOfSpeech,
    /// Rótulo da entidade à qual o token pertence, se houver
    pub entity_label: Option<EntityLabel>,
    /// Nem todo serviço faz análise de dependências
    pub dependency: Option<Dependency>,
}

impl AnnotatedToken {
    pub fn text(&self) -> &str {
        &self.token.text
    }

    pub fn is_proper_noun(&self) -> bool {
        self.pos == PartOfSpeech::Propn
    }
}

/// Uma entidade identificada no texto (span de múltiplos tokens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Texto da entidade, recortado do texto original (ex: "New York")
    pub text: String,
    pub label: EntityLabel,
    /// Índice do primeiro token
    pub start_token: usize,
    /// Índice do token seguinte ao último (exclusivo)
    pub end_token: usize,
}

/// Resultado de uma análise: o texto, seus tokens anotados e as entidades.
///
/// É calculado do zero a cada chamada e não é alterado depois.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub tokens: Vec<AnnotatedToken>,
    pub entities: Vec<EntitySpan>,
}

impl Document {
    /// Documento sem tokens (texto vazio ou só espaços)
    pub fn empty(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: Vec::new(),
            entities: Vec::new(),
        }
    }

    /// Monta um documento a partir de anotações já conhecidas, uma por token.
    ///
    /// Útil quando o texto foi anotado fora do processo (ou em testes).
    /// Tokens sem anotação correspondente recebem `X` e nenhum rótulo.
    pub fn annotate(text: &str, annotations: &[(PartOfSpeech, Option<EntityLabel>)]) -> Self {
        let tokens: Vec<AnnotatedToken> = crate::tokenizer::tokenize(text)
            .into_iter()
            .enumerate()
            .map(|(i, token)| {
                let (pos, entity_label) = annotations
                    .get(i)
                    .copied()
                    .unwrap_or((PartOfSpeech::X, None));
                AnnotatedToken {
                    token,
                    pos,
                    entity_label,
                    dependency: None,
                }
            })
            .collect();
        let entities = spans_from_labels(text, &tokens);
        Self {
            text: text.to_string(),
            tokens,
            entities,
        }
    }

    /// Texto original coberto pelos tokens `start..end`
    pub fn span_text(&self, start: usize, end: usize) -> &str {
        if start >= end || end > self.tokens.len() {
            return "";
        }
        let from = self.tokens[start].token.start;
        let to = self.tokens[end - 1].token.end;
        &self.text[from..to]
    }

    /// Textos das entidades cujo rótulo satisfaz o predicado
    pub fn entity_texts<F>(&self, accept: F) -> impl Iterator<Item = &str>
    where
        F: Fn(EntityLabel) -> bool,
    {
        self.entities
            .iter()
            .filter(move |e| accept(e.label))
            .map(|e| e.text.as_str())
    }
}

/// Agrupa tokens consecutivos com o mesmo rótulo em spans de entidade.
///
/// # Exemplo
/// `[PERSON, PERSON, None, GPE]` -> `[EntitySpan(PERSON, 0..2), EntitySpan(GPE, 3..4)]`
pub fn spans_from_labels(text: &str, tokens: &[AnnotatedToken]) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Some(label) = tokens[i].entity_label else {
            i += 1;
            continue;
        };

        let mut j = i + 1;
        while j < tokens.len() && tokens[j].entity_label == Some(label) {
            j += 1;
        }

        let from = tokens[i].token.start;
        let to = tokens[j - 1].token.end;
        spans.push(EntitySpan {
            text: text[from..to].trim().to_string(),
            label,
            start_token: i,
            end_token: j,
        });
        i = j;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn annotate(text: &str, labels: &[Option<EntityLabel>]) -> Vec<AnnotatedToken> {
        tokenize(text)
            .into_iter()
            .zip(labels)
            .map(|(token, label)| AnnotatedToken {
                token,
                pos: PartOfSpeech::Propn,
                entity_label: *label,
                dependency: None,
            })
            .collect()
    }

    #[test]
    fn test_label_names() {
        assert_eq!(EntityLabel::Person.name(), "PERSON");
        assert_eq!(EntityLabel::from_name("GPE"), Some(EntityLabel::Gpe));
        assert_eq!(EntityLabel::from_name("DATE"), None);
        assert!(EntityLabel::Loc.is_place());
        assert!(!EntityLabel::Person.is_place());
    }

    #[test]
    fn test_label_serialization() {
        let json = serde_json::to_string(&EntityLabel::Gpe).unwrap();
        assert_eq!(json, "\"GPE\"");
        let pos: PartOfSpeech = serde_json::from_str("\"PROPN\"").unwrap();
        assert_eq!(pos, PartOfSpeech::Propn);
    }

    #[test]
    fn test_spans_from_labels() {
        let text = "Jane Smith visited New York";
        let tokens = annotate(
            text,
            &[
                Some(EntityLabel::Person),
                Some(EntityLabel::Person),
                None,
                Some(EntityLabel::Gpe),
                Some(EntityLabel::Gpe),
            ],
        );
        let spans = spans_from_labels(text, &tokens);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Jane Smith");
        assert_eq!((spans[0].start_token, spans[0].end_token), (0, 2));
        assert_eq!(spans[1].text, "New York");
        assert_eq!(spans[1].label, EntityLabel::Gpe);
    }

    #[test]
    fn test_span_text_uses_original_spacing() {
        let text = "Visit  New   York";
        let tokens = annotate(text, &[None, None, None]);
        let doc = Document {
            text: text.to_string(),
            tokens,
            entities: vec![],
        };
        assert_eq!(doc.span_text(1, 3), "New   York");
        assert_eq!(doc.span_text(2, 2), "");
        assert_eq!(doc.span_text(0, 9), "");
    }
}
