//! # Dependências Sintáticas por Regras
//!
//! Análise rasa, frase a frase, usada pelo analisador léxico para preencher
//! `Dependency` (relação + índice do núcleo) de cada token:
//!
//! | Token                               | Relação    | Núcleo                    |
//! |-------------------------------------|------------|---------------------------|
//! | 1º verbo (ou aux, ou nome)          | `ROOT`     | ele mesmo                 |
//! | nome seguido de outro nome          | `compound` | último nome da sequência  |
//! | núcleo nominal após preposição      | `pobj`     | a preposição              |
//! | núcleo nominal antes/depois da raiz | `nsubj` / `dobj` | raiz                |
//! | DET / ADJ / NUM antes de um nome    | `det` / `amod` / `nummod` | núcleo nominal |
//! | demais classes                      | `prep`, `aux`, `advmod`, `cc`, ... | raiz |
//!
//! Os índices de núcleo são relativos ao documento inteiro.

use crate::tagger::{AnnotatedToken, Dependency, PartOfSpeech};

/// Preenche `dependency` de todos os tokens
pub fn attach_dependencies(tokens: &mut [AnnotatedToken]) {
    let mut start = 0;
    while start < tokens.len() {
        let end = tokens[start..]
            .iter()
            .position(|t| matches!(t.text(), "." | "!" | "?"))
            .map(|p| start + p + 1)
            .unwrap_or(tokens.len());
        parse_sentence(&mut tokens[start..end], start);
        start = end;
    }
}

fn parse_sentence(sentence: &mut [AnnotatedToken], offset: usize) {
    let pos: Vec<PartOfSpeech> = sentence.iter().map(|t| t.pos).collect();
    let root = pos
        .iter()
        .position(|p| *p == PartOfSpeech::Verb)
        .or_else(|| pos.iter().position(|p| *p == PartOfSpeech::Aux))
        .or_else(|| pos.iter().position(|p| is_nominal(*p)))
        .unwrap_or(0);

    for (i, token) in sentence.iter_mut().enumerate() {
        let (relation, head) = relation_of(&pos, i, root);
        token.dependency = Some(Dependency {
            relation: relation.to_string(),
            head: offset + head,
        });
    }
}

fn is_nominal(pos: PartOfSpeech) -> bool {
    matches!(pos, PartOfSpeech::Noun | PartOfSpeech::Propn)
}

fn is_modifier(pos: PartOfSpeech) -> bool {
    matches!(pos, PartOfSpeech::Det | PartOfSpeech::Adj | PartOfSpeech::Num)
}

fn relation_of(pos: &[PartOfSpeech], i: usize, root: usize) -> (&'static str, usize) {
    use PartOfSpeech::*;

    if i == root {
        return ("ROOT", i);
    }
    match pos[i] {
        Noun | Propn => {
            let end = phrase_end(pos, i);
            if end != i {
                ("compound", end)
            } else {
                nominal_attachment(pos, i, root)
            }
        }
        Pron => nominal_attachment(pos, i, root),
        Det | Adj | Num => match next_nominal(pos, i) {
            Some(head) => {
                let relation = match pos[i] {
                    Det => "det",
                    Adj => "amod",
                    _ => "nummod",
                };
                (relation, head)
            }
            None => ("dep", root),
        },
        Adp => ("prep", root),
        Aux => ("aux", root),
        Adv => ("advmod", root),
        Cconj => ("cc", root),
        Sconj => ("mark", root),
        Part => ("part", root),
        Verb => ("conj", root),
        Punct | Sym => ("punct", root),
        X => ("dep", root),
    }
}

/// Último índice da sequência nominal que começa em `i`
fn phrase_end(pos: &[PartOfSpeech], mut i: usize) -> usize {
    while i + 1 < pos.len() && is_nominal(pos[i + 1]) {
        i += 1;
    }
    i
}

/// Núcleo nominal que um modificador em `i` acompanha
fn next_nominal(pos: &[PartOfSpeech], i: usize) -> Option<usize> {
    let mut j = i + 1;
    while j < pos.len() && is_modifier(pos[j]) {
        j += 1;
    }
    (j < pos.len() && is_nominal(pos[j])).then(|| phrase_end(pos, j))
}

fn nominal_attachment(pos: &[PartOfSpeech], i: usize, root: usize) -> (&'static str, usize) {
    let mut start = i;
    while start > 0 && (is_nominal(pos[start - 1]) || is_modifier(pos[start - 1])) {
        start -= 1;
    }
    if start > 0 && pos[start - 1] == PartOfSpeech::Adp {
        ("pobj", start - 1)
    } else if i < root {
        ("nsubj", root)
    } else {
        ("dobj", root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::{Document, PartOfSpeech::*};

    fn parse(text: &str, pos: &[PartOfSpeech]) -> Vec<(String, String)> {
        let annotations: Vec<_> = pos.iter().map(|p| (*p, None)).collect();
        let mut doc = Document::annotate(text, &annotations);
        attach_dependencies(&mut doc.tokens);
        doc.tokens
            .iter()
            .map(|t| {
                let dep = t.dependency.as_ref().unwrap();
                (dep.relation.clone(), doc.tokens[dep.head].text().to_string())
            })
            .collect()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(r, h)| (r.to_string(), h.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_sentence() {
        let deps = parse(
            "Dr. Smith met Alice at the park yesterday.",
            &[Propn, Propn, Verb, Propn, Adp, Det, Noun, Adv, Punct],
        );
        assert_eq!(
            deps,
            pairs(&[
                ("compound", "Smith"),
                ("nsubj", "met"),
                ("ROOT", "met"),
                ("dobj", "met"),
                ("prep", "met"),
                ("det", "park"),
                ("pobj", "at"),
                ("advmod", "met"),
                ("punct", "met"),
            ])
        );
    }

    #[test]
    fn test_heads_are_document_indices() {
        let deps = parse("Jamal left. Umar stayed.", &[Propn, Verb, Punct, Propn, Verb, Punct]);
        assert_eq!(deps[3], ("nsubj".to_string(), "stayed".to_string()));
        assert_eq!(deps[4], ("ROOT".to_string(), "stayed".to_string()));
    }

    #[test]
    fn test_verbless_fragment() {
        let deps = parse("New York", &[Propn, Propn]);
        assert_eq!(deps[0].0, "ROOT");
        assert_eq!(deps[1], ("dobj".to_string(), "New".to_string()));
    }
}
