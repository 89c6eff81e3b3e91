//! # Avaliação — Precisão e Revocação
//!
//! Compara a saída do sistema com uma lista de referência (gold standard).
//! As duas entradas são tratadas como conjuntos e a comparação é por
//! igualdade exata de strings: "the Park" e "Park" são entidades diferentes
//! e contam como um falso positivo e um falso negativo.
//!
//! $$ P = \frac{TP}{TP + FP} \qquad R = \frac{TP}{TP + FN} $$
//!
//! Denominador zero resulta em 0.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Referência de pessoas usada pela interface web
pub const WEB_GOLD_PERSONS: [&str; 3] = ["Dr. Smith", "Jane Smith", "Alice"];

/// Referência de pessoas usada pela interface de terminal
pub const DESKTOP_GOLD_PERSONS: [&str; 3] = ["John Doe", "Jane Smith", "Alice"];

/// Contagens da comparação entre sistema e referência
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl Scores {
    pub fn precision(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_positives)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Conta acertos e erros, ignorando repetições em qualquer das entradas
pub fn score<S, G>(system: &[S], gold: &[G]) -> Scores
where
    S: AsRef<str>,
    G: AsRef<str>,
{
    let system: HashSet<&str> = system.iter().map(|s| s.as_ref()).collect();
    let gold: HashSet<&str> = gold.iter().map(|g| g.as_ref()).collect();

    Scores {
        true_positives: system.intersection(&gold).count(),
        false_positives: system.difference(&gold).count(),
        false_negatives: gold.difference(&system).count(),
    }
}

/// Retorna `(precisão, revocação)`
pub fn evaluate<S, G>(system: &[S], gold: &[G]) -> (f64, f64)
where
    S: AsRef<str>,
    G: AsRef<str>,
{
    let scores = score(system, gold);
    (scores.precision(), scores.recall())
}
