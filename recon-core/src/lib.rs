//! # recon-core — Reconciliação de Entidades: Pessoas e Lugares
//!
//! Este crate extrai de um texto em inglês o conjunto de **pessoas** e o
//! conjunto de **lugares** mencionados, combinando várias estratégias
//! independentes e reconciliando os resultados.
//!
//! ## Arquitetura do Sistema
//!
//! O dado flui em um pipeline linear:
//!
//! 1.  **Entrada**: Texto bruto (String).
//! 2.  **Serviço de NLP** ([`nlp`], [`analyzer`]): tokenização, classe gramatical e
//!     rótulos de entidade, escolhidos por tier (`accurate` ou `fast`).
//!     Dependências sintáticas rasas em [`syntax`].
//! 3.  **Estratégias de extração**:
//!     *   **Tagger estatístico** ([`tagger`]): spans PERSON, GPE e LOC.
//!     *   **Gazetteers** ([`gazetteer`]): listas de nomes conhecidos.
//!     *   **Regra de tratamento** ([`rules`]): "Dr. Smith", "mr.smith".
//!     *   **Chunker de nomes próprios** ([`chunker`]): sequências de PROPN.
//! 4.  **Reconciliação** ([`reconcile`]): união, normalização e filtros.
//! 5.  **Avaliação** ([`evaluation`]): precisão e revocação contra uma referência.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use recon_core::{evaluate, Engine, EngineConfig, WEB_GOLD_PERSONS};
//!
//! // 1. Monta o motor (tier e gazetteers resolvidos uma única vez)
//! let engine = Engine::from_config(&EngineConfig::default());
//!
//! // 2. Extrai pessoas e lugares
//! let extraction = engine.analyze("Dr. Smith met Alice at the park yesterday.");
//!
//! // 3. Compara com a referência
//! let (precision, recall) = evaluate(&extraction.persons, &WEB_GOLD_PERSONS);
//! println!("Precisão: {:.2} / Revocação: {:.2}", precision, recall);
//! ```
//!
//! ## Módulos Principais
//!
//! - [`reconcile`]: Motor que une as estratégias.
//! - [`config`]: Configuração lida na inicialização.
//! - [`corpus`]: Léxicos embutidos e textos de demonstração.

pub mod analyzer;
pub mod chunker;
pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod gazetteer;
pub mod nlp;
pub mod reconcile;
pub mod rules;
pub mod syntax;
pub mod tagger;
pub mod tokenizer;

pub use analyzer::{LexicalAnalyzer, LexiconModel};
pub use chunker::PlacePolicy;
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use evaluation::{evaluate, score, Scores, DESKTOP_GOLD_PERSONS, WEB_GOLD_PERSONS};
pub use gazetteer::{Gazetteer, Gazetteers, PhraseMatcher};
pub use nlp::{select_service, ModelTier, NlpService, ServiceSelection};
pub use reconcile::{extract_persons, extract_places, Engine, Extraction, Reconciler};
pub use rules::{starts_with_title, TitleRule};
pub use tagger::{AnnotatedToken, Dependency, Document, EntityLabel, EntitySpan, PartOfSpeech};
pub use tokenizer::Token;
