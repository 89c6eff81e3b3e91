//! # Motor de Reconciliação — Pessoas e Lugares
//!
//! Junta quatro estratégias independentes de extração em um único conjunto de
//! pessoas e um único conjunto de lugares:
//!
//! | Estratégia              | Pessoas | Lugares |
//! |-------------------------|:-------:|:-------:|
//! | Tagger estatístico      | PERSON  | GPE/LOC |
//! | Gazetteer               | sim     | sim     |
//! | Regra de tratamento     | sim     | —       |
//! | Chunker de nomes        | sim     | sim     |
//!
//! A união privilegia revocação. Precisão só é recuperada por três filtros:
//! exclusão por rótulo durante o chunking, filtro de pessoas conhecidas
//! depois do chunking (conforme a [`PlacePolicy`]) e o filtro final que
//! descarta lugares começando com um tratamento.
//!
//! A deduplicação é por igualdade exata de string após `trim`: "Jamal" e
//! "Jamal Khan" sobrevivem os dois, mesmo sobrepostos.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use recon_core::{Engine, Gazetteer, Gazetteers, LexicalAnalyzer, PlacePolicy};
//!
//! let gazetteers = Gazetteers::new(Gazetteer::from_names(["Alice"]), Gazetteer::default());
//! let engine = Engine::new(Box::new(LexicalAnalyzer::fast()), gazetteers, PlacePolicy::FilterAfter);
//!
//! let extraction = engine.analyze("Dr. Smith met Alice at the park yesterday.");
//! assert!(extraction.persons.contains(&"Dr. Smith".to_string()));
//! assert!(extraction.persons.contains(&"Alice".to_string()));
//! assert!(extraction.places.is_empty());
//! ```

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chunker::{person_chunks, place_chunks_excluding, place_chunks_filtered, PlacePolicy};
use crate::config::EngineConfig;
use crate::gazetteer::Gazetteers;
use crate::nlp::{select_service, NlpService};
use crate::rules::{starts_with_title, TitleRule};
use crate::tagger::{Document, EntityLabel};

/// Regra de tratamento compilada uma única vez por processo
static TITLES: LazyLock<TitleRule> = LazyLock::new(TitleRule::new);

/// Pessoas: PERSON do tagger ∪ gazetteer ∪ tratamentos ∪ chunks de pessoa.
///
/// Resultado ordenado, sem repetições e sem strings vazias.
pub fn extract_persons(document: &Document, gazetteers: &Gazetteers) -> Vec<String> {
    let statistical: Vec<String> = document
        .entity_texts(|label| label == EntityLabel::Person)
        .map(str::to_string)
        .collect();
    let gazetteer = gazetteers.person_matcher.find(document);
    let titled = TITLES.extract(&document.tokens);
    let chunks = person_chunks(&document.tokens);

    debug!(
        statistical = statistical.len(),
        gazetteer = gazetteer.len(),
        titled = titled.len(),
        chunks = chunks.len(),
        "candidatos a pessoa"
    );

    normalize(
        statistical
            .into_iter()
            .chain(gazetteer)
            .chain(titled)
            .chain(chunks),
    )
    .into_iter()
    .collect()
}

/// Lugares: GPE/LOC do tagger ∪ gazetteer ∪ chunks de lugar, sem nada
/// que comece com um tratamento.
pub fn extract_places(document: &Document, gazetteers: &Gazetteers, policy: PlacePolicy) -> Vec<String> {
    let statistical: Vec<String> = document
        .entity_texts(|label| label.is_place())
        .map(str::to_string)
        .collect();
    let gazetteer = gazetteers.place_matcher.find(document);
    let chunks = match policy {
        PlacePolicy::ExcludeDuring => place_chunks_excluding(&document.tokens),
        PlacePolicy::FilterAfter => {
            place_chunks_filtered(&document.tokens, &known_persons(document, gazetteers))
        }
    };

    debug!(
        statistical = statistical.len(),
        gazetteer = gazetteer.len(),
        chunks = chunks.len(),
        policy = %policy,
        "candidatos a lugar"
    );

    normalize(statistical.into_iter().chain(gazetteer).chain(chunks))
        .into_iter()
        .filter(|place| !starts_with_title(place))
        .collect()
}

/// Pessoas conhecidas em lowercase: entradas do gazetteer + PERSON do tagger
fn known_persons(document: &Document, gazetteers: &Gazetteers) -> HashSet<String> {
    gazetteers
        .persons
        .names()
        .iter()
        .map(String::as_str)
        .chain(document.entity_texts(|label| label == EntityLabel::Person))
        .map(str::to_lowercase)
        .collect()
}

/// Gazetteers carregados + as funções de extração sobre eles.
///
/// Imutável depois de construído; pode ser compartilhado entre threads.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    gazetteers: Gazetteers,
}

impl Reconciler {
    pub fn new(gazetteers: Gazetteers) -> Self {
        Self { gazetteers }
    }

    pub fn gazetteers(&self) -> &Gazetteers {
        &self.gazetteers
    }

    pub fn extract_persons(&self, document: &Document) -> Vec<String> {
        extract_persons(document, &self.gazetteers)
    }

    pub fn extract_places(&self, document: &Document, policy: PlacePolicy) -> Vec<String> {
        extract_places(document, &self.gazetteers, policy)
    }
}

/// `trim`, descarte de vazios e deduplicação ordenada
fn normalize<I>(candidates: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    candidates
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

/// Resultado de uma chamada do motor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Extraction {
    pub persons: Vec<String>,
    pub places: Vec<String>,
    /// O documento do qual as duas listas foram extraídas
    pub document: Document,
}

/// O motor completo: serviço de NLP + gazetteers + política de lugares.
///
/// Construído uma vez na inicialização do processo e usado por referência.
pub struct Engine {
    service: Box<dyn NlpService>,
    reconciler: Reconciler,
    place_policy: PlacePolicy,
    /// Motivo da queda de tier do serviço, se houve
    fallback_reason: Option<String>,
}

impl Engine {
    pub fn new(service: Box<dyn NlpService>, gazetteers: Gazetteers, place_policy: PlacePolicy) -> Self {
        Self {
            service,
            reconciler: Reconciler::new(gazetteers),
            place_policy,
            fallback_reason: None,
        }
    }

    /// Resolve tier de modelo e gazetteers a partir da configuração.
    ///
    /// Nunca falha: recursos ausentes só degradam a extração.
    pub fn from_config(config: &EngineConfig) -> Self {
        let selection = select_service(config.model_tier, config.model_path.as_deref());
        let gazetteers = Gazetteers::load(&config.person_gazetteer, &config.place_gazetteer);

        info!(
            service = selection.service.name(),
            persons = gazetteers.persons.len(),
            places = gazetteers.places.len(),
            policy = %config.place_policy,
            "motor de reconciliação pronto"
        );

        Self {
            service: selection.service,
            reconciler: Reconciler::new(gazetteers),
            place_policy: config.place_policy,
            fallback_reason: selection.fallback_reason,
        }
    }

    pub fn service_name(&self) -> &str {
        self.service.name()
    }

    pub fn place_policy(&self) -> PlacePolicy {
        self.place_policy
    }

    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    /// O serviço em uso é de um tier pior que o configurado?
    pub fn is_degraded(&self) -> bool {
        self.fallback_reason.is_some()
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Analisa o texto uma vez e extrai pessoas e lugares do mesmo documento.
    ///
    /// Texto vazio não é erro: produz listas vazias.
    pub fn analyze(&self, text: &str) -> Extraction {
        let document = self.service.analyze(text);
        let persons = self.reconciler.extract_persons(&document);
        let places = self.reconciler.extract_places(&document, self.place_policy);
        Extraction {
            persons,
            places,
            document,
        }
    }

    pub fn extract_persons(&self, text: &str) -> Vec<String> {
        self.reconciler.extract_persons(&self.service.analyze(text))
    }

    pub fn extract_places(&self, text: &str) -> Vec<String> {
        self.reconciler
            .extract_places(&self.service.analyze(text), self.place_policy)
    }

    /// Pessoas de vários textos, extraídas em paralelo e unidas.
    pub fn collect_persons<S>(&self, texts: &[S]) -> Vec<String>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.extract_persons(text.as_ref()))
            .flatten()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect()
    }
}
