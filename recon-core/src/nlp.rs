//! # Serviço de NLP e Seleção de Tier
//!
//! O motor de reconciliação não sabe tokenizar nem rotular entidades: ele
//! recebe um [`Document`] pronto de um [`NlpService`]. Este módulo define o
//! contrato e escolhe, uma única vez na inicialização, qual implementação usar.
//!
//! ## Tiers
//!
//! - **accurate** (preferido): precisa de um léxico externo. Pode falhar.
//! - **fast** (alternativa): só recursos embutidos. Nunca falha.
//!
//! Se o tier preferido não carregar, [`select_service`] emite um aviso e cai
//! para o `fast`; a extração continua com precisão degradada.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analyzer::{LexicalAnalyzer, LexiconModel};
use crate::error::{Error, Result};
use crate::tagger::Document;

/// Contrato do serviço de NLP externo.
///
/// `Send + Sync` é o que permite a um servidor executar extrações em paralelo
/// compartilhando o mesmo serviço.
pub trait NlpService: Send + Sync {
    /// Tokeniza, classifica e rotula o texto. Texto vazio gera documento vazio.
    fn analyze(&self, text: &str) -> Document;

    /// Nome curto da implementação (para logs e UI)
    fn name(&self) -> &str;
}

/// Níveis de precisão do serviço de NLP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Léxico externo + recursos embutidos
    Accurate,
    /// Apenas recursos embutidos
    Fast,
}

impl ModelTier {
    pub fn name(&self) -> &'static str {
        match self {
            ModelTier::Accurate => "accurate",
            ModelTier::Fast => "fast",
        }
    }
}

impl Default for ModelTier {
    fn default() -> Self {
        ModelTier::Accurate
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ModelTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "accurate" => Ok(ModelTier::Accurate),
            "fast" => Ok(ModelTier::Fast),
            _ => Err(Error::InvalidSetting {
                key: "model_tier".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Carrega o analisador de um tier específico, sem fallback.
pub fn load_tier(tier: ModelTier, model_path: Option<&Path>) -> Result<LexicalAnalyzer> {
    match tier {
        ModelTier::Fast => Ok(LexicalAnalyzer::fast()),
        ModelTier::Accurate => {
            let path = model_path.ok_or_else(|| Error::ModelUnavailable {
                tier,
                reason: "nenhum arquivo de léxico configurado".to_string(),
            })?;
            if !path.exists() {
                return Err(Error::ModelUnavailable {
                    tier,
                    reason: format!("{} não encontrado", path.display()),
                });
            }
            let model = LexiconModel::load(path)?;
            Ok(LexicalAnalyzer::with_lexicon(&model))
        }
    }
}

/// Resultado da seleção de tier feita na inicialização
pub struct ServiceSelection {
    pub service: Box<dyn NlpService>,
    /// Tier efetivamente em uso
    pub tier: ModelTier,
    /// Motivo da queda para o tier `fast`, se houve
    pub fallback_reason: Option<String>,
}

impl ServiceSelection {
    /// O tier em uso é pior que o pedido?
    pub fn is_degraded(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Resolve o serviço de NLP: tenta o tier preferido e cai para o `fast`.
pub fn select_service(preferred: ModelTier, model_path: Option<&Path>) -> ServiceSelection {
    match load_tier(preferred, model_path) {
        Ok(analyzer) => {
            info!(tier = %preferred, service = analyzer.name(), "serviço de NLP carregado");
            ServiceSelection {
                service: Box::new(analyzer),
                tier: preferred,
                fallback_reason: None,
            }
        }
        Err(err) => {
            warn!(%err, "usando o modelo fast como alternativa");
            ServiceSelection {
                service: Box::new(LexicalAnalyzer::fast()),
                tier: ModelTier::Fast,
                fallback_reason: Some(err.to_string()),
            }
        }
    }
}
