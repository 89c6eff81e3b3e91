//! # Configuração do Motor
//!
//! Tudo o que é decidido uma vez na inicialização do processo: onde estão os
//! gazetteers, qual tier de modelo tentar primeiro e qual política de lugares
//! usar. Os valores padrão reproduzem o comportamento sem configuração
//! nenhuma (`names.txt` e `places.txt` no diretório atual).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chunker::PlacePolicy;
use crate::error::{Error, Result};
use crate::nlp::ModelTier;

pub const ENV_NAMES_FILE: &str = "RECON_NAMES_FILE";
pub const ENV_PLACES_FILE: &str = "RECON_PLACES_FILE";
pub const ENV_MODEL_TIER: &str = "RECON_MODEL_TIER";
pub const ENV_MODEL_PATH: &str = "RECON_MODEL_PATH";
pub const ENV_PLACE_POLICY: &str = "RECON_PLACE_POLICY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Gazetteer de pessoas, um nome por linha
    pub person_gazetteer: PathBuf,
    /// Gazetteer de lugares, um nome por linha
    pub place_gazetteer: PathBuf,
    /// Tier preferido; se falhar, cai para `fast`
    pub model_tier: ModelTier,
    /// Léxico JSON do tier `accurate`
    pub model_path: Option<PathBuf>,
    pub place_policy: PlacePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            person_gazetteer: PathBuf::from("names.txt"),
            place_gazetteer: PathBuf::from("places.txt"),
            model_tier: ModelTier::default(),
            model_path: None,
            place_policy: PlacePolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Lê a configuração de um arquivo JSON; campos ausentes usam o padrão.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|err| Error::InvalidSetting {
            key: path.display().to_string(),
            value: err.to_string(),
        })
    }

    /// Padrões sobrescritos pelas variáveis `RECON_*` do ambiente
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Aplica sobrescritas vindas de uma fonte qualquer de chave/valor.
    ///
    /// Valores vazios são ignorados.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = get(ENV_NAMES_FILE) {
            self.person_gazetteer = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_PLACES_FILE) {
            self.place_gazetteer = PathBuf::from(path);
        }
        if let Some(path) = get(ENV_MODEL_PATH) {
            self.model_path = Some(PathBuf::from(path));
        }
        if let Some(value) = get(ENV_MODEL_TIER) {
            self.model_tier = value.parse().map_err(|_| invalid(ENV_MODEL_TIER, &value))?;
        }
        if let Some(value) = get(ENV_PLACE_POLICY) {
            self.place_policy = value.parse().map_err(|_| invalid(ENV_PLACE_POLICY, &value))?;
        }

        Ok(self)
    }
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidSetting {
        key: key.to_string(),
        value: value.to_string(),
    }
}
