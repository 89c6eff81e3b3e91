//! # Erros do crate
//!
//! A extração em si nunca falha: texto vazio gera conjuntos vazios. Os erros
//! abaixo só aparecem na inicialização (leitura de gazetteers, carga do
//! modelo de maior precisão, leitura de configuração).

use std::path::PathBuf;

use crate::nlp::ModelTier;

/// Alias de resultado usado em todo o crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Falha de leitura de um arquivo (gazetteer ou modelo)
    #[error("falha ao ler {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// O tier de modelo pedido não pode ser carregado
    #[error("modelo {tier} indisponível: {reason}")]
    ModelUnavailable { tier: ModelTier, reason: String },

    /// O arquivo de léxico existe, mas não é um JSON válido
    #[error("modelo inválido em {path}: {source}")]
    InvalidModel {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Valor de configuração que não pode ser interpretado
    #[error("valor inválido para {key}: {value:?}")]
    InvalidSetting { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ModelUnavailable {
            tier: ModelTier::Accurate,
            reason: "nenhum caminho configurado".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "modelo accurate indisponível: nenhum caminho configurado"
        );

        let err = Error::InvalidSetting {
            key: "RECON_MODEL_TIER".to_string(),
            value: "huge".to_string(),
        };
        assert_eq!(err.to_string(), "valor inválido para RECON_MODEL_TIER: \"huge\"");
    }
}
