//! recon — extração de pessoas e lugares pela linha de comando
//!
//! Lê o texto do argumento posicional ou da entrada padrão e imprime as
//! pessoas identificadas, a precisão/revocação contra a referência e os
//! lugares identificados. Com `--batch`, cada linha do arquivo é um texto e
//! a saída é a união das pessoas de todos eles.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use recon_core::{evaluate, Engine, EngineConfig, ModelTier, PlacePolicy, DESKTOP_GOLD_PERSONS};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "recon", version, about = "Extrai pessoas e lugares de textos em inglês")]
struct Cli {
    /// Texto a analisar (se ausente, lido da entrada padrão)
    text: Option<String>,

    /// Arquivo de configuração JSON
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Gazetteer de pessoas, um nome por linha
    #[arg(long, value_name = "FILE")]
    names: Option<PathBuf>,

    /// Gazetteer de lugares, um nome por linha
    #[arg(long, value_name = "FILE")]
    places: Option<PathBuf>,

    /// Tier do serviço de NLP: accurate ou fast
    #[arg(long)]
    tier: Option<ModelTier>,

    /// Léxico JSON do tier accurate
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Quando remover pessoas dos candidatos a lugar: exclude_during ou filter_after
    #[arg(long)]
    place_policy: Option<PlacePolicy>,

    /// Um texto por linha; imprime a união das pessoas de todos
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    batch: Option<PathBuf>,
}

impl Cli {
    /// Arquivo de configuração → variáveis RECON_* → flags
    fn engine_config(&self) -> Result<EngineConfig> {
        let base = match &self.config {
            Some(path) => EngineConfig::load(path)?,
            None => EngineConfig::default(),
        };
        let mut config = base.with_overrides(|key| std::env::var(key).ok())?;

        if let Some(path) = &self.names {
            config.person_gazetteer = path.clone();
        }
        if let Some(path) = &self.places {
            config.place_gazetteer = path.clone();
        }
        if let Some(tier) = self.tier {
            config.model_tier = tier;
        }
        if let Some(path) = &self.model {
            config.model_path = Some(path.clone());
        }
        if let Some(policy) = self.place_policy {
            config.place_policy = policy;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = Engine::from_config(&cli.engine_config()?);

    if let Some(path) = &cli.batch {
        return run_batch(&engine, path);
    }

    let text = match cli.text {
        Some(text) => text,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("falha ao ler a entrada padrão")?;
            buffer
        }
    };
    if text.trim().is_empty() {
        bail!("digite algum texto para analisar");
    }

    let extraction = engine.analyze(&text);
    let (precision, recall) = evaluate(&extraction.persons, &DESKTOP_GOLD_PERSONS);

    println!("Pessoas identificadas:");
    for person in &extraction.persons {
        println!("{}", person);
    }
    println!();
    println!("Precisão: {:.2}", precision);
    println!("Revocação: {:.2}", recall);
    println!();
    println!("Lugares identificados:");
    for place in &extraction.places {
        println!("{}", place);
    }
    Ok(())
}

fn run_batch(engine: &Engine, path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("falha ao ler {}", path.display()))?;
    let texts: Vec<&str> = raw.lines().filter(|line| !line.trim().is_empty()).collect();
    if texts.is_empty() {
        bail!("{} não contém nenhum texto", path.display());
    }

    info!(texts = texts.len(), "processando lote");
    for person in engine.collect_persons(&texts) {
        println!("{}", person);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "recon",
            "--tier",
            "fast",
            "--place-policy",
            "exclude-during",
            "--names",
            "/tmp/persons.txt",
            "Jamal met Umar",
        ]);
        let config = cli.engine_config().unwrap();
        assert_eq!(config.model_tier, ModelTier::Fast);
        assert_eq!(config.place_policy, PlacePolicy::ExcludeDuring);
        assert_eq!(config.person_gazetteer, PathBuf::from("/tmp/persons.txt"));
        assert_eq!(cli.text.as_deref(), Some("Jamal met Umar"));
    }

    #[test]
    fn test_invalid_tier_is_rejected() {
        assert!(Cli::try_parse_from(["recon", "--tier", "huge"]).is_err());
    }

    #[test]
    fn test_batch_conflicts_with_text() {
        assert!(Cli::try_parse_from(["recon", "--batch", "texts.txt", "some text"]).is_err());
    }
}
