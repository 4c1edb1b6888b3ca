use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use crate::extraction::ontology::Ontology;
use crate::extraction::settings::ExtractionConfig;
use crate::extraction::tagger::TaggerBackend;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a malformed value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub tagger_backend: TaggerBackend,
    /// Overrides `max_document_chars` from the extraction config when set.
    pub max_document_chars: Option<usize>,
    pub request_timeout_secs: u64,
    pub max_request_bytes: usize,
    /// JSON ontology replacing the built-in tables.
    pub ontology_path: Option<PathBuf>,
    /// JSON overrides for the tuned extraction constants.
    pub extraction_config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            tagger_backend: TaggerBackend::Lexicon,
            max_document_chars: None,
            request_timeout_secs: 30,
            max_request_bytes: 2_000_000,
            ontology_path: None,
            extraction_config_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            tagger_backend: match optional_env("TAGGER_BACKEND") {
                Some(raw) => TaggerBackend::from_str(&raw).map_err(|e| anyhow!(e))?,
                None => defaults.tagger_backend,
            },
            max_document_chars: optional_env("MAX_DOCUMENT_CHARS")
                .map(|raw| raw.parse::<usize>())
                .transpose()
                .context("MAX_DOCUMENT_CHARS must be a positive integer")?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,
            max_request_bytes: parse_env("MAX_REQUEST_BYTES", defaults.max_request_bytes)?,
            ontology_path: optional_env("ONTOLOGY_PATH").map(PathBuf::from),
            extraction_config_path: optional_env("EXTRACTION_CONFIG_PATH").map(PathBuf::from),
        })
    }

    /// The built-in ontology, or the one at `ONTOLOGY_PATH`.
    pub fn load_ontology(&self) -> Result<Ontology> {
        match &self.ontology_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read ontology file '{}'", path.display()))?;
                Ontology::from_json(&json).with_context(|| format!("Invalid ontology file '{}'", path.display()))
            }
            None => Ontology::builtin().context("Built-in ontology failed validation"),
        }
    }

    /// Tuned defaults, overlaid by `EXTRACTION_CONFIG_PATH` and `MAX_DOCUMENT_CHARS`.
    pub fn load_extraction_config(&self) -> Result<ExtractionConfig> {
        let mut extraction = match &self.extraction_config_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read extraction config '{}'", path.display()))?;
                ExtractionConfig::from_json(&json)
                    .with_context(|| format!("Invalid extraction config '{}'", path.display()))?
            }
            None => ExtractionConfig::default(),
        };
        if let Some(max) = self.max_document_chars {
            extraction.max_document_chars = max;
        }
        extraction.validate().context("Invalid extraction config")?;
        Ok(extraction)
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_builtin_ontology_and_tuned_config() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert!(config.load_ontology().is_ok());
        assert_eq!(config.load_extraction_config().unwrap(), ExtractionConfig::default());
    }

    #[test]
    fn test_document_cap_override_is_validated() {
        let config = Config {
            max_document_chars: Some(500),
            ..Config::default()
        };
        assert_eq!(config.load_extraction_config().unwrap().max_document_chars, 500);

        let zero = Config {
            max_document_chars: Some(0),
            ..Config::default()
        };
        assert!(zero.load_extraction_config().is_err());
    }

    #[test]
    fn test_missing_ontology_file_is_an_error() {
        let config = Config {
            ontology_path: Some(PathBuf::from("/nonexistent/ontology.json")),
            ..Config::default()
        };
        let err = config.load_ontology().unwrap_err();
        assert!(err.to_string().contains("ontology.json"));
    }
}
