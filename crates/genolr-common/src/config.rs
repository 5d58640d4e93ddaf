//! Scoring configuration for the genotype likelihood-ratio engine.
//!
//! Read once at startup from `genolr.toml` (or the path in `GENOLR_CONFIG`),
//! or from YAML/JSON when embedded in a larger pipeline configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GenolrError, Result};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "GENOLR_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const DEFAULT_CONFIG_FILE: &str = "genolr.toml";

/// Configuration of the genotype likelihood-ratio engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenotypeConfig {
    /// Penalise genotypes whose called pathogenic allele count does not
    /// match the mode of inheritance instead of comparing Poisson models.
    #[serde(default)]
    pub strict: bool,

    /// Background lambda for genes absent from the background-frequency table.
    #[serde(default = "default_background_lambda")]
    pub default_background_lambda: f64,

    /// Attach a textual explanation to every score produced by batch scoring.
    #[serde(default = "default_true")]
    pub explain: bool,
}

fn default_background_lambda() -> f64 { 0.1 }
fn default_true() -> bool { true }

impl Default for GenotypeConfig {
    fn default() -> Self {
        Self {
            strict: false,
            default_background_lambda: default_background_lambda(),
            explain: true,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl GenotypeConfig {
    /// Load configuration from `genolr.toml`.
    /// Checks GENOLR_CONFIG env var first, then the current directory.
    /// Falls back to defaults when no config file exists.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        if !Path::new(&path).exists() {
            tracing::debug!(path = %path, "No config file found, using defaults");
            return Ok(Self::default());
        }

        Self::from_toml(&path)
    }

    /// Load from TOML file
    pub fn from_toml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from YAML file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to TOML file
    pub fn to_toml(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        let lambda = self.default_background_lambda;
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(GenolrError::Config(format!(
                "default_background_lambda must be finite and >= 0, got {lambda}"
            )));
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
