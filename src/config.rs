//! Analyzer and service configuration.
//!
//! Resolution order for the service:
//! 1) `$SENTIMENT_CONFIG_PATH` (must exist if set)
//! 2) `config/sentiment.toml`
//! 3) built-in defaults
//!
//! then env overrides (`SENTIMENT_BIND`, `SENTIMENT_LEXICON_PATH`,
//! `SENTIMENT_HEURISTICS_PATH`, `SENTIMENT_CONFIDENCE_THRESHOLD`,
//! `SENTIMENT_METRICS`), then validation.

use crate::error::ConfigError;
use crate::scoring::ScoringMode;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_CONFIG_PATH: &str = "config/sentiment.toml";
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.3;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
pub const DEFAULT_MAX_TEXT_CHARS: usize = 100_000;
/// `EnvFilter` directives used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "word_sentiment=info,warn";

pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_BIND: &str = "SENTIMENT_BIND";
pub const ENV_LEXICON_PATH: &str = "SENTIMENT_LEXICON_PATH";
pub const ENV_HEURISTICS_PATH: &str = "SENTIMENT_HEURISTICS_PATH";
pub const ENV_CONFIDENCE_THRESHOLD: &str = "SENTIMENT_CONFIDENCE_THRESHOLD";
pub const ENV_METRICS: &str = "SENTIMENT_METRICS";

/// Caller-facing knobs for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub confidence_threshold: f64,
    /// Whether the filtered detail view is wanted at all.
    pub show_details: bool,
    pub scoring_mode: ScoringMode,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            show_details: true,
            scoring_mode: ScoringMode::default(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.confidence_threshold).map(|_| ())
    }
}

/// Accept thresholds in `[0, 1]`; NaN is rejected too.
pub fn validate_threshold(threshold: f64) -> Result<f64, ConfigError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(ConfigError::ThresholdOutOfRange(threshold))
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}
fn default_max_text_chars() -> usize {
    DEFAULT_MAX_TEXT_CHARS
}
fn default_metrics_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// External lexicon file; the embedded lexicon is used when absent.
    #[serde(default)]
    pub lexicon_path: Option<PathBuf>,
    /// TOML rule table; built-in English rules when absent.
    #[serde(default)]
    pub heuristics_path: Option<PathBuf>,
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            lexicon_path: None,
            heuristics_path: None,
            max_text_chars: default_max_text_chars(),
            metrics_enabled: default_metrics_enabled(),
            analyzer: AnalyzerConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Parse a TOML file without env overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File (env path → default path → defaults), then env overrides, then validation.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                Self::default()
            }
        };

        cfg.apply_env().context("applying environment overrides")?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(v) = env_nonempty(ENV_BIND) {
            self.bind_addr = v;
        }
        if let Some(v) = env_nonempty(ENV_LEXICON_PATH) {
            self.lexicon_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env_nonempty(ENV_HEURISTICS_PATH) {
            self.heuristics_path = Some(PathBuf::from(v));
        }
        if let Some(raw) = env_nonempty(ENV_CONFIDENCE_THRESHOLD) {
            let parsed = raw.trim().parse::<f64>().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_CONFIDENCE_THRESHOLD,
                value: raw.clone(),
            })?;
            self.analyzer.confidence_threshold = validate_threshold(parsed)?;
        }
        if let Some(raw) = env_nonempty(ENV_METRICS) {
            self.metrics_enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "on" | "yes" => true,
                "0" | "false" | "off" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: ENV_METRICS,
                        value: raw,
                    })
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analyzer.validate()
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = AnalyzerConfig::default();
        assert_eq!(c.confidence_threshold, 0.3);
        assert!(c.show_details);
        assert_eq!(c.scoring_mode, ScoringMode::Contextual);
        c.validate().unwrap();
    }

    #[test]
    fn threshold_bounds() {
        assert_eq!(validate_threshold(0.0).unwrap(), 0.0);
        assert_eq!(validate_threshold(1.0).unwrap(), 1.0);
        for bad in [-0.01, 1.01, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                validate_threshold(bad),
                Err(ConfigError::ThresholdOutOfRange(_))
            ));
        }
    }

    #[test]
    fn toml_partial_sections() {
        let cfg: ServiceConfig = toml::from_str(
            r#"
bind_addr = "127.0.0.1:9000"

[analyzer]
confidence_threshold = 0.5
scoring_mode = "isolated"
"#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.analyzer.confidence_threshold, 0.5);
        assert!(cfg.analyzer.show_details);
        assert_eq!(cfg.analyzer.scoring_mode, ScoringMode::Isolated);
        assert_eq!(cfg.max_text_chars, DEFAULT_MAX_TEXT_CHARS);
        assert!(cfg.metrics_enabled);
    }

    #[test]
    fn out_of_range_threshold_in_file_fails_validation() {
        let cfg: ServiceConfig = toml::from_str("[analyzer]\nconfidence_threshold = 1.5\n").unwrap();
        assert!(cfg.validate().is_err());
    }
}
