// src/config/engine.rs
//! Service configuration loaded from TOML with env overrides.
//!
//! ```toml
//! [limits]
//! min_chars = 3
//! max_chars = 10000
//! max_batch = 100
//!
//! [calibration]
//! score_floor = 0.05
//!
//! [lexicon]
//! path = "config/lexicon.toml"
//! extend = true
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use crate::analyze::{Calibration, SentimentEngine};
use crate::lexicon::LexiconSet;

pub const DEFAULT_CONFIG_PATH: &str = "config/sentiment.toml";
pub const ENV_CONFIG_PATH: &str = "SENTIMENT_CONFIG_PATH";
pub const ENV_LEXICON_PATH: &str = "SENTIMENT_LEXICON_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub limits: Limits,
    pub calibration: Calibration,
    pub lexicon: LexiconConfig,
}

/// Input-contract limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Minimum trimmed length, in chars.
    pub min_chars: usize,
    pub max_chars: usize,
    /// Maximum texts per batch or upload.
    pub max_batch: usize,
    pub max_upload_bytes: usize,
    /// Results kept by the in-memory store.
    pub history_capacity: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_chars: 3,
            max_chars: 10_000,
            max_batch: 100,
            max_upload_bytes: 5 * 1024 * 1024,
            history_capacity: 2_000,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexiconConfig {
    /// Optional lexicon TOML; the built-in tables are used when unset.
    pub path: Option<PathBuf>,
    /// Overrides the lexicon file's own `extend` flag.
    pub extend: Option<bool>,
}

impl EngineConfig {
    /// Load from `SENTIMENT_CONFIG_PATH` (default `config/sentiment.toml`).
    /// A missing file yields the defaults; `SENTIMENT_LEXICON_PATH` overrides
    /// the lexicon path.
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = if path.exists() {
            Self::from_path(&path)?
        } else {
            info!(target: "sentiment", path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        if let Ok(p) = std::env::var(ENV_LEXICON_PATH) {
            if !p.trim().is_empty() {
                cfg.lexicon.path = Some(PathBuf::from(p));
            }
        }
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg = Self::from_toml_str(&content)
            .with_context(|| format!("invalid config at {}", path.display()))?;
        info!(target: "sentiment", path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: EngineConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let l = &self.limits;
        if l.min_chars == 0 || l.min_chars > l.max_chars {
            bail!("limits: need 0 < min_chars <= max_chars");
        }
        if l.max_batch == 0 || l.history_capacity == 0 || l.max_upload_bytes == 0 {
            bail!("limits: max_batch, max_upload_bytes and history_capacity must be positive");
        }
        self.calibration.validate()
    }

    pub fn build_lexicon(&self) -> anyhow::Result<LexiconSet> {
        match &self.lexicon.path {
            Some(p) => LexiconSet::load(p, self.lexicon.extend),
            None => Ok(LexiconSet::builtin()),
        }
    }

    pub fn build_engine(&self) -> anyhow::Result<SentimentEngine> {
        let lexicon = self.build_lexicon()?;
        Ok(SentimentEngine::new(Arc::new(lexicon), self.calibration))
    }
}
