// src/config/mod.rs
pub mod engine;

pub use engine::{
    EngineConfig, LexiconConfig, Limits, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH, ENV_LEXICON_PATH,
};
