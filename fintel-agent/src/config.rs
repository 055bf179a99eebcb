//! Assistant configuration.
//!
//! A JSON document of the shape
//! `{ "openai": { model, max_tokens, temperature, api_key?, system_prompt?,
//!    transaction_keywords? }, "transaction_keywords"? }`.
//! Any load failure is non-fatal: the built-in defaults (including the
//! hardcoded keyword table) always apply.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use fintel_core::{CategoryRule, KeywordTable};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 500;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert financial advisor AI assistant.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentConfig {
    #[serde(default)]
    pub openai: OpenAiSection,
    /// Top-level fallback; the `openai` section's table wins when both
    /// are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_keywords: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpenAiSection {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_keywords: Option<Map<String, Value>>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for OpenAiSection {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            api_key: None,
            system_prompt: None,
            transaction_keywords: None,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            openai: OpenAiSection::default(),
            transaction_keywords: None,
        }
    }
}

impl AgentConfig {
    pub fn parse(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("parse config JSON")
    }

    /// Load a config file, falling back to the defaults on any failure
    /// (missing file, unreadable, malformed JSON). Never fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        let raw = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) => {
                warn!("failed to read {}: {e}; using default config", path.display());
                return Self::default();
            }
        };
        match Self::parse(&raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("failed to parse {}: {e}; using default config", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Remote completions are enabled only when an API key is configured.
    pub fn remote_enabled(&self) -> bool {
        self.openai
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty())
    }

    pub fn system_prompt(&self) -> &str {
        self.openai
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    /// The effective keyword table: `openai.transaction_keywords`, then
    /// the top-level table, then the built-in defaults. JSON object order
    /// is preserved and becomes the table's matching order.
    pub fn keyword_table(&self) -> KeywordTable {
        let configured = self
            .openai
            .transaction_keywords
            .as_ref()
            .or(self.transaction_keywords.as_ref());
        match configured.map(table_from_map) {
            Some(table) if !table.is_empty() => table,
            _ => KeywordTable::default_table(),
        }
    }
}

fn table_from_map(map: &Map<String, Value>) -> KeywordTable {
    let rules = map
        .iter()
        .map(|(category, words)| CategoryRule {
            category: category.clone(),
            keywords: words
                .as_array()
                .map(|a| {
                    a.iter()
                        .filter_map(|v| v.as_str())
                        .map(|s| s.to_lowercase())
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect();
    KeywordTable::new(rules)
}
