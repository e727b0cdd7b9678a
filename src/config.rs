//! Declarative matching-key configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::rules::{KeyRule, MatchMode};

/// One matching key as written in configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeyRuleConfig {
    /// Side-file column holding the key values
    pub column: String,

    /// Record attribute to match against; defaults to the column name
    #[serde(default)]
    pub attribute: Option<String>,

    /// Comparison mode; defaults to exact
    #[serde(default)]
    pub mode: MatchMode,
}

/// Full matching configuration for one side-file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinConfig {
    /// Matching keys, in composite-key order
    pub keys: Vec<KeyRuleConfig>,
}

impl JoinConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse join configuration")
    }

    /// Rules in declaration order.
    pub fn to_rules(&self) -> Vec<KeyRule> {
        self.keys
            .iter()
            .map(|key| {
                let attribute = key.attribute.clone().unwrap_or_else(|| key.column.clone());
                KeyRule::new(key.column.clone(), attribute, key.mode)
            })
            .collect()
    }
}
