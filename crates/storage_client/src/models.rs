//! # Models
//!
//! Data returned by the Storage API and the Vault API.
//!
//! Identifiers are always strings. The APIs return some of them as JSON
//! numbers (branch ids, numeric configuration ids), so every id field goes
//! through [`deserialize_id`] which accepts both spellings.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

/// Deserializes an identifier given either as a JSON string or a JSON number.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawId::deserialize(deserializer)?.into_string())
}

/// Like [`deserialize_id`], for optional identifiers.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_string))
}

/// A component configuration with its rows.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Configuration {
    /// Configuration identifier, unique within its component.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Human readable name.
    #[serde(default)]
    pub name: String,

    /// The configuration body.
    #[serde(default)]
    pub configuration: Value,

    /// Configuration rows in the order returned by the API.
    #[serde(default)]
    pub rows: Vec<ConfigurationRow>,
}

impl Configuration {
    /// Finds a row by identifier.
    pub fn row(&self, row_id: &str) -> Option<&ConfigurationRow> {
        self.rows.iter().find(|row| row.id == row_id)
    }
}

/// A single row of a configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfigurationRow {
    /// Row identifier, unique within its configuration.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    /// Human readable name.
    #[serde(default)]
    pub name: String,

    /// The row body.
    #[serde(default)]
    pub configuration: Value,
}

/// A variable stored in the vault.
///
/// Scoping to branches is resolved by the vault itself: a list returned for a
/// branch already has branch-specific values overriding unscoped ones.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VaultVariable {
    /// Variable name, addressed as `vault.<key>` in placeholders.
    pub key: String,

    /// Variable value.
    pub value: String,

    /// Flags such as `encrypted`.
    #[serde(default)]
    pub flags: Vec<String>,

    /// Scope attributes (for example `branchId`).
    #[serde(default)]
    pub attributes: HashMap<String, Value>,
}

impl VaultVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            flags: Vec::new(),
            attributes: HashMap::new(),
        }
    }
}

/// A development branch of a project.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DevBranch {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Whether this is the main (default) branch.
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}
