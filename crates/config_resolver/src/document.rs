//! The configuration document passed through the resolution pipeline.

use crate::errors::{ResolverError, ResolverResult};
use serde_json::{Map, Value};

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

pub const PARAMETERS_KEY: &str = "parameters";
pub const SHARED_CODE_ID_KEY: &str = "shared_code_id";
pub const SHARED_CODE_ROW_IDS_KEY: &str = "shared_code_row_ids";
pub const VARIABLES_ID_KEY: &str = "variables_id";
pub const VARIABLES_VALUES_ID_KEY: &str = "variables_values_id";

/// A job configuration: a JSON object whose key order is preserved.
///
/// Every pipeline stage takes a document by reference and returns a new one.
/// Identifier fields are read as strings whether they were written as JSON
/// strings or JSON numbers; an empty string counts as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationDocument {
    body: Map<String, Value>,
}

impl ConfigurationDocument {
    pub fn new(body: Map<String, Value>) -> Self {
        Self { body }
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: Value) -> ResolverResult<Self> {
        match value {
            Value::Object(body) => Ok(Self { body }),
            other => Err(ResolverError::InvalidDocument {
                reason: format!("expected an object, got {}", type_name(&other)),
            }),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.body.clone())
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.body)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn parameters(&self) -> Option<&Value> {
        self.body.get(PARAMETERS_KEY)
    }

    /// Returns a copy with `parameters` replaced, keeping its position.
    pub fn with_parameters(&self, parameters: Value) -> Self {
        let mut body = self.body.clone();
        body.insert(PARAMETERS_KEY.to_string(), parameters);
        Self { body }
    }

    pub fn shared_code_id(&self) -> ResolverResult<Option<String>> {
        self.id_field(SHARED_CODE_ID_KEY)
    }

    pub fn variables_id(&self) -> ResolverResult<Option<String>> {
        self.id_field(VARIABLES_ID_KEY)
    }

    pub fn variables_values_id(&self) -> ResolverResult<Option<String>> {
        self.id_field(VARIABLES_VALUES_ID_KEY)
    }

    /// Shared code row ids in the order they were written.
    pub fn shared_code_row_ids(&self) -> ResolverResult<Vec<String>> {
        match self.body.get(SHARED_CODE_ROW_IDS_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    id_string(item).ok_or_else(|| ResolverError::InvalidDocument {
                        reason: format!(
                            "\"{SHARED_CODE_ROW_IDS_KEY}.{index}\" must be a string or a number, got {}",
                            type_name(item)
                        ),
                    })
                })
                .collect(),
            Some(other) => Err(ResolverError::InvalidDocument {
                reason: format!(
                    "\"{SHARED_CODE_ROW_IDS_KEY}\" must be a list, got {}",
                    type_name(other)
                ),
            }),
        }
    }

    /// Returns a copy with `shared_code_row_ids` set to `row_ids`.
    pub fn with_shared_code_row_ids(&self, row_ids: &[String]) -> Self {
        let mut body = self.body.clone();
        body.insert(
            SHARED_CODE_ROW_IDS_KEY.to_string(),
            Value::Array(row_ids.iter().cloned().map(Value::String).collect()),
        );
        Self { body }
    }

    fn id_field(&self, key: &str) -> ResolverResult<Option<String>> {
        match self.body.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => match id_string(value) {
                Some(id) if id.is_empty() => Ok(None),
                Some(id) => Ok(Some(id)),
                None => Err(ResolverError::InvalidDocument {
                    reason: format!(
                        "\"{key}\" must be a string or a number, got {}",
                        type_name(value)
                    ),
                }),
            },
        }
    }
}

impl From<Map<String, Value>> for ConfigurationDocument {
    fn from(body: Map<String, Value>) -> Self {
        Self::new(body)
    }
}

impl TryFrom<Value> for ConfigurationDocument {
    type Error = ResolverError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<ConfigurationDocument> for Value {
    fn from(document: ConfigurationDocument) -> Self {
        document.into_value()
    }
}

/// Reads an identifier written as a JSON string or number.
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
