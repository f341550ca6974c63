//! Structural validation of stored configurations.
//!
//! Three shapes are checked:
//!
//! ```text
//! shared code row        {"code_content": ["line", ...]}
//! variables definition   {"variables": [{"name": "..", "type": "string"}], "default_values_id"?: ".."}
//! variable values        {"values": [{"name": "..", "value": ".."}]}
//! ```
//!
//! Objects are closed: any key not listed above is rejected. Error paths are
//! rooted at `configuration`, e.g. `configuration.values.0.name`.

use crate::document::{id_string, type_name};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

const ROOT: &str = "configuration";

/// The only variable type currently defined.
pub const STRING_VARIABLE_TYPE: &str = "string";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unrecognized option \"{key}\" under \"{path}\"")]
    UnrecognizedOption { key: String, path: String },

    #[error("The child config \"{key}\" under \"{path}\" must be configured.")]
    MissingOption { key: String, path: String },

    #[error("Invalid type for path \"{path}\". Expected {expected}, but got {actual}.")]
    InvalidType {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("The value \"{value}\" is not allowed for path \"{path}\". Permissible values: \"{allowed}\"")]
    InvalidValue {
        path: String,
        value: String,
        allowed: &'static str,
    },

    #[error("Duplicate variable name \"{name}\" under \"{path}\"")]
    DuplicateName { name: String, path: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedCodeRow {
    pub code_content: Vec<String>,
}

impl SharedCodeRow {
    /// The snippet text substituted for the row's placeholder.
    pub fn snippet(&self) -> String {
        self.code_content.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariablesDefinition {
    pub variables: Vec<VariableDefinition>,
    pub default_values_id: Option<String>,
}

/// Named values in the order they were stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableValues {
    pub values: Vec<(String, String)>,
}

pub fn validate_shared_code_row(configuration: &Value) -> Result<SharedCodeRow, SchemaError> {
    let object = closed_object(configuration, ROOT, &["code_content"])?;
    let path = child(ROOT, "code_content");
    let lines = required(object, "code_content", ROOT)?;

    let code_content = as_array(lines, &path)?
        .iter()
        .enumerate()
        .map(|(index, line)| scalar_string(line, &child(&path, &index.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SharedCodeRow { code_content })
}

pub fn validate_variables_definition(
    configuration: &Value,
) -> Result<VariablesDefinition, SchemaError> {
    let object = closed_object(configuration, ROOT, &["variables", "default_values_id"])?;
    let path = child(ROOT, "variables");
    let items = as_array(required(object, "variables", ROOT)?, &path)?;

    let mut variables = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let item_path = child(&path, &index.to_string());
        let item = closed_object(item, &item_path, &["name", "type"])?;

        let name = scalar_string(
            required(item, "name", &item_path)?,
            &child(&item_path, "name"),
        )?;
        let type_path = child(&item_path, "type");
        let kind = scalar_string(required(item, "type", &item_path)?, &type_path)?;
        if kind != STRING_VARIABLE_TYPE {
            return Err(SchemaError::InvalidValue {
                path: type_path,
                value: kind,
                allowed: STRING_VARIABLE_TYPE,
            });
        }

        variables.push(VariableDefinition { name, kind });
    }

    let default_values_id = match object.get("default_values_id") {
        None | Some(Value::Null) => None,
        Some(value) => {
            let id = id_string(value).ok_or_else(|| SchemaError::InvalidType {
                path: child(ROOT, "default_values_id"),
                expected: "string",
                actual: type_name(value),
            })?;
            Some(id).filter(|id| !id.is_empty())
        }
    };

    Ok(VariablesDefinition {
        variables,
        default_values_id,
    })
}

pub fn validate_variable_values(configuration: &Value) -> Result<VariableValues, SchemaError> {
    let object = closed_object(configuration, ROOT, &["values"])?;
    let path = child(ROOT, "values");
    let items = as_array(required(object, "values", ROOT)?, &path)?;

    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let item_path = child(&path, &index.to_string());
        let item = closed_object(item, &item_path, &["name", "value"])?;

        let name = scalar_string(
            required(item, "name", &item_path)?,
            &child(&item_path, "name"),
        )?;
        let value = scalar_string(
            required(item, "value", &item_path)?,
            &child(&item_path, "value"),
        )?;

        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateName { name, path });
        }
        values.push((name, value));
    }

    Ok(VariableValues { values })
}

fn child(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

fn closed_object<'a>(
    value: &'a Value,
    path: &str,
    allowed: &[&str],
) -> Result<&'a Map<String, Value>, SchemaError> {
    let object = value.as_object().ok_or_else(|| SchemaError::InvalidType {
        path: path.to_string(),
        expected: "object",
        actual: type_name(value),
    })?;

    if let Some(key) = object.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(SchemaError::UnrecognizedOption {
            key: key.clone(),
            path: path.to_string(),
        });
    }

    Ok(object)
}

fn required<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Value, SchemaError> {
    object.get(key).ok_or_else(|| SchemaError::MissingOption {
        key: key.to_string(),
        path: path.to_string(),
    })
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaError> {
    value.as_array().ok_or_else(|| SchemaError::InvalidType {
        path: path.to_string(),
        expected: "array",
        actual: type_name(value),
    })
}

/// Accepts strings, numbers and booleans; the latter two are stringified.
fn scalar_string(value: &Value, path: &str) -> Result<String, SchemaError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(SchemaError::InvalidType {
            path: path.to_string(),
            expected: "scalar",
            actual: type_name(other),
        }),
    }
}
