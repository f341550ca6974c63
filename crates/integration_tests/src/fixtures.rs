//! Test fixtures for integration tests.
//!
//! Stored configurations as the Storage API returns them, plus the job
//! configurations that reference them.

use serde_json::{json, Value};

pub const DEFAULT_BRANCH_ID: &str = "1001";
pub const DEV_BRANCH_ID: &str = "1002";
pub const SHARED_CODE_ID: &str = "501";
pub const VARIABLES_ID: &str = "601";

/// Shared code configurations.
pub mod shared_code {
    use super::*;

    /// A shared code configuration with a SQL join, a short snippet and a
    /// snippet that itself references a variable.
    pub fn configuration() -> Value {
        json!({
            "id": SHARED_CODE_ID,
            "name": "Shared SQL",
            "configuration": {"componentId": "keboola.snowflake-transformation"},
            "rows": [
                {
                    "id": "first_code",
                    "name": "Join",
                    "configuration": {
                        "code_content": [
                            "SELECT * FROM {{tab1}}",
                            "LEFT JOIN {{tab2}} ON b.a_id = a.id"
                        ]
                    }
                },
                {
                    "id": "secondCode",
                    "name": "Short",
                    "configuration": {"code_content": ["bar"]}
                },
                {
                    "id": "code_with_variable",
                    "name": "Parameterized",
                    "configuration": {"code_content": ["{{ variable }}"]}
                }
            ]
        })
    }

    /// A row that carries a key the row schema does not allow.
    pub fn invalid_row() -> Value {
        json!({
            "id": "invalid",
            "configuration": {"code_content": ["SELECT 1"], "foo": "bar"}
        })
    }
}

/// Variables configurations.
pub mod variables {
    use super::*;

    pub fn configuration() -> Value {
        json!({
            "id": VARIABLES_ID,
            "name": "Variables",
            "configuration": {
                "variables": [
                    {"name": "variable", "type": "string"},
                    {"name": "tab1", "type": "string"},
                    {"name": "tab2", "type": "string"}
                ],
                "default_values_id": "701"
            },
            "rows": [
                {
                    "id": 701,
                    "name": "Defaults",
                    "configuration": {
                        "values": [
                            {"name": "variable", "value": "default value"},
                            {"name": "tab1", "value": "orders"},
                            {"name": "tab2", "value": "customers"}
                        ]
                    }
                },
                {
                    "id": 702,
                    "name": "Staging",
                    "configuration": {
                        "values": [
                            {"name": "variable", "value": "staging value"},
                            {"name": "tab1", "value": "staging_orders"},
                            {"name": "tab2", "value": "staging_customers"}
                        ]
                    }
                }
            ]
        })
    }
}

/// Job configurations fed to the resolver.
pub mod documents {
    use super::*;

    /// Uses shared code and variables; the join snippet needs `tab1`/`tab2`.
    pub fn transformation() -> Value {
        json!({
            "shared_code_id": SHARED_CODE_ID,
            "shared_code_row_ids": ["first_code", "code_with_variable"],
            "variables_id": VARIABLES_ID,
            "parameters": {
                "blocks": [
                    {
                        "name": "Main",
                        "script": ["{{ first_code }}", "{{ code_with_variable }}"]
                    }
                ],
                "password": "{{ vault.db_password }}"
            }
        })
    }
}
