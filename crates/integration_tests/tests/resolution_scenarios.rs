//! End-to-end resolution scenarios against mocked Storage and Vault APIs.
//!
//! Each test connects the real HTTP clients (`ClientWrapper::connect`,
//! `VaultApiClient`) to a wiremock server and runs the full pipeline.

use anyhow::Result;
use config_resolver::{SHARED_CODE_COMPONENT_ID, VARIABLES_COMPONENT_ID};
use integration_tests::fixtures::{self, DEFAULT_BRANCH_ID, DEV_BRANCH_ID};
use integration_tests::{connect_resolver, init_test_logging, KeboolaMockServer};
use serde_json::json;
use tracing::info;

async fn main_branch_server() -> KeboolaMockServer {
    let server = KeboolaMockServer::new().await;
    server.mock_dev_branches(DEFAULT_BRANCH_ID, &[DEV_BRANCH_ID]).await;
    server
        .mock_configuration(None, SHARED_CODE_COMPONENT_ID, fixtures::shared_code::configuration())
        .await;
    server
        .mock_configuration(None, VARIABLES_COMPONENT_ID, fixtures::variables::configuration())
        .await;
    server
        .mock_vault_variables(DEFAULT_BRANCH_ID, &[("db_password", "main-secret")])
        .await;
    server
}

#[tokio::test]
async fn test_full_pipeline_with_default_values() -> Result<()> {
    init_test_logging();
    info!("Testing shared code and variables with the default values row");

    let server = main_branch_server().await;
    let resolver = connect_resolver(&server.settings(None)).await?;

    let resolved = resolver
        .resolve_configuration(&fixtures::documents::transformation())
        .await?;

    assert_eq!(
        resolved.configuration["parameters"],
        json!({
            "blocks": [
                {
                    "name": "Main",
                    "script": [
                        "SELECT * FROM orders LEFT JOIN customers ON b.a_id = a.id",
                        "default value"
                    ]
                }
            ],
            "password": "main-secret"
        })
    );
    assert_eq!(
        resolved.configuration["shared_code_row_ids"],
        json!(["first_code", "code_with_variable"])
    );
    Ok(())
}

#[tokio::test]
async fn test_full_pipeline_with_explicit_values_row() -> Result<()> {
    init_test_logging();

    let server = main_branch_server().await;
    let resolver = connect_resolver(&server.settings(None))
        .await?
        .with_variable_values_id("702");

    let resolved = resolver
        .resolve_configuration(&fixtures::documents::transformation())
        .await?;

    assert_eq!(
        resolved.configuration["parameters"]["blocks"][0]["script"],
        json!([
            "SELECT * FROM staging_orders LEFT JOIN staging_customers ON b.a_id = a.id",
            "staging value"
        ])
    );
    Ok(())
}

#[tokio::test]
async fn test_full_pipeline_with_inline_values() -> Result<()> {
    init_test_logging();

    let server = main_branch_server().await;
    let resolver = connect_resolver(&server.settings(None))
        .await?
        .with_variable_values_data(json!({
            "values": [
                {"name": "variable", "value": "inline"},
                {"name": "tab1", "value": "t1"},
                {"name": "tab2", "value": "t2"}
            ]
        }));

    let resolved = resolver
        .resolve_configuration(&fixtures::documents::transformation())
        .await?;

    assert_eq!(
        resolved.configuration["parameters"]["blocks"][0]["script"],
        json!(["SELECT * FROM t1 LEFT JOIN t2 ON b.a_id = a.id", "inline"])
    );
    Ok(())
}

#[tokio::test]
async fn test_dev_branch_overrides_configuration_and_vault() -> Result<()> {
    init_test_logging();
    info!("Testing resolution on a development branch");

    let server = KeboolaMockServer::new().await;
    server.mock_dev_branches(DEFAULT_BRANCH_ID, &[DEV_BRANCH_ID]).await;
    server
        .mock_configuration(
            Some(DEV_BRANCH_ID),
            SHARED_CODE_COMPONENT_ID,
            fixtures::shared_code::configuration(),
        )
        .await;
    server
        .mock_configuration(
            Some(DEV_BRANCH_ID),
            VARIABLES_COMPONENT_ID,
            fixtures::variables::configuration(),
        )
        .await;
    server
        .mock_vault_variables(DEV_BRANCH_ID, &[("db_password", "branch-secret")])
        .await;

    let resolver = connect_resolver(&server.settings(Some(DEV_BRANCH_ID))).await?;
    assert_eq!(resolver.branch_id(), DEV_BRANCH_ID);

    let resolved = resolver
        .resolve_configuration(&fixtures::documents::transformation())
        .await?;

    assert_eq!(
        resolved.configuration["parameters"]["password"],
        json!("branch-secret")
    );
    Ok(())
}

#[tokio::test]
async fn test_document_without_references_passes_through() -> Result<()> {
    init_test_logging();

    let server = main_branch_server().await;
    let resolver = connect_resolver(&server.settings(None)).await?;
    let document = json!({
        "parameters": {"query": "SELECT 1", "limits": [1, 2, 3], "enabled": true},
        "storage": {"input": {"tables": []}}
    });

    let resolved = resolver.resolve_configuration(&document).await?;

    assert_eq!(resolved.configuration, document);
    Ok(())
}

#[tokio::test]
async fn test_numeric_identifiers_in_document() -> Result<()> {
    init_test_logging();

    let server = main_branch_server().await;
    let resolver = connect_resolver(&server.settings(None)).await?;

    let resolved = resolver
        .resolve_configuration(&json!({
            "variables_id": 601,
            "variables_values_id": 702,
            "parameters": {"value": "{{ variable }}"}
        }))
        .await?;

    assert_eq!(
        resolved.configuration["parameters"]["value"],
        json!("staging value")
    );
    Ok(())
}
