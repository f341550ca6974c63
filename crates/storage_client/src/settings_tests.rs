use super::*;
use secrecy::ExposeSecret;
use serial_test::serial;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_settings(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write settings");
    file
}

#[test]
fn test_load_full_settings() {
    let file = write_settings(
        r#"
storage_api_url = "https://connection.keboola.com"
storage_api_token = "123-secret"
vault_api_url = "https://vault.keboola.com"
branch_id = "1002"
request_timeout_secs = 60
"#,
    );

    let settings = ClientSettings::load(file.path()).expect("Settings should load");

    assert_eq!(settings.storage_api_url, "https://connection.keboola.com");
    assert_eq!(settings.storage_api_token.expose_secret(), "123-secret");
    assert_eq!(settings.vault_api_url, "https://vault.keboola.com");
    assert_eq!(settings.branch_id.as_deref(), Some("1002"));
    assert_eq!(settings.request_timeout(), Duration::from_secs(60));
}

#[test]
fn test_load_numeric_branch_and_default_timeout() {
    let file = write_settings(
        r#"
storage_api_url = "https://connection.keboola.com"
storage_api_token = "123-secret"
vault_api_url = "https://vault.keboola.com"
branch_id = 1002
"#,
    );

    let settings = ClientSettings::load(file.path()).expect("Settings should load");

    assert_eq!(settings.branch_id.as_deref(), Some("1002"));
    assert_eq!(settings.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn test_load_without_branch() {
    let file = write_settings(
        r#"
storage_api_url = "https://connection.keboola.com"
storage_api_token = "123-secret"
vault_api_url = "https://vault.keboola.com"
"#,
    );

    let settings = ClientSettings::load(file.path()).expect("Settings should load");

    assert!(settings.branch_id.is_none());
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");

    let err = ClientSettings::load(&path).unwrap_err();

    assert!(matches!(err, Error::Config(ref message) if message.starts_with("Settings file not found")));
}

#[test]
fn test_load_missing_required_field() {
    let file = write_settings(r#"storage_api_url = "https://connection.keboola.com""#);

    let err = ClientSettings::load(file.path()).unwrap_err();

    assert!(err.to_string().contains("Failed to parse settings file"));
}

#[test]
fn test_debug_output_redacts_token() {
    let settings = ClientSettings::new(
        "https://connection.keboola.com",
        "super-secret-token",
        "https://vault.keboola.com",
    );

    let output = format!("{settings:?}");

    assert!(!output.contains("super-secret-token"));
    assert!(output.contains("https://connection.keboola.com"));
}

#[test]
fn test_builders() {
    let settings = ClientSettings::new("a", "b", "c")
        .with_branch("1002")
        .with_request_timeout_secs(5);

    assert_eq!(settings.branch_id.as_deref(), Some("1002"));
    assert_eq!(settings.request_timeout(), Duration::from_secs(5));
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_from_lookup_complete() {
    let settings = ClientSettings::from_lookup(lookup(&[
        (ENV_STORAGE_API_URL, "https://connection.keboola.com"),
        (ENV_STORAGE_API_TOKEN, "token"),
        (ENV_VAULT_API_URL, "https://vault.keboola.com"),
        (ENV_BRANCH_ID, "1002"),
        (ENV_REQUEST_TIMEOUT_SECS, "10"),
    ]))
    .expect("Settings should be built");

    assert_eq!(settings.branch_id.as_deref(), Some("1002"));
    assert_eq!(settings.request_timeout_secs, 10);
}

#[test]
fn test_from_lookup_blank_branch_is_unset() {
    let settings = ClientSettings::from_lookup(lookup(&[
        (ENV_STORAGE_API_URL, "https://connection.keboola.com"),
        (ENV_STORAGE_API_TOKEN, "token"),
        (ENV_VAULT_API_URL, "https://vault.keboola.com"),
        (ENV_BRANCH_ID, "  "),
    ]))
    .expect("Settings should be built");

    assert!(settings.branch_id.is_none());
    assert_eq!(settings.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
}

#[test]
fn test_from_lookup_missing_token() {
    let err = ClientSettings::from_lookup(lookup(&[
        (ENV_STORAGE_API_URL, "https://connection.keboola.com"),
        (ENV_VAULT_API_URL, "https://vault.keboola.com"),
    ]))
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid client settings: Environment variable KBC_TOKEN is not set"
    );
}

#[test]
fn test_from_lookup_invalid_timeout() {
    let err = ClientSettings::from_lookup(lookup(&[
        (ENV_STORAGE_API_URL, "https://connection.keboola.com"),
        (ENV_STORAGE_API_TOKEN, "token"),
        (ENV_VAULT_API_URL, "https://vault.keboola.com"),
        (ENV_REQUEST_TIMEOUT_SECS, "soon"),
    ]))
    .unwrap_err();

    assert!(err.to_string().contains("KBC_REQUEST_TIMEOUT_SECS"));
}

#[test]
#[serial]
fn test_from_env() {
    // SAFETY: serialized with the other environment tests.
    unsafe {
        std::env::set_var(ENV_STORAGE_API_URL, "https://connection.keboola.com");
        std::env::set_var(ENV_STORAGE_API_TOKEN, "env-token");
        std::env::set_var(ENV_VAULT_API_URL, "https://vault.keboola.com");
        std::env::remove_var(ENV_BRANCH_ID);
        std::env::remove_var(ENV_REQUEST_TIMEOUT_SECS);
    }

    let settings = ClientSettings::from_env();

    unsafe {
        std::env::remove_var(ENV_STORAGE_API_URL);
        std::env::remove_var(ENV_STORAGE_API_TOKEN);
        std::env::remove_var(ENV_VAULT_API_URL);
    }

    let settings = settings.expect("Settings should be read from the environment");
    assert_eq!(settings.storage_api_token.expose_secret(), "env-token");
    assert!(settings.branch_id.is_none());
}
