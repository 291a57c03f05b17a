//! End-to-end checks of loading a project directory and resolving networks.


use alloy_primitives::address;
use config::{
    ConfigLoadError, MissingCredentialsError, ProjectConfig, ProviderError, DEFAULT_NETWORK,
};
use deploy_config::{network_rows, resolve_provider};
use setup::{project, write_local_config, write_private_keys, KEY_0, KEY_1};

fn deferred_error(config: &ProjectConfig, name: &str) -> MissingCredentialsError {
    let factory = config.network(name).unwrap().as_deferred().unwrap();
    match factory.provider().unwrap_err() {
        ProviderError::MissingCredentials(err) => err,
        other => panic!("unexpected error for {name}: {other}"),
    }
}

#[test]
fn test_two_keys_without_local_config() {
    let dir = project();
    write_private_keys(&dir, &[KEY_0, KEY_1]);

    let config = ProjectConfig::load(dir.path()).unwrap();

    let mainnet = config.network("thunder-mainnet").unwrap().as_deferred().unwrap();
    let provider = mainnet.provider().unwrap();
    assert_eq!(
        provider.accounts(),
        &[
            address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266"),
            address!("70997970C51812dc3A010C7d01b50e0d17dc79C8"),
        ]
    );

    let err = deferred_error(&config, "ropsten");
    assert_eq!(err, MissingCredentialsError::InfuraProjectId);
    assert!(err.to_string().contains("infura_project_id"));
}

#[test]
fn test_keys_added_after_first_failure() {
    let dir = project();

    let config = ProjectConfig::load(dir.path()).unwrap();
    assert_eq!(
        deferred_error(&config, "localchain"),
        MissingCredentialsError::PrivateKeys
    );

    write_private_keys(&dir, &[KEY_1]);
    let config = ProjectConfig::load(dir.path()).unwrap();
    let provider = config
        .network("localchain")
        .unwrap()
        .as_deferred()
        .unwrap()
        .provider()
        .unwrap();

    assert_eq!(provider.url().as_str(), "http://localhost:8545/");
    assert_eq!(
        provider.accounts(),
        &[address!("70997970C51812dc3A010C7d01b50e0d17dc79C8")]
    );
}

#[test]
fn test_ropsten_needs_project_secret() {
    let dir = project();
    write_private_keys(&dir, &[KEY_0]);
    write_local_config(&dir, "{\n  // secret not set yet\n  infura_project_id: \"abc\",\n}\n");

    let config = ProjectConfig::load(dir.path()).unwrap();
    let err = deferred_error(&config, "ropsten");
    assert_eq!(err, MissingCredentialsError::InfuraProjectSecret);
    assert_eq!(err.field(), "infura_project_secret");
}

#[test]
fn test_ropsten_with_full_credentials() {
    let dir = project();
    write_private_keys(&dir, &[KEY_0, KEY_1]);
    write_local_config(
        &dir,
        r#"{ "infura_project_id": "abc", "infura_project_secret": "xyz" }"#,
    );

    let config = ProjectConfig::load(dir.path()).unwrap();
    let provider = config
        .network("ropsten")
        .unwrap()
        .as_deferred()
        .unwrap()
        .provider()
        .unwrap();

    assert_eq!(provider.url().as_str(), "https://ropsten.infura.io/v3/abc");
    assert_eq!(provider.accounts().len(), 2);
}

#[test]
fn test_malformed_local_config_aborts() {
    let dir = project();
    write_private_keys(&dir, &[KEY_0]);
    write_local_config(&dir, "{ infura_project_id: abc }");

    let err = ProjectConfig::load(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigLoadError::Parse { .. }));
    assert!(err.to_string().contains("local.jsonc"));
}

#[test]
fn test_network_listing() {
    let dir = project();
    let config = ProjectConfig::load(dir.path()).unwrap();

    let rows = network_rows(&config);
    assert_eq!(rows.len(), 7);

    let devnet = rows.iter().find(|row| row.name == "devnet").unwrap();
    assert_eq!(devnet.kind, "static");
    assert_eq!(devnet.network_id, "*");
    assert_eq!(devnet.endpoint, "http://127.0.0.1:8545");

    let ropsten = rows.iter().find(|row| row.name == "ropsten").unwrap();
    assert_eq!(ropsten.kind, "deferred");
    assert_eq!(ropsten.network_id, "3");
}

#[tokio::test]
async fn test_static_networks_resolve_without_secrets() {
    let dir = project();
    let config = ProjectConfig::load(dir.path()).unwrap();

    for name in [DEFAULT_NETWORK, "devnet"] {
        let summary = resolve_provider(&config, name, false).await.unwrap();
        assert!(summary.accounts.is_empty());
    }
}

#[tokio::test]
async fn test_resolve_unknown_network() {
    let dir = project();
    let config = ProjectConfig::load(dir.path()).unwrap();

    let err = resolve_provider(&config, "kovan", false).await.unwrap_err();
    assert!(err.to_string().contains("kovan"));
}

#[tokio::test]
async fn test_resolve_deferred_lists_accounts() {
    let dir = project();
    write_private_keys(&dir, &[KEY_0, KEY_1]);
    let config = ProjectConfig::load(dir.path()).unwrap();

    let summary = resolve_provider(&config, "thunder-testnet", false)
        .await
        .unwrap();
    assert_eq!(summary.url, "https://testnet-rpc.thundercore.com");
    assert_eq!(summary.accounts.len(), 2);
}
