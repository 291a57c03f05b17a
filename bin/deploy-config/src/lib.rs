use alloy_primitives::Address;
use config::{NetworkDescriptor, NetworkId, ProjectConfig};
use serde::Serialize;
use tracing::info;

/// One line of the network listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkRow {
    pub name: String,
    pub kind: &'static str,
    pub network_id: String,
    pub endpoint: String,
}

/// Summarise every configured network without touching secrets.
pub fn network_rows(config: &ProjectConfig) -> Vec<NetworkRow> {
    config
        .networks
        .iter()
        .map(|(name, descriptor)| NetworkRow {
            name: name.to_owned(),
            kind: if descriptor.is_static() {
                "static"
            } else {
                "deferred"
            },
            network_id: descriptor.network_id().to_string(),
            endpoint: descriptor.endpoint(),
        })
        .collect()
}

/// Connection a named network resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderSummary {
    pub network: String,
    pub url: String,
    /// Signing accounts; empty for nodes that manage their own.
    pub accounts: Vec<Address>,
}

/// Resolve `name` into a provider, invoking its factory when deferred.
///
/// With `check`, the node is asked for its network id, which must match the
/// configured one.
pub async fn resolve_provider(
    config: &ProjectConfig,
    name: &str,
    check: bool,
) -> eyre::Result<ProviderSummary> {
    let descriptor = config.network(name)?;

    let (summary, reported) = match descriptor {
        NetworkDescriptor::Static(network) => {
            let provider = network.connect()?;
            let summary = ProviderSummary {
                network: name.to_owned(),
                url: network.rpc_url(),
                accounts: Vec::new(),
            };
            let reported = if check {
                Some(client::net_version(&provider).await?)
            } else {
                None
            };
            (summary, reported)
        }
        NetworkDescriptor::Deferred(factory) => {
            let provider = factory.provider()?;
            let summary = ProviderSummary {
                network: name.to_owned(),
                url: factory.endpoint().display_template(),
                accounts: provider.accounts().to_vec(),
            };
            let reported = if check {
                Some(provider.net_version().await?)
            } else {
                None
            };
            (summary, reported)
        }
    };

    if let Some(reported) = reported {
        verify_network_id(name, descriptor.network_id(), reported)?;
        info!(network = name, network_id = reported, "Network id matches");
    }

    Ok(summary)
}

/// Fail when a node reports a network id other than the configured one.
pub fn verify_network_id(name: &str, expected: NetworkId, reported: u64) -> eyre::Result<()> {
    if !expected.matches(reported) {
        eyre::bail!("network `{name}` expects id {expected} but the node reports {reported}");
    }
    Ok(())
}
