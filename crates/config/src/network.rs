//! Named networks the deploy tool can target.
//!
//! A network is either static (host, port and transaction defaults of a node
//! that manages its own accounts) or deferred: a [`ProviderFactory`] that
//! builds a wallet provider from the [`SecretBundle`] only when invoked, so
//! selecting one network never requires the secrets of another.

use crate::{
    error::{MissingCredentialsError, ProviderError},
    secrets::SecretBundle,
};
use alloy_provider::DynProvider;
use alloy_rpc_types::TransactionRequest;
use client::{ClientError, WalletProvider};
use serde::{Serialize, Serializer};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Network identifier a node must report, or any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkId {
    /// Matches every network (`"*"`).
    Any,
    Id(u64),
}

impl NetworkId {
    /// Whether a node reporting `id` belongs to this network.
    pub const fn matches(&self, id: u64) -> bool {
        match self {
            Self::Any => true,
            Self::Id(expected) => *expected == id,
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl Serialize for NetworkId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A node reachable at a fixed host and port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticNetwork {
    pub host: String,
    pub port: u16,
    pub network_id: NetworkId,
    /// Gas limit sent with each transaction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas: Option<u64>,
    /// Gas price in wei
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<u128>,
    /// Whether the tool talks to the node over websockets
    pub websockets: bool,
}

impl StaticNetwork {
    pub fn new(host: impl Into<String>, port: u16, network_id: NetworkId) -> Self {
        Self {
            host: host.into(),
            port,
            network_id,
            gas: None,
            gas_price: None,
            websockets: false,
        }
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn with_websockets(mut self, websockets: bool) -> Self {
        self.websockets = websockets;
        self
    }

    /// Endpoint of the node: `ws://` when websockets are enabled, `http://` otherwise.
    pub fn rpc_url(&self) -> String {
        let scheme = if self.websockets { "ws" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    /// HTTP endpoint of the node, whatever transport the tool subscribes with.
    pub fn http_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Provider for the node's own (unlocked) accounts, over HTTP.
    pub fn connect(&self) -> Result<DynProvider, ClientError> {
        client::create_provider(&self.http_url())
    }

    /// Fill transaction defaults the caller left unset.
    pub fn apply_defaults(&self, mut tx: TransactionRequest) -> TransactionRequest {
        if tx.gas.is_none() {
            tx.gas = self.gas;
        }
        if tx.gas_price.is_none() {
            tx.gas_price = self.gas_price;
        }
        tx
    }
}

/// Remote endpoint of a deferred network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpcEndpoint {
    /// A URL usable as is.
    Fixed(String),
    /// `https://<network>.infura.io/v3/<infura_project_id>`; needs both
    /// Infura credentials.
    Infura { network: String },
}

impl RpcEndpoint {
    pub fn fixed(url: impl Into<String>) -> Self {
        Self::Fixed(url.into())
    }

    pub fn infura(network: impl Into<String>) -> Self {
        Self::Infura {
            network: network.into(),
        }
    }

    /// Endpoint with the project id left as a placeholder.
    pub fn display_template(&self) -> String {
        match self {
            Self::Fixed(url) => url.clone(),
            Self::Infura { network } => {
                format!("https://{network}.infura.io/v3/<infura_project_id>")
            }
        }
    }
}

/// Parameters a factory resolved from the secret bundle.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedProvider<'a> {
    pub rpc_url: String,
    pub private_keys: &'a [String],
}

impl fmt::Debug for ResolvedProvider<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedProvider")
            .field("rpc_url", &self.rpc_url)
            .field("private_keys", &self.private_keys.len())
            .finish()
    }
}

/// Builds a wallet provider on demand from the shared secret bundle.
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    endpoint: RpcEndpoint,
    network_id: NetworkId,
    secrets: Arc<SecretBundle>,
}

impl ProviderFactory {
    pub fn new(endpoint: RpcEndpoint, network_id: NetworkId, secrets: Arc<SecretBundle>) -> Self {
        Self {
            endpoint,
            network_id,
            secrets,
        }
    }

    pub const fn endpoint(&self) -> &RpcEndpoint {
        &self.endpoint
    }

    pub const fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Validate the secrets this endpoint needs and return the connection
    /// parameters.
    ///
    /// The Infura project secret must be present but is not part of the
    /// endpoint URL.
    pub fn resolve(&self) -> Result<ResolvedProvider<'_>, MissingCredentialsError> {
        let private_keys = self
            .secrets
            .private_keys()
            .ok_or(MissingCredentialsError::PrivateKeys)?;
        if private_keys.is_empty() {
            return Err(MissingCredentialsError::EmptyPrivateKeys);
        }

        let rpc_url = match &self.endpoint {
            RpcEndpoint::Fixed(url) => url.clone(),
            RpcEndpoint::Infura { network } => {
                let project_id = self
                    .secrets
                    .infura_project_id()
                    .ok_or(MissingCredentialsError::InfuraProjectId)?;
                self.secrets
                    .infura_project_secret()
                    .ok_or(MissingCredentialsError::InfuraProjectSecret)?;
                format!("https://{network}.infura.io/v3/{project_id}")
            }
        };

        Ok(ResolvedProvider {
            rpc_url,
            private_keys,
        })
    }

    /// Build a fresh provider signing with every available private key.
    pub fn provider(&self) -> Result<WalletProvider, ProviderError> {
        let resolved = self.resolve()?;
        let provider =
            client::create_multi_wallet_provider(&resolved.rpc_url, resolved.private_keys)?;
        Ok(provider)
    }
}

/// How to reach one named network.
#[derive(Debug, Clone)]
pub enum NetworkDescriptor {
    Static(StaticNetwork),
    Deferred(ProviderFactory),
}

impl NetworkDescriptor {
    /// A deferred entry closing over `secrets`.
    pub fn deferred(
        endpoint: RpcEndpoint,
        network_id: NetworkId,
        secrets: &Arc<SecretBundle>,
    ) -> Self {
        Self::Deferred(ProviderFactory::new(endpoint, network_id, Arc::clone(secrets)))
    }

    pub const fn network_id(&self) -> NetworkId {
        match self {
            Self::Static(network) => network.network_id,
            Self::Deferred(factory) => factory.network_id,
        }
    }

    pub const fn is_static(&self) -> bool {
        matches!(self, Self::Static(_))
    }

    pub const fn as_static(&self) -> Option<&StaticNetwork> {
        match self {
            Self::Static(network) => Some(network),
            Self::Deferred(_) => None,
        }
    }

    pub const fn as_deferred(&self) -> Option<&ProviderFactory> {
        match self {
            Self::Static(_) => None,
            Self::Deferred(factory) => Some(factory),
        }
    }

    /// Endpoint for display, without secrets.
    pub fn endpoint(&self) -> String {
        match self {
            Self::Static(network) => network.rpc_url(),
            Self::Deferred(factory) => factory.endpoint.display_template(),
        }
    }
}

impl Serialize for NetworkDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct DeferredSummary<'a> {
            provider: &'a str,
            network_id: NetworkId,
        }

        match self {
            Self::Static(network) => network.serialize(serializer),
            Self::Deferred(factory) => {
                let provider = factory.endpoint.display_template();
                DeferredSummary {
                    provider: &provider,
                    network_id: factory.network_id,
                }
                .serialize(serializer)
            }
        }
    }
}

/// Network name to descriptor.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NetworkMap(BTreeMap<String, NetworkDescriptor>);

impl NetworkMap {
    pub fn get(&self, name: &str) -> Option<&NetworkDescriptor> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NetworkDescriptor)> {
        self.0.iter().map(|(name, descriptor)| (name.as_str(), descriptor))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, NetworkDescriptor)> for NetworkMap {
    fn from_iter<T: IntoIterator<Item = (String, NetworkDescriptor)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 20 gwei
const DEVNET_GAS_PRICE: u128 = 20_000_000_000;

/// Build the fixed set of networks. Deferred entries share `secrets`.
pub fn build_network_map(secrets: &Arc<SecretBundle>) -> NetworkMap {
    let deferred = |url: &str, id: u64| {
        NetworkDescriptor::deferred(RpcEndpoint::fixed(url), NetworkId::Id(id), secrets)
    };

    [
        (
            "development",
            NetworkDescriptor::Static(StaticNetwork::new(
                "127.0.0.1",
                9545,
                NetworkId::Id(5777),
            )),
        ),
        (
            "devnet",
            NetworkDescriptor::Static(
                StaticNetwork::new("127.0.0.1", 8545, NetworkId::Any)
                    .with_gas_price(DEVNET_GAS_PRICE)
                    .with_websockets(false),
            ),
        ),
        ("localchain", deferred("http://localhost:8545", 19)),
        // First PaLa R1 testnet, briefly alongside thunder-testnet.
        ("thunder-venus", deferred("https://venus-rpc.thundercore.com", 18)),
        ("thunder-testnet", deferred("https://testnet-rpc.thundercore.com", 18)),
        ("thunder-mainnet", deferred("https://mainnet-rpc.thundercore.com", 108)),
        (
            "ropsten",
            NetworkDescriptor::deferred(RpcEndpoint::infura("ropsten"), NetworkId::Id(3), secrets),
        ),
    ]
    .into_iter()
    .map(|(name, descriptor)| (name.to_owned(), descriptor))
    .collect()
}
