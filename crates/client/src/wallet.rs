//! Wallet provider that signs with a whole set of local private keys.
//!
//! Every key becomes a signing account. The first key is the default sender,
//! the remaining ones are registered so that a transaction `from` any of
//! them is signed locally before it reaches the node.

use crate::{net_version, parse_rpc_url, ClientError};
use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
use reqwest::Url;
use std::fmt;
use tracing::debug;

/// A connection handle bound to one RPC endpoint and a set of signing accounts.
#[derive(Clone)]
pub struct WalletProvider {
    url: Url,
    accounts: Vec<Address>,
    provider: DynProvider,
}

impl WalletProvider {
    /// The RPC endpoint this provider talks to.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Signing accounts, in the order their keys were supplied.
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Account used when a transaction does not name a sender.
    pub fn default_account(&self) -> Option<Address> {
        self.accounts.first().copied()
    }

    /// The underlying alloy provider, with the wallet filler installed.
    pub const fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Network id reported by the remote node.
    pub async fn net_version(&self) -> Result<u64, ClientError> {
        net_version(&self.provider).await
    }
}

impl fmt::Debug for WalletProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletProvider")
            .field("url", &self.url.as_str())
            .field("accounts", &self.accounts)
            .finish_non_exhaustive()
    }
}

/// Create a provider with wallet signing capability from a list of private keys.
///
/// Keys are hex strings with or without the `0x` prefix. No request is sent
/// to the endpoint; the connection is established lazily by the first call.
pub fn create_multi_wallet_provider<S>(
    rpc_url: &str,
    private_keys: &[S],
) -> Result<WalletProvider, ClientError>
where
    S: AsRef<str>,
{
    let url = parse_rpc_url(rpc_url)?;

    let mut signers = private_keys.iter().enumerate().map(|(index, key)| {
        key.as_ref()
            .parse::<PrivateKeySigner>()
            .map_err(|e| ClientError::InvalidPrivateKey {
                index,
                reason: e.to_string(),
            })
    });

    let first = signers.next().ok_or(ClientError::NoSigners)??;
    let mut accounts = vec![first.address()];
    let mut wallet = EthereumWallet::new(first);
    for signer in signers {
        let signer = signer?;
        accounts.push(signer.address());
        wallet.register_signer(signer);
    }

    debug!(
        host = url.host_str().unwrap_or_default(),
        accounts = accounts.len(),
        "Built wallet provider"
    );

    let provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(url.clone())
        .erased();

    Ok(WalletProvider {
        url,
        accounts,
        provider,
    })
}
