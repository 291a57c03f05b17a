mod wallet;

use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use reqwest::Url;
use thiserror::Error;
pub use wallet::{create_multi_wallet_provider, WalletProvider};

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error talking to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error with private key
    #[error("Invalid private key #{index}: {reason}")]
    InvalidPrivateKey { index: usize, reason: String },

    /// A wallet provider needs at least one signing key
    #[error("No private keys supplied for wallet provider")]
    NoSigners,
}

/// Parse an RPC endpoint string.
pub fn parse_rpc_url(rpc_url: &str) -> Result<Url, ClientError> {
    rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{rpc_url}: {e}")))
}

/// Convenience function to create an ethereum rpc provider from url.
///
/// The provider carries no wallet; transactions are signed by accounts the
/// node itself manages.
pub fn create_provider(rpc_url: &str) -> Result<DynProvider, ClientError> {
    let url = parse_rpc_url(rpc_url)?;
    let provider = ProviderBuilder::new().connect_http(url).erased();

    Ok(provider)
}

/// Query the network id (`net_version`) reported by the node behind `provider`.
pub async fn net_version<P>(provider: &P) -> Result<u64, ClientError>
where
    P: Provider,
{
    provider
        .get_net_version()
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        let result = create_provider("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_local_url() {
        assert!(create_provider("http://127.0.0.1:9545").is_ok());
    }
}
