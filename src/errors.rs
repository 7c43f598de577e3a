use thiserror::Error;

#[cfg(feature = "client")]
use solana_client::client_error::ClientError;

/// Errors that may be returned while deriving addresses, encoding
/// instructions or submitting them.
#[derive(Debug, Error)]
pub enum LockerError {
    #[error("no viable bump seed found for the given seeds")]
    DerivationExhausted,
    #[error("invalid seeds: {0}")]
    InvalidSeeds(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("could not serialize instruction: {0}")]
    Serialization(#[from] std::io::Error),
    /// Failure reported by the RPC node, passed through untouched.
    #[error("rpc request failed: {0}")]
    Upstream(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("transaction {0} was not confirmed")]
    Unconfirmed(String),
}

#[cfg(feature = "client")]
impl From<ClientError> for LockerError {
    fn from(e: ClientError) -> Self {
        LockerError::Upstream(Box::new(e))
    }
}
