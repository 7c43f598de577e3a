//! Environment-driven configuration.
//!
//! A `LockerConfig` is built once and passed by reference to every
//! instruction builder and client call. The token account and token mint are
//! plain inputs here; nothing derives them.

use crate::errors::LockerError;
use crate::Result;
use solana_program::pubkey::Pubkey;
use std::env;
use std::str::FromStr;

pub const DEFAULT_RPC_URL: &str = "http://localhost:8899";

pub const PROGRAM_ID_VAR: &str = "LOCKER_PROGRAM_ID";
pub const TOKEN_ACCOUNT_VAR: &str = "LOCKER_TOKEN_ACCOUNT";
pub const TOKEN_MINT_VAR: &str = "LOCKER_TOKEN_MINT";
pub const RPC_URL_VAR: &str = "LOCKER_RPC_URL";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockerConfig {
    /// Deployed locker program.
    pub program_id: Pubkey,
    /// SPL token account that mint and burn operate on.
    pub token_account: Pubkey,
    /// Mint of the wrapped token.
    pub token_mint: Pubkey,
    pub rpc_url: String,
}

impl LockerConfig {
    pub fn new(program_id: Pubkey, token_account: Pubkey, token_mint: Pubkey) -> Self {
        LockerConfig {
            program_id,
            token_account,
            token_mint,
            rpc_url: DEFAULT_RPC_URL.to_string(),
        }
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = rpc_url.into();
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<Pubkey> {
            let value = lookup(name)
                .ok_or_else(|| LockerError::MalformedInput(format!("{name} is not set")))?;
            parse_pubkey(name, &value)
        };

        let config = LockerConfig::new(
            required(PROGRAM_ID_VAR)?,
            required(TOKEN_ACCOUNT_VAR)?,
            required(TOKEN_MINT_VAR)?,
        );
        Ok(match lookup(RPC_URL_VAR) {
            Some(url) if !url.trim().is_empty() => config.with_rpc_url(url.trim()),
            _ => config,
        })
    }
}

/// Parses a base58 address, naming the field in the error.
pub fn parse_pubkey(field: &str, value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value.trim())
        .map_err(|e| LockerError::MalformedInput(format!("{field}: {value:?} is not an address ({e})")))
}
