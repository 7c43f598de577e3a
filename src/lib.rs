extern crate solana_program;

#[cfg(feature = "client")]
pub mod client;
pub mod config;
pub mod errors;
pub mod instruction;
pub mod pda;
pub mod sdk;
pub mod state;

pub use errors::LockerError;

pub type Result<T> = std::result::Result<T, LockerError>;
