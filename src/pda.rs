//! Program-derived address search.
//!
//! An address is `sha256(seeds || [bump] || program_id || PDA_MARKER)` for the
//! highest bump whose digest does not decompress to an ed25519 point, so no
//! private key can exist for it. The curve test is behind [`CurveCheck`] so
//! callers can swap it out.

use crate::errors::LockerError;
use crate::Result;
use curve25519_dalek::edwards::CompressedEdwardsY;
use sha2::{Digest, Sha256};
use solana_program::pubkey::Pubkey;
use tracing::trace;

pub const MAX_SEED_LEN: usize = 32;
/// Includes the bump seed.
pub const MAX_SEEDS: usize = 16;
pub const PDA_MARKER: &[u8; 21] = b"ProgramDerivedAddress";

pub trait CurveCheck {
    fn is_on_curve(&self, bytes: &[u8; 32]) -> bool;
}

/// Edwards point decompression via curve25519-dalek.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Curve;

impl CurveCheck for Ed25519Curve {
    fn is_on_curve(&self, bytes: &[u8; 32]) -> bool {
        CompressedEdwardsY(*bytes).decompress().is_some()
    }
}

fn check_seeds(seeds: &[&[u8]]) -> Result<()> {
    if seeds.len() >= MAX_SEEDS {
        return Err(LockerError::InvalidSeeds(format!(
            "{} seeds given, at most {} allowed",
            seeds.len(),
            MAX_SEEDS - 1
        )));
    }
    if let Some(seed) = seeds.iter().find(|s| s.len() > MAX_SEED_LEN) {
        return Err(LockerError::InvalidSeeds(format!(
            "seed of {} bytes exceeds {} bytes",
            seed.len(),
            MAX_SEED_LEN
        )));
    }
    Ok(())
}

fn hash_candidate(program_id: &Pubkey, seeds: &[&[u8]], bump: u8) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_ref());
    hasher.update(PDA_MARKER);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

/// Computes the address for a known bump, rejecting on-curve digests.
pub fn create_program_address_with<C: CurveCheck>(
    curve: &C,
    program_id: &Pubkey,
    seeds: &[&[u8]],
    bump: u8,
) -> Result<Pubkey> {
    check_seeds(seeds)?;
    let digest = hash_candidate(program_id, seeds, bump);
    if curve.is_on_curve(&digest) {
        return Err(LockerError::InvalidSeeds(format!(
            "bump {} yields an on-curve address",
            bump
        )));
    }
    Ok(Pubkey::new_from_array(digest))
}

pub fn create_program_address(program_id: &Pubkey, seeds: &[&[u8]], bump: u8) -> Result<Pubkey> {
    create_program_address_with(&Ed25519Curve, program_id, seeds, bump)
}

/// Searches bumps from 255 down to 0 and returns the first off-curve address.
pub fn find_program_address_with<C: CurveCheck>(
    curve: &C,
    program_id: &Pubkey,
    seeds: &[&[u8]],
) -> Result<(Pubkey, u8)> {
    check_seeds(seeds)?;
    for bump in (0..=u8::MAX).rev() {
        let digest = hash_candidate(program_id, seeds, bump);
        if !curve.is_on_curve(&digest) {
            let address = Pubkey::new_from_array(digest);
            trace!(%address, bump, "derived program address");
            return Ok((address, bump));
        }
    }
    Err(LockerError::DerivationExhausted)
}

pub fn find_program_address(program_id: &Pubkey, seeds: &[&[u8]]) -> Result<(Pubkey, u8)> {
    find_program_address_with(&Ed25519Curve, program_id, seeds)
}
