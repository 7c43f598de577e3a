use crate::pda::find_program_address;
use crate::Result;
use solana_program::pubkey::Pubkey;

pub const SEED: &[u8] = b"Locker";

/// Accounts owned by the locker program, each at a program-derived address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockerAccount {
    State,
    Vault,
    MintLog,
    BurnLog,
}

impl LockerAccount {
    pub const ALL: [LockerAccount; 4] = [
        LockerAccount::State,
        LockerAccount::Vault,
        LockerAccount::MintLog,
        LockerAccount::BurnLog,
    ];

    pub fn label(&self) -> &'static [u8] {
        match self {
            LockerAccount::State => b"Init",
            LockerAccount::Vault => b"Vault",
            LockerAccount::MintLog => b"Mint",
            LockerAccount::BurnLog => b"Burn",
        }
    }

    pub fn seeds(&self) -> [&'static [u8]; 2] {
        [SEED, self.label()]
    }

    pub fn find_address(&self, program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        find_program_address(program_id, &self.seeds())
    }
}

pub struct Locker;
impl Locker {
    pub fn find_state_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        LockerAccount::State.find_address(program_id)
    }

    pub fn find_vault_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        LockerAccount::Vault.find_address(program_id)
    }

    pub fn find_mint_log_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        LockerAccount::MintLog.find_address(program_id)
    }

    pub fn find_burn_log_address(program_id: &Pubkey) -> Result<(Pubkey, u8)> {
        LockerAccount::BurnLog.find_address(program_id)
    }
}

/// All four derived addresses for one program, recomputed on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockerAddresses {
    pub state: Pubkey,
    pub vault: Pubkey,
    pub mint_log: Pubkey,
    pub burn_log: Pubkey,
}

impl LockerAddresses {
    pub fn derive(program_id: &Pubkey) -> Result<Self> {
        Ok(LockerAddresses {
            state: Locker::find_state_address(program_id)?.0,
            vault: Locker::find_vault_address(program_id)?.0,
            mint_log: Locker::find_mint_log_address(program_id)?.0,
            burn_log: Locker::find_burn_log_address(program_id)?.0,
        })
    }
}
