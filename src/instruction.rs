use crate::errors::LockerError;
use crate::Result;
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

pub const FOREIGN_ADDRESS_LEN: usize = 20;

/// Destination address on the foreign chain. All zeroes when unused.
#[derive(Clone, Copy, Default, BorshSerialize, BorshDeserialize, PartialEq, Eq, Hash)]
pub struct ForeignAddress(pub [u8; FOREIGN_ADDRESS_LEN]);

impl ForeignAddress {
    pub fn zeroed() -> Self {
        ForeignAddress::default()
    }

    pub fn as_bytes(&self) -> &[u8; FOREIGN_ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for ForeignAddress {
    type Err = LockerError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| LockerError::MalformedInput(format!("foreign address {s:?}: {e}")))?;
        let bytes: [u8; FOREIGN_ADDRESS_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            LockerError::MalformedInput(format!(
                "foreign address must be {} bytes, got {}",
                FOREIGN_ADDRESS_LEN,
                b.len()
            ))
        })?;
        Ok(ForeignAddress(bytes))
    }
}

impl fmt::Display for ForeignAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ForeignAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ForeignAddress({self})")
    }
}

// Variant order is the opcode. Do not reorder.
#[derive(Clone, BorshSerialize, BorshDeserialize, PartialEq, Eq, Debug)]
pub enum LockerInstruction {
    /// Creates the state, vault and log accounts and records the authority.
    ///
    /// Accounts expected:
    ///
    /// 0. `[signer]` The payer funding the new accounts
    /// 1. `[writable]` The state account, PDA of `["Locker", "Init"]`
    /// 2. `[writable]` The vault account, PDA of `["Locker", "Vault"]`
    /// 3. `[writable]` The mint log, PDA of `["Locker", "Mint"]`
    /// 4. `[writable]` The burn log, PDA of `["Locker", "Burn"]`
    /// 5. `[]` The locker program itself
    /// 6. `[]` The system program
    /// 7. `[]` The rent sysvar
    Initialize { authority: Pubkey },
    /// Moves `amount` lamports from the owner into the vault and logs the
    /// foreign destination.
    ///
    /// Accounts expected:
    ///
    /// 0. `[signer]` The owner of the locked funds
    /// 1. `[writable]` The state account
    /// 2. `[writable]` The vault account
    /// 3. `[writable]` The mint log
    /// 4. `[]` The system program
    Lock {
        amount: u64,
        foreign_address: ForeignAddress,
    },
    /// Pays `amount` out of the vault to the destination.
    ///
    /// Accounts expected:
    ///
    /// 0. `[signer]` The payer, must be the recorded authority
    /// 1. `[writable]` The state account
    /// 2. `[writable]` The vault account
    /// 3. `[writable]` The destination account
    /// 4. `[]` The system program
    Release { amount: u64 },
    /// Mints `amount` wrapped tokens into the token account.
    ///
    /// Accounts expected:
    ///
    /// 0. `[signer]` The payer, must be the recorded authority
    /// 1. `[writable]` The state account
    /// 2. `[writable]` The token account receiving the tokens
    /// 3. `[writable]` The token mint
    /// 4. `[]` The token program
    Mint { amount: u64 },
    /// Burns `amount` tokens from the token account and logs the foreign
    /// destination.
    ///
    /// Accounts expected:
    ///
    /// 0. `[signer]` The owner of the token account
    /// 1. `[writable]` The state account
    /// 2. `[writable]` The burn log
    /// 3. `[writable]` The token account to burn from
    /// 4. `[writable]` The token mint
    /// 5. `[]` The token program
    Burn {
        amount: u64,
        foreign_address: ForeignAddress,
    },
}

impl LockerInstruction {
    /// Opcode of the last variant, `Burn`.
    pub const MAX_OPCODE: u8 = 4;

    pub fn opcode(&self) -> u8 {
        match self {
            LockerInstruction::Initialize { .. } => 0,
            LockerInstruction::Lock { .. } => 1,
            LockerInstruction::Release { .. } => 2,
            LockerInstruction::Mint { .. } => 3,
            LockerInstruction::Burn { .. } => Self::MAX_OPCODE,
        }
    }

    /// Encoded length including the opcode byte.
    pub fn packed_len(&self) -> usize {
        1 + match self {
            LockerInstruction::Initialize { .. } => 32,
            LockerInstruction::Lock { .. } | LockerInstruction::Burn { .. } => {
                8 + FOREIGN_ADDRESS_LEN
            }
            LockerInstruction::Release { .. } | LockerInstruction::Mint { .. } => 8,
        }
    }

    pub fn pack(&self) -> Result<Vec<u8>> {
        Ok(self.try_to_vec()?)
    }

    /// Parses instruction data the way the program does: opcode first, then a
    /// payload of exactly the length that opcode requires.
    pub fn unpack(data: &[u8]) -> Result<Self> {
        let (&opcode, _) = data
            .split_first()
            .ok_or_else(|| LockerError::MalformedInput("empty instruction data".to_string()))?;
        if opcode > Self::MAX_OPCODE {
            return Err(LockerError::MalformedInput(format!("unknown opcode {opcode}")));
        }
        Self::try_from_slice(data).map_err(|e| {
            LockerError::MalformedInput(format!("instruction with opcode {opcode}: {e}"))
        })
    }
}
