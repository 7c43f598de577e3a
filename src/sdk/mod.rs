use crate::config::LockerConfig;
use crate::instruction::{ForeignAddress, LockerInstruction};
use crate::state::LockerAddresses;
use crate::Result;

use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::{system_program, sysvar};
use tracing::debug;

pub struct InstructionBuilder;
impl InstructionBuilder {
    pub fn initialize(
        config: &LockerConfig,
        payer: &Pubkey,
        authority: &Pubkey,
    ) -> Result<Instruction> {
        let program_id = config.program_id;
        let addresses = LockerAddresses::derive(&program_id)?;

        let accounts = vec![
            AccountMeta::new_readonly(*payer, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(addresses.vault, false),
            AccountMeta::new(addresses.mint_log, false),
            AccountMeta::new(addresses.burn_log, false),
            AccountMeta::new_readonly(program_id, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ];

        Self::build(
            program_id,
            accounts,
            LockerInstruction::Initialize {
                authority: *authority,
            },
        )
    }

    pub fn mint(config: &LockerConfig, payer: &Pubkey, amount: u64) -> Result<Instruction> {
        let program_id = config.program_id;
        let addresses = LockerAddresses::derive(&program_id)?;

        let accounts = vec![
            AccountMeta::new_readonly(*payer, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(config.token_account, false),
            AccountMeta::new(config.token_mint, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ];

        Self::build(program_id, accounts, LockerInstruction::Mint { amount })
    }

    pub fn lock(
        config: &LockerConfig,
        owner: &Pubkey,
        amount: u64,
        foreign_address: ForeignAddress,
    ) -> Result<Instruction> {
        let program_id = config.program_id;
        let addresses = LockerAddresses::derive(&program_id)?;

        let accounts = vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(addresses.vault, false),
            AccountMeta::new(addresses.mint_log, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ];

        Self::build(
            program_id,
            accounts,
            LockerInstruction::Lock {
                amount,
                foreign_address,
            },
        )
    }

    pub fn release(
        config: &LockerConfig,
        payer: &Pubkey,
        destination: &Pubkey,
        amount: u64,
    ) -> Result<Instruction> {
        let program_id = config.program_id;
        let addresses = LockerAddresses::derive(&program_id)?;

        let accounts = vec![
            AccountMeta::new_readonly(*payer, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(addresses.vault, false),
            AccountMeta::new(*destination, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ];

        Self::build(program_id, accounts, LockerInstruction::Release { amount })
    }

    pub fn burn(
        config: &LockerConfig,
        owner: &Pubkey,
        amount: u64,
        foreign_address: ForeignAddress,
    ) -> Result<Instruction> {
        let program_id = config.program_id;
        let addresses = LockerAddresses::derive(&program_id)?;

        let accounts = vec![
            AccountMeta::new_readonly(*owner, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(addresses.burn_log, false),
            AccountMeta::new(config.token_account, false),
            AccountMeta::new(config.token_mint, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ];

        Self::build(
            program_id,
            accounts,
            LockerInstruction::Burn {
                amount,
                foreign_address,
            },
        )
    }

    fn build(
        program_id: Pubkey,
        accounts: Vec<AccountMeta>,
        instruction: LockerInstruction,
    ) -> Result<Instruction> {
        let data = instruction.pack()?;
        debug!(
            opcode = instruction.opcode(),
            accounts = accounts.len(),
            data_len = data.len(),
            "built locker instruction"
        );
        Ok(Instruction {
            program_id,
            accounts,
            data,
        })
    }
}
