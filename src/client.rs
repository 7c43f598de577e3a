//! Blocking RPC submission of locker instructions.

use crate::config::LockerConfig;
use crate::errors::LockerError;
use crate::instruction::ForeignAddress;
use crate::sdk::InstructionBuilder;
use crate::Result;

use solana_client::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Signature, Signer};
use solana_sdk::transaction::Transaction;
use std::thread::sleep;
use std::time::Duration;
use tracing::{debug, info};

const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);
const CONFIRM_MAX_POLLS: u32 = 120;

/// Space the program allocates for its state account.
pub const STATE_ACCOUNT_SPACE: usize = 49;
pub const LAMPORTS_PER_SIGNATURE: u64 = 5000;
/// Signatures budgeted when topping up a payer.
pub const FEE_BUDGET_SIGNATURES: u64 = 100;

/// Fails unless `account` is a deployed, executable program.
pub fn check_program_account(program_id: &Pubkey, account: Option<&Account>) -> Result<()> {
    match account {
        None => Err(LockerError::MalformedInput(format!(
            "program {program_id} is not deployed"
        ))),
        Some(account) if !account.executable => Err(LockerError::MalformedInput(format!(
            "program {program_id} is not executable"
        ))),
        Some(_) => Ok(()),
    }
}

/// Lamports missing from `balance` to reach `min_lamports`, if any.
pub fn funding_shortfall(balance: u64, min_lamports: u64) -> Option<u64> {
    min_lamports.checked_sub(balance).filter(|missing| *missing > 0)
}

pub struct LockerClient {
    rpc: RpcClient,
    config: LockerConfig,
}

impl LockerClient {
    pub fn new(config: LockerConfig) -> Self {
        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());
        LockerClient { rpc, config }
    }

    pub fn config(&self) -> &LockerConfig {
        &self.config
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    pub fn check_program(&self) -> Result<()> {
        let program_id = self.config.program_id;
        let account = self
            .rpc
            .get_account_with_commitment(&program_id, self.rpc.commitment())?
            .value;
        check_program_account(&program_id, account.as_ref())?;
        info!(%program_id, "using locker program");
        Ok(())
    }

    /// Rent for the state account plus a fee budget, as the payer minimum.
    pub fn minimum_payer_balance(&self) -> Result<u64> {
        let rent = self
            .rpc
            .get_minimum_balance_for_rent_exemption(STATE_ACCOUNT_SPACE)?;
        Ok(rent + LAMPORTS_PER_SIGNATURE * FEE_BUDGET_SIGNATURES)
    }

    /// Airdrops whatever `payer` lacks to hold `min_lamports`. Returns the
    /// resulting balance.
    pub fn ensure_payer_funded(&self, payer: &Pubkey, min_lamports: u64) -> Result<u64> {
        let balance = self.rpc.get_balance(payer)?;
        let Some(missing) = funding_shortfall(balance, min_lamports) else {
            return Ok(balance);
        };
        let sig = self.rpc.request_airdrop(payer, missing)?;
        self.confirm(&sig)?;
        let balance = self.rpc.get_balance(payer)?;
        info!(%payer, balance, "funded payer");
        Ok(balance)
    }

    pub fn initialize(&self, payer: &dyn Signer, authority: &Pubkey) -> Result<Signature> {
        let ix = InstructionBuilder::initialize(&self.config, &payer.pubkey(), authority)?;
        self.send_and_confirm(vec![ix], &[payer])
    }

    pub fn mint(&self, payer: &dyn Signer, amount: u64) -> Result<Signature> {
        let ix = InstructionBuilder::mint(&self.config, &payer.pubkey(), amount)?;
        self.send_and_confirm(vec![ix], &[payer])
    }

    pub fn lock(
        &self,
        owner: &dyn Signer,
        amount: u64,
        foreign_address: ForeignAddress,
    ) -> Result<Signature> {
        let ix = InstructionBuilder::lock(&self.config, &owner.pubkey(), amount, foreign_address)?;
        self.send_and_confirm(vec![ix], &[owner])
    }

    pub fn release(
        &self,
        payer: &dyn Signer,
        destination: &Pubkey,
        amount: u64,
    ) -> Result<Signature> {
        let ix = InstructionBuilder::release(&self.config, &payer.pubkey(), destination, amount)?;
        self.send_and_confirm(vec![ix], &[payer])
    }

    pub fn burn(
        &self,
        owner: &dyn Signer,
        amount: u64,
        foreign_address: ForeignAddress,
    ) -> Result<Signature> {
        let ix = InstructionBuilder::burn(&self.config, &owner.pubkey(), amount, foreign_address)?;
        self.send_and_confirm(vec![ix], &[owner])
    }

    /// Signs with `signers`, the first of which pays the fee.
    pub fn send_and_confirm(
        &self,
        instructions: Vec<Instruction>,
        signers: &[&dyn Signer],
    ) -> Result<Signature> {
        let payer = signers.first().map(|s| s.pubkey());
        let msg = Message::new(instructions.as_slice(), payer.as_ref());
        let blockhash = self.rpc.get_latest_blockhash()?;
        let tx = Transaction::new(&signers.to_vec(), msg, blockhash);
        let sig = self.rpc.send_transaction(&tx)?;
        info!(%sig, "sent locker transaction");

        self.confirm(&sig)?;
        Ok(sig)
    }

    pub fn confirm(&self, sig: &Signature) -> Result<()> {
        for attempt in 0..CONFIRM_MAX_POLLS {
            if self.rpc.confirm_transaction(sig)? {
                info!(%sig, "confirmed locker transaction");
                return Ok(());
            }
            debug!(%sig, attempt, "transaction not yet confirmed");
            sleep(CONFIRM_POLL_INTERVAL)
        }
        Err(LockerError::Unconfirmed(sig.to_string()))
    }
}
