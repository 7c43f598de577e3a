use locker::config::LockerConfig;
use locker::instruction::{ForeignAddress, LockerInstruction};
use locker::pda::find_program_address;
use locker::sdk::InstructionBuilder;
use locker::state::{Locker, LockerAccount, LockerAddresses};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::{system_program, sysvar};
use std::thread;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn test_config() -> LockerConfig {
    LockerConfig::new(
        Pubkey::new_unique(),
        Pubkey::new_unique(),
        Pubkey::new_unique(),
    )
}

fn flags(ix: &Instruction) -> Vec<(bool, bool)> {
    ix.accounts
        .iter()
        .map(|meta| (meta.is_signer, meta.is_writable))
        .collect()
}

#[test]
fn derived_addresses_are_deterministic() -> TestResult {
    let program_id = Pubkey::new_unique();

    let (vault1, bump1) = find_program_address(&program_id, &[b"Locker", b"Vault"])?;
    let (vault2, bump2) = find_program_address(&program_id, &[b"Locker", b"Vault"])?;
    assert_eq!(vault1, vault2);
    assert_eq!(bump1, bump2);
    assert_eq!(Locker::find_vault_address(&program_id)?, (vault1, bump1));

    for account in LockerAccount::ALL {
        let (address, bump) = account.find_address(&program_id)?;
        assert_eq!(
            (address, bump),
            Pubkey::find_program_address(&account.seeds(), &program_id)
        );
        assert!(!address.is_on_curve());
    }

    let addresses = LockerAddresses::derive(&program_id)?;
    assert_eq!(addresses, LockerAddresses::derive(&program_id)?);
    assert_ne!(addresses.state, addresses.vault);
    assert_ne!(addresses.mint_log, addresses.burn_log);

    let other = LockerAddresses::derive(&Pubkey::new_unique())?;
    assert_ne!(addresses.state, other.state);
    Ok(())
}

#[test]
fn derivation_is_consistent_across_threads() -> TestResult {
    let program_id = Pubkey::new_unique();
    let expected = LockerAddresses::derive(&program_id)?;

    let handles: Vec<_> = (0..8)
        .map(|_| thread::spawn(move || LockerAddresses::derive(&program_id).map_err(|e| e.to_string())))
        .collect();
    for handle in handles {
        let derived = handle.join().expect("derivation thread panicked")?;
        assert_eq!(derived, expected);
    }
    Ok(())
}

#[test]
fn initialize_layout() -> TestResult {
    let config = test_config();
    let payer = Pubkey::new_unique();
    let authority = Pubkey::new_unique();
    let addresses = LockerAddresses::derive(&config.program_id)?;

    let ix = InstructionBuilder::initialize(&config, &payer, &authority)?;
    assert_eq!(ix.program_id, config.program_id);
    assert_eq!(ix.data.len(), 33);
    assert_eq!(ix.data[0], 0);
    assert_eq!(&ix.data[1..], authority.as_ref());
    assert_eq!(
        ix.accounts,
        vec![
            AccountMeta::new_readonly(payer, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(addresses.vault, false),
            AccountMeta::new(addresses.mint_log, false),
            AccountMeta::new(addresses.burn_log, false),
            AccountMeta::new_readonly(config.program_id, false),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ]
    );
    Ok(())
}

#[test]
fn lock_layout() -> TestResult {
    let config = test_config();
    let owner = Pubkey::new_unique();
    let addresses = LockerAddresses::derive(&config.program_id)?;
    let foreign_address: ForeignAddress = "0xabababababababababababababababababababab".parse()?;

    let ix = InstructionBuilder::lock(&config, &owner, 1_000_000_000, foreign_address)?;
    assert_eq!(ix.data.len(), 1 + 8 + 20);
    assert_eq!(ix.data[0], 1);
    assert_eq!(&ix.data[1..9], &1_000_000_000u64.to_le_bytes());
    assert_eq!(&ix.data[9..], &[0xab; 20]);
    assert_eq!(
        ix.accounts,
        vec![
            AccountMeta::new_readonly(owner, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(addresses.vault, false),
            AccountMeta::new(addresses.mint_log, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ]
    );
    Ok(())
}

#[test]
fn release_layout() -> TestResult {
    let config = test_config();
    let payer = Pubkey::new_unique();
    let destination = Pubkey::new_unique();
    let addresses = LockerAddresses::derive(&config.program_id)?;

    let ix = InstructionBuilder::release(&config, &payer, &destination, 42)?;
    assert_eq!(ix.data, [&[2u8][..], &42u64.to_le_bytes()].concat());
    assert_eq!(
        ix.accounts,
        vec![
            AccountMeta::new_readonly(payer, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(addresses.vault, false),
            AccountMeta::new(destination, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ]
    );
    Ok(())
}

#[test]
fn mint_layout() -> TestResult {
    let config = test_config();
    let payer = Pubkey::new_unique();
    let addresses = LockerAddresses::derive(&config.program_id)?;

    let ix = InstructionBuilder::mint(&config, &payer, 10000)?;
    assert_eq!(ix.data, [&[3u8][..], &10000u64.to_le_bytes()].concat());
    assert_eq!(
        ix.accounts,
        vec![
            AccountMeta::new_readonly(payer, true),
            AccountMeta::new(addresses.state, false),
            AccountMeta::new(config.token_account, false),
            AccountMeta::new(config.token_mint, false),
            AccountMeta::new_readonly(spl_token::ID, false),
        ]
    );
    Ok(())
}

#[test]
fn burn_of_ten_thousand() -> TestResult {
    let config = test_config();
    let owner = Pubkey::new_unique();
    let addresses = LockerAddresses::derive(&config.program_id)?;

    let ix = InstructionBuilder::burn(&config, &owner, 10000, ForeignAddress::zeroed())?;

    let mut expected = vec![0x04];
    expected.extend_from_slice(&10000u64.to_le_bytes());
    expected.extend_from_slice(&[0u8; 20]);
    assert_eq!(ix.data, expected);

    assert_eq!(ix.accounts.len(), 6);
    assert_eq!(ix.accounts[0].pubkey, owner);
    assert!(ix.accounts[0].is_signer);
    assert!(!ix.accounts[0].is_writable);
    assert_eq!(ix.accounts[1].pubkey, addresses.state);
    assert_eq!(ix.accounts[2].pubkey, addresses.burn_log);
    assert_eq!(ix.accounts[3].pubkey, config.token_account);
    assert_eq!(ix.accounts[4].pubkey, config.token_mint);
    assert_eq!(ix.accounts[5].pubkey, spl_token::ID);
    for meta in &ix.accounts[1..5] {
        assert!(meta.is_writable);
        assert!(!meta.is_signer);
    }
    assert!(!ix.accounts[5].is_writable);
    Ok(())
}

#[test]
fn amounts_encode_little_endian() -> TestResult {
    let config = test_config();
    let payer = Pubkey::new_unique();

    for amount in [10000u64, 0, 1, 1 << 63, u64::MAX] {
        let ix = InstructionBuilder::mint(&config, &payer, amount)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&ix.data[1..9]);
        assert_eq!(u64::from_le_bytes(raw), amount);
        assert_eq!(
            LockerInstruction::unpack(&ix.data)?,
            LockerInstruction::Mint { amount }
        );
    }
    Ok(())
}

#[test]
fn amounts_sit_beside_foreign_address() -> TestResult {
    let config = test_config();
    let caller = Pubkey::new_unique();
    let destination = Pubkey::new_unique();
    let foreign_address: ForeignAddress = "0x0102030405060708090a0b0c0d0e0f1011121314".parse()?;

    for amount in [10000u64, 0, 1, 1 << 63, u64::MAX] {
        let lock = InstructionBuilder::lock(&config, &caller, amount, foreign_address)?;
        let burn = InstructionBuilder::burn(&config, &caller, amount, foreign_address)?;
        for ix in [&lock, &burn] {
            assert_eq!(ix.data.len(), 29);
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&ix.data[1..9]);
            assert_eq!(u64::from_le_bytes(raw), amount);
            assert_eq!(&ix.data[9..29], foreign_address.as_bytes());
        }
        assert_eq!(
            LockerInstruction::unpack(&burn.data)?,
            LockerInstruction::Burn {
                amount,
                foreign_address,
            }
        );

        let release = InstructionBuilder::release(&config, &caller, &destination, amount)?;
        assert_eq!(release.data.len(), 9);
        let mut raw = [0u8; 8];
        raw.copy_from_slice(&release.data[1..9]);
        assert_eq!(u64::from_le_bytes(raw), amount);
    }
    Ok(())
}

#[test]
fn account_flags_do_not_depend_on_arguments() -> TestResult {
    let config = test_config();
    let a = Pubkey::new_unique();
    let b = Pubkey::new_unique();
    let foreign_address: ForeignAddress = "1111111111111111111111111111111111111111".parse()?;

    let pairs = [
        (
            InstructionBuilder::lock(&config, &a, 0, ForeignAddress::zeroed())?,
            InstructionBuilder::lock(&config, &b, u64::MAX, foreign_address)?,
        ),
        (
            InstructionBuilder::burn(&config, &a, 0, ForeignAddress::zeroed())?,
            InstructionBuilder::burn(&config, &b, u64::MAX, foreign_address)?,
        ),
        (
            InstructionBuilder::release(&config, &a, &b, 0)?,
            InstructionBuilder::release(&config, &b, &a, u64::MAX)?,
        ),
        (
            InstructionBuilder::mint(&config, &a, 0)?,
            InstructionBuilder::mint(&config, &b, u64::MAX)?,
        ),
        (
            InstructionBuilder::initialize(&config, &a, &a)?,
            InstructionBuilder::initialize(&config, &b, &a)?,
        ),
    ];
    for (first, second) in pairs.iter() {
        assert_eq!(flags(first), flags(second));
        assert_eq!(first.data.len(), second.data.len());
        assert_eq!(first.data[0], second.data[0]);
        // Only the caller-supplied signer differs; derived and program accounts are fixed.
        assert_eq!(first.accounts[1..].len(), second.accounts[1..].len());
        assert_eq!(first.accounts[1].pubkey, second.accounts[1].pubkey);
    }
    Ok(())
}

#[test]
fn encoded_data_parses_back() -> TestResult {
    let config = test_config();
    let owner = Pubkey::new_unique();
    let foreign_address: ForeignAddress = "0x0102030405060708090a0b0c0d0e0f1011121314".parse()?;

    let ix = InstructionBuilder::lock(&config, &owner, 77, foreign_address)?;
    assert_eq!(
        LockerInstruction::unpack(&ix.data)?,
        LockerInstruction::Lock {
            amount: 77,
            foreign_address,
        }
    );

    let authority = Pubkey::new_unique();
    let ix = InstructionBuilder::initialize(&config, &owner, &authority)?;
    assert_eq!(
        LockerInstruction::unpack(&ix.data)?,
        LockerInstruction::Initialize { authority }
    );
    Ok(())
}
