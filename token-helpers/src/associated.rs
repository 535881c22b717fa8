use anyhow::Result;
use log::{debug, info};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    sysvar,
};

use crate::provider::{ProgramIds, Provider};

#[derive(Debug, Clone, Copy, Default)]
pub struct FindOrCreateOptions {
    /// Submit the creation instruction instead of only returning it.
    pub send_transaction: bool,
    /// Build the creation instruction without asking the node whether the
    /// account exists.
    pub skip_lookup: bool,
}

/// Derives the associated token account address of `wallet` for `mint`.
pub fn find_associated_token_address(
    programs: &ProgramIds,
    wallet: &Pubkey,
    mint: &Pubkey,
) -> Pubkey {
    let (address, _bump) = Pubkey::find_program_address(
        &[
            wallet.as_ref(),
            programs.token_program.as_ref(),
            mint.as_ref(),
        ],
        &programs.associated_token_program,
    );
    address
}

/// Builds the legacy create instruction: empty data, rent sysvar passed
/// explicitly.
pub fn create_associated_token_account_instruction(
    programs: &ProgramIds,
    payer: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    let associated_token_address = find_associated_token_address(programs, owner, mint);
    Instruction {
        program_id: programs.associated_token_program,
        accounts: vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(associated_token_address, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(programs.system_program, false),
            AccountMeta::new_readonly(programs.token_program, false),
            AccountMeta::new_readonly(sysvar::rent::id(), false),
        ],
        data: vec![],
    }
}

/// Returns the associated token address of `owner` for `mint` together with
/// the instruction that creates it, or `None` when the lookup found the
/// account already in place.
pub async fn find_or_create_associated_token_account<P: Provider + ?Sized>(
    provider: &P,
    owner: &Pubkey,
    mint: &Pubkey,
    options: FindOrCreateOptions,
) -> Result<(Pubkey, Option<Instruction>)> {
    let programs = provider.programs();
    let associated_token_address = find_associated_token_address(programs, owner, mint);

    if !options.skip_lookup {
        let existing = provider.token_accounts_by_owner(owner, mint).await?;
        if existing.contains(&associated_token_address) {
            debug!("{} already exists", associated_token_address);
            return Ok((associated_token_address, None));
        }
    }

    let ix =
        create_associated_token_account_instruction(programs, &provider.wallet(), owner, mint);

    if options.send_transaction {
        let signature = provider.send(&[ix.clone()], &[]).await?;
        info!(
            "created associated token account {} ({})",
            associated_token_address, signature
        );
    }

    Ok((associated_token_address, Some(ix)))
}
