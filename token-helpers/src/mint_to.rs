use anyhow::Result;
use log::debug;
use solana_sdk::{instruction::Instruction, pubkey::Pubkey, signature::Keypair, signer::Signer};

use crate::provider::Provider;

/// Mints `amount` raw units into `destination`.
///
/// Only the provider's wallet signs, so `mint_authority` has to be the
/// wallet; any other authority makes signing fail. Use
/// [`mint_to_account_with_authority`] when the authority is a separate key.
pub async fn mint_to_account<P: Provider + ?Sized>(
    provider: &P,
    mint: &Pubkey,
    destination: &Pubkey,
    amount: u64,
    mint_authority: &Pubkey,
) -> Result<()> {
    let instructions = mint_to_instructions(
        &provider.programs().token_program,
        mint,
        destination,
        amount,
        mint_authority,
    )?;
    provider.send(&instructions, &[]).await?;

    Ok(())
}

pub async fn mint_to_account_with_authority<P: Provider + ?Sized>(
    provider: &P,
    mint: &Pubkey,
    destination: &Pubkey,
    amount: u64,
    mint_authority: &Keypair,
) -> Result<()> {
    let instructions = mint_to_instructions(
        &provider.programs().token_program,
        mint,
        destination,
        amount,
        &mint_authority.pubkey(),
    )?;
    provider.send(&instructions, &[mint_authority]).await?;

    Ok(())
}

pub fn mint_to_instructions(
    token_program: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    amount: u64,
    mint_authority: &Pubkey,
) -> Result<Vec<Instruction>> {
    debug!("mint_to {} units of {} into {}", amount, mint, destination);
    Ok(vec![spl_token_2022::instruction::mint_to(
        token_program,
        mint,
        destination,
        mint_authority,
        &[],
        amount,
    )?])
}
