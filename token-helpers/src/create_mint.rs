use anyhow::Result;
use log::debug;
use rand::rngs::OsRng;
use solana_sdk::{
    instruction::Instruction, program_pack::Pack, pubkey::Pubkey, signature::Keypair,
    signer::Signer, system_instruction,
};
use spl_token_2022::state::Mint;

use crate::provider::Provider;

/// Creates a new mint and returns its address.
///
/// `authority` defaults to the provider's wallet.
pub async fn create_mint<P: Provider + ?Sized>(
    provider: &P,
    authority: Option<Pubkey>,
    decimals: u8,
) -> Result<Pubkey> {
    let authority = authority.unwrap_or_else(|| provider.wallet());
    let mint = Keypair::generate(&mut OsRng);
    let create_and_init_instr =
        create_mint_instructions(provider, &authority, &mint.pubkey(), decimals).await?;

    provider.send(&create_and_init_instr, &[&mint]).await?;

    Ok(mint.pubkey())
}

pub async fn create_mint_instructions<P: Provider + ?Sized>(
    provider: &P,
    authority: &Pubkey,
    mint: &Pubkey,
    decimals: u8,
) -> Result<Vec<Instruction>> {
    let token_program = provider.programs().token_program;
    let space = Mint::LEN;
    let lamports = provider.minimum_balance_for_rent_exemption(space).await?;
    debug!("mint {} needs {} lamports for {} bytes", mint, lamports, space);

    let mut instructions = vec![system_instruction::create_account(
        &provider.wallet(),
        mint,
        lamports,
        space as u64,
        &token_program,
    )];

    instructions.push(spl_token_2022::instruction::initialize_mint(
        &token_program,
        mint,
        authority,
        None,
        decimals,
    )?);

    Ok(instructions)
}
