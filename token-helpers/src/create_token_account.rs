use anyhow::Result;
use rand::rngs::OsRng;
use solana_sdk::{
    instruction::Instruction, program_pack::Pack, pubkey::Pubkey, signature::Keypair,
    signer::Signer, system_instruction,
};
use spl_token_2022::state::Account;

use crate::provider::Provider;

/// Creates a plain (non-associated) token account for `mint` held by `owner`.
pub async fn create_token_account<P: Provider + ?Sized>(
    provider: &P,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Pubkey> {
    let vault = Keypair::generate(&mut OsRng);
    let instructions =
        create_token_account_instructions(provider, &vault.pubkey(), mint, owner, None).await?;

    provider.send(&instructions, &[&vault]).await?;

    Ok(vault.pubkey())
}

/// `lamports` of `None` funds the account with the current rent-exempt minimum.
pub async fn create_token_account_instructions<P: Provider + ?Sized>(
    provider: &P,
    new_account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    lamports: Option<u64>,
) -> Result<Vec<Instruction>> {
    let token_program = provider.programs().token_program;
    let space = Account::LEN;
    let lamports = match lamports {
        Some(lamports) => lamports,
        None => provider.minimum_balance_for_rent_exemption(space).await?,
    };

    Ok(vec![
        system_instruction::create_account(
            &provider.wallet(),
            new_account,
            lamports,
            space as u64,
            &token_program,
        ),
        spl_token_2022::instruction::initialize_account(
            &token_program,
            new_account,
            mint,
            owner,
        )?,
    ])
}
