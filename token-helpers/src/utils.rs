use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use spl_token_2022::{
    extension::StateWithExtensions,
    state::{Account, Mint},
};

use crate::provider::Provider;

/// Decimals most test mints are created with.
pub const DEFAULT_DECIMALS: u8 = 6;

/// Yields to the runtime for `ms` milliseconds, e.g. to let the ledger settle
/// between steps.
pub async fn sleep(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

/// Scales a raw token amount by `10^decimals`.
pub fn bn_to_decimal(amount: u64, decimals: u8) -> f64 {
    amount as f64 / 10f64.powi(decimals as i32)
}

pub async fn get_token_account<P: Provider + ?Sized>(
    provider: &P,
    address: &Pubkey,
) -> Result<Account> {
    let data = provider
        .account_data(address)
        .await?
        .ok_or_else(|| anyhow!("token account {} not found", address))?;
    Ok(StateWithExtensions::<Account>::unpack(&data)?.base)
}

pub async fn get_mint<P: Provider + ?Sized>(provider: &P, address: &Pubkey) -> Result<Mint> {
    let data = provider
        .account_data(address)
        .await?
        .ok_or_else(|| anyhow!("mint {} not found", address))?;
    Ok(StateWithExtensions::<Mint>::unpack(&data)?.base)
}

pub fn read_keypair_file(s: &str) -> Result<Keypair> {
    let expanded = if s.starts_with("~") {
        let home = env::var("HOME").map_err(|_| anyhow!("HOME environment variable is not set"))?;
        s.replacen("~", &home, 1)
    } else {
        s.to_string()
    };
    solana_sdk::signature::read_keypair_file(&expanded)
        .map_err(|e| anyhow!("failed to read keypair from {}: {}", expanded, e))
}
