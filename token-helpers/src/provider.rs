use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_request::TokenAccountsFilter};
use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Keypair, signature::Signature,
    signer::Signer, system_program,
};

use crate::{
    config::Config,
    rpc::{build_signed_txn, send_txn},
    utils::read_keypair_file,
};

/// Addresses of the programs the helpers build instructions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramIds {
    pub token_program: Pubkey,
    pub associated_token_program: Pubkey,
    pub system_program: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            token_program: spl_token::id(),
            associated_token_program: spl_associated_token_account::id(),
            system_program: system_program::id(),
        }
    }
}

/// A connection to a ledger bundled with the wallet that pays for and signs
/// every transaction.
#[async_trait]
pub trait Provider: Send + Sync {
    fn wallet(&self) -> Pubkey;

    fn programs(&self) -> &ProgramIds;

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64>;

    /// Token accounts held by `owner` for `mint`.
    async fn token_accounts_by_owner(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<Pubkey>>;

    /// Raw account data, `None` if the account does not exist.
    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;

    /// Signs `instructions` with the wallet plus `signers` and submits them as
    /// one transaction.
    async fn send(&self, instructions: &[Instruction], signers: &[&Keypair]) -> Result<Signature>;
}

pub struct RpcProvider {
    client: RpcClient,
    payer: Keypair,
    programs: ProgramIds,
    skip_preflight: bool,
}

impl RpcProvider {
    pub fn new(client: RpcClient, payer: Keypair, programs: ProgramIds) -> Self {
        Self {
            client,
            payer,
            programs,
            skip_preflight: false,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let payer = read_keypair_file(&config.global.payer_path)?;
        let client =
            RpcClient::new_with_commitment(config.cluster().url().to_string(), config.commitment()?);
        let mut provider = Self::new(client, payer, config.program_ids()?);
        provider.skip_preflight = config.global.skip_preflight;
        Ok(provider)
    }
}

#[async_trait]
impl Provider for RpcProvider {
    fn wallet(&self) -> Pubkey {
        self.payer.pubkey()
    }

    fn programs(&self) -> &ProgramIds {
        &self.programs
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(self
            .client
            .get_minimum_balance_for_rent_exemption(data_len)
            .await?)
    }

    async fn token_accounts_by_owner(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<Pubkey>> {
        let accounts = self
            .client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::Mint(*mint))
            .await?;
        accounts
            .iter()
            .map(|keyed| {
                Pubkey::from_str(&keyed.pubkey)
                    .with_context(|| format!("node returned invalid address {}", keyed.pubkey))
            })
            .collect()
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await?;
        Ok(response.value.map(|account| account.data))
    }

    async fn send(&self, instructions: &[Instruction], signers: &[&Keypair]) -> Result<Signature> {
        let recent_hash = self.client.get_latest_blockhash().await?;
        let txn = build_signed_txn(&self.payer, instructions, signers, recent_hash)?;
        debug!(
            "sending {} instruction(s) with {} signer(s)",
            instructions.len(),
            txn.signatures.len()
        );
        let signature = send_txn(&self.client, &txn, self.skip_preflight).await?;
        info!("confirmed {}", signature);
        Ok(signature)
    }
}
