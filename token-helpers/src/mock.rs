use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{
    hash::Hash, instruction::Instruction, pubkey::Pubkey, rent::Rent, signature::Keypair,
    signature::Signature, signer::Signer,
};

use crate::{provider::ProgramIds, rpc::build_signed_txn, Provider};

pub(crate) struct SentTxn {
    pub instructions: Vec<Instruction>,
    pub signers: Vec<Pubkey>,
}

/// Records transactions instead of submitting them.
pub(crate) struct MockProvider {
    pub payer: Keypair,
    pub programs: ProgramIds,
    pub token_accounts: Vec<(Pubkey, Pubkey, Pubkey)>,
    pub accounts: HashMap<Pubkey, Vec<u8>>,
    pub sent: Mutex<Vec<SentTxn>>,
    pub rent_queries: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            payer: Keypair::new(),
            programs: ProgramIds::default(),
            token_accounts: Vec::new(),
            accounts: HashMap::new(),
            sent: Mutex::new(Vec::new()),
            rent_queries: AtomicUsize::new(0),
        }
    }

    pub fn with_token_account(mut self, address: Pubkey, owner: Pubkey, mint: Pubkey) -> Self {
        self.token_accounts.push((address, owner, mint));
        self
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Provider for MockProvider {
    fn wallet(&self) -> Pubkey {
        self.payer.pubkey()
    }

    fn programs(&self) -> &ProgramIds {
        &self.programs
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        self.rent_queries.fetch_add(1, Ordering::SeqCst);
        Ok(Rent::default().minimum_balance(data_len))
    }

    async fn token_accounts_by_owner(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<Pubkey>> {
        Ok(self
            .token_accounts
            .iter()
            .filter(|(_, o, m)| o == owner && m == mint)
            .map(|(address, _, _)| *address)
            .collect())
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        Ok(self.accounts.get(address).cloned())
    }

    async fn send(&self, instructions: &[Instruction], signers: &[&Keypair]) -> Result<Signature> {
        let txn = build_signed_txn(&self.payer, instructions, signers, Hash::default())?;
        let required = txn.message.header.num_required_signatures as usize;
        self.sent.lock().unwrap().push(SentTxn {
            instructions: instructions.to_vec(),
            signers: txn.message.account_keys[..required].to_vec(),
        });
        Ok(txn.signatures[0])
    }
}
