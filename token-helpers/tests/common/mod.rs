use anyhow::Result;
use async_trait::async_trait;
use solana_program_test::{ProgramTest, ProgramTestContext};
use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Keypair, signature::Signature,
    signer::Signer,
};
use spl_token_2022::{extension::StateWithExtensions, state::Account};
use tokio::sync::Mutex;
use token_helpers::{find_associated_token_address, rpc::build_signed_txn, ProgramIds, Provider};

/// In-process ledger with the SPL Token and associated token programs loaded.
pub struct BanksProvider {
    context: Mutex<ProgramTestContext>,
    payer: Keypair,
    programs: ProgramIds,
}

impl BanksProvider {
    pub async fn start() -> Self {
        let context = ProgramTest::default().start_with_context().await;
        let payer = Keypair::from_bytes(&context.payer.to_bytes()).unwrap();
        Self {
            context: Mutex::new(context),
            payer,
            programs: ProgramIds::default(),
        }
    }
}

#[async_trait]
impl Provider for BanksProvider {
    fn wallet(&self) -> Pubkey {
        self.payer.pubkey()
    }

    fn programs(&self) -> &ProgramIds {
        &self.programs
    }

    async fn minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        let mut context = self.context.lock().await;
        let rent = context.banks_client.get_rent().await?;
        Ok(rent.minimum_balance(data_len))
    }

    // Banks cannot scan accounts by owner, so only the associated address is probed.
    async fn token_accounts_by_owner(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<Pubkey>> {
        let address = find_associated_token_address(&self.programs, owner, mint);
        let Some(data) = self.account_data(&address).await? else {
            return Ok(vec![]);
        };
        let account = StateWithExtensions::<Account>::unpack(&data)?.base;
        if account.owner == *owner && account.mint == *mint {
            Ok(vec![address])
        } else {
            Ok(vec![])
        }
    }

    async fn account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let mut context = self.context.lock().await;
        let account = context.banks_client.get_account(*address).await?;
        Ok(account.map(|account| account.data))
    }

    async fn send(&self, instructions: &[Instruction], signers: &[&Keypair]) -> Result<Signature> {
        let mut context = self.context.lock().await;
        // identical transactions in one test need distinct blockhashes
        let recent_hash = context.get_new_latest_blockhash().await?;
        let txn = build_signed_txn(&self.payer, instructions, signers, recent_hash)?;
        let signature = txn.signatures[0];
        context.banks_client.process_transaction(txn).await?;
        Ok(signature)
    }
}
