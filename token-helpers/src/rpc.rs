use anyhow::Result;
use solana_client::{nonblocking::rpc_client::RpcClient, rpc_config::RpcSendTransactionConfig};
use solana_sdk::{
    hash::Hash, instruction::Instruction, signature::Keypair, signature::Signature,
    signer::Signer, transaction::Transaction,
};

/// Builds a transaction paid for by `payer` and signed by `payer` plus `signers`.
///
/// Unlike `Transaction::new_signed_with_payer` this never panics: a missing or
/// unexpected signer comes back as an error.
pub fn build_signed_txn(
    payer: &Keypair,
    instructions: &[Instruction],
    signers: &[&Keypair],
    recent_hash: Hash,
) -> Result<Transaction> {
    let mut all_signers = vec![payer];
    for &signer in signers {
        if all_signers.iter().all(|s| s.pubkey() != signer.pubkey()) {
            all_signers.push(signer);
        }
    }

    let mut txn = Transaction::new_with_payer(instructions, Some(&payer.pubkey()));
    txn.try_sign(&all_signers, recent_hash)?;
    Ok(txn)
}

/// Submits `txn` and waits for it to reach the client's commitment level.
pub async fn send_txn(
    client: &RpcClient,
    txn: &Transaction,
    skip_preflight: bool,
) -> Result<Signature> {
    let config = RpcSendTransactionConfig {
        skip_preflight,
        preflight_commitment: Some(client.commitment().commitment),
        ..RpcSendTransactionConfig::default()
    };
    let signature = client
        .send_and_confirm_transaction_with_spinner_and_config(txn, client.commitment(), config)
        .await?;
    Ok(signature)
}
