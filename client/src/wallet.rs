//! Wallet adapter seam
//!
//! The front end hands the library whatever wallet the user connected;
//! signing stays on the wallet's side of this trait.

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use std::path::Path;

use crate::rpc::ChainRpc;

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Sign and submit the transaction through the given connection.
    async fn send_transaction(&self, tx: &Transaction, rpc: &dyn ChainRpc) -> Result<Signature>;
}

/// Local keypair-backed wallet, used by tooling and tests
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn send_transaction(&self, tx: &Transaction, rpc: &dyn ChainRpc) -> Result<Signature> {
        let mut tx = tx.clone();
        let blockhash = tx.message.recent_blockhash;
        tx.try_sign(&[&self.keypair], blockhash)?;
        rpc.send_transaction(&tx).await
    }
}

pub fn load_wallet_keypair(path: &str) -> Result<KeypairWallet> {
    let keypair = read_keypair_file(Path::new(path))
        .map_err(|e| anyhow::anyhow!("Failed to load wallet keypair: {}", e))?;
    Ok(KeypairWallet::new(keypair))
}
