//! Network connection seam
//!
//! Everything the client reads from or submits to the cluster goes through
//! the [`ChainRpc`] trait so the orchestration and history modules can be
//! exercised against in-memory stubs. [`SolanaRpc`] is the production
//! implementation over the nonblocking RPC client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

/// One entry of a wallet's signature history
#[derive(Debug, Clone)]
pub struct SignatureRecord {
    pub signature: String,
    pub block_time: Option<i64>,
    pub memo: Option<String>,
}

#[async_trait]
pub trait ChainRpc: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash>;
    async fn balance(&self, key: &Pubkey) -> Result<u64>;
    async fn minimum_rent_exemption(&self, size: usize) -> Result<u64>;
    async fn fee_for_message(&self, message: &Message) -> Result<u64>;
    async fn signatures_for(
        &self,
        key: &Pubkey,
        before: Option<Signature>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>>;
    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature>;
    async fn confirm_transaction(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<()>;
}

pub struct SolanaRpc {
    client: RpcClient,
}

impl SolanaRpc {
    pub fn new(rpc_url: String, commitment: &str) -> Self {
        let commitment_config = match commitment {
            "processed" => CommitmentConfig::processed(),
            "confirmed" => CommitmentConfig::confirmed(),
            "finalized" => CommitmentConfig::finalized(),
            _ => CommitmentConfig::confirmed(),
        };
        Self {
            client: RpcClient::new_with_commitment(rpc_url, commitment_config),
        }
    }
}

#[async_trait]
impl ChainRpc for SolanaRpc {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .context("Failed to get recent blockhash")
    }

    async fn balance(&self, key: &Pubkey) -> Result<u64> {
        self.client
            .get_balance(key)
            .await
            .with_context(|| format!("Failed to read balance of {key}"))
    }

    async fn minimum_rent_exemption(&self, size: usize) -> Result<u64> {
        self.client
            .get_minimum_balance_for_rent_exemption(size)
            .await
            .context("Failed to read rent-exemption minimum")
    }

    async fn fee_for_message(&self, message: &Message) -> Result<u64> {
        self.client
            .get_fee_for_message(message)
            .await
            .context("Failed to estimate transaction fee")
    }

    async fn signatures_for(
        &self,
        key: &Pubkey,
        before: Option<Signature>,
        limit: usize,
    ) -> Result<Vec<SignatureRecord>> {
        let config = GetConfirmedSignaturesForAddress2Config {
            before,
            until: None,
            limit: Some(limit),
            commitment: None,
        };
        let entries = self
            .client
            .get_signatures_for_address_with_config(key, config)
            .await
            .with_context(|| format!("Failed to fetch signature history of {key}"))?;
        Ok(entries
            .into_iter()
            .map(|entry| SignatureRecord {
                signature: entry.signature,
                block_time: entry.block_time,
                memo: entry.memo,
            })
            .collect())
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature> {
        self.client
            .send_transaction(tx)
            .await
            .context("Failed to send transaction")
    }

    async fn confirm_transaction(
        &self,
        signature: &Signature,
        commitment: CommitmentConfig,
    ) -> Result<()> {
        let confirmed = self
            .client
            .confirm_transaction_with_commitment(signature, commitment)
            .await
            .with_context(|| format!("Failed to confirm transaction {signature}"))?;
        if !confirmed.value {
            anyhow::bail!("Transaction {signature} not confirmed");
        }
        Ok(())
    }
}
