//! In-memory stand-ins for the network, wallet, and UI seams
//!
//! Used by unit and integration tests to exercise the placement and history
//! flows without a cluster. Not compiled out of the library so downstream
//! test suites can reuse them.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    message::Message,
    pubkey::Pubkey,
    signature::Signature,
    transaction::Transaction,
};

use shared::LAMPORTS_PER_SOL;

use crate::rpc::{ChainRpc, SignatureRecord};
use crate::ui::{FlashKind, UiSink};
use crate::wallet::WalletAdapter;

/// Scriptable connection: `None` lookups fail, signature pages are served
/// front to back, and every interaction is counted.
pub struct StubRpc {
    pub balance: Option<u64>,
    pub rent_exemption: Option<u64>,
    pub fee: Option<u64>,
    pub signature_pages: Mutex<VecDeque<Vec<SignatureRecord>>>,
    pub fail_send: bool,
    pub calls: AtomicUsize,
    pub balance_calls: AtomicUsize,
    pub signature_page_calls: AtomicUsize,
    pub sent: Mutex<Vec<Transaction>>,
}

impl Default for StubRpc {
    fn default() -> Self {
        Self {
            balance: Some(10 * LAMPORTS_PER_SOL),
            rent_exemption: Some(1_500_000),
            fee: Some(5_000),
            signature_pages: Mutex::new(VecDeque::new()),
            fail_send: false,
            calls: AtomicUsize::new(0),
            balance_calls: AtomicUsize::new(0),
            signature_page_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl StubRpc {
    pub fn with_signature_pages(pages: Vec<Vec<SignatureRecord>>) -> Self {
        Self {
            signature_pages: Mutex::new(pages.into()),
            ..Self::default()
        }
    }

    pub fn total_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainRpc for StubRpc {
    async fn latest_blockhash(&self) -> Result<Hash> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Hash::new_unique())
    }

    async fn balance(&self, _key: &Pubkey) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        self.balance.ok_or_else(|| anyhow::anyhow!("balance lookup failed"))
    }

    async fn minimum_rent_exemption(&self, _size: usize) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.rent_exemption
            .ok_or_else(|| anyhow::anyhow!("rent lookup failed"))
    }

    async fn fee_for_message(&self, _message: &Message) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.fee.ok_or_else(|| anyhow::anyhow!("fee lookup failed"))
    }

    async fn signatures_for(
        &self,
        _key: &Pubkey,
        _before: Option<Signature>,
        _limit: usize,
    ) -> Result<Vec<SignatureRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.signature_page_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .signature_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn send_transaction(&self, tx: &Transaction) -> Result<Signature> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_send {
            anyhow::bail!("send rejected");
        }
        self.sent.lock().unwrap().push(tx.clone());
        Ok(Signature::new_unique())
    }

    async fn confirm_transaction(
        &self,
        _signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// UI seam that records everything it is asked to show
#[derive(Default)]
pub struct RecordingUi {
    pub flashes: Mutex<Vec<(String, FlashKind)>>,
    pub wallet_connect_requests: AtomicUsize,
    pub modals_closed: AtomicUsize,
}

impl RecordingUi {
    pub fn flashed(&self, needle: &str) -> bool {
        self.flashes
            .lock()
            .unwrap()
            .iter()
            .any(|(message, _)| message.contains(needle))
    }

    pub fn flashed_kind(&self, needle: &str, kind: FlashKind) -> bool {
        self.flashes
            .lock()
            .unwrap()
            .iter()
            .any(|(message, k)| message.contains(needle) && *k == kind)
    }
}

impl UiSink for RecordingUi {
    fn flash_with(&self, message: &str, kind: FlashKind, _duration_ms: u64) {
        self.flashes
            .lock()
            .unwrap()
            .push((message.to_string(), kind));
    }

    fn request_wallet_connect(&self) {
        self.wallet_connect_requests.fetch_add(1, Ordering::SeqCst);
    }

    fn close_custom_stake_modal(&self) {
        self.modals_closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Wallet that "signs" by forwarding the unsigned transaction
pub struct StubWallet {
    pub player: Pubkey,
}

impl Default for StubWallet {
    fn default() -> Self {
        Self {
            player: Pubkey::new_unique(),
        }
    }
}

#[async_trait]
impl WalletAdapter for StubWallet {
    fn pubkey(&self) -> Pubkey {
        self.player
    }

    async fn send_transaction(&self, tx: &Transaction, rpc: &dyn ChainRpc) -> Result<Signature> {
        rpc.send_transaction(tx).await
    }
}
