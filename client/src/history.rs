//! Bet history reconstruction
//!
//! Bets are never stored locally; a wallet's bet ledger for a game is
//! rebuilt on demand by scanning its transaction signatures backward and
//! decoding the memos this client attaches to every bet.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use std::str::FromStr;

use shared::{Lamports, SIGNATURE_PAGE_LIMIT};

use crate::domain::Game;
use crate::rpc::ChainRpc;
use crate::tx::BetMemo;

/// One reconstructed bet
///
/// `payment` and `pay_signature` are resolved from settlement data elsewhere
/// and stay None here.
#[derive(Debug, Clone)]
pub struct MyBet {
    pub date: DateTime<Utc>,
    pub game_id: u32,
    pub option_id: u8,
    pub stake: Lamports,
    pub title: String,
    pub color: String,
    pub referral: Option<String>,
    pub signature: String,
    pub payment: Option<Lamports>,
    pub pay_signature: Option<String>,
}

/// Substring that identifies this site+game's bet memos.
///
/// Matches the serialized prefix of [`BetMemo`], whose field order is fixed.
pub fn memo_needle(site_id: &str, game_id: u32) -> String {
    format!(r#""siteId":"{site_id}","gameId":{game_id},"type":"Bet""#)
}

/// Rebuild the wallet's bet ledger for `game` from its transaction history.
///
/// Pages backward in batches of 1000 signatures and stops on a short page or
/// once block times fall before the game's open time (signatures arrive in
/// reverse chronological order). Malformed memos are logged and skipped.
pub async fn fetch_my_bets(
    rpc: &dyn ChainRpc,
    wallet: &Pubkey,
    game: &Game,
    site_id: &str,
) -> Result<Vec<MyBet>> {
    let Some(options) = game.definition.as_ref().map(|d| d.options.as_slice()) else {
        return Ok(Vec::new());
    };

    let needle = memo_needle(site_id, game.game_id);
    let mut bets = Vec::new();
    let mut completed = false;
    let mut cursor: Option<Signature> = None;

    while !completed {
        let page = rpc.signatures_for(wallet, cursor, SIGNATURE_PAGE_LIMIT).await?;
        if page.len() < SIGNATURE_PAGE_LIMIT {
            completed = true;
        }
        for record in &page {
            if let Ok(signature) = Signature::from_str(&record.signature) {
                cursor = Some(signature);
            }
            let block_time = record
                .block_time
                .and_then(|t| Utc.timestamp_opt(t, 0).single());
            if let Some(time) = block_time {
                if time < game.open_time {
                    completed = true;
                    break;
                }
            }
            let Some(memo) = record.memo.as_deref() else {
                continue;
            };
            if !memo.contains(&needle) {
                continue;
            }
            let data = match parse_bet_memo(memo) {
                Ok(data) => data,
                Err(error) => {
                    tracing::warn!(
                        signature = %record.signature,
                        error = %error,
                        "Failed to parse bet memo"
                    );
                    continue;
                }
            };
            let Some(option) = options.get(data.option_id as usize) else {
                tracing::warn!(
                    signature = %record.signature,
                    option_id = data.option_id,
                    "Bet memo references an unknown option"
                );
                continue;
            };
            let stake = match Lamports::from_sol_str(&data.stake) {
                Ok(stake) => stake,
                Err(error) => {
                    tracing::warn!(
                        signature = %record.signature,
                        error = %error,
                        "Bet memo carries an unparsable stake"
                    );
                    continue;
                }
            };
            bets.push(MyBet {
                date: block_time.unwrap_or(DateTime::UNIX_EPOCH),
                game_id: data.game_id,
                option_id: data.option_id,
                stake,
                title: option.title.clone(),
                color: option.color.clone(),
                referral: data.referral,
                signature: record.signature.clone(),
                payment: None,
                pay_signature: None,
            });
        }
    }

    tracing::debug!(
        wallet = %wallet,
        game_id = game.game_id,
        bets = bets.len(),
        "Reconstructed bet history"
    );
    Ok(bets)
}

/// RPC memo strings carry a "[<program>, <len>] " style prefix before the
/// payload; everything after the first space is the JSON record.
fn parse_bet_memo(memo: &str) -> Result<BetMemo> {
    let payload = memo
        .split_once(' ')
        .map(|(_, rest)| rest)
        .context("Memo has no payload")?;
    serde_json::from_str(payload).context("Invalid memo JSON")
}
