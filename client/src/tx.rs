//! Bet transaction assembly
//!
//! Pure assembly: the only network interaction is fetching the blockhash.
//! Submission happens in the placement flow, which keeps this step
//! deterministic under a stubbed connection.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};

use shared::Lamports;

use crate::domain::{GamePdas, PlayerBets};
use crate::instructions;
use crate::rpc::ChainRpc;

/// Off-chain bet record attached to the transaction as a memo
///
/// Serialized as compact JSON with camelCase keys; the history scan matches
/// on the `siteId`/`gameId`/`type` prefix of exactly this layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetMemo {
    pub site_id: String,
    pub game_id: u32,
    #[serde(rename = "type")]
    pub kind: MemoKind,
    pub option_id: u8,
    /// Stake in SOL, at most 9 fraction digits
    pub stake: String,
    pub referral: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoKind {
    Bet,
}

/// Assemble the bet transaction and its memo payload.
///
/// Prepends an account-initialization instruction when the player has no
/// player-bets account yet, so the order is always:
/// [initialize]? place_sol_bet memo.
#[allow(clippy::too_many_arguments)]
pub async fn build_bet_transaction(
    rpc: &dyn ChainRpc,
    program_id: &Pubkey,
    stake: Lamports,
    bet_fee: Lamports,
    option_id: u8,
    pdas: &GamePdas,
    player_bets: Option<&PlayerBets>,
    player: &Pubkey,
    system_treasury: &Pubkey,
    game_id: u32,
    site_id: &str,
) -> Result<(Transaction, BetMemo)> {
    let memo = BetMemo {
        site_id: site_id.to_string(),
        game_id,
        kind: MemoKind::Bet,
        option_id,
        stake: stake.to_sol_string(),
        referral: None,
    };

    let mut ixs = Vec::with_capacity(3);
    if player_bets.is_none() {
        ixs.push(instructions::initialize_player_bets(
            program_id,
            player,
            &pdas.game,
            &pdas.player_bets,
        ));
    }

    let total = stake
        .checked_add(bet_fee)
        .context("Stake plus bet fee overflows")?;
    ixs.push(instructions::place_sol_bet(
        program_id,
        option_id,
        total.as_u64(),
        player,
        &pdas.game,
        &pdas.player_bets,
        system_treasury,
        &pdas.system_config,
    ));
    ixs.push(instructions::memo(
        serde_json::to_vec(&memo).context("Failed to serialize bet memo")?,
    ));

    let blockhash = rpc.latest_blockhash().await?;
    let mut tx = Transaction::new_with_payer(&ixs, Some(player));
    tx.message.recent_blockhash = blockhash;

    Ok((tx, memo))
}
