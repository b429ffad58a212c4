//! Bet placement orchestration
//!
//! The guard sequence short-circuits on the first failure; every rejection
//! is reported through the UI seam, and nothing is submitted before the
//! balance fan-out succeeds.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Signature};

use shared::{Lamports, CONFIRMATION_NOTICE_SECS, MAX_BETS_PER_GAME, PLAYER_BETS_ACCOUNT_SIZE};

use crate::domain::{Game, GamePdas, PlayerBets, SystemConfig};
use crate::errors::PlaceBetError;
use crate::rpc::ChainRpc;
use crate::tx::build_bet_transaction;
use crate::ui::{FlashKind, UiSink};
use crate::wallet::WalletAdapter;

pub struct PlaceBetRequest<'a> {
    pub game: &'a Game,
    pub pdas: &'a GamePdas,
    pub option_id: u8,
    pub stake: Lamports,
    pub agreed_terms: bool,
    /// Current player-bets account state; None before the first bet
    pub player_bets: Option<&'a PlayerBets>,
    pub custom_stake_modal_open: bool,
}

/// Place a bet end to end: guards, assembly, balance check, submission,
/// confirmation.
///
/// The 30-second congestion notice is UX only. It is not a cancellation
/// mechanism; the submission keeps running, and the timer is aborted on both
/// outcome paths so a stale notice cannot fire after the operation settles.
pub async fn place_bet(
    rpc: &dyn ChainRpc,
    program_id: &Pubkey,
    system_config: &SystemConfig,
    wallet: Option<&dyn WalletAdapter>,
    ui: Arc<dyn UiSink>,
    site_id: &str,
    req: PlaceBetRequest<'_>,
) -> Result<Signature, PlaceBetError> {
    let now = Utc::now();
    if now < req.game.open_time {
        ui.flash("Game is not open yet", FlashKind::Error);
        return Err(PlaceBetError::NotOpenYet);
    }
    if now >= req.game.close_time {
        ui.flash("Game is closed", FlashKind::Error);
        return Err(PlaceBetError::Closed);
    }
    let Some(wallet) = wallet else {
        ui.request_wallet_connect();
        ui.flash("Wallet is not connected", FlashKind::Error);
        return Err(PlaceBetError::WalletNotConnected);
    };
    if !req.agreed_terms {
        ui.flash("You must accept the Terms & Conditions", FlashKind::Error);
        return Err(PlaceBetError::TermsNotAccepted);
    }

    let player = wallet.pubkey();
    let (tx, memo) = match build_bet_transaction(
        rpc,
        program_id,
        req.stake,
        system_config.bet_fee,
        req.option_id,
        req.pdas,
        req.player_bets,
        &player,
        &system_config.treasury,
        req.game.game_id,
        site_id,
    )
    .await
    {
        Ok(assembled) => assembled,
        Err(error) => {
            ui.flash("Failed to place bet", FlashKind::Error);
            return Err(PlaceBetError::Assembly(error));
        }
    };

    if let Some(player_bets) = req.player_bets {
        if player_bets.bets.len() >= MAX_BETS_PER_GAME {
            ui.flash(
                &format!("Maximum {MAX_BETS_PER_GAME} bets per game"),
                FlashKind::Error,
            );
            return Err(PlaceBetError::BetLimitReached {
                max: MAX_BETS_PER_GAME,
            });
        }
    }

    // Settle-all fan-out: each lookup fails independently of the others.
    let (balance, account_cost, tx_fee) = tokio::join!(
        rpc.balance(&player),
        rpc.minimum_rent_exemption(PLAYER_BETS_ACCOUNT_SIZE),
        rpc.fee_for_message(&tx.message),
    );
    let (balance, account_cost, tx_fee) = match (balance.ok(), account_cost.ok(), tx_fee.ok()) {
        (Some(balance), Some(account_cost), Some(tx_fee)) => (balance, account_cost, tx_fee),
        _ => {
            ui.flash("Failed to read wallet's balance", FlashKind::Error);
            return Err(PlaceBetError::BalanceUnavailable);
        }
    };

    let mut total_cost = tx_fee + req.stake.as_u64() + system_config.bet_fee.as_u64();
    if req.player_bets.is_none() {
        // First bet also pays the player-bets account's rent exemption.
        total_cost += account_cost;
    }
    if total_cost > balance {
        let required = Lamports::new(total_cost);
        ui.flash(
            &format!(
                "Not enough balance! You need at least {} SOL",
                required.to_sol_string()
            ),
            FlashKind::Error,
        );
        return Err(PlaceBetError::InsufficientBalance { required });
    }

    let notice_ui = ui.clone();
    let congestion_notice = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(CONFIRMATION_NOTICE_SECS)).await;
        notice_ui.flash(
            &format!(
                "Transaction not confirmed in {CONFIRMATION_NOTICE_SECS} seconds. \
                 It is unknown if it was confirmed or not"
            ),
            FlashKind::Warning,
        );
    });

    let outcome = async {
        let signature = wallet.send_transaction(&tx, rpc).await?;
        rpc.confirm_transaction(&signature, CommitmentConfig::processed())
            .await?;
        Ok::<_, anyhow::Error>(signature)
    }
    .await;
    congestion_notice.abort();

    match outcome {
        Ok(signature) => {
            ui.flash("Bet placed", FlashKind::Success);
            tracing::info!(
                game_id = req.game.game_id,
                option_id = req.option_id,
                stake = %memo.stake,
                %signature,
                "Bet placed"
            );
            if req.custom_stake_modal_open {
                ui.close_custom_stake_modal();
            }
            Ok(signature)
        }
        Err(error) => {
            ui.flash("Failed to place bet", FlashKind::Error);
            tracing::error!(error = %error, "Failed to place bet");
            Err(PlaceBetError::SubmitFailed(error))
        }
    }
}
