//! End-to-end placement flow against stubbed seams

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use solana_sdk::pubkey::Pubkey;

use client::stubs::{RecordingUi, StubRpc, StubWallet};
use client::ui::FlashKind;
use client::{build_bet_transaction, place_bet, PlaceBetError, PlaceBetRequest};
use shared::{Lamports, MEMO_PROGRAM_ID};

use common::{open_game, game_with_offsets, pdas, player_bets, system_config, SITE_ID};

fn program_id() -> Pubkey {
    Pubkey::new_unique()
}

#[tokio::test]
async fn first_bet_builds_init_bet_memo_in_order() {
    let rpc = StubRpc::default();
    let program = program_id();
    let player = Pubkey::new_unique();
    let pdas = pdas();
    let treasury = Pubkey::new_unique();

    let (tx, memo) = build_bet_transaction(
        &rpc,
        &program,
        Lamports::from_sol(1),
        Lamports::new(5_000_000),
        0,
        &pdas,
        None,
        &player,
        &treasury,
        1,
        SITE_ID,
    )
    .await
    .unwrap();

    assert_eq!(tx.message.instructions.len(), 3);
    let program_of = |k: usize| {
        tx.message.account_keys[tx.message.instructions[k].program_id_index as usize]
    };
    assert_eq!(program_of(0), program);
    assert_eq!(program_of(1), program);
    assert_eq!(program_of(2).to_string(), MEMO_PROGRAM_ID);
    // The player pays the fees.
    assert_eq!(tx.message.account_keys[0], player);
    assert_eq!(memo.site_id, SITE_ID);
    assert_eq!(memo.stake, "1");
}

#[tokio::test]
async fn repeat_bet_skips_account_initialization() {
    let rpc = StubRpc::default();
    let existing = player_bets(3);

    let (tx, _) = build_bet_transaction(
        &rpc,
        &program_id(),
        Lamports::from_sol(2),
        Lamports::new(5_000_000),
        1,
        &pdas(),
        Some(&existing),
        &Pubkey::new_unique(),
        &Pubkey::new_unique(),
        1,
        SITE_ID,
    )
    .await
    .unwrap();

    assert_eq!(tx.message.instructions.len(), 2);
}

#[tokio::test]
async fn rejects_before_open_without_touching_the_network() {
    let rpc = StubRpc::default();
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = game_with_offsets(3600, 7200, 10_800);
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: None,
            custom_stake_modal_open: false,
        },
    )
    .await;

    assert!(matches!(result, Err(PlaceBetError::NotOpenYet)));
    assert!(ui.flashed("Game is not open yet"));
    assert_eq!(rpc.total_calls(), 0);
}

#[tokio::test]
async fn rejects_after_close() {
    let rpc = StubRpc::default();
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = game_with_offsets(-7200, -3600, 3600);
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: None,
            custom_stake_modal_open: false,
        },
    )
    .await;

    assert!(matches!(result, Err(PlaceBetError::Closed)));
    assert!(ui.flashed("Game is closed"));
    assert_eq!(rpc.total_calls(), 0);
}

#[tokio::test]
async fn missing_wallet_triggers_connect_dialog() {
    let rpc = StubRpc::default();
    let ui = Arc::new(RecordingUi::default());
    let game = open_game();
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        None,
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: None,
            custom_stake_modal_open: false,
        },
    )
    .await;

    assert!(matches!(result, Err(PlaceBetError::WalletNotConnected)));
    assert_eq!(ui.wallet_connect_requests.load(Ordering::SeqCst), 1);
    assert!(ui.flashed("Wallet is not connected"));
}

#[tokio::test]
async fn rejects_unaccepted_terms() {
    let rpc = StubRpc::default();
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = open_game();
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: false,
            player_bets: None,
            custom_stake_modal_open: false,
        },
    )
    .await;

    assert!(matches!(result, Err(PlaceBetError::TermsNotAccepted)));
    assert!(ui.flashed("You must accept the Terms & Conditions"));
    assert_eq!(rpc.total_calls(), 0);
}

#[tokio::test]
async fn enforces_the_ten_bet_limit_after_assembly() {
    let rpc = StubRpc::default();
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = open_game();
    let pdas = pdas();
    let full = player_bets(10);

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: Some(&full),
            custom_stake_modal_open: false,
        },
    )
    .await;

    assert!(matches!(result, Err(PlaceBetError::BetLimitReached { max: 10 })));
    assert!(ui.flashed("Maximum 10 bets per game"));
    // The transaction was assembled (blockhash fetched) but nothing else
    // reached the network.
    assert_eq!(rpc.total_calls(), 1);
    assert_eq!(rpc.balance_calls.load(Ordering::SeqCst), 0);
    assert_eq!(rpc.sent_count(), 0);
}

#[tokio::test]
async fn aborts_when_any_balance_lookup_fails() {
    let rpc = StubRpc {
        balance: None,
        ..StubRpc::default()
    };
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = open_game();
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: None,
            custom_stake_modal_open: false,
        },
    )
    .await;

    assert!(matches!(result, Err(PlaceBetError::BalanceUnavailable)));
    assert!(ui.flashed("Failed to read wallet's balance"));
    assert_eq!(rpc.sent_count(), 0);
}

#[tokio::test]
async fn rejects_insufficient_balance_with_the_shortfall_in_sol() {
    let rpc = StubRpc {
        balance: Some(1_000),
        ..StubRpc::default()
    };
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = open_game();
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: None,
            custom_stake_modal_open: false,
        },
    )
    .await;

    match result {
        Err(PlaceBetError::InsufficientBalance { required }) => {
            // Stake + bet fee + rent + estimated fee, all passed on to the user.
            assert_eq!(
                required.as_u64(),
                1_000_000_000 + 5_000_000 + 1_500_000 + 5_000
            );
        }
        other => panic!("expected InsufficientBalance, got {other:?}"),
    }
    assert!(ui.flashed("Not enough balance! You need at least"));
    assert_eq!(rpc.sent_count(), 0);
}

#[tokio::test]
async fn existing_account_skips_rent_in_the_cost_check() {
    // Balance covers everything except the rent exemption; with an existing
    // player-bets account the bet must go through.
    let rpc = StubRpc {
        balance: Some(1_000_000_000 + 5_000_000 + 5_000),
        ..StubRpc::default()
    };
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = open_game();
    let pdas = pdas();
    let existing = player_bets(2);

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 1,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: Some(&existing),
            custom_stake_modal_open: false,
        },
    )
    .await;

    assert!(result.is_ok());
    assert_eq!(rpc.sent_count(), 1);
}

#[tokio::test]
async fn successful_bet_flashes_success_and_closes_the_stake_modal() {
    let rpc = StubRpc::default();
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = open_game();
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: None,
            custom_stake_modal_open: true,
        },
    )
    .await;

    assert!(result.is_ok());
    assert!(ui.flashed_kind("Bet placed", FlashKind::Success));
    assert_eq!(ui.modals_closed.load(Ordering::SeqCst), 1);
    assert_eq!(rpc.sent_count(), 1);
}

#[tokio::test]
async fn submission_failure_reports_and_leaves_modals_alone() {
    let rpc = StubRpc {
        fail_send: true,
        ..StubRpc::default()
    };
    let ui = Arc::new(RecordingUi::default());
    let wallet = StubWallet::default();
    let game = open_game();
    let pdas = pdas();

    let result = place_bet(
        &rpc,
        &program_id(),
        &system_config(),
        Some(&wallet),
        ui.clone(),
        SITE_ID,
        PlaceBetRequest {
            game: &game,
            pdas: &pdas,
            option_id: 0,
            stake: Lamports::from_sol(1),
            agreed_terms: true,
            player_bets: None,
            custom_stake_modal_open: true,
        },
    )
    .await;

    assert!(matches!(result, Err(PlaceBetError::SubmitFailed(_))));
    assert!(ui.flashed("Failed to place bet"));
    assert_eq!(ui.modals_closed.load(Ordering::SeqCst), 0);
    assert_eq!(rpc.sent_count(), 0);
}
