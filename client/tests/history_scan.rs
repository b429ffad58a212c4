//! Bet-history reconstruction against stubbed signature pages

mod common;

use chrono::Utc;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use client::history::{fetch_my_bets, memo_needle};
use client::rpc::SignatureRecord;
use client::stubs::StubRpc;
use client::{BetMemo, MemoKind};
use shared::SIGNATURE_PAGE_LIMIT;

use common::{init_tracing, open_game, SITE_ID};

fn record(block_time: i64, memo: Option<String>) -> SignatureRecord {
    SignatureRecord {
        signature: Signature::new_unique().to_string(),
        block_time: Some(block_time),
        memo,
    }
}

fn bet_memo_raw(game_id: u32, option_id: u8, stake: &str) -> String {
    let memo = BetMemo {
        site_id: SITE_ID.to_string(),
        game_id,
        kind: MemoKind::Bet,
        option_id,
        stake: stake.to_string(),
        referral: None,
    };
    format!("[1] {}", serde_json::to_string(&memo).unwrap())
}

#[tokio::test]
async fn returns_empty_when_all_history_predates_the_game() {
    let game = open_game();
    let ancient = game.open_time.timestamp() - 10_000;
    let rpc = StubRpc::with_signature_pages(vec![vec![
        record(ancient, Some(bet_memo_raw(game.game_id, 0, "1"))),
        record(ancient - 100, None),
    ]]);

    let bets = fetch_my_bets(&rpc, &Pubkey::new_unique(), &game, SITE_ID)
        .await
        .unwrap();

    assert!(bets.is_empty());
    // Terminated on the first page.
    assert_eq!(
        rpc.signature_page_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        1
    );
}

#[tokio::test]
async fn decodes_matching_memos_and_resolves_options() {
    let game = open_game();
    let in_window = Utc::now().timestamp() - 60;
    let rpc = StubRpc::with_signature_pages(vec![vec![
        record(in_window, Some(bet_memo_raw(game.game_id, 1, "0.25"))),
        record(in_window - 10, Some(bet_memo_raw(game.game_id, 0, "2"))),
        record(in_window - 20, None),
    ]]);

    let bets = fetch_my_bets(&rpc, &Pubkey::new_unique(), &game, SITE_ID)
        .await
        .unwrap();

    assert_eq!(bets.len(), 2);
    assert_eq!(bets[0].title, "Blue");
    assert_eq!(bets[0].color, "#33d");
    assert_eq!(bets[0].stake.as_u64(), 250_000_000);
    assert_eq!(bets[1].title, "Red");
    assert!(bets[0].payment.is_none());
    assert!(bets[0].pay_signature.is_none());
}

#[tokio::test]
async fn skips_foreign_and_malformed_memos() {
    init_tracing();
    let game = open_game();
    let in_window = Utc::now().timestamp() - 60;
    let foreign = bet_memo_raw(game.game_id + 1, 0, "1");
    let broken = format!("[1] {{{} BROKEN", memo_needle(SITE_ID, game.game_id));
    let unknown_option = bet_memo_raw(game.game_id, 9, "1");
    let rpc = StubRpc::with_signature_pages(vec![vec![
        record(in_window, Some(foreign)),
        record(in_window - 1, Some(broken)),
        record(in_window - 2, Some(unknown_option)),
        record(in_window - 3, Some(bet_memo_raw(game.game_id, 0, "1"))),
    ]]);

    let bets = fetch_my_bets(&rpc, &Pubkey::new_unique(), &game, SITE_ID)
        .await
        .unwrap();

    // Only the well-formed memo for a known option survives.
    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].option_id, 0);
}

#[tokio::test]
async fn follows_the_pagination_cursor_through_full_pages() {
    let game = open_game();
    let in_window = Utc::now().timestamp() - 60;

    let full_page: Vec<SignatureRecord> = (0..SIGNATURE_PAGE_LIMIT)
        .map(|k| record(in_window - k as i64, None))
        .collect();
    let short_page = vec![record(
        in_window - SIGNATURE_PAGE_LIMIT as i64,
        Some(bet_memo_raw(game.game_id, 1, "1.5")),
    )];
    let rpc = StubRpc::with_signature_pages(vec![full_page, short_page]);

    let bets = fetch_my_bets(&rpc, &Pubkey::new_unique(), &game, SITE_ID)
        .await
        .unwrap();

    assert_eq!(bets.len(), 1);
    assert_eq!(bets[0].stake.as_u64(), 1_500_000_000);
    assert_eq!(
        rpc.signature_page_calls
            .load(std::sync::atomic::Ordering::SeqCst),
        2
    );
}

#[tokio::test]
async fn returns_empty_without_a_cached_definition() {
    let mut game = open_game();
    game.definition = None;
    let rpc = StubRpc::default();

    let bets = fetch_my_bets(&rpc, &Pubkey::new_unique(), &game, SITE_ID)
        .await
        .unwrap();

    assert!(bets.is_empty());
    assert_eq!(rpc.total_calls(), 0);
}
