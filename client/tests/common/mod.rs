//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::sync::Once;

use chrono::{Duration, Utc};
use solana_sdk::pubkey::Pubkey;

use client::domain::{
    BetEntry, Game, GameDefinition, GameOption, GamePdas, PlayerBets, SystemConfig,
};
use shared::Lamports;

pub const SITE_ID: &str = "CubistC";

static INIT: Once = Once::new();

/// Install a test subscriber once so skipped-memo warnings are visible
/// under `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "client=debug".into()),
            )
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn option(title: &str, color: &str) -> GameOption {
    GameOption {
        title: title.to_string(),
        description: None,
        color: color.to_string(),
    }
}

/// A game that opened an hour ago and closes in an hour.
pub fn open_game() -> Game {
    game_with_offsets(-3600, 3600, 7200)
}

pub fn game_with_offsets(open_secs: i64, close_secs: i64, settle_secs: i64) -> Game {
    let now = Utc::now();
    Game {
        game_id: 1,
        open_time: now + Duration::seconds(open_secs),
        close_time: now + Duration::seconds(close_secs),
        settle_time: now + Duration::seconds(settle_secs),
        fee: 10.0,
        min_stake: Lamports::from_sol(1),
        min_step: Lamports::new(100_000_000),
        stake_buttons: vec![Lamports::from_sol(1), Lamports::from_sol(2)],
        custom_stake_button: true,
        terms_id: "T1".to_string(),
        definition: Some(GameDefinition {
            title: "Who wins?".to_string(),
            description: "Pick a side".to_string(),
            options: vec![option("Red", "#d33"), option("Blue", "#33d")],
        }),
    }
}

pub fn pdas() -> GamePdas {
    GamePdas {
        game: Pubkey::new_unique(),
        player_bets: Pubkey::new_unique(),
        system_config: Pubkey::new_unique(),
    }
}

pub fn system_config() -> SystemConfig {
    SystemConfig {
        bet_fee: Lamports::new(5_000_000),
        profit_fee: 2.0,
        treasury: Pubkey::new_unique(),
    }
}

pub fn player_bets(count: usize) -> PlayerBets {
    PlayerBets {
        bets: (0..count)
            .map(|k| BetEntry {
                option_id: (k % 2) as u8,
                stake: Lamports::from_sol(1),
                referral: None,
                payment: None,
            })
            .collect(),
    }
}
