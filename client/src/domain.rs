use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use shared::Lamports;

/// One possible outcome of a game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameOption {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub color: String,
}

/// Off-chain cached definition of a game (title, description, options)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDefinition {
    pub title: String,
    pub description: String,
    pub options: Vec<GameOption>,
}

/// A betting round
///
/// Times are strictly ordered: open < close < settle. Bets are accepted only
/// in the [open, close) window.
#[derive(Debug, Clone)]
pub struct Game {
    pub game_id: u32,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub settle_time: DateTime<Utc>,
    /// Game fee as a percentage (0-100)
    pub fee: f64,
    pub min_stake: Lamports,
    pub min_step: Lamports,
    pub stake_buttons: Vec<Lamports>,
    pub custom_stake_button: bool,
    pub terms_id: String,
    pub definition: Option<GameDefinition>,
}

/// One bet stored in the player-bets account
#[derive(Debug, Clone)]
pub struct BetEntry {
    pub option_id: u8,
    pub stake: Lamports,
    pub referral: Option<String>,
    /// Settled payout; None until the game settles
    pub payment: Option<Lamports>,
}

/// Per-(wallet, game) account state, created lazily on the first bet
#[derive(Debug, Clone, Default)]
pub struct PlayerBets {
    pub bets: Vec<BetEntry>,
}

/// Global program parameters
#[derive(Debug, Clone)]
pub struct SystemConfig {
    /// Fixed lamport surcharge collected on every bet
    pub bet_fee: Lamports,
    /// Program profit fee as a percentage of each game's fee take
    pub profit_fee: f64,
    pub treasury: Pubkey,
}

/// A treasury's percentage entitlement to a game's collected fees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitShare {
    pub treasury: String,
    pub share: f64,
}

/// Terms & Conditions entry stored on the config account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terms {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Terms form state; `bump` is Some when editing an existing entry
#[derive(Debug, Clone)]
pub struct TermsDraft {
    pub id: String,
    pub title: String,
    pub description: String,
    pub bump: Option<u8>,
}

/// Game definition form state
#[derive(Debug, Clone)]
pub struct DefinitionDraft {
    pub title: String,
    pub description: String,
    pub options: Vec<GameOption>,
}

/// Config-level settings form
#[derive(Debug, Clone)]
pub struct ConfigSettings {
    pub fee: f64,
    pub fire_threshold: Lamports,
    pub domain: String,
    pub min_stake: Lamports,
    pub min_step: Lamports,
    pub stake_buttons: Vec<Lamports>,
    pub profit_sharing: Vec<ProfitShare>,
    pub terms: Vec<Terms>,
}

/// Game-level settings form
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub game_id: u32,
    pub fee: f64,
    pub fire_threshold: Lamports,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub settle_time: DateTime<Utc>,
    pub min_stake: Lamports,
    pub min_step: Lamports,
    pub stake_buttons: Vec<Lamports>,
    pub custom_stake_button: bool,
    pub profit_sharing: Vec<ProfitShare>,
    pub terms_id: String,
}

/// Program accounts a bet transaction touches
#[derive(Debug, Clone, Copy)]
pub struct GamePdas {
    pub game: Pubkey,
    pub player_bets: Pubkey,
    pub system_config: Pubkey,
}
