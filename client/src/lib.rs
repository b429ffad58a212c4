//! Client-side core for a pari-mutuel betting application on Solana
//!
//! Owns bet transaction assembly, the placement guard sequence, settings
//! validation, payout arithmetic, and bet-history reconstruction. Rendering,
//! the wallet implementation, and the on-chain program live elsewhere and
//! reach this crate only through the seams in `rpc`, `wallet`, and `ui`.

pub mod config;
pub mod domain;
pub mod errors;
pub mod history;
pub mod instructions;
pub mod payout;
pub mod pda;
pub mod placement;
pub mod rpc;
pub mod stubs;
pub mod tx;
pub mod ui;
pub mod validation;
pub mod wallet;

pub use errors::PlaceBetError;
pub use history::{fetch_my_bets, MyBet};
pub use payout::{calculate_payment, final_fee};
pub use placement::{place_bet, PlaceBetRequest};
pub use tx::{build_bet_transaction, BetMemo, MemoKind};
