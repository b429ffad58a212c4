//! Solana program IDs and public keys used by the client
//!
//! Centralizes all program ID constants to ensure consistency
//! and make it easier to update when needed.

use anyhow::{Context, Result};
use solana_sdk::pubkey::Pubkey;
use std::env;
use std::str::FromStr;

/// SPL Memo program ID
pub const MEMO_PROGRAM_ID: &str = "MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr";

/// Get the betting program ID from environment variable
///
/// # Errors
/// Returns error if BETTING_PROGRAM_ID is not set
pub fn betting_program_id_str() -> Result<String> {
    env::var("BETTING_PROGRAM_ID").context("BETTING_PROGRAM_ID environment variable not set")
}

/// Parse the betting program ID as a Pubkey
///
/// # Errors
/// Returns error if BETTING_PROGRAM_ID is not set or cannot be parsed as a valid Pubkey
pub fn betting_program_id() -> Result<Pubkey> {
    let id_str = betting_program_id_str()?;
    Pubkey::from_str(&id_str).context("Failed to parse BETTING_PROGRAM_ID as a valid Pubkey")
}

/// Get the SPL Memo program as Pubkey
pub fn memo_program_id() -> Pubkey {
    Pubkey::from_str(MEMO_PROGRAM_ID).expect("MEMO_PROGRAM_ID is a valid constant")
}
