/// Type-safe wrappers for domain primitives
///
/// All monetary values in the client are integer lamports. Conversions to and
/// from SOL decimal strings are done with integer arithmetic so stake and fee
/// amounts never pass through floating point.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{LAMPORTS_PER_SOL, SOL_DECIMALS};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount overflow in lamport arithmetic")]
    Overflow,

    #[error("Invalid SOL amount: {0}")]
    InvalidSol(String),

    #[error("SOL amount has more than {SOL_DECIMALS} fraction digits: {0}")]
    TooPrecise(String),
}

/// Lamport amount with overflow-checked arithmetic
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Lamports(u64);

impl Lamports {
    pub const ZERO: Lamports = Lamports(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn from_sol(sol: u64) -> Self {
        Self(sol * LAMPORTS_PER_SOL)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn checked_add(&self, other: Lamports) -> Result<Self, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    pub fn checked_sub(&self, other: Lamports) -> Result<Self, AmountError> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    pub fn checked_mul(&self, multiplier: u64) -> Result<Self, AmountError> {
        self.0
            .checked_mul(multiplier)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// Render as a SOL decimal string with at most 9 fraction digits.
    ///
    /// Trailing zeros are trimmed: 1_250_000_000 lamports -> "1.25".
    pub fn to_sol_string(&self) -> String {
        let whole = self.0 / LAMPORTS_PER_SOL;
        let frac = self.0 % LAMPORTS_PER_SOL;
        if frac == 0 {
            return whole.to_string();
        }
        let mut rendered = format!("{whole}.{frac:09}");
        while rendered.ends_with('0') {
            rendered.pop();
        }
        rendered
    }

    /// Parse a SOL decimal string ("1.25") into lamports.
    ///
    /// At most 9 fraction digits are accepted; anything finer has no lamport
    /// representation and is rejected rather than rounded.
    pub fn from_sol_str(input: &str) -> Result<Self, AmountError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(AmountError::InvalidSol(input.to_string()));
        }
        let (whole, frac) = match input.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (input, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(AmountError::InvalidSol(input.to_string()));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(AmountError::InvalidSol(input.to_string()));
        }
        if frac.len() > SOL_DECIMALS as usize {
            return Err(AmountError::TooPrecise(input.to_string()));
        }

        let whole_lamports = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .map_err(|_| AmountError::Overflow)?
                .checked_mul(LAMPORTS_PER_SOL)
                .ok_or(AmountError::Overflow)?
        };
        let frac_lamports = if frac.is_empty() {
            0
        } else {
            let scale = 10u64.pow(SOL_DECIMALS - frac.len() as u32);
            frac.parse::<u64>().map_err(|_| AmountError::Overflow)? * scale
        };
        whole_lamports
            .checked_add(frac_lamports)
            .map(Self)
            .ok_or(AmountError::Overflow)
    }
}

impl From<u64> for Lamports {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl From<Lamports> for u64 {
    fn from(amount: Lamports) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Lamports {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} lamports ({} SOL)", self.0, self.to_sol_string())
    }
}

/// Parse a user-entered stake amount, falling back to `min` on garbage input
/// and clamping to `max` when one is given.
pub fn parse_stake_input(input: &str, min: Lamports, max: Option<Lamports>) -> Lamports {
    match Lamports::from_sol_str(input) {
        Ok(amount) => match max {
            Some(max) if amount > max => max,
            _ => amount,
        },
        Err(_) => min,
    }
}
