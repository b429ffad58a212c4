//! Pari-mutuel fee and payout arithmetic
//!
//! All arithmetic is integer lamports with u128 intermediates; percentages
//! are converted to basis points before they touch an amount.

use shared::{Lamports, MAX_PERCENTAGE};

const BPS_PER_PERCENT: f64 = 100.0;
const BPS_DENOMINATOR: u128 = 10_000;

fn to_basis_points(fee: f64) -> u128 {
    let clamped = fee.clamp(0.0, MAX_PERCENTAGE as f64);
    (clamped * BPS_PER_PERCENT).round() as u128
}

/// House fee for a settled game.
///
/// The fee is `fee`% of the total pool, but never more than half of the
/// losing pool: winners always at least break even.
pub fn final_fee(total_stake: Lamports, loser_stake: Lamports, fee: f64) -> Lamports {
    let amount = total_stake.as_u64() as u128 * to_basis_points(fee) / BPS_DENOMINATOR;
    let cap = loser_stake.as_u64() as u128 / 2;
    Lamports::new(amount.min(cap) as u64)
}

/// A winner's share of the fee-adjusted pot, proportional to their stake.
///
/// Floors to whole lamports; a zero winning pool pays zero.
pub fn calculate_payment(
    stake: Lamports,
    total_stake: Lamports,
    winner_stake: Lamports,
    fee: f64,
) -> Lamports {
    if winner_stake.as_u64() == 0 {
        return Lamports::ZERO;
    }
    let loser_stake = Lamports::new(total_stake.as_u64().saturating_sub(winner_stake.as_u64()));
    let fee_amount = final_fee(total_stake, loser_stake, fee);
    let pot = total_stake.as_u64() as u128 - fee_amount.as_u64() as u128;
    Lamports::new((pot * stake.as_u64() as u128 / winner_stake.as_u64() as u128) as u64)
}
