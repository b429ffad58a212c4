use shared::Lamports;

/// Failures surfaced by the bet placement flow
///
/// Every variant is also reported through the UI seam as a flash message;
/// the enum exists so callers and tests can branch on the cause. All variants
/// except `SubmitFailed` are raised before anything reaches the network.
#[derive(Debug, thiserror::Error)]
pub enum PlaceBetError {
    #[error("Game is not open yet")]
    NotOpenYet,

    #[error("Game is closed")]
    Closed,

    #[error("Wallet is not connected")]
    WalletNotConnected,

    #[error("You must accept the Terms & Conditions")]
    TermsNotAccepted,

    #[error("Maximum {max} bets per game")]
    BetLimitReached { max: usize },

    #[error("Failed to read wallet's balance")]
    BalanceUnavailable,

    #[error("Not enough balance! You need at least {} SOL", .required.to_sol_string())]
    InsufficientBalance { required: Lamports },

    #[error("Failed to assemble bet transaction")]
    Assembly(#[source] anyhow::Error),

    #[error("Failed to place bet")]
    SubmitFailed(#[source] anyhow::Error),
}

impl PlaceBetError {
    /// Whether the user can correct the condition and retry immediately
    /// (as opposed to a submission failure of unknown on-chain outcome).
    pub fn user_recoverable(&self) -> bool {
        !matches!(self, PlaceBetError::SubmitFailed(_))
    }
}
