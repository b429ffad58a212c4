/// Shared constants for the betting client
///
/// This module centralizes all magic numbers and program limits
/// to keep validation, transaction assembly, and history scanning consistent.

/// Lamports per SOL (1 SOL = 10^9 lamports)
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Fraction digits carried by SOL decimal strings
pub const SOL_DECIMALS: u32 = 9;

/// Maximum percentage value (fees and shares are expressed against this)
pub const MAX_PERCENTAGE: u64 = 100;

/// Maximum number of options a game definition may carry
///
/// Rationale: the on-chain game account stores option pools inline, so the
/// option list is bounded at account-creation time.
pub const MAX_GAME_OPTIONS: usize = 25;

/// Maximum number of preset stake buttons per game
pub const MAX_STAKE_BUTTONS: usize = 10;

/// Maximum number of bets a player may place on a single game
///
/// Rationale: the player-bets account is sized for a fixed number of entries;
/// the program rejects the 11th bet, so the client refuses it up front.
pub const MAX_BETS_PER_GAME: usize = 10;

/// Maximum number of profit-share entries per game
pub const MAX_PROFIT_SHARES: usize = 10;

/// Size in bytes of the player-bets account, used for rent-exemption lookups
pub const PLAYER_BETS_ACCOUNT_SIZE: usize = 200;

/// Seconds before an unconfirmed bet triggers the network-congestion notice
///
/// The notice is informational only; the underlying submission keeps running.
pub const CONFIRMATION_NOTICE_SECS: u64 = 30;

/// Page size used when scanning a wallet's signature history
pub const SIGNATURE_PAGE_LIMIT: usize = 1000;

/// Characters of the authority key used as the site identifier in memos
pub const SITE_ID_LEN: usize = 7;
