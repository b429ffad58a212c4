//! UI side channel
//!
//! The embedding front end implements this seam; the library fires
//! notifications and modal cues through it without awaiting them.

/// Visual style of a flash message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Error,
    Success,
    Warning,
}

/// Default display duration for flash messages, in milliseconds
pub const DEFAULT_FLASH_MS: u64 = 5_000;

pub trait UiSink: Send + Sync {
    /// Fire-and-forget notification toast.
    fn flash_with(&self, message: &str, kind: FlashKind, duration_ms: u64);

    /// Ask the front end to open its wallet-connect dialog.
    fn request_wallet_connect(&self);

    /// Close the custom-stake modal after a successful bet.
    fn close_custom_stake_modal(&self);

    fn flash(&self, message: &str, kind: FlashKind) {
        self.flash_with(message, kind, DEFAULT_FLASH_MS);
    }
}
