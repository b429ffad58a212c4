use serde::Deserialize;
use std::env;

use shared::SITE_ID_LEN;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base-58 key of the games authority this site belongs to
    pub authority: String,
    pub solana: SolanaConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SolanaConfig {
    pub rpc_url: String,
    pub commitment: String,
    pub program_id: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            authority: env::var("AUTHORITY_PUBKEY").expect("AUTHORITY_PUBKEY must be set"),
            solana: SolanaConfig {
                rpc_url: env::var("SOLANA_RPC_URL").expect("SOLANA_RPC_URL must be set"),
                commitment: env::var("SOLANA_COMMITMENT")
                    .unwrap_or_else(|_| "confirmed".to_string()),
                program_id: env::var("BETTING_PROGRAM_ID")
                    .expect("BETTING_PROGRAM_ID must be set"),
            },
        })
    }

    /// Site identifier carried in bet memos: the first 7 characters of the
    /// authority key.
    pub fn site_id(&self) -> &str {
        let end = SITE_ID_LEN.min(self.authority.len());
        &self.authority[..end]
    }
}
