//! Program Derived Address (PDA) derivation utilities

use solana_sdk::pubkey::Pubkey;

use crate::domain::GamePdas;

/// Derive the system config PDA for an authority
pub fn derive_system_config_pda(program_id: &Pubkey, authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"system_config", authority.as_ref()], program_id)
}

/// Derive a game PDA
pub fn derive_game_pda(program_id: &Pubkey, authority: &Pubkey, game_id: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[b"game", authority.as_ref(), &game_id.to_le_bytes()],
        program_id,
    )
}

/// Derive the player-bets PDA (requires the game PDA)
pub fn derive_player_bets_pda(
    program_id: &Pubkey,
    game: &Pubkey,
    player: &Pubkey,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"player_bets", game.as_ref(), player.as_ref()], program_id)
}

impl GamePdas {
    /// Derive every account a bet transaction touches.
    pub fn derive(program_id: &Pubkey, authority: &Pubkey, game_id: u32, player: &Pubkey) -> Self {
        let (game, _) = derive_game_pda(program_id, authority, game_id);
        let (player_bets, _) = derive_player_bets_pda(program_id, &game, player);
        let (system_config, _) = derive_system_config_pda(program_id, authority);
        Self {
            game,
            player_bets,
            system_config,
        }
    }
}
