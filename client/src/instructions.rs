//! Instruction builders for the betting program
//!
//! Mirrors the program's Anchor interface: each instruction carries the
//! 8-byte global discriminator followed by borsh-encoded arguments.

use sha2::{Digest, Sha256};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use shared::program_ids::memo_program_id;

/// Anchor global instruction discriminator: SHA256("global:<name>")[0..8]
fn discriminator(name: &str) -> [u8; 8] {
    let hash = Sha256::digest(format!("global:{name}").as_bytes());
    let mut disc = [0u8; 8];
    disc.copy_from_slice(&hash[..8]);
    disc
}

/// Create the player-bets account for a (player, game) pair
pub fn initialize_player_bets(
    program_id: &Pubkey,
    player: &Pubkey,
    game: &Pubkey,
    player_bets: &Pubkey,
) -> Instruction {
    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*player, true),
            AccountMeta::new(*game, false),
            AccountMeta::new(*player_bets, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data: discriminator("initialize_player_bets").to_vec(),
    }
}

/// Place a native-SOL bet of `lamports` (stake plus the per-bet fee) on
/// option `option_id`
pub fn place_sol_bet(
    program_id: &Pubkey,
    option_id: u8,
    lamports: u64,
    player: &Pubkey,
    game: &Pubkey,
    player_bets: &Pubkey,
    system_treasury: &Pubkey,
    system_config: &Pubkey,
) -> Instruction {
    let mut data = discriminator("place_sol_bet").to_vec();
    data.push(option_id);
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: *program_id,
        accounts: vec![
            AccountMeta::new(*player, true),
            AccountMeta::new(*game, false),
            AccountMeta::new(*player_bets, false),
            AccountMeta::new(*system_treasury, false),
            AccountMeta::new_readonly(*system_config, false),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
        data,
    }
}

/// Memo instruction carrying an off-chain bet record as raw bytes
pub fn memo(data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: memo_program_id(),
        accounts: vec![],
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discriminator_is_stable() {
        assert_eq!(
            discriminator("place_sol_bet"),
            discriminator("place_sol_bet")
        );
        assert_ne!(
            discriminator("place_sol_bet"),
            discriminator("initialize_player_bets")
        );
    }

    #[test]
    fn test_place_sol_bet_data_layout() {
        let program_id = Pubkey::new_unique();
        let player = Pubkey::new_unique();
        let game = Pubkey::new_unique();
        let player_bets = Pubkey::new_unique();
        let treasury = Pubkey::new_unique();
        let system_config = Pubkey::new_unique();

        let ix = place_sol_bet(
            &program_id,
            3,
            1_500_000_000,
            &player,
            &game,
            &player_bets,
            &treasury,
            &system_config,
        );

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.data.len(), 8 + 1 + 8);
        assert_eq!(ix.data[8], 3);
        assert_eq!(
            u64::from_le_bytes(ix.data[9..17].try_into().unwrap()),
            1_500_000_000
        );

        // Player signs; the config account is read-only.
        assert_eq!(ix.accounts[0].pubkey, player);
        assert!(ix.accounts[0].is_signer);
        assert!(!ix.accounts[4].is_writable);
    }

    #[test]
    fn test_initialize_player_bets_has_no_args() {
        let ix = initialize_player_bets(
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
        );
        assert_eq!(ix.data.len(), 8);
    }

    #[test]
    fn test_memo_carries_raw_bytes_with_no_accounts() {
        let ix = memo(b"{\"type\":\"Bet\"}".to_vec());
        assert_eq!(ix.program_id, memo_program_id());
        assert!(ix.accounts.is_empty());
        assert_eq!(ix.data, b"{\"type\":\"Bet\"}");
    }
}
