pub mod constants;
pub mod program_ids;
pub mod types;

pub use constants::*;
pub use program_ids::*;
pub use types::*;
