pub mod constants;
pub mod types;
pub mod errors;
pub mod payout_table;

pub use constants::*;
pub use types::*;
pub use payout_table::*;
