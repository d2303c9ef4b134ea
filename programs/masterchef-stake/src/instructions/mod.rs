// =============================================================================
// Instructions Module - MasterChef Stake
// =============================================================================

pub mod admin;
pub mod deposit;
pub mod emergency_withdraw;
pub mod initialize;
pub mod settlement;
pub mod update_pool;
pub mod views;
pub mod withdraw;

pub use admin::*;
pub use deposit::*;
pub use emergency_withdraw::*;
pub use initialize::*;
pub use update_pool::*;
pub use views::*;
pub use withdraw::*;
