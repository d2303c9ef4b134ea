// =============================================================================
// MasterChef Stake Error Codes
// =============================================================================
// Every instruction aborts as a whole on any of these. The runtime reverts all
// account writes (including token CPIs), so a failed call leaves no trace.
// =============================================================================

use anchor_lang::prelude::*;

/// All errors the program can return.
///
/// Anchor assigns numeric codes starting from 6000 in declaration order.
#[error_code]
pub enum ChefError {
    // =========================================================================
    // Authorization Errors
    // =========================================================================

    /// Signer is not the admin stored in the global config
    #[msg("Unauthorized: admin only")]
    Unauthorized,

    /// New authority is the default key or unchanged
    #[msg("Invalid authority")]
    InvalidAuthority,

    // =========================================================================
    // Balance Errors
    // =========================================================================

    /// Withdraw amount exceeds the staked principal of the position
    #[msg("Insufficient staked balance")]
    InsufficientStake,

    /// User token account cannot cover the deposit
    #[msg("Insufficient token balance or allowance")]
    InsufficientBalanceOrAllowance,

    // =========================================================================
    // Clock Errors
    // =========================================================================

    /// Current slot is behind a pool's last settlement
    #[msg("Clock regression: slot is behind last settlement")]
    ClockRegression,

    // =========================================================================
    // Math Errors
    // =========================================================================

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    /// Weight change would leave no pool with any allocation
    #[msg("Total allocation weight cannot be zero")]
    ZeroTotalWeight,

    // =========================================================================
    // Account Validation Errors
    // =========================================================================

    #[msg("Invalid staked mint for this pool")]
    InvalidStakedMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,

    #[msg("Invalid token account owner")]
    InvalidTokenAccountOwner,

    #[msg("Invalid PDA")]
    InvalidPDA,

    /// Remaining accounts are not exactly every pool, in index order
    #[msg("Pool list must contain every pool in index order")]
    PoolListMismatch,

    #[msg("Pool index out of range")]
    InvalidPoolIndex,

    /// Registry is full; mass settlement could no longer fit one transaction
    #[msg("Maximum number of pools reached")]
    TooManyPools,
}
