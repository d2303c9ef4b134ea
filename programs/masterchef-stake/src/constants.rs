// =============================================================================
// MasterChef Stake Constants
// =============================================================================

// PDA Seeds
pub const CONFIG_SEED: &[u8] = b"chef_config";
pub const REWARD_MINT_SEED: &[u8] = b"reward_mint";
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const POSITION_SEED: &[u8] = b"position";

// Fixed-point scale for acc_reward_per_share (10^12)
// reward_debt and pending rewards are floor-divided by this
pub const ACC_REWARD_PRECISION: u128 = 1_000_000_000_000;

// Pool 0 stakes the reward token itself and is seeded with this weight,
// so total_alloc_weight is never zero once the program is initialized
pub const REWARD_POOL_ALLOC_WEIGHT: u64 = 1_000;

// Admin instructions lock every pool as a remaining account next to up to
// eight named accounts; the registry must stay within one legacy transaction
pub const MAX_POOLS: u64 = 24;

// Token decimals
pub const REWARD_DECIMALS: u8 = 6;
