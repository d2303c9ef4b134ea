use anchor_lang::prelude::*;

/// Emitted when a user stakes into a pool
#[event]
pub struct Deposit {
    pub user: Pubkey,
    pub pool_index: u64,
    pub amount: u64,
    pub slot: u64,
}

/// Emitted when a user takes principal out of a pool (amount may be 0 for a harvest)
#[event]
pub struct Withdraw {
    pub user: Pubkey,
    pub pool_index: u64,
    pub amount: u64,
    pub slot: u64,
}

/// Emitted when a user pulls principal out without rewards
#[event]
pub struct EmergencyWithdraw {
    pub user: Pubkey,
    pub pool_index: u64,
    pub amount: u64,
    pub slot: u64,
}

/// Emitted whenever pending reward is minted to a user
#[event]
pub struct RewardHarvested {
    pub user: Pubkey,
    pub pool_index: u64,
    pub amount: u64,
    pub slot: u64,
}

/// Emitted when a pool is appended to the registry
#[event]
pub struct PoolAdded {
    pub pool_index: u64,
    pub staked_mint: Pubkey,
    pub alloc_weight: u64,
    pub total_alloc_weight: u64,
    pub slot: u64,
}

#[event]
pub struct PoolWeightUpdated {
    pub pool_index: u64,
    pub old_alloc_weight: u64,
    pub new_alloc_weight: u64,
    pub total_alloc_weight: u64,
    pub slot: u64,
}

#[event]
pub struct RewardRateUpdated {
    pub old_reward_per_slot: u64,
    pub new_reward_per_slot: u64,
    pub slot: u64,
}

#[event]
pub struct AdminTransferred {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
