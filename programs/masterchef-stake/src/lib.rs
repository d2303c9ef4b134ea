use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;


use instructions::*;

// Program ID - will be updated after first deploy
declare_id!("9gW3xmFh3ZaKfGvN7qXc5VRuJ6Lm4dYkT2pEa8sBnHcQ");

#[program]
pub mod masterchef_stake {
    use super::*;

    /// Initialize the global config, reward mint and pool 0
    ///
    /// Pool 0 stakes the reward token itself with weight
    /// REWARD_POOL_ALLOC_WEIGHT, so the total weight is never zero.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `reward_per_slot` - Reward units emitted per slot across all pools
    /// * `start_slot` - Slot after which emission begins
    ///
    pub fn initialize(ctx: Context<Initialize>, reward_per_slot: u64, start_slot: u64) -> Result<()> {
        instructions::initialize::handler_initialize(ctx, reward_per_slot, start_slot)
    }

    /// Append a new staking pool (admin only)
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts; remaining accounts
    ///   must list every existing pool in index order
    /// * `alloc_weight` - The new pool's share of emission
    ///
    pub fn add_pool<'info>(
        ctx: Context<'_, '_, 'info, 'info, AddPool<'info>>,
        alloc_weight: u64,
    ) -> Result<()> {
        instructions::admin::handler_add_pool(ctx, alloc_weight)
    }

    /// Change an existing pool's allocation weight (admin only)
    ///
    /// # Arguments
    /// * `pool_index` - Index of the pool to reweight
    /// * `alloc_weight` - New weight
    ///
    pub fn set_pool_weight<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetPoolWeight<'info>>,
        pool_index: u64,
        alloc_weight: u64,
    ) -> Result<()> {
        instructions::admin::handler_set_pool_weight(ctx, pool_index, alloc_weight)
    }

    /// Replace the fixed per-slot emission rate (admin only)
    ///
    pub fn update_reward_rate<'info>(
        ctx: Context<'_, '_, 'info, 'info, UpdateRewardRate<'info>>,
        reward_per_slot: u64,
    ) -> Result<()> {
        instructions::admin::handler_update_reward_rate(ctx, reward_per_slot)
    }

    /// Transfer admin rights to a new address (admin only)
    ///
    pub fn transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
        instructions::admin::handler_transfer_admin(ctx)
    }

    /// Bring one pool's accumulator up to the current slot
    ///
    pub fn update_pool(ctx: Context<UpdatePool>) -> Result<()> {
        instructions::update_pool::handler_update_pool(ctx)
    }

    /// Bring every pool's accumulator up to the current slot
    ///
    pub fn mass_update_pools<'info>(
        ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
    ) -> Result<()> {
        instructions::update_pool::handler_mass_update_pools(ctx)
    }

    /// Stake tokens into a pool, harvesting pending reward first
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of the pool's staked mint to deposit
    ///
    pub fn deposit(ctx: Context<DepositToPool>, amount: u64) -> Result<()> {
        instructions::deposit::handler_deposit(ctx, amount)
    }

    /// Withdraw principal and harvest pending reward
    ///
    /// A zero amount only harvests.
    ///
    /// # Arguments
    /// * `ctx` - Context containing all required accounts
    /// * `amount` - Amount of principal to withdraw
    ///
    pub fn withdraw(ctx: Context<WithdrawFromPool>, amount: u64) -> Result<()> {
        instructions::withdraw::handler_withdraw(ctx, amount)
    }

    /// Withdraw all principal, forfeiting pending reward
    ///
    pub fn emergency_withdraw(ctx: Context<EmergencyWithdrawFromPool>) -> Result<()> {
        instructions::emergency_withdraw::handler_emergency_withdraw(ctx)
    }

    /// Reward the position could harvest right now
    ///
    /// Returns 0 when `owner` has never deposited into the pool.
    ///
    pub fn pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
        instructions::views::handler_pending_reward(ctx)
    }

    /// Effective emission slots between `from` and `to`
    ///
    pub fn get_multiplier(ctx: Context<GetMultiplier>, from: u64, to: u64) -> Result<u64> {
        instructions::views::handler_get_multiplier(ctx, from, to)
    }
}
