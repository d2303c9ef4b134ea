use anchor_lang::prelude::*;

use crate::constants::MAX_POOLS;
use crate::error::ChefError;

/// Program-wide emission settings and pool registry header
/// PDA: ["chef_config"]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct GlobalConfig {
    /// Admin who can add pools and change weights or the emission rate
    pub admin: Pubkey,

    /// Reward token mint; its mint authority is this config PDA
    pub reward_mint: Pubkey,

    /// Reward units minted per elapsed slot across all pools combined
    pub reward_per_slot: u64,

    /// No reward accrues for slots at or before this one
    pub start_slot: u64,

    /// Sum of alloc_weight over every pool
    pub total_alloc_weight: u64,

    /// Number of pools created; also the index of the next pool
    pub pool_count: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Reward mint PDA bump seed
    pub reward_mint_bump: u8,
}

impl GlobalConfig {
    /// Effective slots elapsed between `from` and `to`, clipped to start_slot.
    pub fn multiplier(&self, from: u64, to: u64) -> u64 {
        if to <= self.start_slot {
            return 0;
        }
        to.saturating_sub(from.max(self.start_slot))
    }

    /// Share of emission owed to a pool of `alloc_weight` over `multiplier` slots
    /// Formula: multiplier * reward_per_slot * alloc_weight / total_alloc_weight
    ///
    /// Floor-divided once over the whole interval.
    pub fn pool_reward(&self, multiplier: u64, alloc_weight: u64) -> Result<u64> {
        let reward = (multiplier as u128)
            .checked_mul(self.reward_per_slot as u128)
            .ok_or(ChefError::MathOverflow)?
            .checked_mul(alloc_weight as u128)
            .ok_or(ChefError::MathOverflow)?
            .checked_div(self.total_alloc_weight as u128)
            .ok_or(ChefError::DivisionByZero)?;

        u64::try_from(reward).map_err(|_| error!(ChefError::MathOverflow))
    }

    /// Register a new pool's weight. Returns the index assigned to it.
    pub fn register_pool(&mut self, alloc_weight: u64) -> Result<u64> {
        require!(self.pool_count < MAX_POOLS, ChefError::TooManyPools);
        let index = self.pool_count;

        self.total_alloc_weight = self
            .total_alloc_weight
            .checked_add(alloc_weight)
            .ok_or(ChefError::MathOverflow)?;

        self.pool_count = self
            .pool_count
            .checked_add(1)
            .ok_or(ChefError::MathOverflow)?;

        Ok(index)
    }

    /// Swap one pool's weight for another in the running total
    pub fn reweight_pool(&mut self, old_weight: u64, new_weight: u64) -> Result<()> {
        let total = self
            .total_alloc_weight
            .checked_sub(old_weight)
            .ok_or(ChefError::MathUnderflow)?
            .checked_add(new_weight)
            .ok_or(ChefError::MathOverflow)?;

        require!(total > 0, ChefError::ZeroTotalWeight);

        self.total_alloc_weight = total;
        Ok(())
    }
}
