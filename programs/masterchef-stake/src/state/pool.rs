use anchor_lang::prelude::*;

use crate::constants::ACC_REWARD_PRECISION;
use crate::error::ChefError;
use crate::state::GlobalConfig;

/// One staking bucket for a single mint
/// PDA: ["pool", global_config, index (u64 LE)]
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct Pool {
    /// Append position in the registry
    pub index: u64,

    /// Mint users stake into this pool (several pools may share one mint)
    pub staked_mint: Pubkey,

    /// Token account custodying this pool's principal
    /// PDA: ["pool_vault", pool], authority = pool
    pub vault: Pubkey,

    /// Share of reward_per_slot relative to total_alloc_weight
    pub alloc_weight: u64,

    /// Slot at which acc_reward_per_share was last brought up to date
    /// Always >= start_slot
    pub last_settled_slot: u64,

    /// Reward per staked unit since pool creation, scaled by ACC_REWARD_PRECISION
    /// Never decreases
    pub acc_reward_per_share: u128,

    /// Sum of every position's amount; equals the vault balance
    pub total_staked: u64,

    /// Lifetime reward accounted to this pool by settlement
    pub total_reward_accrued: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Vault PDA bump seed
    pub vault_bump: u8,
}

/// Result of bringing a pool forward to a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Accrual {
    reward: u64,
    acc_reward_per_share: u128,
}

impl Pool {
    /// First slot a pool added at `slot` starts accruing from
    pub fn initial_settled_slot(config: &GlobalConfig, slot: u64) -> u64 {
        slot.max(config.start_slot)
    }

    /// Advance acc_reward_per_share to `slot`.
    ///
    /// Returns the reward this pool earned over the interval. Nothing is
    /// minted here; the caller realizes harvests against the token program.
    /// An empty pool moves its clock forward and earns nothing.
    pub fn settle(&mut self, config: &GlobalConfig, slot: u64) -> Result<u64> {
        let Some(accrual) = self.accrue(config, slot)? else {
            return Ok(0);
        };

        self.total_reward_accrued = self
            .total_reward_accrued
            .checked_add(accrual.reward)
            .ok_or(ChefError::MathOverflow)?;
        self.acc_reward_per_share = accrual.acc_reward_per_share;
        self.last_settled_slot = slot;

        Ok(accrual.reward)
    }

    /// What acc_reward_per_share would be after `settle(config, slot)`, without mutating.
    pub fn projected_acc_reward_per_share(&self, config: &GlobalConfig, slot: u64) -> Result<u128> {
        Ok(self
            .accrue(config, slot)?
            .map_or(self.acc_reward_per_share, |a| a.acc_reward_per_share))
    }

    fn accrue(&self, config: &GlobalConfig, slot: u64) -> Result<Option<Accrual>> {
        if slot < self.last_settled_slot {
            // Pools added before start_slot sit at start_slot until the clock catches up
            require!(
                self.last_settled_slot == config.start_slot,
                ChefError::ClockRegression
            );
            return Ok(None);
        }
        if slot == self.last_settled_slot {
            return Ok(None);
        }

        if self.total_staked == 0 {
            return Ok(Some(Accrual {
                reward: 0,
                acc_reward_per_share: self.acc_reward_per_share,
            }));
        }

        let multiplier = config.multiplier(self.last_settled_slot, slot);
        let reward = config.pool_reward(multiplier, self.alloc_weight)?;

        let increase = (reward as u128)
            .checked_mul(ACC_REWARD_PRECISION)
            .ok_or(ChefError::MathOverflow)?
            .checked_div(self.total_staked as u128)
            .ok_or(ChefError::DivisionByZero)?;

        let acc_reward_per_share = self
            .acc_reward_per_share
            .checked_add(increase)
            .ok_or(ChefError::MathOverflow)?;

        Ok(Some(Accrual {
            reward,
            acc_reward_per_share,
        }))
    }

    pub fn record_deposit(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(ChefError::MathOverflow)?;
        Ok(())
    }

    pub fn record_withdraw(&mut self, amount: u64) -> Result<()> {
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(ChefError::MathUnderflow)?;
        Ok(())
    }
}
