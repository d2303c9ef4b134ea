use anchor_lang::prelude::*;

use crate::constants::ACC_REWARD_PRECISION;
use crate::error::ChefError;

/// Per-user stake in one pool
/// PDA: ["position", pool, owner]
///
/// Created on first deposit and never closed, so the reward_debt checkpoint
/// survives a full withdrawal.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq)]
pub struct UserPosition {
    /// The pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this position
    pub owner: Pubkey,

    /// Staked principal
    pub amount: u64,

    /// Reward already priced in at the last checkpoint
    /// reward_debt = amount * acc_reward_per_share / PRECISION
    pub reward_debt: u128,

    /// Lifetime reward minted to the owner from this position
    pub rewards_harvested: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl UserPosition {
    /// amount * acc_reward_per_share / PRECISION, floored
    fn accrued(&self, acc_reward_per_share: u128) -> Result<u128> {
        Ok((self.amount as u128)
            .checked_mul(acc_reward_per_share)
            .ok_or(ChefError::MathOverflow)?
            / ACC_REWARD_PRECISION)
    }

    /// Reward owed to this position against a settled accumulator
    /// Formula: amount * acc_reward_per_share / PRECISION - reward_debt
    pub fn pending_reward(&self, acc_reward_per_share: u128) -> Result<u64> {
        let pending = self
            .accrued(acc_reward_per_share)?
            .checked_sub(self.reward_debt)
            .ok_or(ChefError::MathUnderflow)?;

        u64::try_from(pending).map_err(|_| error!(ChefError::MathOverflow))
    }

    /// Re-price reward_debt at the current amount
    pub fn checkpoint(&mut self, acc_reward_per_share: u128) -> Result<()> {
        self.reward_debt = self.accrued(acc_reward_per_share)?;
        Ok(())
    }

    pub fn record_harvest(&mut self, harvested: u64) -> Result<()> {
        self.rewards_harvested = self
            .rewards_harvested
            .checked_add(harvested)
            .ok_or(ChefError::MathOverflow)?;
        Ok(())
    }

    /// Add principal and re-checkpoint.
    /// Pending reward must already have been harvested.
    pub fn record_deposit(&mut self, amount: u64, acc_reward_per_share: u128) -> Result<()> {
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ChefError::MathOverflow)?;

        self.checkpoint(acc_reward_per_share)
    }

    /// Remove principal and re-checkpoint.
    /// Pending reward must already have been harvested.
    pub fn record_withdraw(&mut self, amount: u64, acc_reward_per_share: u128) -> Result<()> {
        require!(self.amount >= amount, ChefError::InsufficientStake);

        self.amount = self
            .amount
            .checked_sub(amount)
            .ok_or(ChefError::MathUnderflow)?;

        self.checkpoint(acc_reward_per_share)
    }

    /// Drop principal and reward entitlement. Returns the principal to send back.
    pub fn record_emergency_withdraw(&mut self) -> u64 {
        let amount = self.amount;
        self.amount = 0;
        self.reward_debt = 0;
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_reward_is_accrued_minus_debt() {
        let mut position = UserPosition::default();
        position.record_deposit(1_000, 0).unwrap();
        assert_eq!(position.reward_debt, 0);

        let acc = 5 * ACC_REWARD_PRECISION;
        assert_eq!(position.pending_reward(acc).unwrap(), 5_000);

        position.checkpoint(acc).unwrap();
        assert_eq!(position.pending_reward(acc).unwrap(), 0);
        assert_eq!(position.pending_reward(acc + ACC_REWARD_PRECISION).unwrap(), 1_000);
    }

    #[test]
    fn pending_reward_floors_fractional_units() {
        let mut position = UserPosition::default();
        position.record_deposit(3, 0).unwrap();
        // 3 * 0.333... = 0.999... floors to 0
        assert_eq!(position.pending_reward(333_333_333_333).unwrap(), 0);
        assert_eq!(position.pending_reward(333_333_333_334).unwrap(), 1);
    }

    #[test]
    fn pending_reward_against_stale_accumulator_underflows() {
        let mut position = UserPosition::default();
        position.record_deposit(10, 2 * ACC_REWARD_PRECISION).unwrap();
        assert!(position.pending_reward(ACC_REWARD_PRECISION).is_err());
    }

    #[test]
    fn record_withdraw_rejects_more_than_staked() {
        let mut position = UserPosition::default();
        position.record_deposit(10, 0).unwrap();
        let snapshot = position.clone();

        assert!(position.record_withdraw(11, 0).is_err());
        assert_eq!(position, snapshot);
    }

    #[test]
    fn zero_position_keeps_checkpoint_semantics() {
        let mut position = UserPosition::default();
        position.record_deposit(10, ACC_REWARD_PRECISION).unwrap();
        position.record_withdraw(10, 3 * ACC_REWARD_PRECISION).unwrap();

        assert_eq!(position.amount, 0);
        assert_eq!(position.reward_debt, 0);
        assert_eq!(position.pending_reward(9 * ACC_REWARD_PRECISION).unwrap(), 0);
    }

    #[test]
    fn emergency_withdraw_clears_entitlement() {
        let mut position = UserPosition::default();
        position.record_deposit(42, 7 * ACC_REWARD_PRECISION).unwrap();

        assert_eq!(position.record_emergency_withdraw(), 42);
        assert_eq!(position.amount, 0);
        assert_eq!(position.reward_debt, 0);
    }
}
