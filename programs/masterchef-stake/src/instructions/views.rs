use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, POOL_SEED, POSITION_SEED};
use crate::error::ChefError;
use crate::state::{GlobalConfig, Pool, UserPosition};

// =============================================================================
// Read-only views (values returned through return data)
// =============================================================================

#[derive(Accounts)]
pub struct PendingReward<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        seeds = [POOL_SEED, global_config.key().as_ref(), pool.index.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    /// CHECK: Owner of the queried position; only used as a seed
    pub owner: UncheckedAccount<'info>,

    /// CHECK: Position PDA of `owner`; may not exist yet
    #[account(
        seeds = [POSITION_SEED, pool.key().as_ref(), owner.key().as_ref()],
        bump
    )]
    pub position: UncheckedAccount<'info>,
}

/// Reward the position could harvest at the current slot
///
/// An owner that never deposited has nothing pending.
pub fn handler_pending_reward(ctx: Context<PendingReward>) -> Result<u64> {
    let slot = Clock::get()?.slot;
    let acc_reward_per_share = ctx
        .accounts
        .pool
        .projected_acc_reward_per_share(&ctx.accounts.global_config, slot)?;

    position_pending_reward(&ctx.accounts.position, acc_reward_per_share)
}

/// Pending reward held in a position account, or 0 if it was never created
pub fn position_pending_reward(position: &AccountInfo, acc_reward_per_share: u128) -> Result<u64> {
    if position.data_is_empty() {
        return Ok(0);
    }
    require_keys_eq!(*position.owner, crate::ID, ChefError::InvalidPDA);

    let data = position.try_borrow_data()?;
    let position = UserPosition::try_deserialize(&mut &data[..])?;
    position.pending_reward(acc_reward_per_share)
}

#[derive(Accounts)]
pub struct GetMultiplier<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

pub fn handler_get_multiplier(ctx: Context<GetMultiplier>, from: u64, to: u64) -> Result<u64> {
    Ok(ctx.accounts.global_config.multiplier(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ACC_REWARD_PRECISION;
    use crate::tests::assert_chef_error;

    fn serialized(position: &UserPosition) -> Vec<u8> {
        let mut data = Vec::new();
        position.try_serialize(&mut data).unwrap();
        data
    }

    #[test]
    fn missing_position_has_nothing_pending() {
        let key = Pubkey::new_unique();
        let system_program = Pubkey::default();
        let mut lamports = 0u64;
        let mut data: Vec<u8> = Vec::new();
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data[..],
            &system_program,
            false,
            0,
        );

        assert_eq!(position_pending_reward(&info, 7 * ACC_REWARD_PRECISION).unwrap(), 0);
    }

    #[test]
    fn existing_position_reports_pending_reward() {
        let key = Pubkey::new_unique();
        let mut lamports = 1_000_000u64;
        let mut data = serialized(&UserPosition {
            amount: 1_000,
            reward_debt: 2_000,
            ..Default::default()
        });
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data[..],
            &crate::ID,
            false,
            0,
        );

        assert_eq!(
            position_pending_reward(&info, 5 * ACC_REWARD_PRECISION).unwrap(),
            3_000
        );
    }

    #[test]
    fn position_data_owned_elsewhere_is_rejected() {
        let key = Pubkey::new_unique();
        let foreign_program = Pubkey::new_unique();
        let mut lamports = 1_000_000u64;
        let mut data = serialized(&UserPosition {
            amount: 1_000,
            ..Default::default()
        });
        let info = AccountInfo::new(
            &key,
            false,
            false,
            &mut lamports,
            &mut data[..],
            &foreign_program,
            false,
            0,
        );

        assert_chef_error(
            position_pending_reward(&info, ACC_REWARD_PRECISION),
            ChefError::InvalidPDA,
        );
    }
}
