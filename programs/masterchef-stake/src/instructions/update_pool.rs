use anchor_lang::prelude::*;

use crate::constants::{CONFIG_SEED, POOL_SEED};
use crate::instructions::settlement::{load_all_pools, persist_pools, settle_pools};
use crate::state::{GlobalConfig, Pool};

// =============================================================================
// Update Pool (permissionless crank)
// =============================================================================

#[derive(Accounts)]
pub struct UpdatePool<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        seeds = [POOL_SEED, global_config.key().as_ref(), pool.index.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

pub fn handler_update_pool(ctx: Context<UpdatePool>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let pool = &mut ctx.accounts.pool;

    let reward = pool.settle(&ctx.accounts.global_config, slot)?;

    msg!(
        "Pool {} settled at slot {}: reward={}, acc_reward_per_share={}",
        pool.index,
        slot,
        reward,
        pool.acc_reward_per_share
    );

    Ok(())
}

// =============================================================================
// Mass Update Pools (permissionless crank)
// =============================================================================

/// remaining_accounts: every pool (writable, index order)
#[derive(Accounts)]
pub struct MassUpdatePools<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

pub fn handler_mass_update_pools<'info>(
    ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let config_key = ctx.accounts.global_config.key();

    let mut pools = load_all_pools(
        &config_key,
        &ctx.accounts.global_config,
        ctx.remaining_accounts,
        ctx.program_id,
    )?;
    let reward = settle_pools(&mut pools, &ctx.accounts.global_config, slot)?;
    persist_pools(&pools, ctx.program_id)?;

    msg!("Settled {} pools at slot {}: reward={}", pools.len(), slot, reward);

    Ok(())
}
