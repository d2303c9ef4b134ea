use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::ChefError;
use crate::events::{AdminTransferred, PoolAdded, PoolWeightUpdated, RewardRateUpdated};
use crate::instructions::settlement::{load_all_pools, persist_pools, settle_pools};
use crate::state::{GlobalConfig, Pool};

// =============================================================================
// Add Pool
// =============================================================================

/// Append a new pool for `staked_mint`
///
/// remaining_accounts: every existing pool (writable, index order). They are
/// settled before total_alloc_weight grows.
#[derive(Accounts)]
pub struct AddPool<'info> {
    #[account(
        mut,
        constraint = admin.key() == global_config.admin @ ChefError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// Mint staked into the new pool; the same mint may back several pools
    pub staked_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = 8 + Pool::INIT_SPACE,
        seeds = [POOL_SEED, global_config.key().as_ref(), global_config.pool_count.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = admin,
        token::mint = staked_mint,
        token::authority = pool,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_add_pool<'info>(
    ctx: Context<'_, '_, 'info, 'info, AddPool<'info>>,
    alloc_weight: u64,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let config_key = ctx.accounts.global_config.key();

    let mut pools = load_all_pools(
        &config_key,
        &ctx.accounts.global_config,
        ctx.remaining_accounts,
        ctx.program_id,
    )?;
    settle_pools(&mut pools, &ctx.accounts.global_config, slot)?;
    persist_pools(&pools, ctx.program_id)?;

    let global_config = &mut ctx.accounts.global_config;
    let index = global_config.register_pool(alloc_weight)?;

    let pool = &mut ctx.accounts.pool;
    pool.index = index;
    pool.staked_mint = ctx.accounts.staked_mint.key();
    pool.vault = ctx.accounts.pool_vault.key();
    pool.alloc_weight = alloc_weight;
    pool.last_settled_slot = Pool::initial_settled_slot(global_config, slot);
    pool.acc_reward_per_share = 0;
    pool.total_staked = 0;
    pool.total_reward_accrued = 0;
    pool.bump = ctx.bumps.pool;
    pool.vault_bump = ctx.bumps.pool_vault;

    emit!(PoolAdded {
        pool_index: index,
        staked_mint: pool.staked_mint,
        alloc_weight,
        total_alloc_weight: global_config.total_alloc_weight,
        slot,
    });

    msg!(
        "Pool {} added: mint={}, alloc_weight={}, total_alloc_weight={}",
        index,
        pool.staked_mint,
        alloc_weight,
        global_config.total_alloc_weight
    );

    Ok(())
}

// =============================================================================
// Set Pool Weight
// =============================================================================

/// remaining_accounts: every pool (writable, index order)
#[derive(Accounts)]
pub struct SetPoolWeight<'info> {
    #[account(
        constraint = admin.key() == global_config.admin @ ChefError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

pub fn handler_set_pool_weight<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetPoolWeight<'info>>,
    pool_index: u64,
    alloc_weight: u64,
) -> Result<()> {
    require!(
        pool_index < ctx.accounts.global_config.pool_count,
        ChefError::InvalidPoolIndex
    );

    let slot = Clock::get()?.slot;
    let config_key = ctx.accounts.global_config.key();

    let mut pools = load_all_pools(
        &config_key,
        &ctx.accounts.global_config,
        ctx.remaining_accounts,
        ctx.program_id,
    )?;
    settle_pools(&mut pools, &ctx.accounts.global_config, slot)?;

    let pool = pools
        .get_mut(pool_index as usize)
        .ok_or(ChefError::InvalidPoolIndex)?;
    let old_alloc_weight = pool.alloc_weight;

    let global_config = &mut ctx.accounts.global_config;
    global_config.reweight_pool(old_alloc_weight, alloc_weight)?;
    pool.alloc_weight = alloc_weight;

    persist_pools(&pools, ctx.program_id)?;

    emit!(PoolWeightUpdated {
        pool_index,
        old_alloc_weight,
        new_alloc_weight: alloc_weight,
        total_alloc_weight: global_config.total_alloc_weight,
        slot,
    });

    msg!(
        "Pool {} weight {} -> {}, total_alloc_weight={}",
        pool_index,
        old_alloc_weight,
        alloc_weight,
        global_config.total_alloc_weight
    );

    Ok(())
}

// =============================================================================
// Update Reward Rate
// =============================================================================

/// remaining_accounts: every pool (writable, index order)
#[derive(Accounts)]
pub struct UpdateRewardRate<'info> {
    #[account(
        constraint = admin.key() == global_config.admin @ ChefError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,
}

pub fn handler_update_reward_rate<'info>(
    ctx: Context<'_, '_, 'info, 'info, UpdateRewardRate<'info>>,
    reward_per_slot: u64,
) -> Result<()> {
    let slot = Clock::get()?.slot;
    let config_key = ctx.accounts.global_config.key();

    let mut pools = load_all_pools(
        &config_key,
        &ctx.accounts.global_config,
        ctx.remaining_accounts,
        ctx.program_id,
    )?;
    settle_pools(&mut pools, &ctx.accounts.global_config, slot)?;
    persist_pools(&pools, ctx.program_id)?;

    let global_config = &mut ctx.accounts.global_config;
    let old_reward_per_slot = global_config.reward_per_slot;
    global_config.reward_per_slot = reward_per_slot;

    emit!(RewardRateUpdated {
        old_reward_per_slot,
        new_reward_per_slot: reward_per_slot,
        slot,
    });

    msg!(
        "Reward rate updated from {} to {} per slot",
        old_reward_per_slot,
        reward_per_slot
    );

    Ok(())
}

// =============================================================================
// Transfer Admin
// =============================================================================

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        constraint = admin.key() == global_config.admin @ ChefError::Unauthorized
    )]
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = global_config.bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// CHECK: New admin address, validated to not be default or unchanged
    #[account(
        constraint = new_admin.key() != Pubkey::default() @ ChefError::InvalidAuthority,
        constraint = new_admin.key() != admin.key() @ ChefError::InvalidAuthority
    )]
    pub new_admin: UncheckedAccount<'info>,
}

pub fn handler_transfer_admin(ctx: Context<TransferAdmin>) -> Result<()> {
    let old_admin = ctx.accounts.global_config.admin;
    ctx.accounts.global_config.admin = ctx.accounts.new_admin.key();

    emit!(AdminTransferred {
        old_admin,
        new_admin: ctx.accounts.new_admin.key(),
    });

    msg!(
        "Admin transferred from {} to {}",
        old_admin,
        ctx.accounts.new_admin.key()
    );

    Ok(())
}
