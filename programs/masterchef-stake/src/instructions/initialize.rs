use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::events::PoolAdded;
use crate::state::{GlobalConfig, Pool};

/// Initialize the global config, the reward mint and pool 0
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `reward_per_slot` - Reward units emitted per slot across all pools
/// * `start_slot` - No reward accrues at or before this slot
///
/// # Accounts
/// * `admin` - Becomes the config admin (signer, payer)
/// * `global_config` - Config PDA to create
/// * `reward_mint` - Reward token mint to create; mint authority = global_config
/// * `reward_pool` - Pool 0, staking the reward token itself
/// * `reward_pool_vault` - Vault custodying pool 0's principal
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Admin who will control pool creation and emission settings
    #[account(mut)]
    pub admin: Signer<'info>,

    /// Global config PDA
    #[account(
        init,
        payer = admin,
        space = 8 + GlobalConfig::INIT_SPACE,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// Reward token mint, minted to harvesters by the config PDA
    #[account(
        init,
        payer = admin,
        mint::decimals = REWARD_DECIMALS,
        mint::authority = global_config,
        seeds = [REWARD_MINT_SEED, global_config.key().as_ref()],
        bump
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Pool 0
    #[account(
        init,
        payer = admin,
        space = 8 + Pool::INIT_SPACE,
        seeds = [POOL_SEED, global_config.key().as_ref(), 0u64.to_le_bytes().as_ref()],
        bump
    )]
    pub reward_pool: Account<'info, Pool>,

    /// Vault holding reward tokens staked into pool 0
    #[account(
        init,
        payer = admin,
        token::mint = reward_mint,
        token::authority = reward_pool,
        seeds = [POOL_VAULT_SEED, reward_pool.key().as_ref()],
        bump
    )]
    pub reward_pool_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>, reward_per_slot: u64, start_slot: u64) -> Result<()> {
    let slot = Clock::get()?.slot;
    let global_config = &mut ctx.accounts.global_config;

    global_config.admin = ctx.accounts.admin.key();
    global_config.reward_mint = ctx.accounts.reward_mint.key();
    global_config.reward_per_slot = reward_per_slot;
    global_config.start_slot = start_slot;
    global_config.total_alloc_weight = 0;
    global_config.pool_count = 0;
    global_config.bump = ctx.bumps.global_config;
    global_config.reward_mint_bump = ctx.bumps.reward_mint;

    let index = global_config.register_pool(REWARD_POOL_ALLOC_WEIGHT)?;

    let reward_pool = &mut ctx.accounts.reward_pool;
    reward_pool.index = index;
    reward_pool.staked_mint = ctx.accounts.reward_mint.key();
    reward_pool.vault = ctx.accounts.reward_pool_vault.key();
    reward_pool.alloc_weight = REWARD_POOL_ALLOC_WEIGHT;
    reward_pool.last_settled_slot = Pool::initial_settled_slot(global_config, slot);
    reward_pool.acc_reward_per_share = 0;
    reward_pool.total_staked = 0;
    reward_pool.total_reward_accrued = 0;
    reward_pool.bump = ctx.bumps.reward_pool;
    reward_pool.vault_bump = ctx.bumps.reward_pool_vault;

    emit!(PoolAdded {
        pool_index: index,
        staked_mint: reward_pool.staked_mint,
        alloc_weight: reward_pool.alloc_weight,
        total_alloc_weight: global_config.total_alloc_weight,
        slot,
    });

    msg!(
        "Chef initialized: reward_mint={}, reward_per_slot={}, start_slot={}",
        global_config.reward_mint,
        global_config.reward_per_slot,
        global_config.start_slot
    );

    Ok(())
}
