// =============================================================================
// Deposit Instruction
// =============================================================================
// Stakes tokens into a pool.
//
// Flow:
// 1. Check the user can cover the deposit
// 2. Settle the pool up to the current slot
// 3. Mint any pending reward on the existing stake to the user
// 4. Transfer the deposit from the user into the pool vault
// 5. Add the amount to the position and the pool
// 6. Re-checkpoint the position's reward_debt
//
// Settlement must come before the pending calculation and the balance
// change, otherwise the new principal would share in past emission.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::ChefError;
use crate::events::{Deposit, RewardHarvested};
use crate::instructions::settlement::mint_reward;
use crate::state::{GlobalConfig, Pool, UserPosition};

#[derive(Accounts)]
pub struct DepositToPool<'info> {
    /// User staking tokens
    #[account(mut)]
    pub user: Signer<'info>,

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

    /// User's position (created on first deposit)
    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserPosition::INIT_SPACE,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub position: Account<'info, UserPosition>,

    /// Source of the staked tokens
    #[account(
        mut,
        constraint = user_staked_account.mint == pool.staked_mint @ ChefError::InvalidStakedMint,
        constraint = user_staked_account.owner == user.key() @ ChefError::InvalidTokenAccountOwner
    )]
    pub user_staked_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump = pool.vault_bump
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [REWARD_MINT_SEED, global_config.key().as_ref()],
        bump = global_config.reward_mint_bump
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Destination for harvested reward
    #[account(
        mut,
        constraint = user_reward_account.mint == reward_mint.key() @ ChefError::InvalidRewardMint,
        constraint = user_reward_account.owner == user.key() @ ChefError::InvalidTokenAccountOwner
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_deposit(ctx: Context<DepositToPool>, amount: u64) -> Result<()> {
    require!(
        ctx.accounts.user_staked_account.amount >= amount,
        ChefError::InsufficientBalanceOrAllowance
    );

    let slot = Clock::get()?.slot;
    let pool_key = ctx.accounts.pool.key();
    let user_key = ctx.accounts.user.key();

    let position = &mut ctx.accounts.position;
    if position.owner == Pubkey::default() {
        position.pool = pool_key;
        position.owner = user_key;
        position.bump = ctx.bumps.position;
    }

    let pool = &mut ctx.accounts.pool;
    pool.settle(&ctx.accounts.global_config, slot)?;
    let acc_reward_per_share = pool.acc_reward_per_share;

    // Harvest on the stake held before this deposit
    let pending = if position.amount > 0 {
        position.pending_reward(acc_reward_per_share)?
    } else {
        0
    };

    if pending > 0 {
        mint_reward(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.reward_mint.to_account_info(),
            ctx.accounts.user_reward_account.to_account_info(),
            ctx.accounts.global_config.to_account_info(),
            ctx.accounts.global_config.bump,
            pending,
        )?;
        position.record_harvest(pending)?;

        emit!(RewardHarvested {
            user: user_key,
            pool_index: pool.index,
            amount: pending,
            slot,
        });
    }

    if amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.user_staked_account.to_account_info(),
                    to: ctx.accounts.pool_vault.to_account_info(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            amount,
        )?;
    }

    position.record_deposit(amount, acc_reward_per_share)?;
    pool.record_deposit(amount)?;

    emit!(Deposit {
        user: user_key,
        pool_index: pool.index,
        amount,
        slot,
    });

    msg!(
        "Deposited {} into pool {}. Harvested: {}, user total: {}, pool total: {}",
        amount,
        pool.index,
        pending,
        position.amount,
        pool.total_staked
    );

    Ok(())
}
