// =============================================================================
// Withdraw Instruction
// =============================================================================
// Takes principal out of a pool and pays out pending reward.
//
// Flow:
// 1. Check the position holds at least `amount`
// 2. Settle the pool up to the current slot
// 3. Mint pending reward to the user (also when amount == 0, i.e. harvest)
// 4. Subtract the amount from the position and the pool
// 5. Transfer the amount from the pool vault back to the user
// 6. Re-checkpoint the position's reward_debt
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::ChefError;
use crate::events::{RewardHarvested, Withdraw};
use crate::instructions::settlement::mint_reward;
use crate::state::{GlobalConfig, Pool, UserPosition};

#[derive(Accounts)]
pub struct WithdrawFromPool<'info> {
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

    #[account(
        mut,
        seeds = [POSITION_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = position.bump,
        constraint = position.owner == user.key() @ ChefError::Unauthorized
    )]
    pub position: Account<'info, UserPosition>,

    /// Destination for the returned principal
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

    #[account(
        mut,
        constraint = user_reward_account.mint == reward_mint.key() @ ChefError::InvalidRewardMint,
        constraint = user_reward_account.owner == user.key() @ ChefError::InvalidTokenAccountOwner
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(ctx: Context<WithdrawFromPool>, amount: u64) -> Result<()> {
    require!(
        ctx.accounts.position.amount >= amount,
        ChefError::InsufficientStake
    );

    let slot = Clock::get()?.slot;
    let user_key = ctx.accounts.user.key();
    let config_key = ctx.accounts.global_config.key();

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;

    pool.settle(&ctx.accounts.global_config, slot)?;
    let acc_reward_per_share = pool.acc_reward_per_share;

    let pending = position.pending_reward(acc_reward_per_share)?;
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

    position.record_withdraw(amount, acc_reward_per_share)?;
    pool.record_withdraw(amount)?;

    if amount > 0 {
        // Pool PDA signs for its vault
        let index_bytes = pool.index.to_le_bytes();
        let bump = pool.bump;
        let seeds = &[POOL_SEED, config_key.as_ref(), index_bytes.as_ref(), &[bump]];
        let signer_seeds = &[&seeds[..]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.pool_vault.to_account_info(),
                    to: ctx.accounts.user_staked_account.to_account_info(),
                    authority: pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(Withdraw {
        user: user_key,
        pool_index: pool.index,
        amount,
        slot,
    });

    msg!(
        "Withdrew {} from pool {}. Harvested: {}, user remaining: {}, pool total: {}",
        amount,
        pool.index,
        pending,
        position.amount,
        pool.total_staked
    );

    Ok(())
}
