use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::ChefError;
use crate::events::EmergencyWithdraw;
use crate::state::{GlobalConfig, Pool, UserPosition};

/// Pull the whole principal out without harvesting
///
/// Pending reward is forfeited. The pool is settled before the principal
/// leaves it, but nothing is minted.
#[derive(Accounts)]
pub struct EmergencyWithdrawFromPool<'info> {
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

    pub token_program: Program<'info, Token>,
}

pub fn handler_emergency_withdraw(ctx: Context<EmergencyWithdrawFromPool>) -> Result<()> {
    let slot = Clock::get()?.slot;
    let user_key = ctx.accounts.user.key();
    let config_key = ctx.accounts.global_config.key();

    let pool = &mut ctx.accounts.pool;
    let position = &mut ctx.accounts.position;

    pool.settle(&ctx.accounts.global_config, slot)?;

    let amount = position.record_emergency_withdraw();
    pool.record_withdraw(amount)?;

    if amount > 0 {
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

    emit!(EmergencyWithdraw {
        user: user_key,
        pool_index: pool.index,
        amount,
        slot,
    });

    msg!(
        "Emergency withdrew {} from pool {}. Pool total: {}",
        amount,
        pool.index,
        pool.total_staked
    );

    Ok(())
}
