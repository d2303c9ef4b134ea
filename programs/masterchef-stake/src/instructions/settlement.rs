// =============================================================================
// Settlement Helpers
// =============================================================================
// Shared by every instruction that changes emission inputs (pool weights,
// total weight, reward rate). Each pool must be settled at the old inputs
// first, otherwise the change would be applied retroactively to slots that
// already elapsed.
//
// Pools arrive as remaining_accounts: writable, exactly pool_count of them,
// ordered by index.
// =============================================================================

use anchor_lang::prelude::*;
use anchor_spl::token::{self, MintTo};

use crate::constants::{CONFIG_SEED, POOL_SEED};
use crate::error::ChefError;
use crate::state::{GlobalConfig, Pool};

/// Deserialize and verify the full pool list passed as remaining accounts
pub fn load_all_pools<'info>(
    config_key: &Pubkey,
    config: &GlobalConfig,
    remaining_accounts: &'info [AccountInfo<'info>],
    program_id: &Pubkey,
) -> Result<Vec<Account<'info, Pool>>> {
    require!(
        remaining_accounts.len() as u64 == config.pool_count,
        ChefError::PoolListMismatch
    );

    let mut pools = Vec::with_capacity(remaining_accounts.len());

    for (index, info) in remaining_accounts.iter().enumerate() {
        require!(info.is_writable, ChefError::PoolListMismatch);

        let pool = Account::<'info, Pool>::try_from(info)?;
        require!(pool.index == index as u64, ChefError::PoolListMismatch);

        let expected = Pubkey::create_program_address(
            &[
                POOL_SEED,
                config_key.as_ref(),
                &pool.index.to_le_bytes(),
                &[pool.bump],
            ],
            program_id,
        )
        .map_err(|_| error!(ChefError::InvalidPDA))?;
        require_keys_eq!(info.key(), expected, ChefError::InvalidPDA);

        pools.push(pool);
    }

    Ok(pools)
}

/// Settle every loaded pool at `slot`. Returns the total reward accounted.
pub fn settle_pools(pools: &mut [Account<'_, Pool>], config: &GlobalConfig, slot: u64) -> Result<u64> {
    let mut total = 0u64;

    for pool in pools.iter_mut() {
        let reward = pool.settle(config, slot)?;
        total = total.checked_add(reward).ok_or(ChefError::MathOverflow)?;
    }

    Ok(total)
}

/// Write loaded pools back to their accounts
///
/// Accounts pulled from remaining_accounts are not serialized by Anchor on
/// exit, so this must run after the last mutation.
pub fn persist_pools(pools: &[Account<'_, Pool>], program_id: &Pubkey) -> Result<()> {
    for pool in pools {
        pool.exit(program_id)?;
    }
    Ok(())
}

/// Mint `amount` of the reward token, signed by the config PDA
pub fn mint_reward<'info>(
    token_program: AccountInfo<'info>,
    reward_mint: AccountInfo<'info>,
    to: AccountInfo<'info>,
    global_config: AccountInfo<'info>,
    config_bump: u8,
    amount: u64,
) -> Result<()> {
    let seeds = &[CONFIG_SEED, &[config_bump]];
    let signer_seeds = &[&seeds[..]];

    token::mint_to(
        CpiContext::new_with_signer(
            token_program,
            MintTo {
                mint: reward_mint,
                to,
                authority: global_config,
            },
            signer_seeds,
        ),
        amount,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ACC_REWARD_PRECISION;
    use crate::tests::assert_chef_error;

    /// Program-owned pool account over leaked buffers, so it can be
    /// borrowed for the `'info` lifetime the loader expects
    fn pool_account(key: Pubkey, pool: &Pool) -> AccountInfo<'static> {
        let mut data = Vec::with_capacity(8 + Pool::INIT_SPACE);
        pool.try_serialize(&mut data).unwrap();

        AccountInfo::new(
            Box::leak(Box::new(key)),
            false,
            true,
            Box::leak(Box::new(1_000_000u64)),
            Box::leak(data.into_boxed_slice()),
            Box::leak(Box::new(crate::ID)),
            false,
            0,
        )
    }

    /// `count` pools of weight 100, each holding 1_000 staked
    fn registry(count: u64) -> (Pubkey, GlobalConfig, Vec<AccountInfo<'static>>) {
        let config_key = Pubkey::new_unique();
        let config = GlobalConfig {
            reward_per_slot: 100_000,
            total_alloc_weight: 100 * count,
            pool_count: count,
            ..Default::default()
        };

        let accounts = (0..count)
            .map(|index| {
                let (key, bump) = Pubkey::find_program_address(
                    &[POOL_SEED, config_key.as_ref(), &index.to_le_bytes()],
                    &crate::ID,
                );
                let pool = Pool {
                    index,
                    alloc_weight: 100,
                    total_staked: 1_000,
                    bump,
                    ..Default::default()
                };
                pool_account(key, &pool)
            })
            .collect();

        (config_key, config, accounts)
    }

    fn leak(accounts: Vec<AccountInfo<'static>>) -> &'static [AccountInfo<'static>] {
        Box::leak(accounts.into_boxed_slice())
    }

    fn load_count(
        config_key: &Pubkey,
        config: &GlobalConfig,
        accounts: Vec<AccountInfo<'static>>,
    ) -> Result<usize> {
        load_all_pools(config_key, config, leak(accounts), &crate::ID).map(|pools| pools.len())
    }

    #[test]
    fn loads_every_pool_in_index_order() {
        let (config_key, config, accounts) = registry(3);
        let pools = load_all_pools(&config_key, &config, leak(accounts), &crate::ID).unwrap();

        let indices: Vec<u64> = pools.iter().map(|pool| pool.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn rejects_short_list() {
        let (config_key, config, mut accounts) = registry(3);
        accounts.pop();

        assert_chef_error(
            load_count(&config_key, &config, accounts),
            ChefError::PoolListMismatch,
        );
    }

    #[test]
    fn rejects_extra_account() {
        let (config_key, config, mut accounts) = registry(2);
        let duplicate = accounts[1].clone();
        accounts.push(duplicate);

        assert_chef_error(
            load_count(&config_key, &config, accounts),
            ChefError::PoolListMismatch,
        );
    }

    #[test]
    fn rejects_out_of_order_list() {
        let (config_key, config, mut accounts) = registry(3);
        accounts.swap(0, 1);

        assert_chef_error(
            load_count(&config_key, &config, accounts),
            ChefError::PoolListMismatch,
        );
    }

    #[test]
    fn rejects_read_only_pool() {
        let (config_key, config, mut accounts) = registry(3);
        accounts[1].is_writable = false;

        assert_chef_error(
            load_count(&config_key, &config, accounts),
            ChefError::PoolListMismatch,
        );
    }

    #[test]
    fn rejects_pool_at_wrong_address() {
        let (config_key, config, mut accounts) = registry(3);
        accounts[2].key = Box::leak(Box::new(Pubkey::new_unique()));

        assert_chef_error(
            load_count(&config_key, &config, accounts),
            ChefError::InvalidPDA,
        );
    }

    #[test]
    fn rejects_pools_of_another_config() {
        let (_, config, accounts) = registry(2);

        assert_chef_error(
            load_count(&Pubkey::new_unique(), &config, accounts),
            ChefError::InvalidPDA,
        );
    }

    #[test]
    fn settled_pools_are_written_back() {
        let (config_key, config, accounts) = registry(3);
        let accounts = leak(accounts);

        let mut pools = load_all_pools(&config_key, &config, accounts, &crate::ID).unwrap();
        // 10 slots * 100_000 * 100 / 300, floored, per pool
        assert_eq!(settle_pools(&mut pools, &config, 10).unwrap(), 3 * 333_333);
        persist_pools(&pools, &crate::ID).unwrap();

        for account in accounts {
            let pool = Account::<Pool>::try_from(account).unwrap();
            assert_eq!(pool.last_settled_slot, 10);
            assert_eq!(pool.total_reward_accrued, 333_333);
            assert_eq!(
                pool.acc_reward_per_share,
                333_333 * ACC_REWARD_PRECISION / 1_000
            );
        }
    }
}
