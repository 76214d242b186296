//! Reward engine flows: accrual with reinvestment splits crossing into the
//! staking engine, reward withdrawal, and the shared failure domain between
//! the two ledgers.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{
        admin, harness, reward_custody, reward_wallet, staker, staking_custody,
    };
    use staking_ledger::prelude::*;

    // =========================================================================
    // REINVESTMENT SPLIT
    // =========================================================================

    #[test]
    fn test_split_exactness_30_percent() {
        let mut h = harness(0, 1_000);
        let device = DeviceId::from_serial("DEV-R");
        h.service.set_reinvest_percentage(staker(), 30).unwrap();

        h.service
            .add_rewards(admin(), &[RewardEntry::new(staker(), device, U256::from(100))])
            .unwrap();

        // floor(100 * 30 / 100) = 30 into the stake, 70 retained, exactly
        assert_eq!(h.service.staked_balance(staker(), device), U256::from(30));
        assert_eq!(h.service.reward_balance(staker(), device), U256::from(70));
        assert_eq!(h.token.balance_of(staking_custody()), U256::from(30));
        assert_eq!(h.token.balance_of(reward_wallet()), U256::from(970));
    }

    #[test]
    fn test_split_floors_never_rounds_up() {
        let mut h = harness(0, 1_000);
        let device = DeviceId::from_serial("DEV-F");
        h.service.set_reinvest_percentage(staker(), 33).unwrap();

        // floor(10 * 33 / 100) = floor(3.3) = 3
        h.service
            .add_rewards(admin(), &[RewardEntry::new(staker(), device, U256::from(10))])
            .unwrap();
        assert_eq!(h.service.staked_balance(staker(), device), U256::from(3));
        assert_eq!(h.service.reward_balance(staker(), device), U256::from(7));
    }

    #[test]
    fn test_percentage_validation_and_default() {
        let mut h = harness(0, 100);
        assert_eq!(h.service.reinvest_percentage(staker()), 0);
        assert_eq!(
            h.service.set_reinvest_percentage(staker(), 101).unwrap_err(),
            LedgerError::InvalidPercentage(101)
        );
        h.service.set_reinvest_percentage(staker(), 100).unwrap();
        assert_eq!(h.service.reinvest_percentage(staker()), 100);

        // Full reinvestment leaves nothing in the reward ledger
        let device = DeviceId::from_serial("DEV-100");
        h.service
            .add_rewards(admin(), &[RewardEntry::new(staker(), device, U256::from(40))])
            .unwrap();
        assert_eq!(h.service.staked_balance(staker(), device), U256::from(40));
        assert_eq!(h.service.reward_balance(staker(), device), U256::zero());
    }

    // =========================================================================
    // SHARED FAILURE DOMAIN
    // =========================================================================

    #[test]
    fn test_batch_failure_rolls_back_both_ledgers_and_token() {
        // Wallet funded for one cut only
        let mut h = harness(0, 50);
        let device = DeviceId::from_serial("DEV-FD");
        h.service.set_reinvest_percentage(staker(), 50).unwrap();
        h.sink.take();

        let err = h
            .service
            .add_rewards(
                admin(),
                &[
                    RewardEntry::new(staker(), device, U256::from(80)),
                    RewardEntry::new(staker(), device, U256::from(80)),
                ],
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::TransferFailed(_)));

        // First entry's effects did not survive: both ledgers empty, token
        // movement undone, nothing published
        assert_eq!(h.service.staked_balance(staker(), device), U256::zero());
        assert_eq!(h.service.reward_balance(staker(), device), U256::zero());
        assert_eq!(h.token.balance_of(reward_wallet()), U256::from(50));
        assert_eq!(h.token.balance_of(staking_custody()), U256::zero());
        assert!(h.sink.is_empty());
    }

    #[test]
    fn test_reinvested_stake_joins_withdrawal_lifecycle() {
        let mut h = harness(0, 1_000);
        let device = DeviceId::from_serial("DEV-RL");
        h.service.set_reinvest_percentage(staker(), 50).unwrap();
        h.service
            .add_rewards(admin(), &[RewardEntry::new(staker(), device, U256::from(200))])
            .unwrap();
        assert_eq!(h.service.staked_balance(staker(), device), U256::from(100));

        // The reinvested stake withdraws like any direct deposit
        h.service.request_withdrawal(staker(), &[device]).unwrap();
        h.clock.advance(DEFAULT_REQUEST_WINDOW_SECS);
        assert_eq!(h.service.withdraw_stake(staker()).unwrap(), U256::from(100));
        assert_eq!(h.token.balance_of(staker()), U256::from(100));
    }

    // =========================================================================
    // REWARD WITHDRAWAL
    // =========================================================================

    #[test]
    fn test_withdraw_rewards_sweeps_listed_devices() {
        let mut h = harness(0, 1_000);
        let x = DeviceId::from_serial("X");
        let y = DeviceId::from_serial("Y");
        let z = DeviceId::from_serial("Z");
        h.service
            .add_rewards(
                admin(),
                &[
                    RewardEntry::new(staker(), x, U256::from(10)),
                    RewardEntry::new(staker(), y, U256::from(20)),
                    RewardEntry::new(staker(), z, U256::from(30)),
                ],
            )
            .unwrap();
        h.sink.take();

        // Z is not listed and must survive the sweep
        let paid = h.service.withdraw_rewards(staker(), &[x, y]).unwrap();
        assert_eq!(paid, U256::from(30));
        assert_eq!(h.service.reward_balance(staker(), x), U256::zero());
        assert_eq!(h.service.reward_balance(staker(), z), U256::from(30));
        assert_eq!(h.token.balance_of(staker()), U256::from(30));

        // Reward shape: device list, no request id
        assert_eq!(
            h.sink.events(),
            vec![Notification::RewardsWithdrawn {
                account: staker(),
                amount: U256::from(30),
                devices: vec![x, y],
            }]
        );
    }

    #[test]
    fn test_withdraw_rewards_empty_sweep_fails() {
        let mut h = harness(0, 100);
        assert_eq!(
            h.service
                .withdraw_rewards(staker(), &[DeviceId::from_serial("NONE")])
                .unwrap_err(),
            LedgerError::InsufficientBalance
        );
    }

    #[test]
    fn test_failed_reward_payout_keeps_balances() {
        // Accrue against a funded wallet, then drain it before the payout
        let mut h = harness(0, 100);
        let device = DeviceId::from_serial("DEV-FP");
        h.service
            .add_rewards(admin(), &[RewardEntry::new(staker(), device, U256::from(60))])
            .unwrap();
        h.token
            .transfer(reward_wallet(), admin(), U256::from(100))
            .unwrap();

        let err = h.service.withdraw_rewards(staker(), &[device]).unwrap_err();
        assert!(matches!(err, LedgerError::TransferFailed(_)));
        // The swept balance was restored for a later retry
        assert_eq!(h.service.reward_balance(staker(), device), U256::from(60));

        h.token.mint(reward_wallet(), U256::from(60)).unwrap();
        assert_eq!(
            h.service.withdraw_rewards(staker(), &[device]).unwrap(),
            U256::from(60)
        );
    }

    // =========================================================================
    // CONFIG CELLS
    // =========================================================================

    #[test]
    fn test_reward_wallet_change_takes_effect_immediately() {
        let mut h = harness(0, 1_000);
        let device = DeviceId::from_serial("DEV-W");
        h.service
            .add_rewards(admin(), &[RewardEntry::new(staker(), device, U256::from(50))])
            .unwrap();

        // Repoint the wallet; the old one is no longer touched
        let fresh_wallet = AccountId::new([0xA1; 20]);
        h.token.mint(fresh_wallet, U256::from(500)).unwrap();
        h.token.approve(fresh_wallet, reward_custody(), U256::from(500));
        h.service.set_reward_wallet(admin(), fresh_wallet).unwrap();

        h.service.withdraw_rewards(staker(), &[device]).unwrap();
        assert_eq!(h.token.balance_of(fresh_wallet), U256::from(450));
        assert_eq!(h.token.balance_of(reward_wallet()), U256::from(1_000));
    }

    #[test]
    fn test_config_change_notifications() {
        let mut h = harness(0, 0);
        h.sink.take();
        let target = AccountId::new([0x42; 20]);

        h.service.set_request_window(admin(), 120).unwrap();
        h.service.set_token_address(admin(), target).unwrap();
        h.service.set_reward_wallet(admin(), target).unwrap();
        h.service.set_staking_address(admin(), target).unwrap();

        let names: Vec<&str> = h.sink.events().iter().map(Notification::name).collect();
        assert_eq!(
            names,
            vec![
                "RequestTimeChanged",
                "TokenAddressChanged",
                "RewardWalletChanged",
                "StakingAddressChanged",
            ]
        );
    }
}
