//! Staking engine flows: the full deposit → request → cancel/withdraw
//! lifecycle, time-lock boundaries, conservation across randomized operation
//! sequences, and the device-id aliasing hazard.

#[cfg(test)]
mod tests {
    use crate::integration::fixtures::{
        admin, harness, other_staker, staker, staking_custody,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use staking_ledger::prelude::*;

    // =========================================================================
    // END-TO-END LIFECYCLE
    // =========================================================================

    #[test]
    fn test_end_to_end_stake_request_cancel_withdraw() {
        let mut h = harness(1_000, 0);
        let x = DeviceId::from_serial("DEVICE-X");
        let y = DeviceId::from_serial("DEVICE-Y");

        h.service.deposit(staker(), x, U256::from(300)).unwrap();
        h.service.deposit(staker(), y, U256::from(200)).unwrap();
        assert_eq!(h.token.balance_of(staking_custody()), U256::from(500));

        // Sweep both devices into one request
        let id = h.service.request_withdrawal(staker(), &[x, y]).unwrap();
        let request = h.service.pending_request(staker()).unwrap();
        assert_eq!(request.id, id);
        assert_eq!(request.total_amount, U256::from(500));
        assert_eq!(h.service.staked_balance(staker(), x), U256::zero());
        assert_eq!(h.service.staked_balance(staker(), y), U256::zero());

        // Cancel restores the original per-device split exactly
        h.service.cancel_withdrawal(staker()).unwrap();
        assert_eq!(h.service.staked_balance(staker(), x), U256::from(300));
        assert_eq!(h.service.staked_balance(staker(), y), U256::from(200));
        assert!(h.service.pending_request(staker()).is_none());

        // Fresh request on X only, then claim after the window
        h.service.request_withdrawal(staker(), &[x]).unwrap();
        h.clock.advance(h.service.request_window());
        let paid = h.service.withdraw_stake(staker()).unwrap();
        assert_eq!(paid, U256::from(300));
        assert!(h.service.pending_request(staker()).is_none());

        // Y's stake is untouched, tokens settled exactly
        assert_eq!(h.service.staked_balance(staker(), y), U256::from(200));
        assert_eq!(h.token.balance_of(staker()), U256::from(800));
        assert_eq!(h.token.balance_of(staking_custody()), U256::from(200));
    }

    #[test]
    fn test_round_trip_restores_exact_balance() {
        let mut h = harness(1_000, 0);
        let device = DeviceId::from_serial("DEV-RT");
        h.service.deposit(staker(), device, U256::from(777)).unwrap();
        h.service.request_withdrawal(staker(), &[device]).unwrap();
        h.service.cancel_withdrawal(staker()).unwrap();
        assert_eq!(h.service.staked_balance(staker(), device), U256::from(777));
    }

    // =========================================================================
    // TIME LOCK
    // =========================================================================

    #[test]
    fn test_time_lock_boundary() {
        let mut h = harness(100, 0);
        let device = DeviceId::from_serial("DEV-TL");
        h.service.deposit(staker(), device, U256::from(100)).unwrap();
        h.clock.set(5_000);
        h.service.request_withdrawal(staker(), &[device]).unwrap();
        let release = h.service.pending_request(staker()).unwrap().release_time;
        assert_eq!(release, 5_000 + DEFAULT_REQUEST_WINDOW_SECS);

        // One second early: rejected, request stays live
        h.clock.set(release - 1);
        let err = h.service.withdraw_stake(staker()).unwrap_err();
        assert!(matches!(err, LedgerError::WaitingPeriodNotOver { .. }));
        assert!(h.service.pending_request(staker()).is_some());

        // Exactly at release: accepted
        h.clock.set(release);
        assert_eq!(h.service.withdraw_stake(staker()).unwrap(), U256::from(100));
    }

    #[test]
    fn test_withdraw_without_request_fails() {
        let mut h = harness(100, 0);
        assert_eq!(
            h.service.withdraw_stake(staker()).unwrap_err(),
            LedgerError::NoRequestFound
        );
    }

    // =========================================================================
    // SINGLE-PENDING INVARIANT
    // =========================================================================

    #[test]
    fn test_single_pending_request_per_account() {
        let mut h = harness(1_000, 0);
        let device = DeviceId::from_serial("DEV-SP");
        h.service.deposit(staker(), device, U256::from(500)).unwrap();
        h.service.deposit(other_staker(), device, U256::from(500)).unwrap();

        h.service.request_withdrawal(staker(), &[device]).unwrap();
        assert_eq!(
            h.service.request_withdrawal(staker(), &[device]).unwrap_err(),
            LedgerError::AlreadyPending
        );

        // Distinct accounts never contend for the slot
        h.service.request_withdrawal(other_staker(), &[device]).unwrap();

        // Exiting via cancel frees the slot
        h.service.cancel_withdrawal(staker()).unwrap();
        h.service.request_withdrawal(staker(), &[device]).unwrap();
    }

    // =========================================================================
    // DEVICE-ID ALIASING HAZARD
    // =========================================================================

    #[test]
    fn test_oversized_serials_alias_to_one_entry() {
        let mut h = harness(1_000, 0);
        // Identical first 9 bytes ("SERIALNUM"): both serials hit one entry
        let a = DeviceId::from_serial("SERIALNUMBER-A");
        let b = DeviceId::from_serial("SERIALNUMBER-B");
        assert_eq!(a, b);

        h.service.deposit(staker(), a, U256::from(100)).unwrap();
        h.service.deposit(staker(), b, U256::from(50)).unwrap();
        assert_eq!(h.service.staked_balance(staker(), a), U256::from(150));
        assert_eq!(h.service.staked_balance(staker(), b), U256::from(150));
    }

    // =========================================================================
    // EVENT EMISSION SHAPES
    // =========================================================================

    #[test]
    fn test_request_events_carry_running_totals() {
        let mut h = harness(1_000, 0);
        let x = DeviceId::from_serial("X");
        let y = DeviceId::from_serial("Y");
        let z = DeviceId::from_serial("Z");
        h.service
            .bulk_deposit(
                staker(),
                &[(x, U256::from(100)), (y, U256::from(200)), (z, U256::from(300))],
            )
            .unwrap();
        h.sink.take();

        h.service.request_withdrawal(staker(), &[x, y, z]).unwrap();
        let totals: Vec<U256> = h
            .sink
            .events()
            .iter()
            .filter_map(|event| match event {
                Notification::WithdrawRequested { running_total, .. } => Some(*running_total),
                _ => None,
            })
            .collect();
        // Cumulative sums, not per-device amounts
        assert_eq!(totals, vec![U256::from(100), U256::from(300), U256::from(600)]);
    }

    #[test]
    fn test_staking_withdrawn_event_shape() {
        let mut h = harness(100, 0);
        let device = DeviceId::from_serial("DEV-EV");
        h.service.deposit(staker(), device, U256::from(100)).unwrap();
        let id = h.service.request_withdrawal(staker(), &[device]).unwrap();
        h.clock.advance(DEFAULT_REQUEST_WINDOW_SECS);
        h.sink.take();

        h.service.withdraw_stake(staker()).unwrap();
        let events = h.sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            Notification::Withdrawn {
                request_id: id,
                account: staker(),
                amount: U256::from(100),
            }
        );
    }

    // =========================================================================
    // CONSERVATION OVER RANDOMIZED SEQUENCES
    // =========================================================================

    #[test]
    fn test_conservation_over_random_sequences() {
        let mut rng = StdRng::seed_from_u64(0x5747_414b_4544);
        let devices: Vec<DeviceId> = (0..4)
            .map(|index| DeviceId::from_serial(&format!("DEV-{index}")))
            .collect();

        for _ in 0..20 {
            let mut h = harness(1_000_000, 0);
            // Tracked total the staking engine owes the staker
            let mut owed = U256::zero();

            for _ in 0..60 {
                match rng.gen_range(0..4u8) {
                    0 => {
                        let device = devices[rng.gen_range(0..devices.len())];
                        let amount = U256::from(rng.gen_range(1..500u64));
                        if h.service.deposit(staker(), device, amount).is_ok() {
                            owed += amount;
                        }
                    }
                    1 => {
                        let count = rng.gen_range(1..=devices.len());
                        let _ = h.service.request_withdrawal(staker(), &devices[..count]);
                    }
                    2 => {
                        let _ = h.service.cancel_withdrawal(staker());
                    }
                    _ => {
                        if rng.gen_bool(0.5) {
                            h.clock.advance(DEFAULT_REQUEST_WINDOW_SECS);
                        }
                        if let Ok(paid) = h.service.withdraw_stake(staker()) {
                            owed -= paid;
                        }
                    }
                }

                // Liabilities equal deposits minus successful payouts, always
                let mut live = U256::zero();
                for device in &devices {
                    live += h.service.staked_balance(staker(), *device);
                }
                if let Some(request) = h.service.pending_request(staker()) {
                    live += request.total_amount;
                }
                assert_eq!(live, owed, "conservation violated mid-sequence");
                assert_eq!(
                    staking_liabilities(h.service.staking_engine(), staker()).unwrap(),
                    owed
                );
                assert!(request_snapshot_consistent(h.service.staking_engine(), staker()));
            }
        }
    }

    // =========================================================================
    // PAUSE GATE
    // =========================================================================

    #[test]
    fn test_pause_preserves_state_exactly() {
        let mut h = harness(1_000, 0);
        let device = DeviceId::from_serial("DEV-P");
        h.service.deposit(staker(), device, U256::from(400)).unwrap();
        let balance_before = h.service.staked_balance(staker(), device);
        let custody_before = h.token.balance_of(staking_custody());

        h.service.set_paused(admin(), true).unwrap();
        assert_eq!(
            h.service.deposit(staker(), device, U256::from(1)).unwrap_err(),
            LedgerError::SystemPaused
        );
        h.service.set_paused(admin(), false).unwrap();

        assert_eq!(h.service.staked_balance(staker(), device), balance_before);
        assert_eq!(h.token.balance_of(staking_custody()), custody_before);

        // And the gate lifts cleanly
        h.service.deposit(staker(), device, U256::from(1)).unwrap();
    }
}
