//! Settlement-mode scenarios: conservation, dust absorption, timeout
//! forfeiture, and the double-settlement guard.

use wagerhall_domain::{
    BasisPoints, DomainError, Entity, EscrowPool, Funds, PayoutMode, Timestamp, WagerRecord,
    WagerStatus,
};

use super::{addr, drain_remaining, init_tracing, service, staked_pool};

fn bps(value: u16) -> BasisPoints {
    BasisPoints::new(value).unwrap()
}

#[test]
fn winner_take_all_drains_pool_without_fee() {
    init_tracing();
    let mut svc = service();
    let (mut pool_entity, cap, mut players) = staked_pool(&mut svc, 500, 2, 250, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let (winner, losers) = players.split_at_mut(1);
    let events = svc
        .settle_winner_take_all(
            &cap,
            &mut pool_entity,
            &mut winner[0],
            losers.iter_mut().collect(),
        )
        .unwrap();

    // No fee: the whole 1000 goes to the winner.
    assert_eq!(svc.rail().paid_to(&addr("0xplayer0")), 1_000);
    assert_eq!(svc.rail().paid_to(&addr("0xfee")), 0);
    assert_eq!(
        pool_entity.component::<EscrowPool>().unwrap().balance(),
        0
    );
    assert_eq!(
        winner[0].component::<WagerRecord>().unwrap().status(),
        WagerStatus::Won
    );
    assert_eq!(
        losers[0].component::<WagerRecord>().unwrap().status(),
        WagerStatus::Lost
    );
    assert_eq!(
        events.iter().map(|e| e.event_type()).collect::<Vec<_>>(),
        vec!["settlement_paid", "wager_lost"]
    );
}

// Scenario A: 2 x 1_000_000_000 at 250 bps.
#[test]
fn fee_then_winner_matches_expected_amounts() {
    let mut svc = service();
    let (mut pool_entity, cap, mut players) =
        staked_pool(&mut svc, 1_000_000_000, 2, 250, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let (winner, losers) = players.split_at_mut(1);
    svc.settle_with_fee(
        &cap,
        &mut pool_entity,
        &mut winner[0],
        losers.iter_mut().collect(),
    )
    .unwrap();

    assert_eq!(svc.rail().paid_to(&addr("0xfee")), 50_000_000);
    assert_eq!(svc.rail().paid_to(&addr("0xplayer0")), 1_950_000_000);
    assert_eq!(svc.rail().total_paid(), 2_000_000_000);
    assert_eq!(
        pool_entity.component::<EscrowPool>().unwrap().balance(),
        0
    );
}

// Scenario B: 3 x 1_000_000_000 at 250 bps, shares [6000, 4000].
#[test]
fn proportional_settlement_pays_exact_shares() {
    let mut svc = service();
    let (mut pool_entity, cap, mut players) =
        staked_pool(&mut svc, 1_000_000_000, 3, 250, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let (winners, losers) = players.split_at_mut(2);
    let events = svc
        .settle_proportional(
            &cap,
            &mut pool_entity,
            winners.iter_mut().collect(),
            &[bps(6_000), bps(4_000)],
            losers.iter_mut().collect(),
        )
        .unwrap();

    assert_eq!(svc.rail().paid_to(&addr("0xfee")), 75_000_000);
    assert_eq!(svc.rail().paid_to(&addr("0xplayer0")), 1_755_000_000);
    assert_eq!(svc.rail().paid_to(&addr("0xplayer1")), 1_170_000_000);
    // fee + payouts == original total, exactly
    assert_eq!(svc.rail().total_paid(), 3_000_000_000);
    assert_eq!(events[0].event_type(), "fee_collected");
    assert_eq!(
        losers[0].component::<WagerRecord>().unwrap().status(),
        WagerStatus::Lost
    );
}

// Scenario C: shares summing to 9000 must fail before any transfer.
#[test]
fn proportional_settlement_rejects_bad_share_sum() {
    let mut svc = service();
    let (mut pool_entity, cap, mut players) =
        staked_pool(&mut svc, 1_000_000_000, 3, 250, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let (winners, losers) = players.split_at_mut(2);
    let err = svc
        .settle_proportional(
            &cap,
            &mut pool_entity,
            winners.iter_mut().collect(),
            &[bps(6_000), bps(3_000)],
            losers.iter_mut().collect(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::SharesSumInvalid {
            sum: 9_000,
            expected: 10_000,
        }
    ));
    // Nothing moved, nothing flipped.
    assert!(svc.rail().payments.is_empty());
    let pool = pool_entity.component::<EscrowPool>().unwrap();
    assert_eq!(pool.balance(), 3_000_000_000);
    assert!(!pool.is_settled());
    assert_eq!(
        winners[0].component::<WagerRecord>().unwrap().status(),
        WagerStatus::Locked
    );
    assert_eq!(drain_remaining(&mut pool_entity), 3_000_000_000);
}

#[test]
fn proportional_last_winner_absorbs_dust() {
    let mut svc = service();
    // 3 x 1000 with no fee: 3000 split [3333, 3333, 3334] leaves floored
    // cuts of 999 + 999; the last winner takes 1002.
    let (mut pool_entity, cap, mut players) = staked_pool(&mut svc, 1_000, 3, 0, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let shares = [bps(3_333), bps(3_333), bps(3_334)];
    svc.settle_proportional(
        &cap,
        &mut pool_entity,
        players.iter_mut().collect(),
        &shares,
        Vec::new(),
    )
    .unwrap();

    assert_eq!(svc.rail().paid_to(&addr("0xplayer0")), 999);
    assert_eq!(svc.rail().paid_to(&addr("0xplayer1")), 999);
    assert_eq!(svc.rail().paid_to(&addr("0xplayer2")), 1_002);
    assert_eq!(svc.rail().total_paid(), 3_000);
}

// Scenario D: timeout forfeiture needs a full lobby AND an expired clock.
#[test]
fn timeout_settlement_requires_full_and_expired() {
    let mut svc = service();
    let (mut pool_entity, cap, mut players) =
        staked_pool(&mut svc, 1_000, 2, 250, 600_000);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let (winner, losers) = players.split_at_mut(1);

    // 0 ms elapsed: too early.
    let err = svc
        .settle_timeout(
            &cap,
            &mut pool_entity,
            &mut winner[0],
            &mut losers[0],
            Timestamp::from_millis(0),
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::TimeoutNotExpired));

    // Exactly at the deadline: still too early (strictly-after).
    let err = svc
        .settle_timeout(
            &cap,
            &mut pool_entity,
            &mut winner[0],
            &mut losers[0],
            Timestamp::from_millis(600_000),
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::TimeoutNotExpired));

    // 600_001 ms: forfeit, fee-then-winner for one winner and one loser.
    svc.settle_timeout(
        &cap,
        &mut pool_entity,
        &mut winner[0],
        &mut losers[0],
        Timestamp::from_millis(600_001),
    )
    .unwrap();
    assert_eq!(svc.rail().paid_to(&addr("0xfee")), 50);
    assert_eq!(svc.rail().paid_to(&addr("0xplayer0")), 1_950);
    assert_eq!(
        losers[0].component::<WagerRecord>().unwrap().status(),
        WagerStatus::Lost
    );
}

#[test]
fn timeout_settlement_rejects_underfilled_lobby() {
    let mut svc = service();
    // Lobby of 2 with only 1 staked: even long after the deadline the
    // under-filled lobby must use refunds, not forfeiture.
    let (mut pool_entity, cap, _event) = svc
        .create_pool(
            1_000,
            2,
            bps(250),
            addr("0xfee"),
            PayoutMode::WinnerAll,
            Timestamp::from_millis(0),
            600_000,
        )
        .unwrap();
    let mut alone = Entity::new(Timestamp::from_millis(0));
    svc.place_stake(
        &cap,
        &mut pool_entity,
        &mut alone,
        addr("0xplayer0"),
        Funds::from_raw(1_000),
    )
    .unwrap();
    svc.lock_all(&cap, &pool_entity, [&mut alone]).unwrap();

    let mut absent = Entity::new(Timestamp::from_millis(0));
    let err = svc
        .settle_timeout(
            &cap,
            &mut pool_entity,
            &mut alone,
            &mut absent,
            Timestamp::from_millis(10_000_000),
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::TimeoutNotExpired));
    assert!(svc.rail().payments.is_empty());
    assert_eq!(drain_remaining(&mut pool_entity), 1_000);
}

#[test]
fn fee_math_survives_totals_near_the_ceiling() {
    let mut svc = service();
    // 2 x 10^18 base units pooled at 250 bps.
    let (mut pool_entity, cap, mut players) =
        staked_pool(&mut svc, 1_000_000_000_000_000_000, 2, 250, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let (winner, losers) = players.split_at_mut(1);
    svc.settle_with_fee(
        &cap,
        &mut pool_entity,
        &mut winner[0],
        losers.iter_mut().collect(),
    )
    .unwrap();

    assert_eq!(svc.rail().paid_to(&addr("0xfee")), 50_000_000_000_000_000);
    assert_eq!(
        svc.rail().paid_to(&addr("0xplayer0")),
        1_950_000_000_000_000_000
    );
    assert_eq!(svc.rail().total_paid(), 2_000_000_000_000_000_000);
}

#[test]
fn second_settlement_fails_without_side_effects() {
    let mut svc = service();
    let (mut pool_entity, cap, mut players) = staked_pool(&mut svc, 1_000, 2, 250, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    let (winner, losers) = players.split_at_mut(1);
    svc.settle_with_fee(
        &cap,
        &mut pool_entity,
        &mut winner[0],
        losers.iter_mut().collect(),
    )
    .unwrap();
    let paid_after_first = svc.rail().payments.len();

    let err = svc
        .settle_winner_take_all(
            &cap,
            &mut pool_entity,
            &mut winner[0],
            losers.iter_mut().collect(),
        )
        .unwrap_err();
    assert!(matches!(err, DomainError::AlreadySettled));
    assert_eq!(svc.rail().payments.len(), paid_after_first);
}

#[test]
fn settlement_requires_locked_records() {
    let mut svc = service();
    let (mut pool_entity, cap, mut players) = staked_pool(&mut svc, 1_000, 2, 0, 0);
    // No lock_all: records are still pending.
    let (winner, losers) = players.split_at_mut(1);
    let err = svc
        .settle_winner_take_all(
            &cap,
            &mut pool_entity,
            &mut winner[0],
            losers.iter_mut().collect(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::WagerNotLocked {
            status: WagerStatus::Pending,
        }
    ));
    assert!(!pool_entity.component::<EscrowPool>().unwrap().is_settled());
    assert_eq!(drain_remaining(&mut pool_entity), 2_000);
}

#[test]
fn settled_pool_tears_down_and_burns_capability() {
    let mut svc = service();
    let (mut pool_entity, cap, mut players) = staked_pool(&mut svc, 1_000, 2, 0, 0);
    svc.lock_all(&cap, &pool_entity, players.iter_mut()).unwrap();

    // A pool holding value refuses teardown.
    let err = svc.destroy_empty(&cap, &mut pool_entity).unwrap_err();
    assert!(matches!(err, DomainError::PoolNotEmpty { balance: 2_000 }));

    let (winner, losers) = players.split_at_mut(1);
    svc.settle_winner_take_all(
        &cap,
        &mut pool_entity,
        &mut winner[0],
        losers.iter_mut().collect(),
    )
    .unwrap();

    let event = svc.destroy_empty(&cap, &mut pool_entity).unwrap();
    assert_eq!(event.event_type(), "pool_destroyed");
    assert_eq!(svc.config().live_pools(), 0);

    // Idempotent guard: the pool attribute is gone.
    let err = svc.destroy_empty(&cap, &mut pool_entity).unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    let event = svc.destroy_capability(cap);
    assert_eq!(event.event_type(), "capability_destroyed");
}
