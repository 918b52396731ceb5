use uuid::Uuid;

use crate::core::allocator::allocate;
use crate::core::errors::LedgerError;
use crate::core::money::Money;

fn ids(count: u128) -> Vec<Uuid> {
    (1..=count).map(Uuid::from_u128).collect()
}

#[test]
fn test_equal_split_distributes_remainder_in_id_order() {
    let members = ids(3);
    let shares = allocate(Money::from_minor(1000), &members, members[0], &members).unwrap();

    assert_eq!(shares.len(), 3);
    assert_eq!(shares[0].amount, Money::from_minor(334));
    assert_eq!(shares[1].amount, Money::from_minor(333));
    assert_eq!(shares[2].amount, Money::from_minor(333));
    let total: Money = shares.iter().map(|s| s.amount).sum();
    assert_eq!(total, Money::from_minor(1000));
}

#[test]
fn test_shares_sum_exactly_for_any_count_and_amount() {
    let members = ids(7);
    for count in 1..=7 {
        let participants = &members[..count];
        for minor in [1, 5, 99, 1000, 3333, 99999] {
            let amount = Money::from_minor(minor);
            let shares = allocate(amount, participants, members[0], &members).unwrap();
            let total: Money = shares.iter().map(|s| s.amount).sum();
            assert_eq!(total, amount, "count={count} minor={minor}");
        }
    }
}

#[test]
fn test_payer_share_is_settled_at_creation() {
    let members = ids(3);
    let payer = members[1];
    let shares = allocate(Money::from_minor(900), &members, payer, &members).unwrap();

    for share in &shares {
        assert_eq!(share.settled, share.user_id == payer);
    }
}

#[test]
fn test_absent_payer_leaves_all_shares_unsettled() {
    let members = ids(4);
    let payer = members[3];
    let shares = allocate(Money::from_minor(900), &members[..3], payer, &members).unwrap();

    assert_eq!(shares.len(), 3);
    assert!(shares.iter().all(|s| !s.settled));
}

#[test]
fn test_zero_shares_are_omitted() {
    // 0.02 across three people: two get a cent, the third owes nothing.
    let members = ids(3);
    let shares = allocate(Money::from_minor(2), &members, members[0], &members).unwrap();

    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].user_id, members[0]);
    assert_eq!(shares[1].user_id, members[1]);
    let total: Money = shares.iter().map(|s| s.amount).sum();
    assert_eq!(total, Money::from_minor(2));
}

#[test]
fn test_duplicate_participants_collapse() {
    let members = ids(2);
    let participants = [members[0], members[1], members[1]];
    let shares = allocate(Money::from_minor(1000), &participants, members[0], &members).unwrap();

    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].amount, Money::from_minor(500));
}

#[test]
fn test_empty_participants_rejected() {
    let members = ids(2);
    let result = allocate(Money::from_minor(1000), &[], members[0], &members);
    assert!(matches!(result, Err(LedgerError::InvalidParticipants(_))));
}

#[test]
fn test_outsider_participant_rejected() {
    let members = ids(2);
    let outsider = Uuid::from_u128(99);
    let result = allocate(
        Money::from_minor(1000),
        &[members[0], outsider],
        members[0],
        &members,
    );
    assert!(matches!(result, Err(LedgerError::InvalidParticipants(_))));
}

#[test]
fn test_non_positive_amount_rejected() {
    let members = ids(2);
    for minor in [0, -100] {
        let result = allocate(Money::from_minor(minor), &members, members[0], &members);
        assert!(matches!(result, Err(LedgerError::InvalidAmount(_))));
    }
}
