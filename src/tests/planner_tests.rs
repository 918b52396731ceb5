use uuid::Uuid;

use crate::core::balances::aggregate;
use crate::core::errors::LedgerError;
use crate::core::models::SplitLine;
use crate::core::money::Money;
use crate::core::planner::{instruction_for_pair, plan};

fn line(split: u128, debtor: u128, creditor: u128, minor: i64) -> SplitLine {
    SplitLine {
        split_id: Uuid::from_u128(split),
        expense_id: Uuid::from_u128(1000 + split),
        group_id: Uuid::from_u128(7777),
        debtor: Uuid::from_u128(debtor),
        creditor: Uuid::from_u128(creditor),
        amount: Money::from_minor(minor),
    }
}

#[test]
fn test_nets_opposing_balances_into_one_instruction() {
    // User 2 owes user 1 10.00, user 1 owes user 2 4.00.
    let lines = vec![line(1, 2, 1, 1000), line(2, 1, 2, 400)];
    let instructions = plan(&aggregate(&lines).unwrap());

    assert_eq!(instructions.len(), 1);
    let instruction = &instructions[0];
    assert_eq!(instruction.payer, Uuid::from_u128(2));
    assert_eq!(instruction.payee, Uuid::from_u128(1));
    assert_eq!(instruction.amount, Money::from_minor(600));
    // Both directions are discharged together.
    assert_eq!(
        instruction.split_ids,
        vec![Uuid::from_u128(1), Uuid::from_u128(2)]
    );
}

#[test]
fn test_equal_opposing_balances_cancel() {
    let lines = vec![line(1, 2, 1, 500), line(2, 1, 2, 500)];
    assert!(plan(&aggregate(&lines).unwrap()).is_empty());
}

#[test]
fn test_one_directional_balance_passes_through() {
    let lines = vec![line(1, 2, 1, 750)];
    let instructions = plan(&aggregate(&lines).unwrap());

    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].payer, Uuid::from_u128(2));
    assert_eq!(instructions[0].payee, Uuid::from_u128(1));
    assert_eq!(instructions[0].amount, Money::from_minor(750));
}

#[test]
fn test_empty_balances_yield_empty_plan() {
    assert!(plan(&aggregate(&[]).unwrap()).is_empty());
}

#[test]
fn test_instructions_sorted_by_payer_then_payee() {
    let lines = vec![line(1, 3, 2, 500), line(2, 2, 1, 1000), line(3, 3, 1, 1000)];
    let instructions = plan(&aggregate(&lines).unwrap());

    let order: Vec<(Uuid, Uuid)> = instructions.iter().map(|i| (i.payer, i.payee)).collect();
    assert_eq!(
        order,
        vec![
            (Uuid::from_u128(2), Uuid::from_u128(1)),
            (Uuid::from_u128(3), Uuid::from_u128(1)),
            (Uuid::from_u128(3), Uuid::from_u128(2)),
        ]
    );
}

#[test]
fn test_plan_is_independent_of_split_order() {
    let mut lines = vec![
        line(1, 2, 1, 1000),
        line(2, 1, 2, 400),
        line(3, 3, 1, 250),
        line(4, 3, 2, 125),
    ];
    let forward = plan(&aggregate(&lines).unwrap());
    lines.reverse();
    let backward = plan(&aggregate(&lines).unwrap());

    assert_eq!(forward, backward);
}

#[test]
fn test_instruction_lookup_by_pair() {
    let lines = vec![line(1, 2, 1, 1000), line(2, 1, 2, 400)];
    let instructions = plan(&aggregate(&lines).unwrap());

    let found =
        instruction_for_pair(&instructions, Uuid::from_u128(2), Uuid::from_u128(1)).unwrap();
    assert_eq!(found.amount, Money::from_minor(600));

    // The netted-away direction has no instruction.
    let missing = instruction_for_pair(&instructions, Uuid::from_u128(1), Uuid::from_u128(2));
    assert!(matches!(
        missing,
        Err(LedgerError::SettlementNotFound { .. })
    ));
}
