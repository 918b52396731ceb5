use std::collections::BTreeSet;

use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::core::money::Money;

/// One participant's computed share of an expense, before persistence.
#[derive(Clone, Debug, PartialEq)]
pub struct Share {
    pub user_id: Uuid,
    pub amount: Money,
    pub settled: bool,
}

/// Allocate `amount` across `participants` with an equal split.
///
/// Works entirely in minor units: each participant gets `amount / n`, and
/// the remainder is handed out one minor unit at a time in ascending id
/// order, so the shares always sum to `amount` exactly. Participants whose
/// share rounds to zero are omitted (a split's amount must be positive).
///
/// The payer's own share, if the payer participates, is settled from the
/// start; nobody owes themselves.
pub fn allocate(
    amount: Money,
    participants: &[Uuid],
    payer_id: Uuid,
    members: &[Uuid],
) -> Result<Vec<Share>, LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount(format!(
            "{amount} must be greater than zero"
        )));
    }

    let ids: BTreeSet<Uuid> = participants.iter().copied().collect();
    if ids.is_empty() {
        return Err(LedgerError::InvalidParticipants(
            "at least one participant is required".to_string(),
        ));
    }
    for id in &ids {
        if !members.contains(id) {
            return Err(LedgerError::InvalidParticipants(format!(
                "user {id} is not in the expense's group"
            )));
        }
    }

    let count = ids.len() as i64;
    let base = amount.minor() / count;
    let remainder = amount.minor() % count;

    let shares = ids
        .into_iter()
        .enumerate()
        .map(|(index, user_id)| Share {
            user_id,
            amount: Money::from_minor(base + i64::from((index as i64) < remainder)),
            settled: user_id == payer_id,
        })
        .filter(|share| share.amount.is_positive())
        .collect();

    Ok(shares)
}
