use std::collections::BTreeMap;

use tracing::error;
use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::core::models::settlement::DirectedBalance;
use crate::core::models::split::SplitLine;
use crate::core::money::Money;

/// Raw directional balances keyed by (debtor, creditor). The map keeps both
/// directions of a pair when both exist; netting is the planner's job.
pub type BalanceMap = BTreeMap<(Uuid, Uuid), DirectedBalance>;

/// Fold unsettled split lines into pairwise directional balances.
///
/// Each line contributes its amount to the (debtor, payer) pair; repeated
/// pairs accumulate, and every balance records the split ids behind it so a
/// later settlement can target exactly those rows. `BTreeMap` keying makes
/// the result independent of input order.
///
/// A line whose debtor equals its creditor cannot come out of a correctly
/// recorded expense; the whole aggregation fails with `SelfDebtDetected`
/// rather than skipping the row.
pub fn aggregate(lines: &[SplitLine]) -> Result<BalanceMap, LedgerError> {
    let mut balances = BalanceMap::new();

    for line in lines {
        if line.debtor == line.creditor {
            error!(
                split_id = %line.split_id,
                expense_id = %line.expense_id,
                user_id = %line.debtor,
                "split debtor equals expense payer; refusing to aggregate"
            );
            return Err(LedgerError::SelfDebtDetected(line.debtor));
        }

        let entry = balances
            .entry((line.debtor, line.creditor))
            .or_insert_with(|| DirectedBalance {
                debtor: line.debtor,
                creditor: line.creditor,
                amount: Money::ZERO,
                split_ids: Vec::new(),
            });
        entry.amount += line.amount;
        entry.split_ids.push(line.split_id);
    }

    for balance in balances.values_mut() {
        balance.split_ids.sort();
    }

    Ok(balances)
}
