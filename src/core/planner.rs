use std::collections::BTreeSet;

use uuid::Uuid;

use crate::core::balances::BalanceMap;
use crate::core::errors::LedgerError;
use crate::core::models::settlement::SettlementInstruction;
use crate::core::money::Money;

/// Net opposing directional balances into a transfer plan.
///
/// For every unordered pair {A, B} the two directional entries cancel
/// against each other: the residual, if any, becomes a single instruction
/// whose direction follows the sign of the net. The instruction carries the
/// union of split ids from both directions, since acting on it discharges
/// both sides at once. Pairs that net to zero emit nothing.
///
/// Instructions come back sorted by (payer, payee) for reproducible output.
pub fn plan(balances: &BalanceMap) -> Vec<SettlementInstruction> {
    let mut visited: BTreeSet<(Uuid, Uuid)> = BTreeSet::new();
    let mut instructions = Vec::new();

    for &(debtor, creditor) in balances.keys() {
        let pair = canonical_pair(debtor, creditor);
        if !visited.insert(pair) {
            continue;
        }
        let (lo, hi) = pair;

        let forward = balances.get(&(lo, hi));
        let reverse = balances.get(&(hi, lo));
        let net = forward.map_or(Money::ZERO, |b| b.amount)
            - reverse.map_or(Money::ZERO, |b| b.amount);
        if net == Money::ZERO {
            continue;
        }

        let mut split_ids: Vec<Uuid> = forward
            .into_iter()
            .chain(reverse)
            .flat_map(|b| b.split_ids.iter().copied())
            .collect();
        split_ids.sort();

        let (payer, payee, amount) = if net.is_positive() {
            (lo, hi, net)
        } else {
            (hi, lo, -net)
        };
        instructions.push(SettlementInstruction {
            payer,
            payee,
            amount,
            split_ids,
        });
    }

    instructions.sort_by(|a, b| (a.payer, a.payee).cmp(&(b.payer, b.payee)));
    instructions
}

/// Find the instruction for a specific (payer, payee) pair.
///
/// A pair that netted to zero has no instruction; asking to settle it is a
/// caller error, not a silent no-op.
pub fn instruction_for_pair(
    instructions: &[SettlementInstruction],
    payer: Uuid,
    payee: Uuid,
) -> Result<&SettlementInstruction, LedgerError> {
    instructions
        .iter()
        .find(|i| i.payer == payer && i.payee == payee)
        .ok_or(LedgerError::SettlementNotFound { payer, payee })
}

fn canonical_pair(a: Uuid, b: Uuid) -> (Uuid, Uuid) {
    if a <= b { (a, b) } else { (b, a) }
}
