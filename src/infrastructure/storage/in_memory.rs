use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::core::models::{Expense, ExpenseRecord, Group, Split, SplitLine, User};
use crate::core::money::Money;
use crate::infrastructure::storage::Storage;

#[derive(Default)]
struct StoreState {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    expenses: HashMap<Uuid, Expense>,
    splits: HashMap<Uuid, Split>,
}

/// In-memory store. A single `RwLock` over the whole state serializes
/// mutations (multi-row writes are atomic) and gives readers a consistent
/// snapshot; no partially recorded expense is ever visible.
pub struct InMemoryStorage {
    state: RwLock<StoreState>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            state: RwLock::new(StoreState::default()),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn split_line(split: &Split, expense: &Expense) -> SplitLine {
    SplitLine {
        split_id: split.id,
        expense_id: expense.id,
        group_id: expense.group_id,
        debtor: split.user_id,
        creditor: expense.paid_by,
        amount: split.amount,
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_user(&self, user: User) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        state.users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, LedgerError> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        state.groups.insert(group.id, group);
        Ok(())
    }

    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, LedgerError> {
        Ok(self.state.read().await.groups.get(&group_id).cloned())
    }

    async fn groups_for_user(&self, user_id: Uuid) -> Result<Vec<Group>, LedgerError> {
        let state = self.state.read().await;
        let mut groups: Vec<Group> = state
            .groups
            .values()
            .filter(|g| g.is_member(user_id))
            .cloned()
            .collect();
        groups.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(groups)
    }

    async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, LedgerError> {
        let state = self.state.read().await;
        Ok(state
            .groups
            .get(&group_id)
            .is_some_and(|g| g.is_member(user_id)))
    }

    async fn members_of(&self, group_id: Uuid) -> Result<Vec<Uuid>, LedgerError> {
        let state = self.state.read().await;
        let group = state
            .groups
            .get(&group_id)
            .ok_or(LedgerError::GroupNotFound(group_id))?;
        Ok(group.members.clone())
    }

    async fn record_expense(
        &self,
        expense: Expense,
        splits: Vec<Split>,
    ) -> Result<Expense, LedgerError> {
        let mut state = self.state.write().await;

        // Integrity gate: everything is checked before any row is written,
        // so a failure leaves the store untouched.
        if state.expenses.contains_key(&expense.id) {
            return Err(LedgerError::ConcurrencyConflict(format!(
                "expense {} already recorded",
                expense.id
            )));
        }
        let group = state
            .groups
            .get(&expense.group_id)
            .ok_or(LedgerError::GroupNotFound(expense.group_id))?;
        if !group.is_member(expense.paid_by) {
            return Err(LedgerError::UnknownMember(expense.paid_by));
        }

        let mut total = Money::ZERO;
        for split in &splits {
            if split.expense_id != expense.id {
                return Err(LedgerError::StorageError(format!(
                    "split {} does not belong to expense {}",
                    split.id, expense.id
                )));
            }
            if state.splits.contains_key(&split.id) {
                return Err(LedgerError::ConcurrencyConflict(format!(
                    "split {} already recorded",
                    split.id
                )));
            }
            if !group.is_member(split.user_id) {
                return Err(LedgerError::UnknownMember(split.user_id));
            }
            total += split.amount;
        }
        if total != expense.amount {
            return Err(LedgerError::PartitionMismatch {
                expected: expense.amount,
                actual: total,
            });
        }

        for split in splits {
            state.splits.insert(split.id, split);
        }
        state.expenses.insert(expense.id, expense.clone());
        debug!(expense_id = %expense.id, group_id = %expense.group_id, "expense recorded");
        Ok(expense)
    }

    async fn expenses_of_group(&self, group_id: Uuid) -> Result<Vec<ExpenseRecord>, LedgerError> {
        let state = self.state.read().await;
        let mut records: Vec<ExpenseRecord> = state
            .expenses
            .values()
            .filter(|e| e.group_id == group_id)
            .map(|expense| {
                let mut splits: Vec<Split> = state
                    .splits
                    .values()
                    .filter(|s| s.expense_id == expense.id)
                    .cloned()
                    .collect();
                splits.sort_by_key(|s| s.id);
                ExpenseRecord {
                    expense: expense.clone(),
                    splits,
                }
            })
            .collect();
        // Newest first, the order the expense list renders.
        records.sort_by(|a, b| {
            (b.expense.created_at, b.expense.id).cmp(&(a.expense.created_at, a.expense.id))
        });
        Ok(records)
    }

    async fn unsettled_splits_by_group(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<SplitLine>, LedgerError> {
        let state = self.state.read().await;
        let mut lines: Vec<SplitLine> = state
            .splits
            .values()
            .filter(|s| !s.settled)
            .filter_map(|split| {
                state
                    .expenses
                    .get(&split.expense_id)
                    .filter(|e| e.group_id == group_id)
                    .map(|expense| split_line(split, expense))
            })
            .collect();
        lines.sort_by_key(|l| l.split_id);
        Ok(lines)
    }

    async fn unsettled_splits_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SplitLine>, LedgerError> {
        let state = self.state.read().await;
        let mut lines: Vec<SplitLine> = state
            .splits
            .values()
            .filter(|s| !s.settled)
            .filter_map(|split| {
                state
                    .expenses
                    .get(&split.expense_id)
                    .map(|expense| split_line(split, expense))
            })
            .filter(|line| line.debtor == user_id || line.creditor == user_id)
            .collect();
        lines.sort_by_key(|l| l.split_id);
        Ok(lines)
    }

    async fn mark_settled(
        &self,
        split_ids: &[Uuid],
        settled_at: DateTime<Utc>,
    ) -> Result<usize, LedgerError> {
        let mut state = self.state.write().await;
        let mut updated = 0;
        for id in split_ids {
            if let Some(split) = state.splits.get_mut(id) {
                if !split.settled {
                    split.settled = true;
                    split.settled_at = Some(settled_at);
                    updated += 1;
                }
            }
        }
        debug!(requested = split_ids.len(), updated, "splits settled");
        Ok(updated)
    }
}
