use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::core::models::{Expense, ExpenseRecord, Group, Split, SplitLine, User};

/// Durable record of users, groups, expenses and splits.
///
/// The membership methods (`is_member`, `members_of`) are the boundary the
/// ledger consumes for validation; the engine never mutates membership
/// outside the explicit group operations.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_user(&self, user: User) -> Result<(), LedgerError>;
    async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, LedgerError>;

    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, LedgerError>;
    async fn groups_for_user(&self, user_id: Uuid) -> Result<Vec<Group>, LedgerError>;
    async fn is_member(&self, group_id: Uuid, user_id: Uuid) -> Result<bool, LedgerError>;
    async fn members_of(&self, group_id: Uuid) -> Result<Vec<Uuid>, LedgerError>;

    /// Persist an expense and its splits atomically: either everything is
    /// recorded or nothing is. Re-checks the partition invariant and split
    /// debtor membership as the final integrity gate.
    async fn record_expense(
        &self,
        expense: Expense,
        splits: Vec<Split>,
    ) -> Result<Expense, LedgerError>;
    async fn expenses_of_group(&self, group_id: Uuid) -> Result<Vec<ExpenseRecord>, LedgerError>;

    /// Unsettled splits of a group, joined with their parent expense.
    async fn unsettled_splits_by_group(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<SplitLine>, LedgerError>;

    /// Unsettled splits where the user is debtor or creditor, across groups.
    async fn unsettled_splits_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SplitLine>, LedgerError>;

    /// Bulk compare-and-swap: flip only splits that are still unsettled,
    /// stamping `settled_at`. Already-settled and unknown ids are discarded
    /// silently (a stale plan may reference them); returns the number newly
    /// settled. Idempotent, safe to retry.
    async fn mark_settled(
        &self,
        split_ids: &[Uuid],
        settled_at: DateTime<Utc>,
    ) -> Result<usize, LedgerError>;
}

pub mod in_memory;
