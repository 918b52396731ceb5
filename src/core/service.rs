use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::constants::{DEFAULT_CURRENCY, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::core::allocator;
use crate::core::balances;
use crate::core::errors::{FieldError, LedgerError};
use crate::core::models::{
    DirectedBalance, Expense, ExpenseRecord, Group, SettlementInstruction, Split, SplitLine, User,
};
use crate::core::money::Money;
use crate::core::planner;
use crate::infrastructure::storage::Storage;

/// Per-group spending overview for the stats view.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct GroupStats {
    pub group_id: Uuid,
    #[schema(value_type = f64)]
    pub total_spend: Money,
    pub member_shares: Vec<MemberShare>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct MemberShare {
    pub user_id: Uuid,
    #[schema(value_type = f64)]
    pub share: Money,
}

/// What a user owes and is owed across all of their groups, from unsettled
/// splits only.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OutstandingBalance {
    #[schema(value_type = f64)]
    pub owes: Money,
    #[schema(value_type = f64)]
    pub owed: Money,
}

/// Result of acting on a settlement instruction.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct SettlementReceipt {
    pub instruction: SettlementInstruction,
    /// Splits newly flipped by this call; retries report zero.
    pub newly_settled: usize,
}

/// Orchestration layer over the ledger store: validates input, runs the
/// split calculator on expense creation, and feeds store snapshots through
/// the aggregator and planner for the read views.
pub struct LedgerService<S: Storage> {
    storage: S,
}

impl<S: Storage> LedgerService<S> {
    pub fn new(storage: S) -> Self {
        info!("initializing ledger service");
        LedgerService { storage }
    }

    fn validate_string_input(
        &self,
        field: &str,
        value: &str,
        max_length: usize,
    ) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} cannot be empty", field),
                },
            ));
        }
        if value.len() > max_length {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("{} Too Long", field),
                    description: format!("{} cannot exceed {} characters", field, max_length),
                },
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError {
                    field: field.to_string(),
                    title: format!("Invalid {}", field),
                    description: format!("{} contains invalid characters", field),
                },
            ));
        }
        Ok(())
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User, LedgerError> {
        self.storage
            .get_user(user_id)
            .await?
            .ok_or(LedgerError::UserNotFound(user_id))
    }

    async fn require_group(&self, group_id: Uuid) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or(LedgerError::GroupNotFound(group_id))
    }

    // USERS

    pub async fn create_user(&self, name: String, email: String) -> Result<User, LedgerError> {
        self.validate_string_input("name", &name, MAX_NAME_LEN)?;
        if !email.contains('@') || !email.contains('.') || email.len() < 5 {
            return Err(LedgerError::InvalidEmail(email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: Utc::now(),
        };
        self.storage.save_user(user.clone()).await?;
        info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, LedgerError> {
        self.storage.get_user(user_id).await
    }

    // GROUPS

    pub async fn create_group(&self, name: String, created_by: Uuid) -> Result<Group, LedgerError> {
        self.validate_string_input("name", &name, MAX_NAME_LEN)?;
        self.require_user(created_by).await?;

        let group = Group {
            id: Uuid::new_v4(),
            name,
            created_by,
            members: vec![created_by],
            created_at: Utc::now(),
        };
        self.storage.save_group(group.clone()).await?;
        info!(group_id = %group.id, created_by = %created_by, "group created");
        Ok(group)
    }

    pub async fn add_member(
        &self,
        group_id: Uuid,
        user_id: Uuid,
        added_by: Uuid,
    ) -> Result<Group, LedgerError> {
        let mut group = self.require_group(group_id).await?;
        self.require_user(user_id).await?;

        if !group.is_member(added_by) {
            warn!(group_id = %group_id, user_id = %added_by, "non-member attempted to add a member");
            return Err(LedgerError::NotGroupMember(added_by));
        }
        if group.is_member(user_id) {
            return Err(LedgerError::AlreadyGroupMember(user_id));
        }

        let position = group.members.partition_point(|&m| m < user_id);
        group.members.insert(position, user_id);
        self.storage.save_group(group.clone()).await?;
        info!(group_id = %group_id, user_id = %user_id, added_by = %added_by, "member added");
        Ok(group)
    }

    pub async fn get_group(&self, group_id: Uuid) -> Result<Option<Group>, LedgerError> {
        self.storage.get_group(group_id).await
    }

    pub async fn groups_for_user(&self, user_id: Uuid) -> Result<Vec<Group>, LedgerError> {
        self.require_user(user_id).await?;
        self.storage.groups_for_user(user_id).await
    }

    // EXPENSES

    /// Record an expense split equally among `participants` and persist it
    /// with its splits in one atomic write. The payer's own share, if any,
    /// is settled from the start.
    #[allow(clippy::too_many_arguments)]
    pub async fn record_expense(
        &self,
        group_id: Uuid,
        description: String,
        amount: Money,
        category: Option<String>,
        currency: Option<String>,
        paid_by: Uuid,
        participants: &[Uuid],
        created_by: Uuid,
    ) -> Result<ExpenseRecord, LedgerError> {
        let group = self.require_group(group_id).await?;
        if !group.is_member(created_by) {
            return Err(LedgerError::NotGroupMember(created_by));
        }
        if !group.is_member(paid_by) {
            warn!(group_id = %group_id, payer = %paid_by, "payer is not a group member");
            return Err(LedgerError::NotGroupMember(paid_by));
        }
        self.validate_string_input("description", &description, MAX_DESCRIPTION_LEN)?;
        if let Some(ref category) = category {
            self.validate_string_input("category", category, MAX_NAME_LEN)?;
        }

        let shares = allocator::allocate(amount, participants, paid_by, &group.members)?;

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            group_id,
            description,
            amount,
            category,
            currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            paid_by,
            created_at: now,
        };
        let splits: Vec<Split> = shares
            .into_iter()
            .map(|share| Split {
                id: Uuid::new_v4(),
                expense_id: expense.id,
                user_id: share.user_id,
                amount: share.amount,
                settled: share.settled,
                settled_at: share.settled.then_some(now),
            })
            .collect();

        let expense = self.storage.record_expense(expense, splits.clone()).await?;
        info!(
            expense_id = %expense.id,
            group_id = %group_id,
            amount = %expense.amount,
            splits = splits.len(),
            "expense recorded"
        );
        Ok(ExpenseRecord { expense, splits })
    }

    pub async fn group_expenses(&self, group_id: Uuid) -> Result<Vec<ExpenseRecord>, LedgerError> {
        self.require_group(group_id).await?;
        self.storage.expenses_of_group(group_id).await
    }

    // BALANCES & SETTLEMENTS

    /// Raw directional pair balances of one group, unnetted: the display
    /// data for a "who owes what" list.
    pub async fn group_balances(&self, group_id: Uuid) -> Result<Vec<DirectedBalance>, LedgerError> {
        self.require_group(group_id).await?;
        let lines = self.storage.unsettled_splits_by_group(group_id).await?;
        let balances = balances::aggregate(&lines)?;
        Ok(balances.into_values().collect())
    }

    /// Netted transfer plan for one group.
    pub async fn group_settlements(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<SettlementInstruction>, LedgerError> {
        self.require_group(group_id).await?;
        let lines = self.storage.unsettled_splits_by_group(group_id).await?;
        let balances = balances::aggregate(&lines)?;
        Ok(planner::plan(&balances))
    }

    /// The "my settlements" view: the full plan over every group the user
    /// belongs to, filtered to instructions involving the user. The engine
    /// computes the whole pairwise graph once; only the filter is per-user.
    pub async fn settlements_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SettlementInstruction>, LedgerError> {
        self.require_user(user_id).await?;
        let instructions = self.plan_across_groups_of(user_id).await?;
        Ok(instructions
            .into_iter()
            .filter(|i| i.payer == user_id || i.payee == user_id)
            .collect())
    }

    /// Act on the outstanding instruction from `payer` to `payee`.
    ///
    /// The plan is recomputed from a fresh snapshot rather than trusting any
    /// caller-supplied split set, then `mark_settled` targets exactly the
    /// instruction's split ids. The store-level compare-and-swap makes
    /// retries and racing duplicates degrade to no-ops.
    pub async fn settle(
        &self,
        payer: Uuid,
        payee: Uuid,
        requested_by: Uuid,
    ) -> Result<SettlementReceipt, LedgerError> {
        self.require_user(requested_by).await?;
        self.require_user(payer).await?;
        self.require_user(payee).await?;

        let instructions = self.plan_across_groups_of(payer).await?;
        let instruction = planner::instruction_for_pair(&instructions, payer, payee)?.clone();

        let newly_settled = self
            .storage
            .mark_settled(&instruction.split_ids, Utc::now())
            .await?;
        info!(
            payer = %payer,
            payee = %payee,
            amount = %instruction.amount,
            newly_settled,
            requested_by = %requested_by,
            "settlement applied"
        );
        Ok(SettlementReceipt {
            instruction,
            newly_settled,
        })
    }

    async fn plan_across_groups_of(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<SettlementInstruction>, LedgerError> {
        let groups = self.storage.groups_for_user(user_id).await?;
        let mut lines: Vec<SplitLine> = Vec::new();
        for group in &groups {
            lines.extend(self.storage.unsettled_splits_by_group(group.id).await?);
        }
        debug!(user_id = %user_id, groups = groups.len(), lines = lines.len(), "planning settlements");
        let balances = balances::aggregate(&lines)?;
        Ok(planner::plan(&balances))
    }

    // QUERY FACADE

    pub async fn total_spend(&self, group_id: Uuid) -> Result<Money, LedgerError> {
        let records = self.group_expenses(group_id).await?;
        Ok(records.iter().map(|r| r.expense.amount).sum())
    }

    pub async fn member_share(
        &self,
        group_id: Uuid,
        user_id: Uuid,
    ) -> Result<Money, LedgerError> {
        let records = self.group_expenses(group_id).await?;
        Ok(records
            .iter()
            .flat_map(|r| &r.splits)
            .filter(|s| s.user_id == user_id)
            .map(|s| s.amount)
            .sum())
    }

    pub async fn group_stats(&self, group_id: Uuid) -> Result<GroupStats, LedgerError> {
        let group = self.require_group(group_id).await?;
        let records = self.storage.expenses_of_group(group_id).await?;
        let total_spend = records.iter().map(|r| r.expense.amount).sum();
        let member_shares = group
            .members
            .iter()
            .map(|&user_id| MemberShare {
                user_id,
                share: records
                    .iter()
                    .flat_map(|r| &r.splits)
                    .filter(|s| s.user_id == user_id)
                    .map(|s| s.amount)
                    .sum(),
            })
            .collect();
        Ok(GroupStats {
            group_id,
            total_spend,
            member_shares,
        })
    }

    /// What the user owes (their unsettled splits on others' expenses) and
    /// is owed (others' unsettled splits on the user's expenses).
    pub async fn outstanding(&self, user_id: Uuid) -> Result<OutstandingBalance, LedgerError> {
        self.require_user(user_id).await?;
        let lines = self.storage.unsettled_splits_for_user(user_id).await?;
        let mut owes = Money::ZERO;
        let mut owed = Money::ZERO;
        for line in &lines {
            if line.debtor == line.creditor {
                return Err(LedgerError::SelfDebtDetected(line.debtor));
            }
            if line.debtor == user_id {
                owes += line.amount;
            } else if line.creditor == user_id {
                owed += line.amount;
            }
        }
        Ok(OutstandingBalance { owes, owed })
    }
}
