use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::money::Money;

/// One member's owed share of a single expense.
///
/// Amount and identities are immutable after creation; settlement is the
/// only mutation, and it is one-way.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Split {
    pub id: Uuid,
    pub expense_id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub settled: bool,
    pub settled_at: Option<DateTime<Utc>>,
}

/// A split joined with its parent expense, the read model the aggregator
/// consumes. `creditor` is the expense's payer.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SplitLine {
    pub split_id: Uuid,
    pub expense_id: Uuid,
    pub group_id: Uuid,
    pub debtor: Uuid,
    pub creditor: Uuid,
    #[schema(value_type = f64)]
    pub amount: Money,
}
