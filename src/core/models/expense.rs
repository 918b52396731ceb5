use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::models::split::Split;
use crate::core::money::Money;

/// A recorded cost paid by one member on behalf of a group.
/// Immutable once recorded; only its splits change state, via settlement.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub description: String,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub category: Option<String>,
    /// ISO currency code. Tracked per expense, never converted.
    pub currency: String,
    pub paid_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// An expense together with its splits, as persisted atomically.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseRecord {
    pub expense: Expense,
    pub splits: Vec<Split>,
}
