use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::money::Money;

/// Outstanding one-directional debt between two members, with the splits
/// that produced it. Raw aggregator output; not yet netted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DirectedBalance {
    pub debtor: Uuid,
    pub creditor: Uuid,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub split_ids: Vec<Uuid>,
}

/// One net transfer of the settlement plan: `payer` pays `payee` `amount`,
/// discharging exactly `split_ids`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SettlementInstruction {
    pub payer: Uuid,
    pub payee: Uuid,
    #[schema(value_type = f64)]
    pub amount: Money,
    pub split_ids: Vec<Uuid>,
}
