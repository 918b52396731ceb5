use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::core::money::Money;

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

#[derive(Error, Debug, Serialize)]
pub enum LedgerError {
    /// Expense or settlement amount is non-positive, non-finite, or carries
    /// more than two decimal places
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Participant set is empty or names someone outside the group
    #[error("Invalid participants: {0}")]
    InvalidParticipants(String),

    /// A split debtor was not a group member at recording time
    #[error("User {0} is not a member of the expense's group")]
    UnknownMember(Uuid),

    /// Sum of split amounts does not equal the expense amount
    #[error("Splits sum to {actual} but the expense amount is {expected}")]
    PartitionMismatch { expected: Money, actual: Money },

    /// A split's debtor equals its expense's payer; upstream integrity bug
    #[error("Self-debt detected for user {0}")]
    SelfDebtDetected(Uuid),

    /// Caller asked to settle a pair with no outstanding net balance
    #[error("No outstanding settlement from {payer} to {payee}")]
    SettlementNotFound { payer: Uuid, payee: Uuid },

    /// Stale write detected; caller should re-read and retry
    #[error("Concurrent modification: {0}")]
    ConcurrencyConflict(String),

    #[error("User {0} not found")]
    UserNotFound(Uuid),

    #[error("Group {0} not found")]
    GroupNotFound(Uuid),

    #[error("User {0} is not a group member")]
    NotGroupMember(Uuid),

    #[error("User {0} is already a group member")]
    AlreadyGroupMember(Uuid),

    #[error("Invalid email format: {0}")]
    InvalidEmail(String),

    /// Generic input validation error with detailed field information
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),
}
