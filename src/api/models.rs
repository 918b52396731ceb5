use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::errors::LedgerError;
use crate::core::models::{Group, User};

// Request structs for JSON payloads

#[derive(Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub created_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    pub added_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub group_id: Uuid,
    pub description: String,
    /// Major units with at most two decimal places, e.g. 12.34.
    pub amount: f64,
    pub category: Option<String>,
    pub currency: Option<String>,
    pub paid_by_id: Uuid,
    pub participant_ids: Vec<Uuid>,
    pub created_by_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct SettleRequest {
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    pub requested_by_id: Uuid,
}

// Response structs

/// A group with its member profiles hydrated.
#[derive(Serialize, ToSchema)]
pub struct GroupDetail {
    pub group: Group,
    pub members: Vec<User>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Newtype wrapper for LedgerError to implement IntoResponse.
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::InvalidAmount(_)
            | LedgerError::InvalidParticipants(_)
            | LedgerError::PartitionMismatch { .. }
            | LedgerError::InvalidEmail(_)
            | LedgerError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            LedgerError::UnknownMember(_) | LedgerError::NotGroupMember(_) => {
                StatusCode::FORBIDDEN
            }
            LedgerError::UserNotFound(_)
            | LedgerError::GroupNotFound(_)
            | LedgerError::SettlementNotFound { .. } => StatusCode::NOT_FOUND,
            LedgerError::AlreadyGroupMember(_) | LedgerError::ConcurrencyConflict(_) => {
                StatusCode::CONFLICT
            }
            LedgerError::SelfDebtDetected(_) | LedgerError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
