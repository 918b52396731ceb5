use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::models::*;
use crate::core::errors::LedgerError;
use crate::core::models::{DirectedBalance, ExpenseRecord, Group, SettlementInstruction, User};
use crate::core::money::Money;
use crate::core::service::{
    GroupStats, LedgerService, OutstandingBalance, SettlementReceipt,
};
use crate::infrastructure::storage::in_memory::InMemoryStorage;

/// Assemble the API router. Middleware layers are added by the caller.
pub fn api_routes(service: Arc<LedgerService<InMemoryStorage>>) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .route("/users", post(create_user))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/groups", get(groups_for_user))
        .route("/users/{user_id}/settlements", get(user_settlements))
        .route("/users/{user_id}/outstanding", get(user_outstanding))
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/expenses", get(group_expenses))
        .route("/groups/{group_id}/balances", get(group_balances))
        .route("/groups/{group_id}/settlements", get(group_settlements))
        .route("/groups/{group_id}/stats", get(group_stats))
        .route("/expenses", post(add_expense))
        .route("/settlements/settle", post(settle))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid name or email", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = service.create_user(req.name, req.email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
    let user = service
        .get_user(user_id)
        .await?
        .ok_or(LedgerError::UserNotFound(user_id))?;
    Ok(Json(user))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/groups",
    responses(
        (status = 200, description = "Groups the user belongs to", body = [Group]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn groups_for_user(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let groups = service.groups_for_user(user_id).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/settlements",
    responses(
        (status = 200, description = "Netted instructions involving the user", body = [SettlementInstruction]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn user_settlements(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<SettlementInstruction>>, ApiError> {
    let instructions = service.settlements_for_user(user_id).await?;
    Ok(Json(instructions))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}/outstanding",
    responses(
        (status = 200, description = "What the user owes and is owed", body = OutstandingBalance),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn user_outstanding(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OutstandingBalance>, ApiError> {
    let outstanding = service.outstanding(user_id).await?;
    Ok(Json(outstanding))
}

#[utoipa::path(
    post,
    path = "/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = Group),
        (status = 404, description = "Creator not found", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    let group = service.create_group(req.name, req.created_by_id).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    responses(
        (status = 200, description = "Group with hydrated members", body = GroupDetail),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupDetail>, ApiError> {
    let group = service
        .get_group(group_id)
        .await?
        .ok_or(LedgerError::GroupNotFound(group_id))?;
    let members = group.members.iter().map(|&member_id| {
        let service = service.clone();
        async move {
            service
                .get_user(member_id)
                .await?
                .ok_or(LedgerError::UserNotFound(member_id))
        }
    });
    let members = futures::future::try_join_all(members).await?;
    Ok(Json(GroupDetail { group, members }))
}

#[utoipa::path(
    post,
    path = "/groups/{group_id}/members",
    request_body = AddMemberRequest,
    responses(
        (status = 200, description = "Member added", body = Group),
        (status = 403, description = "Adder is not a group member", body = ErrorResponse),
        (status = 409, description = "Already a group member", body = ErrorResponse)
    )
)]
pub async fn add_member(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(group_id): Path<Uuid>,
    Json(req): Json<AddMemberRequest>,
) -> Result<Json<Group>, ApiError> {
    let group = service
        .add_member(group_id, req.user_id, req.added_by_id)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/expenses",
    responses(
        (status = 200, description = "Group expenses, newest first", body = [ExpenseRecord]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn group_expenses(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<ExpenseRecord>>, ApiError> {
    let records = service.group_expenses(group_id).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/balances",
    responses(
        (status = 200, description = "Raw directional balances, unnetted", body = [DirectedBalance]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn group_balances(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<DirectedBalance>>, ApiError> {
    let balances = service.group_balances(group_id).await?;
    Ok(Json(balances))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/settlements",
    responses(
        (status = 200, description = "Netted transfer plan for the group", body = [SettlementInstruction]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn group_settlements(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<Vec<SettlementInstruction>>, ApiError> {
    let instructions = service.group_settlements(group_id).await?;
    Ok(Json(instructions))
}

#[utoipa::path(
    get,
    path = "/groups/{group_id}/stats",
    responses(
        (status = 200, description = "Total spend and per-member shares", body = GroupStats),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn group_stats(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Path(group_id): Path<Uuid>,
) -> Result<Json<GroupStats>, ApiError> {
    let stats = service.group_stats(group_id).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    post,
    path = "/expenses",
    request_body = AddExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded with its splits", body = ExpenseRecord),
        (status = 400, description = "Invalid amount or participants", body = ErrorResponse),
        (status = 403, description = "Payer or creator not a group member", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseRecord>), ApiError> {
    let amount = Money::from_major(req.amount)?;
    let record = service
        .record_expense(
            req.group_id,
            req.description,
            amount,
            req.category,
            req.currency,
            req.paid_by_id,
            &req.participant_ids,
            req.created_by_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    post,
    path = "/settlements/settle",
    request_body = SettleRequest,
    responses(
        (status = 200, description = "Instruction applied", body = SettlementReceipt),
        (status = 404, description = "No outstanding balance for the pair", body = ErrorResponse)
    )
)]
pub async fn settle(
    State(service): State<Arc<LedgerService<InMemoryStorage>>>,
    Json(req): Json<SettleRequest>,
) -> Result<Json<SettlementReceipt>, ApiError> {
    let receipt = service
        .settle(req.payer_id, req.payee_id, req.requested_by_id)
        .await?;
    Ok(Json(receipt))
}
