use axum::extract::{Path, State};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::response::{ApiResponse, ErrorResponse};
use crate::validator::ValidatedJson;

use super::model::{CreateTransactionRequest, Transaction};
use super::service::TransactionService;

/// List all transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    responses(
        (status = 200, description = "Transactions retrieved successfully", body = [Transaction]),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 403, description = "Insufficient permissions", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Transactions"
)]
#[instrument(skip(state))]
pub async fn get_transactions(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Transaction>>, AppError> {
    let transactions = TransactionService::list(&state.db).await?;
    Ok(ApiResponse::success(
        "Transactions retrieved successfully",
        transactions,
    ))
}

/// Get a transaction by id
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(("id" = Uuid, Path, description = "Transaction id")),
    responses(
        (status = 200, description = "Transaction retrieved successfully", body = Transaction),
        (status = 404, description = "Transaction not found", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Transactions"
)]
#[instrument(skip(state))]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<Transaction>, AppError> {
    let transaction = TransactionService::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;

    Ok(ApiResponse::success(
        "Transaction retrieved successfully",
        transaction,
    ))
}

/// Record a payment for the authenticated student
#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Transaction created successfully", body = Transaction),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse)
    ),
    security(("bearer" = [])),
    tag = "Transactions"
)]
#[instrument(skip(state, auth_user))]
pub async fn create_transaction(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTransactionRequest>,
) -> Result<ApiResponse<Transaction>, AppError> {
    let transaction =
        TransactionService::create(&state.db, auth_user.user_id()?, dto.amount_cents).await?;

    Ok(ApiResponse::created(
        "Transaction created successfully",
        transaction,
    ))
}
