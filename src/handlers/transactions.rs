// src/handlers/transactions.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::validate_not_negative},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::transaction::{Transaction, TransactionKind},
};

// ---
// Payload: criação e edição usam o mesmo formato (PUT substitui tudo)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub kind: TransactionKind,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-06-15")]
    pub transaction_date: NaiveDate,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    pub notes: Option<String>,

    pub card_id: Option<Uuid>,
}

// POST /api/transactions
#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Transactions",
    request_body = TransactionPayload,
    responses(
        (status = 201, description = "Transação criada", body = Transaction),
        (status = 400, description = "Campos inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<TransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let transaction = app_state
        .transaction_repo
        .create(
            &app_state.db_pool,
            user.id,
            payload.kind,
            payload.amount,
            payload.transaction_date,
            &payload.category,
            &payload.description,
            payload.notes.as_deref(),
            payload.card_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// GET /api/transactions
#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Transactions",
    responses(
        (status = 200, description = "Todas as transações do usuário, mais recentes primeiro", body = Vec<Transaction>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_transactions(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = app_state.transaction_repo.get_all(user.id).await?;
    Ok(Json(transactions))
}

// PUT /api/transactions/{id}
#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    request_body = TransactionPayload,
    responses(
        (status = 200, description = "Transação atualizada", body = Transaction),
        (status = 404, description = "Transação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_transaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionPayload>,
) -> Result<Json<Transaction>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let transaction = app_state
        .transaction_repo
        .update(
            &app_state.db_pool,
            user.id,
            id,
            payload.kind,
            payload.amount,
            payload.transaction_date,
            &payload.category,
            &payload.description,
            payload.notes.as_deref(),
            payload.card_id,
        )
        .await?
        .ok_or(AppError::TransactionNotFound)?;

    Ok(Json(transaction))
}

// DELETE /api/transactions/{id}
#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Transactions",
    responses(
        (status = 204, description = "Transação removida"),
        (status = 404, description = "Transação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .transaction_repo
        .delete(&app_state.db_pool, user.id, id)
        .await?;

    if deleted == 0 {
        return Err(AppError::TransactionNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}
