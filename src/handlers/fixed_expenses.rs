// src/handlers/fixed_expenses.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::validate_not_negative},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::fixed_expense::{FixedExpense, FixedExpenseView},
};

// Criação e edição compartilham o formato (PUT substitui tudo)
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpensePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub amount: Decimal,

    #[validate(range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    pub due_day: i32,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

// POST /api/fixed-expenses
#[utoipa::path(
    post,
    path = "/api/fixed-expenses",
    tag = "FixedExpenses",
    request_body = FixedExpensePayload,
    responses(
        (status = 201, description = "Despesa fixa criada com o primeiro vencimento calculado", body = FixedExpense)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_fixed_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<FixedExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state
        .fixed_expense_service
        .create(
            user.id,
            &payload.name,
            &payload.category,
            payload.amount,
            payload.due_day,
            payload.active,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

// GET /api/fixed-expenses
#[utoipa::path(
    get,
    path = "/api/fixed-expenses",
    tag = "FixedExpenses",
    responses(
        (status = 200, description = "Despesas fixas com status derivado do ciclo atual", body = Vec<FixedExpenseView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_fixed_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<FixedExpenseView>>, AppError> {
    let expenses = app_state.fixed_expense_service.list(user.id).await?;
    Ok(Json(expenses))
}

// GET /api/fixed-expenses/overdue
#[utoipa::path(
    get,
    path = "/api/fixed-expenses/overdue",
    tag = "FixedExpenses",
    responses(
        (status = 200, description = "Despesas ativas vencidas há mais de 3 dias", body = Vec<FixedExpenseView>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_overdue_fixed_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<FixedExpenseView>>, AppError> {
    let expenses = app_state.fixed_expense_service.overdue(user.id).await?;
    Ok(Json(expenses))
}

// POST /api/fixed-expenses/{id}/pay
#[utoipa::path(
    post,
    path = "/api/fixed-expenses/{id}/pay",
    tag = "FixedExpenses",
    responses(
        (status = 200, description = "Despesa paga, vencimento avançado em um mês", body = FixedExpense),
        (status = 404, description = "Despesa não encontrada"),
        (status = 409, description = "Despesa já paga neste ciclo")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_fixed_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<FixedExpense>, AppError> {
    let expense = app_state.fixed_expense_service.mark_paid(user.id, id).await?;
    Ok(Json(expense))
}

// PUT /api/fixed-expenses/{id}
#[utoipa::path(
    put,
    path = "/api/fixed-expenses/{id}",
    tag = "FixedExpenses",
    request_body = FixedExpensePayload,
    responses(
        (status = 200, description = "Despesa atualizada", body = FixedExpense),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_fixed_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<FixedExpensePayload>,
) -> Result<Json<FixedExpense>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state
        .fixed_expense_service
        .update(
            user.id,
            id,
            &payload.name,
            &payload.category,
            payload.amount,
            payload.due_day,
            payload.active,
        )
        .await?;

    Ok(Json(expense))
}

// DELETE /api/fixed-expenses/{id}
#[utoipa::path(
    delete,
    path = "/api/fixed-expenses/{id}",
    tag = "FixedExpenses",
    responses(
        (status = 204, description = "Despesa removida"),
        (status = 404, description = "Despesa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_fixed_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.fixed_expense_service.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
