// src/handlers/installments.rs

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
    common::{error::AppError, validation::validate_positive},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::installment::{Installment, InstallmentGroup},
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchasePayload {
    #[validate(required(message = "O campo 'cardId' é obrigatório."))]
    pub card_id: Option<Uuid>,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(custom(function = "validate_positive"))]
    pub total_amount: Decimal,

    #[validate(range(min = 1, max = 24, message = "O número de parcelas deve estar entre 1 e 24."))]
    pub total_installments: i32,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub purchase_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePurchasePayload {
    #[validate(length(min = 1, message = "A descrição não pode ficar vazia."))]
    pub description: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub total_amount: Option<Decimal>,
}

// POST /api/installments/purchases
#[utoipa::path(
    post,
    path = "/api/installments/purchases",
    tag = "Installments",
    request_body = CreatePurchasePayload,
    responses(
        (status = 201, description = "Compra parcelada criada (todas as parcelas de uma vez)", body = Vec<Installment>),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_purchase(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let installments = app_state
        .installment_service
        .create_purchase(
            user.id,
            payload.card_id.unwrap_or_default(),
            &payload.description,
            payload.total_amount,
            payload.total_installments,
            payload.purchase_date,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(installments)))
}

// GET /api/installments
#[utoipa::path(
    get,
    path = "/api/installments",
    tag = "Installments",
    responses(
        (status = 200, description = "Todas as parcelas do usuário", body = Vec<Installment>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_installments(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Installment>>, AppError> {
    let installments = app_state.installment_service.get_all(user.id).await?;
    Ok(Json(installments))
}

// GET /api/installments/groups
#[utoipa::path(
    get,
    path = "/api/installments/groups",
    tag = "Installments",
    responses(
        (status = 200, description = "Parcelas agrupadas por compra", body = Vec<InstallmentGroup>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_installment_groups(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<InstallmentGroup>>, AppError> {
    let groups = app_state.installment_service.get_groups(user.id).await?;
    Ok(Json(groups))
}

// POST /api/installments/{id}/pay
#[utoipa::path(
    post,
    path = "/api/installments/{id}/pay",
    tag = "Installments",
    responses(
        (status = 200, description = "Parcela paga, transação espelhada criada", body = Installment),
        (status = 404, description = "Parcela não encontrada"),
        (status = 409, description = "A parcela não está pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn pay_installment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Installment>, AppError> {
    let installment = app_state.installment_service.mark_paid(user.id, id).await?;
    Ok(Json(installment))
}

// POST /api/installments/{id}/unpay
#[utoipa::path(
    post,
    path = "/api/installments/{id}/unpay",
    tag = "Installments",
    responses(
        (status = 200, description = "Pagamento desfeito, transação espelhada removida", body = Installment),
        (status = 404, description = "Parcela não encontrada"),
        (status = 409, description = "A parcela não está paga")
    ),
    security(("api_jwt" = []))
)]
pub async fn unpay_installment(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Installment>, AppError> {
    let installment = app_state.installment_service.mark_pending(user.id, id).await?;
    Ok(Json(installment))
}

// PUT /api/installments/purchases/{purchaseId}
#[utoipa::path(
    put,
    path = "/api/installments/purchases/{purchaseId}",
    tag = "Installments",
    request_body = UpdatePurchasePayload,
    responses(
        (status = 200, description = "Compra atualizada", body = Vec<Installment>),
        (status = 404, description = "Compra não encontrada"),
        (status = 409, description = "Valor não pode mudar após pagamento de parcela")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_purchase(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(purchase_id): Path<Uuid>,
    Json(payload): Json<UpdatePurchasePayload>,
) -> Result<Json<Vec<Installment>>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let installments = app_state
        .installment_service
        .update_purchase(
            user.id,
            purchase_id,
            payload.description.as_deref(),
            payload.total_amount,
        )
        .await?;

    Ok(Json(installments))
}

// DELETE /api/installments/purchases/{purchaseId}
#[utoipa::path(
    delete,
    path = "/api/installments/purchases/{purchaseId}",
    tag = "Installments",
    responses(
        (status = 204, description = "Compra e transações espelhadas removidas"),
        (status = 404, description = "Compra não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_purchase(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(purchase_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .installment_service
        .delete_purchase(user.id, purchase_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
