// src/handlers/cards.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, validation::validate_not_negative},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::card::{CardInvoice, CreditCard},
    services::billing::card_invoice,
};

// Regra de produto: no máximo 4 cartões por usuário
const MAX_CARDS_PER_USER: usize = 4;

// Reduz o número digitado aos 4 últimos dígitos antes de tocar no banco
fn last4_digits(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(4);
    digits[start..].iter().collect()
}

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub card_limit: Decimal,

    #[validate(range(min = 1, max = 31, message = "O dia de fechamento deve estar entre 1 e 31."))]
    pub closing_day: i32,

    #[validate(range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    pub due_day: i32,

    #[validate(length(min = 4, message = "O número do cartão deve ter ao menos 4 dígitos."))]
    pub card_number: String,

    pub color: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub card_limit: Decimal,

    #[validate(range(min = 1, max = 31, message = "O dia de fechamento deve estar entre 1 e 31."))]
    pub closing_day: i32,

    #[validate(range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    pub due_day: i32,

    pub color: Option<String>,
}

// POST /api/cards
#[utoipa::path(
    post,
    path = "/api/cards",
    tag = "Cards",
    request_body = CreateCardPayload,
    responses(
        (status = 201, description = "Cartão criado", body = CreditCard),
        (status = 409, description = "Limite de cartões atingido")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_card(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateCardPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let count = app_state.card_repo.count(user.id).await?;
    if count as usize >= MAX_CARDS_PER_USER {
        return Err(AppError::CardQuotaReached(MAX_CARDS_PER_USER));
    }

    let card = app_state
        .card_repo
        .create(
            &app_state.db_pool,
            user.id,
            &payload.name,
            payload.card_limit,
            payload.closing_day,
            payload.due_day,
            &last4_digits(&payload.card_number),
            payload.color.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(card)))
}

// GET /api/cards
#[utoipa::path(
    get,
    path = "/api/cards",
    tag = "Cards",
    responses(
        (status = 200, description = "Cartões do usuário", body = Vec<CreditCard>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_all_cards(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<CreditCard>>, AppError> {
    let cards = app_state.card_repo.get_all(user.id).await?;
    Ok(Json(cards))
}

// GET /api/cards/{id}/invoice
#[utoipa::path(
    get,
    path = "/api/cards/{id}/invoice",
    tag = "Cards",
    responses(
        (status = 200, description = "Ciclo de fatura atual do cartão", body = CardInvoice),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_card_invoice(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CardInvoice>, AppError> {
    let card = app_state
        .card_repo
        .find_by_id(user.id, id)
        .await?
        .ok_or(AppError::CardNotFound)?;

    // Cálculo puro sobre a lista completa, refeito a cada consulta
    let transactions = app_state.transaction_repo.get_all(user.id).await?;
    let invoice = card_invoice(&card, &transactions, Utc::now().date_naive());

    Ok(Json(invoice))
}

// PUT /api/cards/{id}
#[utoipa::path(
    put,
    path = "/api/cards/{id}",
    tag = "Cards",
    request_body = UpdateCardPayload,
    responses(
        (status = 200, description = "Cartão atualizado", body = CreditCard),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_card(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCardPayload>,
) -> Result<Json<CreditCard>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let card = app_state
        .card_repo
        .update(
            &app_state.db_pool,
            user.id,
            id,
            &payload.name,
            payload.card_limit,
            payload.closing_day,
            payload.due_day,
            payload.color.as_deref(),
        )
        .await?
        .ok_or(AppError::CardNotFound)?;

    Ok(Json(card))
}

// DELETE /api/cards/{id}
#[utoipa::path(
    delete,
    path = "/api/cards/{id}",
    tag = "Cards",
    responses(
        (status = 204, description = "Cartão removido"),
        (status = 404, description = "Cartão não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_card(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = app_state
        .card_repo
        .delete(&app_state.db_pool, user.id, id)
        .await?;

    if deleted == 0 {
        return Err(AppError::CardNotFound);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_number_is_reduced_to_last_four_digits() {
        assert_eq!(last4_digits("5162 3411 9025 4242"), "4242");
        assert_eq!(last4_digits("5162-3411-9025-4242"), "4242");
        assert_eq!(last4_digits("4242"), "4242");
    }

    #[test]
    fn short_inputs_keep_whatever_digits_exist() {
        assert_eq!(last4_digits("99"), "99");
        assert_eq!(last4_digits(""), "");
    }
}
