// src/models/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::transaction::TransactionKind;

// Categoria reservada usada pelas parcelas de cartão de crédito
pub const CREDIT_CARD_CATEGORY: &str = "Cartão de Crédito";

// Categorias padrão semeadas para cada usuário novo.
// Elas não podem ser excluídas (is_default = true).
pub const DEFAULT_INCOME_CATEGORIES: &[&str] = &["Salário", "Investimentos", "Outros"];
pub const DEFAULT_EXPENSE_CATEGORIES: &[&str] = &[
    "Alimentação",
    "Transporte",
    "Moradia",
    "Saúde",
    "Lazer",
    CREDIT_CARD_CATEGORY,
    "Outros",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "Alimentação")]
    pub name: String,

    pub kind: TransactionKind,

    #[schema(example = false)]
    pub is_default: bool,

    pub created_at: Option<DateTime<Utc>>,
}
