// src/models/transaction.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Income,  // Receita
    Expense, // Despesa
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    pub kind: TransactionKind,

    #[schema(example = "150.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-06-15")]
    pub transaction_date: NaiveDate,

    #[schema(example = "Alimentação")]
    pub category: String,

    #[schema(example = "Supermercado")]
    pub description: String,

    pub notes: Option<String>,

    // Preenchido quando a despesa pertence à fatura de um cartão
    pub card_id: Option<Uuid>,

    pub created_at: Option<DateTime<Utc>>,
}
