// src/models/installment.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "installment_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentStatus {
    Pending, // Pendente
    Paid,    // Paga
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    // Agrupa as N parcelas de uma mesma compra
    pub purchase_id: Uuid,

    pub card_id: Uuid,

    #[schema(example = "Notebook")]
    pub description: String,

    #[schema(example = "3000.00")]
    pub total_amount: Decimal,

    #[schema(example = 10)]
    pub total_installments: i32,

    #[schema(example = 1)]
    pub installment_number: i32,

    #[schema(example = "300.00")]
    pub installment_amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub purchase_date: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2024-07-01")]
    pub due_date: NaiveDate,

    pub status: InstallmentStatus,

    // Transação espelhada criada quando a parcela é paga
    pub transaction_id: Option<Uuid>,

    pub created_at: Option<DateTime<Utc>>,
}

// Projeção de leitura: uma entrada por compra, para exibição agrupada
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentGroup {
    pub purchase_id: Uuid,
    pub card_id: Uuid,

    #[schema(example = "Notebook")]
    pub description: String,

    #[schema(example = "3000.00")]
    pub total_amount: Decimal,

    #[schema(example = 10)]
    pub total_installments: i32,

    #[schema(example = 3)]
    pub paid_installments: i32,

    #[schema(example = "900.00")]
    pub paid_amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub purchase_date: NaiveDate,

    // Vencimento da próxima parcela pendente (None quando tudo foi pago)
    #[schema(value_type = Option<String>, format = Date, example = "2024-10-01")]
    pub next_due_date: Option<NaiveDate>,
}
