// src/models/card.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440002")]
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "Nubank")]
    pub name: String,

    #[schema(example = "5000.00")]
    pub card_limit: Decimal,

    // Dia do mês em que a fatura fecha (1..31)
    #[schema(example = 10)]
    pub closing_day: i32,

    // Dia do mês do vencimento da fatura (1..31)
    #[schema(example = 20)]
    pub due_day: i32,

    // Apenas os 4 últimos dígitos ficam no banco
    #[schema(example = "4242")]
    pub card_number_last4: String,

    // Soma das parcelas pendentes vinculadas ao cartão
    #[schema(example = "1200.00")]
    pub upcoming_invoices_amount: Decimal,

    #[schema(example = "#8A05BE")]
    pub color: Option<String>,

    pub created_at: Option<DateTime<Utc>>,
}

// Resultado do cálculo do ciclo de fatura (nunca persistido)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardInvoice {
    pub card_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-06-10")]
    pub previous_closing: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2024-07-10")]
    pub next_closing: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2024-06-20")]
    pub next_due_date: NaiveDate,

    #[schema(example = "830.50")]
    pub current_invoice_amount: Decimal,

    #[schema(example = "16.61")]
    pub utilization_percent: Decimal,

    // Pode ficar negativo; o front exibe como alerta, não como erro
    #[schema(example = "2969.50")]
    pub available_limit: Decimal,
}
