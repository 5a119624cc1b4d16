// src/models/fixed_expense.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "fixed_expense_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FixedExpenseStatus {
    Pending, // Aguardando pagamento no ciclo atual
    Paid,    // Paga no ciclo atual
}

// Status derivado na leitura; "Overdue" nunca é gravado no banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum DisplayStatus {
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpense {
    pub id: Uuid,

    #[schema(ignore)]
    pub user_id: Uuid,

    #[schema(example = "Aluguel")]
    pub name: String,

    #[schema(example = "Moradia")]
    pub category: String,

    #[schema(example = "1800.00")]
    pub amount: Decimal,

    // Dia do mês do vencimento (1..31)
    #[schema(example = 5)]
    pub due_day: i32,

    pub active: bool,

    #[schema(value_type = Option<String>, format = Date, example = "2024-06-03")]
    pub last_payment_date: Option<NaiveDate>,

    #[schema(value_type = String, format = Date, example = "2024-07-05")]
    pub next_due_date: NaiveDate,

    pub status: FixedExpenseStatus,

    pub created_at: Option<DateTime<Utc>>,
}

// Linha de despesa fixa acompanhada do status derivado para o período atual
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FixedExpenseView {
    #[serde(flatten)]
    pub expense: FixedExpense,

    pub display_status: DisplayStatus,
}
