// src/models/export.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    card::CreditCard, category::Category, fixed_expense::FixedExpense, installment::Installment,
    transaction::Transaction,
};

pub const EXPORT_VERSION: u32 = 1;

// Dump completo dos dados de um usuário, para download e reimportação.
// Na importação todos os IDs são regenerados e o user_id é substituído.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportDump {
    #[schema(example = 1)]
    pub version: u32,

    pub exported_at: DateTime<Utc>,

    pub categories: Vec<Category>,
    pub cards: Vec<CreditCard>,
    pub transactions: Vec<Transaction>,
    pub installments: Vec<Installment>,
    pub fixed_expenses: Vec<FixedExpense>,
}

// Resumo devolvido ao final de uma importação
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub categories: usize,
    pub cards: usize,
    pub transactions: usize,
    pub installments: usize,
    pub fixed_expenses: usize,
}
