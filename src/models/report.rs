// src/models/report.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

// Resumo de um mês fechado (cards de totais)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    #[schema(example = 2024)]
    pub year: i32,

    #[schema(example = 6)]
    pub month: u32,

    #[schema(example = "5400.00")]
    pub income: Decimal,

    #[schema(example = "3210.45")]
    pub expense: Decimal,

    #[schema(example = "2189.55")]
    pub net: Decimal,

    #[schema(example = 42)]
    pub transaction_count: usize,
}

// Um ponto da série anual (gráfico de barras receita x despesa)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearlyChartEntry {
    #[schema(example = "Jun")]
    pub month_label: String,

    #[schema(example = 6)]
    pub month: u32,

    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

// Um ponto da série diária de um mês (gráfico de linha).
// Cada dia é independente: dias sem transações valem 0, sem saldo acumulado.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyBalanceEntry {
    #[schema(example = 15)]
    pub day: u32,

    #[schema(example = "-230.00")]
    pub balance: Decimal,
}
