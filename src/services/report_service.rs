// src/services/report_service.rs

use chrono::Datelike;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TransactionRepository,
    models::{
        report::{DailyBalanceEntry, MonthlySummary, YearlyChartEntry},
        transaction::{Transaction, TransactionKind},
    },
    services::schedule::last_day_of_month,
};

// Rótulos curtos dos meses para o gráfico anual
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// Totais de um mês: receita, despesa, saldo e contagem.
pub fn monthly_summary(transactions: &[Transaction], year: i32, month: u32) -> MonthlySummary {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut count = 0usize;

    for t in transactions {
        if t.transaction_date.year() != year || t.transaction_date.month() != month {
            continue;
        }
        count += 1;
        match t.kind {
            TransactionKind::Income => income += t.amount,
            TransactionKind::Expense => expense += t.amount,
        }
    }

    MonthlySummary {
        year,
        month,
        income,
        expense,
        net: income - expense,
        transaction_count: count,
    }
}

/// Série anual: um resumo por mês, sempre 12 entradas.
pub fn yearly_series(transactions: &[Transaction], year: i32) -> Vec<YearlyChartEntry> {
    (1..=12u32)
        .map(|month| {
            let summary = monthly_summary(transactions, year, month);
            YearlyChartEntry {
                month_label: MONTH_LABELS[month as usize - 1].to_string(),
                month,
                income: summary.income,
                expense: summary.expense,
                net: summary.net,
            }
        })
        .collect()
}

/// Série diária de um mês: uma entrada por dia do calendário.
///
/// Cada dia soma apenas as transações daquele dia, sem saldo acumulado.
/// Dias sem movimento entram com 0 para o gráfico não ter buracos.
pub fn daily_series(transactions: &[Transaction], year: i32, month: u32) -> Vec<DailyBalanceEntry> {
    let days = last_day_of_month(year, month);

    (1..=days)
        .map(|day| {
            let balance = transactions
                .iter()
                .filter(|t| {
                    t.transaction_date.year() == year
                        && t.transaction_date.month() == month
                        && t.transaction_date.day() == day
                })
                .map(|t| match t.kind {
                    TransactionKind::Income => t.amount,
                    TransactionKind::Expense => -t.amount,
                })
                .sum();

            DailyBalanceEntry { day, balance }
        })
        .collect()
}

#[derive(Clone)]
pub struct ReportService {
    transaction_repo: TransactionRepository,
}

impl ReportService {
    pub fn new(transaction_repo: TransactionRepository) -> Self {
        Self { transaction_repo }
    }

    pub async fn monthly(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, AppError> {
        let transactions = self.transaction_repo.get_all(user_id).await?;
        Ok(monthly_summary(&transactions, year, month))
    }

    pub async fn yearly(&self, user_id: Uuid, year: i32) -> Result<Vec<YearlyChartEntry>, AppError> {
        let transactions = self.transaction_repo.get_all(user_id).await?;
        Ok(yearly_series(&transactions, year))
    }

    pub async fn daily(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyBalanceEntry>, AppError> {
        let transactions = self.transaction_repo.get_all(user_id).await?;
        Ok(daily_series(&transactions, year, month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn tx(kind: TransactionKind, amount: &str, on: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind,
            amount: dec(amount),
            transaction_date: on,
            category: "Outros".to_string(),
            description: "mov".to_string(),
            notes: None,
            card_id: None,
            created_at: None,
        }
    }

    fn sample_month() -> Vec<Transaction> {
        vec![
            tx(TransactionKind::Income, "3000.00", date(2024, 6, 1)),
            tx(TransactionKind::Expense, "1200.00", date(2024, 6, 5)),
            tx(TransactionKind::Expense, "300.00", date(2024, 6, 5)),
            tx(TransactionKind::Income, "150.00", date(2024, 6, 20)),
            // fora do mês consultado
            tx(TransactionKind::Expense, "999.00", date(2024, 5, 31)),
            tx(TransactionKind::Expense, "999.00", date(2023, 6, 5)),
        ]
    }

    #[test]
    fn monthly_summary_filters_by_year_and_month() {
        let summary = monthly_summary(&sample_month(), 2024, 6);

        assert_eq!(summary.income, dec("3150.00"));
        assert_eq!(summary.expense, dec("1500.00"));
        assert_eq!(summary.net, dec("1650.00"));
        assert_eq!(summary.transaction_count, 4);
    }

    #[test]
    fn empty_month_is_all_zeroes() {
        let summary = monthly_summary(&sample_month(), 2024, 1);
        assert_eq!(summary.income, Decimal::ZERO);
        assert_eq!(summary.expense, Decimal::ZERO);
        assert_eq!(summary.transaction_count, 0);
    }

    #[test]
    fn yearly_series_has_twelve_labeled_entries() {
        let series = yearly_series(&sample_month(), 2024);

        assert_eq!(series.len(), 12);
        assert_eq!(series[0].month_label, "Jan");
        assert_eq!(series[11].month_label, "Dez");
        assert_eq!(series[5].net, dec("1650.00")); // junho
        assert_eq!(series[4].net, dec("-999.00")); // maio
    }

    #[test]
    fn daily_series_covers_every_calendar_day() {
        let series = daily_series(&sample_month(), 2024, 6);

        assert_eq!(series.len(), 30);
        assert_eq!(series[0].balance, dec("3000.00")); // dia 1
        assert_eq!(series[4].balance, dec("-1500.00")); // dia 5, duas despesas
        assert_eq!(series[9].balance, Decimal::ZERO); // dia sem movimento
    }

    #[test]
    fn daily_series_respects_month_length() {
        assert_eq!(daily_series(&[], 2024, 2).len(), 29);
        assert_eq!(daily_series(&[], 2023, 2).len(), 28);
        assert_eq!(daily_series(&[], 2024, 7).len(), 31);
    }

    #[test]
    fn monthly_net_equals_the_sum_of_daily_balances() {
        let transactions = sample_month();
        let summary = monthly_summary(&transactions, 2024, 6);
        let daily_total: Decimal = daily_series(&transactions, 2024, 6)
            .iter()
            .map(|d| d.balance)
            .sum();

        assert_eq!(summary.net, daily_total);
    }
}
