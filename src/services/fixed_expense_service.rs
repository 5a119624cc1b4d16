// src/services/fixed_expense_service.rs

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FixedExpenseRepository, TransactionRepository},
    models::{
        fixed_expense::{DisplayStatus, FixedExpense, FixedExpenseStatus, FixedExpenseView},
        transaction::TransactionKind,
    },
    services::schedule::{advance_one_month, next_occurrence},
};

const OVERDUE_GRACE_DAYS: i64 = 3;

/// Status derivado de uma despesa fixa em relação a `today`.
///
/// "Paga" só vale dentro do ciclo corrente: quando o mês do próximo
/// vencimento chega, a despesa volta a aparecer como pendente sem nenhuma
/// escrita no banco. "Atrasada" é vencimento estourado há mais de 3 dias,
/// também nunca persistido.
pub fn effective_status(expense: &FixedExpense, today: NaiveDate) -> DisplayStatus {
    let next_due = expense.next_due_date;

    if expense.status == FixedExpenseStatus::Paid {
        let new_cycle_started =
            (today.year(), today.month()) >= (next_due.year(), next_due.month());
        if !new_cycle_started {
            return DisplayStatus::Paid;
        }
    }

    if (today - next_due).num_days() > OVERDUE_GRACE_DAYS {
        DisplayStatus::Overdue
    } else {
        DisplayStatus::Pending
    }
}

#[derive(Clone)]
pub struct FixedExpenseService {
    fixed_expense_repo: FixedExpenseRepository,
    transaction_repo: TransactionRepository,
    pool: PgPool,
}

impl FixedExpenseService {
    pub fn new(
        fixed_expense_repo: FixedExpenseRepository,
        transaction_repo: TransactionRepository,
        pool: PgPool,
    ) -> Self {
        Self { fixed_expense_repo, transaction_repo, pool }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        category: &str,
        amount: Decimal,
        due_day: i32,
        active: bool,
    ) -> Result<FixedExpense, AppError> {
        let today = Utc::now().date_naive();
        // Primeiro vencimento: o due_day deste mês se ainda está à frente,
        // senão o do mês seguinte
        let next_due_date = next_occurrence(due_day as u32, today);

        self.fixed_expense_repo
            .create(&self.pool, user_id, name, category, amount, due_day, active, next_due_date)
            .await
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<FixedExpenseView>, AppError> {
        let today = Utc::now().date_naive();
        let expenses = self.fixed_expense_repo.get_all(user_id).await?;

        Ok(expenses
            .into_iter()
            .map(|expense| {
                let display_status = effective_status(&expense, today);
                FixedExpenseView { expense, display_status }
            })
            .collect())
    }

    /// Despesas ativas com vencimento estourado há mais de 3 dias.
    /// Filtro de leitura: o status gravado não muda.
    pub async fn overdue(&self, user_id: Uuid) -> Result<Vec<FixedExpenseView>, AppError> {
        let views = self.list(user_id).await?;
        Ok(views
            .into_iter()
            .filter(|v| v.expense.active && v.display_status == DisplayStatus::Overdue)
            .collect())
    }

    /// Paga o ciclo atual: transação espelhada e avanço do vencimento na
    /// mesma transação de banco. O avanço é sempre vencimento + 1 mês,
    /// nunca derivado da data do pagamento: pagar atrasado não encurta o
    /// ciclo seguinte.
    pub async fn mark_paid(&self, user_id: Uuid, id: Uuid) -> Result<FixedExpense, AppError> {
        let expense = self.fixed_expense_repo
            .find_by_id(user_id, id)
            .await?
            .ok_or(AppError::FixedExpenseNotFound)?;

        let today = Utc::now().date_naive();
        if effective_status(&expense, today) == DisplayStatus::Paid {
            return Err(AppError::FixedExpenseAlreadyPaid);
        }

        let next_due_date = advance_one_month(expense.next_due_date, expense.due_day as u32);

        let mut tx = self.pool.begin().await?;

        self.transaction_repo
            .create(
                &mut *tx,
                user_id,
                TransactionKind::Expense,
                expense.amount,
                today,
                &expense.category,
                &expense.name,
                Some("Despesa fixa paga automaticamente"),
                None,
            )
            .await?;

        let updated = self.fixed_expense_repo
            .mark_paid(&mut *tx, user_id, id, today, next_due_date)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        category: &str,
        amount: Decimal,
        due_day: i32,
        active: bool,
    ) -> Result<FixedExpense, AppError> {
        let current = self.fixed_expense_repo
            .find_by_id(user_id, id)
            .await?
            .ok_or(AppError::FixedExpenseNotFound)?;

        // Mudou o dia de vencimento? Reancora o próximo vencimento.
        let next_due_date = if due_day != current.due_day {
            next_occurrence(due_day as u32, Utc::now().date_naive())
        } else {
            current.next_due_date
        };

        self.fixed_expense_repo
            .update(
                &self.pool,
                user_id,
                id,
                name,
                category,
                amount,
                due_day,
                active,
                next_due_date,
            )
            .await?
            .ok_or(AppError::FixedExpenseNotFound)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let deleted = self.fixed_expense_repo.delete(user_id, id).await?;
        if deleted == 0 {
            return Err(AppError::FixedExpenseNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(status: FixedExpenseStatus, next_due: NaiveDate) -> FixedExpense {
        FixedExpense {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Aluguel".to_string(),
            category: "Moradia".to_string(),
            amount: "1800.00".parse().unwrap(),
            due_day: next_due.day() as i32,
            active: true,
            last_payment_date: None,
            next_due_date: next_due,
            status,
            created_at: None,
        }
    }

    #[test]
    fn pending_within_grace_window_stays_pending() {
        let e = expense(FixedExpenseStatus::Pending, date(2024, 6, 5));
        // 3 dias de atraso ainda não é "atrasada"
        assert_eq!(effective_status(&e, date(2024, 6, 8)), DisplayStatus::Pending);
    }

    #[test]
    fn pending_beyond_grace_window_is_overdue() {
        let e = expense(FixedExpenseStatus::Pending, date(2024, 6, 5));
        assert_eq!(effective_status(&e, date(2024, 6, 9)), DisplayStatus::Overdue);
    }

    #[test]
    fn paid_stays_paid_until_the_next_cycle_month() {
        // paga em junho, próximo vencimento 5 de julho
        let e = expense(FixedExpenseStatus::Paid, date(2024, 7, 5));
        assert_eq!(effective_status(&e, date(2024, 6, 20)), DisplayStatus::Paid);
        assert_eq!(effective_status(&e, date(2024, 6, 30)), DisplayStatus::Paid);
    }

    #[test]
    fn paid_reopens_when_the_due_month_arrives() {
        let e = expense(FixedExpenseStatus::Paid, date(2024, 7, 5));
        assert_eq!(effective_status(&e, date(2024, 7, 1)), DisplayStatus::Pending);
    }

    #[test]
    fn paid_and_forgotten_eventually_shows_overdue() {
        let e = expense(FixedExpenseStatus::Paid, date(2024, 7, 5));
        assert_eq!(effective_status(&e, date(2024, 7, 9)), DisplayStatus::Overdue);
    }
}
