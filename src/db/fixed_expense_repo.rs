// src/db/fixed_expense_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::fixed_expense::{FixedExpense, FixedExpenseStatus},
};

#[derive(Clone)]
pub struct FixedExpenseRepository {
    pool: PgPool,
}

impl FixedExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        category: &str,
        amount: Decimal,
        due_day: i32,
        active: bool,
        next_due_date: NaiveDate,
    ) -> Result<FixedExpense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expense = sqlx::query_as::<_, FixedExpense>(
            r#"
            INSERT INTO fixed_expenses (
                user_id, name, category, amount, due_day, active, next_due_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(category)
        .bind(amount)
        .bind(due_day)
        .bind(active)
        .bind(next_due_date)
        .fetch_one(executor)
        .await?;

        Ok(expense)
    }

    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<FixedExpense>, AppError> {
        let expenses = sqlx::query_as::<_, FixedExpense>(
            "SELECT * FROM fixed_expenses WHERE user_id = $1 ORDER BY next_due_date ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<FixedExpense>, AppError> {
        let expense = sqlx::query_as::<_, FixedExpense>(
            "SELECT * FROM fixed_expenses WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(expense)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        category: &str,
        amount: Decimal,
        due_day: i32,
        active: bool,
        next_due_date: NaiveDate,
    ) -> Result<Option<FixedExpense>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expense = sqlx::query_as::<_, FixedExpense>(
            r#"
            UPDATE fixed_expenses
            SET name = $3, category = $4, amount = $5,
                due_day = $6, active = $7, next_due_date = $8
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(category)
        .bind(amount)
        .bind(due_day)
        .bind(active)
        .bind(next_due_date)
        .fetch_optional(executor)
        .await?;

        Ok(expense)
    }

    // Grava o resultado de um pagamento: status, data do pagamento e o
    // próximo vencimento já avançado em um mês pelo service.
    pub async fn mark_paid<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        last_payment_date: NaiveDate,
        next_due_date: NaiveDate,
    ) -> Result<FixedExpense, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let expense = sqlx::query_as::<_, FixedExpense>(
            r#"
            UPDATE fixed_expenses
            SET status = $3, last_payment_date = $4, next_due_date = $5
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(FixedExpenseStatus::Paid)
        .bind(last_payment_date)
        .bind(next_due_date)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::FixedExpenseNotFound)?;

        Ok(expense)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM fixed_expenses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
