// src/db/transaction_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::transaction::{Transaction, TransactionKind},
};

#[derive(Clone)]
pub struct TransactionRepository {
    pool: PgPool,
}

impl TransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        kind: TransactionKind,
        amount: Decimal,
        transaction_date: NaiveDate,
        category: &str,
        description: &str,
        notes: Option<&str>,
        card_id: Option<Uuid>,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (
                user_id, kind, amount, transaction_date,
                category, description, notes, card_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(amount)
        .bind(transaction_date)
        .bind(category)
        .bind(description)
        .bind(notes)
        .bind(card_id)
        .fetch_one(executor)
        .await?;

        Ok(transaction)
    }

    // A lista completa do usuário, da transação mais recente para a mais antiga.
    // Os cálculos de fatura e de relatório recebem esta lista inteira.
    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE user_id = $1
            ORDER BY transaction_date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        kind: TransactionKind,
        amount: Decimal,
        transaction_date: NaiveDate,
        category: &str,
        description: &str,
        notes: Option<&str>,
        card_id: Option<Uuid>,
    ) -> Result<Option<Transaction>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET kind = $3, amount = $4, transaction_date = $5,
                category = $6, description = $7, notes = $8, card_id = $9
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(kind)
        .bind(amount)
        .bind(transaction_date)
        .bind(category)
        .bind(description)
        .bind(notes)
        .bind(card_id)
        .fetch_optional(executor)
        .await?;

        Ok(transaction)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
