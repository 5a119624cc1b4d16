// src/db/installment_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::installment::{Installment, InstallmentStatus},
};

#[derive(Clone)]
pub struct InstallmentRepository {
    pool: PgPool,
}

impl InstallmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Insere UMA linha do grupo. A atomicidade do grupo inteiro é garantida
    // pela transação aberta no service, nunca aqui.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_row<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        purchase_id: Uuid,
        card_id: Uuid,
        description: &str,
        total_amount: Decimal,
        total_installments: i32,
        installment_number: i32,
        installment_amount: Decimal,
        purchase_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Result<Installment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let installment = sqlx::query_as::<_, Installment>(
            r#"
            INSERT INTO installments (
                user_id, purchase_id, card_id, description,
                total_amount, total_installments, installment_number,
                installment_amount, purchase_date, due_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(purchase_id)
        .bind(card_id)
        .bind(description)
        .bind(total_amount)
        .bind(total_installments)
        .bind(installment_number)
        .bind(installment_amount)
        .bind(purchase_date)
        .bind(due_date)
        .fetch_one(executor)
        .await?;

        Ok(installment)
    }

    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<Installment>, AppError> {
        let installments = sqlx::query_as::<_, Installment>(
            r#"
            SELECT * FROM installments
            WHERE user_id = $1
            ORDER BY purchase_date DESC, purchase_id, installment_number ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(installments)
    }

    pub async fn find_by_id(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Installment>, AppError> {
        let installment = sqlx::query_as::<_, Installment>(
            "SELECT * FROM installments WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(installment)
    }

    pub async fn find_by_purchase(
        &self,
        user_id: Uuid,
        purchase_id: Uuid,
    ) -> Result<Vec<Installment>, AppError> {
        let installments = sqlx::query_as::<_, Installment>(
            r#"
            SELECT * FROM installments
            WHERE purchase_id = $1 AND user_id = $2
            ORDER BY installment_number ASC
            "#,
        )
        .bind(purchase_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(installments)
    }

    pub async fn set_status<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        status: InstallmentStatus,
        transaction_id: Option<Uuid>,
    ) -> Result<Installment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let installment = sqlx::query_as::<_, Installment>(
            r#"
            UPDATE installments
            SET status = $3, transaction_id = $4
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(status)
        .bind(transaction_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::InstallmentNotFound)?;

        Ok(installment)
    }

    pub async fn update_group_description<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        purchase_id: Uuid,
        description: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE installments SET description = $3 WHERE purchase_id = $1 AND user_id = $2",
        )
        .bind(purchase_id)
        .bind(user_id)
        .bind(description)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // O valor de cada linha pode diferir (a última absorve o resto da divisão),
    // então a reescrita do grupo é feita linha a linha.
    pub async fn update_row_amount<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        total_amount: Decimal,
        installment_amount: Decimal,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE installments
            SET total_amount = $3, installment_amount = $4
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(total_amount)
        .bind(installment_amount)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_group<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        purchase_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "DELETE FROM installments WHERE purchase_id = $1 AND user_id = $2",
        )
        .bind(purchase_id)
        .bind(user_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}
