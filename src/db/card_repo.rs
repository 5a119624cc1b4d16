// src/db/card_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::card::CreditCard};

#[derive(Clone)]
pub struct CardRepository {
    pool: PgPool,
}

impl CardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        name: &str,
        card_limit: Decimal,
        closing_day: i32,
        due_day: i32,
        card_number_last4: &str,
        color: Option<&str>,
    ) -> Result<CreditCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let card = sqlx::query_as::<_, CreditCard>(
            r#"
            INSERT INTO credit_cards (
                user_id, name, card_limit, closing_day, due_day,
                card_number_last4, color
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(card_limit)
        .bind(closing_day)
        .bind(due_day)
        .bind(card_number_last4)
        .bind(color)
        .fetch_one(executor)
        .await?;

        Ok(card)
    }

    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<CreditCard>, AppError> {
        let cards = sqlx::query_as::<_, CreditCard>(
            "SELECT * FROM credit_cards WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    pub async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<CreditCard>, AppError> {
        let card = sqlx::query_as::<_, CreditCard>(
            "SELECT * FROM credit_cards WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    pub async fn count(&self, user_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM credit_cards WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        name: &str,
        card_limit: Decimal,
        closing_day: i32,
        due_day: i32,
        color: Option<&str>,
    ) -> Result<Option<CreditCard>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let card = sqlx::query_as::<_, CreditCard>(
            r#"
            UPDATE credit_cards
            SET name = $3, card_limit = $4, closing_day = $5, due_day = $6, color = $7
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(card_limit)
        .bind(closing_day)
        .bind(due_day)
        .bind(color)
        .fetch_optional(executor)
        .await?;

        Ok(card)
    }

    // Soma `delta` (positivo ou negativo) ao total de parcelas futuras do cartão.
    // Sempre chamado dentro da mesma transação que altera o status da parcela.
    pub async fn adjust_upcoming_invoices<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        id: Uuid,
        delta: Decimal,
    ) -> Result<CreditCard, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let card = sqlx::query_as::<_, CreditCard>(
            r#"
            UPDATE credit_cards
            SET upcoming_invoices_amount = upcoming_invoices_amount + $3
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(delta)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::CardNotFound)?;

        Ok(card)
    }

    pub async fn delete<'e, E>(&self, executor: E, user_id: Uuid, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM credit_cards WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
