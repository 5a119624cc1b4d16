// src/services/export_service.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        CardRepository, CategoryRepository, FixedExpenseRepository, InstallmentRepository,
        TransactionRepository,
    },
    models::export::{ExportDump, ImportSummary, EXPORT_VERSION},
};

#[derive(Clone)]
pub struct ExportService {
    category_repo: CategoryRepository,
    card_repo: CardRepository,
    transaction_repo: TransactionRepository,
    installment_repo: InstallmentRepository,
    fixed_expense_repo: FixedExpenseRepository,
    pool: PgPool,
}

impl ExportService {
    pub fn new(
        category_repo: CategoryRepository,
        card_repo: CardRepository,
        transaction_repo: TransactionRepository,
        installment_repo: InstallmentRepository,
        fixed_expense_repo: FixedExpenseRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            category_repo,
            card_repo,
            transaction_repo,
            installment_repo,
            fixed_expense_repo,
            pool,
        }
    }

    /// Dump completo dos dados do usuário, para download.
    pub async fn export(&self, user_id: Uuid) -> Result<ExportDump, AppError> {
        Ok(ExportDump {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            categories: self.category_repo.get_all(user_id).await?,
            cards: self.card_repo.get_all(user_id).await?,
            transactions: self.transaction_repo.get_all(user_id).await?,
            installments: self.installment_repo.get_all(user_id).await?,
            fixed_expenses: self.fixed_expense_repo.get_all(user_id).await?,
        })
    }

    /// Reimporta um dump sob o usuário autenticado, em uma única transação.
    ///
    /// Todos os IDs são regenerados e as referências internas (cartões das
    /// transações, compras das parcelas, transações espelhadas) são
    /// reapontadas através dos IDs novos.
    pub async fn import(&self, user_id: Uuid, dump: ExportDump) -> Result<ImportSummary, AppError> {
        if dump.version != EXPORT_VERSION {
            return Err(AppError::InvalidImportFile(format!(
                "versão {} não suportada",
                dump.version
            )));
        }

        let existing_categories = self.category_repo.get_all(user_id).await?;

        let mut tx = self.pool.begin().await?;

        // Categorias: as que já existem (mesmo nome e tipo) não são duplicadas;
        // as novas entram sempre como categorias do usuário, nunca como padrão.
        let mut imported_categories = 0usize;
        for category in &dump.categories {
            let exists = existing_categories
                .iter()
                .any(|c| c.name == category.name && c.kind == category.kind);
            if exists {
                continue;
            }
            self.category_repo
                .create(&mut *tx, user_id, &category.name, category.kind, false)
                .await?;
            imported_categories += 1;
        }

        // Cartões: preserva o acumulado de parcelas futuras do dump
        let mut card_ids: HashMap<Uuid, Uuid> = HashMap::new();
        for card in &dump.cards {
            let new_id: Uuid = sqlx::query_scalar(
                r#"
                INSERT INTO credit_cards (
                    user_id, name, card_limit, closing_day, due_day,
                    card_number_last4, upcoming_invoices_amount, color
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING id
                "#,
            )
            .bind(user_id)
            .bind(&card.name)
            .bind(card.card_limit)
            .bind(card.closing_day)
            .bind(card.due_day)
            .bind(&card.card_number_last4)
            .bind(card.upcoming_invoices_amount)
            .bind(&card.color)
            .fetch_one(&mut *tx)
            .await?;

            card_ids.insert(card.id, new_id);
        }

        // Transações: cartões reapontados pelo mapa (ou soltos, se o dump
        // referencia um cartão que não veio nele)
        let mut transaction_ids: HashMap<Uuid, Uuid> = HashMap::new();
        for transaction in &dump.transactions {
            let card_id = transaction.card_id.and_then(|old| card_ids.get(&old).copied());
            let created = self.transaction_repo
                .create(
                    &mut *tx,
                    user_id,
                    transaction.kind,
                    transaction.amount,
                    transaction.transaction_date,
                    &transaction.category,
                    &transaction.description,
                    transaction.notes.as_deref(),
                    card_id,
                )
                .await?;
            transaction_ids.insert(transaction.id, created.id);
        }

        // Parcelas: cada compra antiga ganha um purchase_id novo, mantendo o
        // agrupamento; status e vínculo com a transação espelhada sobrevivem.
        let mut purchase_ids: HashMap<Uuid, Uuid> = HashMap::new();
        for installment in &dump.installments {
            let card_id = card_ids
                .get(&installment.card_id)
                .copied()
                .ok_or_else(|| {
                    AppError::InvalidImportFile(
                        "parcela referencia um cartão ausente do arquivo".to_string(),
                    )
                })?;

            let purchase_id = *purchase_ids
                .entry(installment.purchase_id)
                .or_insert_with(Uuid::new_v4);

            let transaction_id = installment
                .transaction_id
                .and_then(|old| transaction_ids.get(&old).copied());

            sqlx::query(
                r#"
                INSERT INTO installments (
                    user_id, purchase_id, card_id, description,
                    total_amount, total_installments, installment_number,
                    installment_amount, purchase_date, due_date, status, transaction_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(user_id)
            .bind(purchase_id)
            .bind(card_id)
            .bind(&installment.description)
            .bind(installment.total_amount)
            .bind(installment.total_installments)
            .bind(installment.installment_number)
            .bind(installment.installment_amount)
            .bind(installment.purchase_date)
            .bind(installment.due_date)
            .bind(installment.status)
            .bind(transaction_id)
            .execute(&mut *tx)
            .await?;
        }

        // Despesas fixas: estado do ciclo preservado como estava no dump
        for expense in &dump.fixed_expenses {
            sqlx::query(
                r#"
                INSERT INTO fixed_expenses (
                    user_id, name, category, amount, due_day,
                    active, last_payment_date, next_due_date, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(user_id)
            .bind(&expense.name)
            .bind(&expense.category)
            .bind(expense.amount)
            .bind(expense.due_day)
            .bind(expense.active)
            .bind(expense.last_payment_date)
            .bind(expense.next_due_date)
            .bind(expense.status)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "📦 Importação concluída: {} transações, {} parcelas.",
            dump.transactions.len(),
            dump.installments.len()
        );

        Ok(ImportSummary {
            categories: imported_categories,
            cards: dump.cards.len(),
            transactions: dump.transactions.len(),
            installments: dump.installments.len(),
            fixed_expenses: dump.fixed_expenses.len(),
        })
    }
}
