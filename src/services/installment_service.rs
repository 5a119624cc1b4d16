// src/services/installment_service.rs

use chrono::{Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CardRepository, InstallmentRepository, TransactionRepository},
    models::{
        category::CREDIT_CARD_CATEGORY,
        installment::{Installment, InstallmentGroup, InstallmentStatus},
        transaction::TransactionKind,
    },
};

/// Divide o total em N valores de 2 casas decimais.
///
/// A última parcela absorve o resto da divisão, então a soma das parcelas
/// bate exatamente com o total (1000 / 3 = 333,33 + 333,33 + 333,34).
pub fn split_installments(total_amount: Decimal, total_installments: u32) -> Vec<Decimal> {
    if total_installments == 0 {
        return Vec::new();
    }

    let base = (total_amount / Decimal::from(total_installments)).round_dp(2);
    let mut amounts = vec![base; total_installments as usize];

    let last = total_amount - base * Decimal::from(total_installments - 1);
    amounts[total_installments as usize - 1] = last;

    amounts
}

/// Projeção de leitura: agrupa as linhas por compra, com contagem de pagas e
/// o vencimento da próxima pendente. Nenhum estado é derivado para o banco.
pub fn group_installments(installments: &[Installment]) -> Vec<InstallmentGroup> {
    let mut groups: Vec<InstallmentGroup> = Vec::new();

    for row in installments {
        let index = match groups.iter().position(|g| g.purchase_id == row.purchase_id) {
            Some(existing) => existing,
            None => {
                groups.push(InstallmentGroup {
                    purchase_id: row.purchase_id,
                    card_id: row.card_id,
                    description: row.description.clone(),
                    total_amount: row.total_amount,
                    total_installments: row.total_installments,
                    paid_installments: 0,
                    paid_amount: Decimal::ZERO,
                    purchase_date: row.purchase_date,
                    next_due_date: None,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];

        match row.status {
            InstallmentStatus::Paid => {
                group.paid_installments += 1;
                group.paid_amount += row.installment_amount;
            }
            InstallmentStatus::Pending => {
                let is_sooner = group
                    .next_due_date
                    .map(|current| row.due_date < current)
                    .unwrap_or(true);
                if is_sooner {
                    group.next_due_date = Some(row.due_date);
                }
            }
        }
    }

    groups
}

#[derive(Clone)]
pub struct InstallmentService {
    installment_repo: InstallmentRepository,
    transaction_repo: TransactionRepository,
    card_repo: CardRepository,
    pool: PgPool,
}

impl InstallmentService {
    pub fn new(
        installment_repo: InstallmentRepository,
        transaction_repo: TransactionRepository,
        card_repo: CardRepository,
        pool: PgPool,
    ) -> Self {
        Self { installment_repo, transaction_repo, card_repo, pool }
    }

    /// Cria as N linhas de uma compra parcelada em uma única transação.
    /// O total de parcelas futuras do cartão sobe junto: ou tudo entra, ou nada.
    pub async fn create_purchase(
        &self,
        user_id: Uuid,
        card_id: Uuid,
        description: &str,
        total_amount: Decimal,
        total_installments: i32,
        purchase_date: NaiveDate,
    ) -> Result<Vec<Installment>, AppError> {
        self.card_repo
            .find_by_id(user_id, card_id)
            .await?
            .ok_or(AppError::CardNotFound)?;

        let purchase_id = Uuid::new_v4();
        let amounts = split_installments(total_amount, total_installments as u32);

        let mut tx = self.pool.begin().await?;

        let mut rows = Vec::with_capacity(amounts.len());
        for (index, amount) in amounts.iter().enumerate() {
            let number = index as i32 + 1;
            let due_date = purchase_date
                .checked_add_months(Months::new(number as u32))
                .ok_or_else(|| anyhow::anyhow!("Data de vencimento fora do calendário"))?;

            let row = self.installment_repo
                .insert_row(
                    &mut *tx,
                    user_id,
                    purchase_id,
                    card_id,
                    description,
                    total_amount,
                    total_installments,
                    number,
                    *amount,
                    purchase_date,
                    due_date,
                )
                .await?;
            rows.push(row);
        }

        self.card_repo
            .adjust_upcoming_invoices(&mut *tx, user_id, card_id, total_amount)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🧾 Compra parcelada criada: {} parcelas, total {}.",
            total_installments,
            total_amount
        );

        Ok(rows)
    }

    /// Paga uma parcela: transação espelhada, status e limite do cartão
    /// mudam juntos na mesma transação de banco.
    pub async fn mark_paid(&self, user_id: Uuid, installment_id: Uuid) -> Result<Installment, AppError> {
        let installment = self.installment_repo
            .find_by_id(user_id, installment_id)
            .await?
            .ok_or(AppError::InstallmentNotFound)?;

        if installment.status != InstallmentStatus::Pending {
            return Err(AppError::InstallmentNotPending);
        }

        let today = Utc::now().date_naive();
        let description = format!(
            "{} - Parcela {}/{}",
            installment.description, installment.installment_number, installment.total_installments
        );

        let mut tx = self.pool.begin().await?;

        let mirrored = self.transaction_repo
            .create(
                &mut *tx,
                user_id,
                TransactionKind::Expense,
                installment.installment_amount,
                today,
                CREDIT_CARD_CATEGORY,
                &description,
                None,
                Some(installment.card_id),
            )
            .await?;

        let updated = self.installment_repo
            .set_status(
                &mut *tx,
                user_id,
                installment_id,
                InstallmentStatus::Paid,
                Some(mirrored.id),
            )
            .await?;

        self.card_repo
            .adjust_upcoming_invoices(
                &mut *tx,
                user_id,
                installment.card_id,
                -installment.installment_amount,
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Desfaz um pagamento: apaga a transação espelhada e devolve o valor ao
    /// total de parcelas futuras do cartão. Pagar e desfazer deixa o cartão
    /// exatamente como estava.
    pub async fn mark_pending(&self, user_id: Uuid, installment_id: Uuid) -> Result<Installment, AppError> {
        let installment = self.installment_repo
            .find_by_id(user_id, installment_id)
            .await?
            .ok_or(AppError::InstallmentNotFound)?;

        if installment.status != InstallmentStatus::Paid {
            return Err(AppError::InstallmentNotPaid);
        }

        let mut tx = self.pool.begin().await?;

        if let Some(transaction_id) = installment.transaction_id {
            self.transaction_repo
                .delete(&mut *tx, user_id, transaction_id)
                .await?;
        }

        let updated = self.installment_repo
            .set_status(&mut *tx, user_id, installment_id, InstallmentStatus::Pending, None)
            .await?;

        self.card_repo
            .adjust_upcoming_invoices(
                &mut *tx,
                user_id,
                installment.card_id,
                installment.installment_amount,
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    /// Apaga a compra inteira. As transações espelhadas das parcelas pagas
    /// caem junto (nada de órfãos) e o valor ainda pendente é devolvido ao
    /// limite do cartão.
    pub async fn delete_purchase(&self, user_id: Uuid, purchase_id: Uuid) -> Result<u64, AppError> {
        let rows = self.installment_repo
            .find_by_purchase(user_id, purchase_id)
            .await?;

        if rows.is_empty() {
            return Err(AppError::PurchaseNotFound);
        }

        let card_id = rows[0].card_id;
        let pending_total: Decimal = rows
            .iter()
            .filter(|r| r.status == InstallmentStatus::Pending)
            .map(|r| r.installment_amount)
            .sum();

        let mut tx = self.pool.begin().await?;

        for row in &rows {
            if let Some(transaction_id) = row.transaction_id {
                self.transaction_repo
                    .delete(&mut *tx, user_id, transaction_id)
                    .await?;
            }
        }

        let deleted = self.installment_repo
            .delete_group(&mut *tx, user_id, purchase_id)
            .await?;

        if pending_total > Decimal::ZERO {
            self.card_repo
                .adjust_upcoming_invoices(&mut *tx, user_id, card_id, -pending_total)
                .await?;
        }

        tx.commit().await?;

        Ok(deleted)
    }

    /// Edita a compra. Descrição pode mudar sempre; o valor total só enquanto
    /// nenhuma parcela foi paga, porque as transações espelhadas das parcelas
    /// pagas já entraram no extrato do usuário.
    pub async fn update_purchase(
        &self,
        user_id: Uuid,
        purchase_id: Uuid,
        description: Option<&str>,
        total_amount: Option<Decimal>,
    ) -> Result<Vec<Installment>, AppError> {
        let rows = self.installment_repo
            .find_by_purchase(user_id, purchase_id)
            .await?;

        if rows.is_empty() {
            return Err(AppError::PurchaseNotFound);
        }

        let any_paid = rows.iter().any(|r| r.status == InstallmentStatus::Paid);
        if total_amount.is_some() && any_paid {
            return Err(AppError::PurchaseHasPaidInstallments);
        }

        let mut tx = self.pool.begin().await?;

        if let Some(description) = description {
            self.installment_repo
                .update_group_description(&mut *tx, user_id, purchase_id, description)
                .await?;
        }

        if let Some(new_total) = total_amount {
            let old_total = rows[0].total_amount;
            let amounts = split_installments(new_total, rows.len() as u32);

            for (row, amount) in rows.iter().zip(amounts.iter()) {
                self.installment_repo
                    .update_row_amount(&mut *tx, user_id, row.id, new_total, *amount)
                    .await?;
            }

            // Nenhuma parcela paga aqui, então o delta inteiro é pendente
            self.card_repo
                .adjust_upcoming_invoices(&mut *tx, user_id, rows[0].card_id, new_total - old_total)
                .await?;
        }

        tx.commit().await?;

        self.installment_repo.find_by_purchase(user_id, purchase_id).await
    }

    pub async fn get_all(&self, user_id: Uuid) -> Result<Vec<Installment>, AppError> {
        self.installment_repo.get_all(user_id).await
    }

    pub async fn get_groups(&self, user_id: Uuid) -> Result<Vec<InstallmentGroup>, AppError> {
        let rows = self.installment_repo.get_all(user_id).await?;
        Ok(group_installments(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn row(
        purchase_id: Uuid,
        number: i32,
        amount: &str,
        due: NaiveDate,
        status: InstallmentStatus,
    ) -> Installment {
        Installment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            purchase_id,
            card_id: Uuid::new_v4(),
            description: "Notebook".to_string(),
            total_amount: dec("1000.00"),
            total_installments: 3,
            installment_number: number,
            installment_amount: dec(amount),
            purchase_date: date(2024, 6, 1),
            due_date: due,
            status,
            transaction_id: None,
            created_at: None,
        }
    }

    #[test]
    fn split_sums_exactly_to_the_total() {
        let amounts = split_installments(dec("1000.00"), 3);
        assert_eq!(amounts, vec![dec("333.33"), dec("333.33"), dec("333.34")]);
        assert_eq!(amounts.iter().copied().sum::<Decimal>(), dec("1000.00"));
    }

    #[test]
    fn split_with_exact_division_has_no_remainder() {
        let amounts = split_installments(dec("300.00"), 3);
        assert_eq!(amounts, vec![dec("100.00"), dec("100.00"), dec("100.00")]);
    }

    #[test]
    fn split_of_a_single_installment_is_the_total() {
        assert_eq!(split_installments(dec("59.90"), 1), vec![dec("59.90")]);
    }

    #[test]
    fn split_awkward_remainders_land_on_the_last_row() {
        let amounts = split_installments(dec("100.00"), 7);
        assert_eq!(amounts.len(), 7);
        assert_eq!(amounts.iter().copied().sum::<Decimal>(), dec("100.00"));
        // as seis primeiras são iguais; só a última difere
        assert!(amounts[..6].iter().all(|a| *a == amounts[0]));
    }

    #[test]
    fn grouping_counts_paid_rows_and_finds_next_due() {
        let purchase = Uuid::new_v4();
        let rows = vec![
            row(purchase, 1, "333.33", date(2024, 7, 1), InstallmentStatus::Paid),
            row(purchase, 2, "333.33", date(2024, 8, 1), InstallmentStatus::Pending),
            row(purchase, 3, "333.34", date(2024, 9, 1), InstallmentStatus::Pending),
        ];

        let groups = group_installments(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].paid_installments, 1);
        assert_eq!(groups[0].paid_amount, dec("333.33"));
        assert_eq!(groups[0].next_due_date, Some(date(2024, 8, 1)));
    }

    #[test]
    fn grouping_with_everything_paid_has_no_next_due() {
        let purchase = Uuid::new_v4();
        let rows = vec![
            row(purchase, 1, "50.00", date(2024, 7, 1), InstallmentStatus::Paid),
            row(purchase, 2, "50.00", date(2024, 8, 1), InstallmentStatus::Paid),
        ];

        let groups = group_installments(&rows);
        assert_eq!(groups[0].paid_installments, 2);
        assert_eq!(groups[0].next_due_date, None);
    }

    #[test]
    fn grouping_separates_distinct_purchases() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let rows = vec![
            row(first, 1, "100.00", date(2024, 7, 1), InstallmentStatus::Pending),
            row(second, 1, "200.00", date(2024, 7, 15), InstallmentStatus::Pending),
            row(first, 2, "100.00", date(2024, 8, 1), InstallmentStatus::Pending),
        ];

        let groups = group_installments(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].purchase_id, first);
        assert_eq!(groups[1].purchase_id, second);
    }
}
