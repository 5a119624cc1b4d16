// src/services/billing.rs

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    models::{
        card::{CardInvoice, CreditCard},
        transaction::{Transaction, TransactionKind},
    },
    services::schedule::next_occurrence,
};

/// Calcula o ciclo de fatura de um cartão em relação a `today`.
///
/// Função pura de (cartão, transações, hoje): nada é persistido e o resultado
/// é recalculado a cada consulta. A janela da fatura atual é
/// `(fechamento anterior, próximo fechamento]`: aberta embaixo, fechada em cima.
pub fn card_invoice(card: &CreditCard, transactions: &[Transaction], today: NaiveDate) -> CardInvoice {
    let next_closing = next_occurrence(card.closing_day as u32, today);
    let next_due_date = next_occurrence(card.due_day as u32, today);

    let previous_closing = next_closing
        .checked_sub_months(Months::new(1))
        .unwrap_or(next_closing);

    let current_invoice_amount: Decimal = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
        .filter(|t| t.card_id == Some(card.id))
        .filter(|t| t.transaction_date > previous_closing && t.transaction_date <= next_closing)
        .map(|t| t.amount)
        .sum();

    // Limite zerado (ou inválido) não divide
    let utilization_percent = if card.card_limit <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        (current_invoice_amount / card.card_limit * Decimal::from(100)).round_dp(2)
    };

    // Pode ficar negativo: estouro de limite é estado de alerta, não erro
    let available_limit =
        card.card_limit - current_invoice_amount - card.upcoming_invoices_amount;

    CardInvoice {
        card_id: card.id,
        previous_closing,
        next_closing,
        next_due_date,
        current_invoice_amount,
        utilization_percent,
        available_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card(card_limit: Decimal, closing_day: i32, due_day: i32) -> CreditCard {
        CreditCard {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Cartão Teste".to_string(),
            card_limit,
            closing_day,
            due_day,
            card_number_last4: "4242".to_string(),
            upcoming_invoices_amount: Decimal::ZERO,
            color: None,
            created_at: None,
        }
    }

    fn expense(card_id: Uuid, amount: &str, on: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: TransactionKind::Expense,
            amount: amount.parse().unwrap(),
            transaction_date: on,
            category: "Cartão de Crédito".to_string(),
            description: "compra".to_string(),
            notes: None,
            card_id: Some(card_id),
            created_at: None,
        }
    }

    #[test]
    fn cycle_dates_match_the_reference_example() {
        // fechamento 10, vencimento 20, hoje 15/06/2024
        let card = card(Decimal::from(5000), 10, 20);
        let invoice = card_invoice(&card, &[], date(2024, 6, 15));

        assert_eq!(invoice.next_closing, date(2024, 7, 10));
        assert_eq!(invoice.previous_closing, date(2024, 6, 10));
        assert_eq!(invoice.next_due_date, date(2024, 6, 20));
    }

    #[test]
    fn window_is_open_below_and_closed_above() {
        let card = card(Decimal::from(5000), 10, 20);
        let today = date(2024, 6, 15);

        let transactions = vec![
            // exatamente no fechamento anterior: fora
            expense(card.id, "100.00", date(2024, 6, 10)),
            // dentro da janela
            expense(card.id, "50.00", date(2024, 6, 11)),
            // exatamente no próximo fechamento: dentro
            expense(card.id, "30.00", date(2024, 7, 10)),
            // depois do próximo fechamento: fora
            expense(card.id, "999.00", date(2024, 7, 11)),
        ];

        let invoice = card_invoice(&card, &transactions, today);
        assert_eq!(invoice.current_invoice_amount, "80.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn only_this_cards_expenses_count() {
        let card = card(Decimal::from(1000), 10, 20);
        let today = date(2024, 6, 15);

        let mut other = expense(Uuid::new_v4(), "500.00", date(2024, 6, 20));
        other.card_id = Some(Uuid::new_v4());

        let mut income = expense(card.id, "700.00", date(2024, 6, 20));
        income.kind = TransactionKind::Income;

        let mut no_card = expense(card.id, "120.00", date(2024, 6, 20));
        no_card.card_id = None;

        let mine = expense(card.id, "200.00", date(2024, 6, 20));

        let invoice = card_invoice(&card, &[other, income, no_card, mine], today);
        assert_eq!(invoice.current_invoice_amount, "200.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn zero_limit_yields_zero_utilization() {
        let card = card(Decimal::ZERO, 10, 20);
        let transactions = vec![expense(card.id, "100.00", date(2024, 6, 20))];

        let invoice = card_invoice(&card, &transactions, date(2024, 6, 15));
        assert_eq!(invoice.utilization_percent, Decimal::ZERO);
    }

    #[test]
    fn utilization_is_a_percentage_of_the_limit() {
        let card = card(Decimal::from(2000), 10, 20);
        let transactions = vec![expense(card.id, "500.00", date(2024, 6, 20))];

        let invoice = card_invoice(&card, &transactions, date(2024, 6, 15));
        assert_eq!(invoice.utilization_percent, Decimal::from(25));
    }

    #[test]
    fn available_limit_discounts_invoice_and_upcoming_installments() {
        let mut card = card(Decimal::from(1000), 10, 20);
        card.upcoming_invoices_amount = "300.00".parse().unwrap();

        let transactions = vec![expense(card.id, "800.00", date(2024, 6, 20))];
        let invoice = card_invoice(&card, &transactions, date(2024, 6, 15));

        // 1000 - 800 - 300 = -100: negativo é permitido
        assert_eq!(invoice.available_limit, "-100.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn closing_on_day_31_clamps_in_february() {
        let card = card(Decimal::from(1000), 31, 10);
        let invoice = card_invoice(&card, &[], date(2024, 2, 10));

        assert_eq!(invoice.next_closing, date(2024, 2, 29));
        assert_eq!(invoice.previous_closing, date(2024, 1, 29));
    }
}
