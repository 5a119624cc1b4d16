// src/services/document_service.rs

use chrono::Datelike;
use genpdf::{elements, style, Element};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TransactionRepository,
    models::transaction::{Transaction, TransactionKind},
    services::report_service::monthly_summary,
};

const MONTH_NAMES: [&str; 12] = [
    "Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho",
    "Julho", "Agosto", "Setembro", "Outubro", "Novembro", "Dezembro",
];

#[derive(Clone)]
pub struct DocumentService {
    transaction_repo: TransactionRepository,
}

impl DocumentService {
    pub fn new(transaction_repo: TransactionRepository) -> Self {
        Self { transaction_repo }
    }

    /// Gera o relatório mensal em PDF e devolve os bytes prontos para download.
    pub async fn generate_monthly_report_pdf(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<u8>, AppError> {
        // 1. Busca os dados
        let all = self.transaction_repo.get_all(user_id).await?;
        let summary = monthly_summary(&all, year, month);

        let mut rows: Vec<&Transaction> = all
            .iter()
            .filter(|t| {
                t.transaction_date.year() == year && t.transaction_date.month() == month
            })
            .collect();
        rows.sort_by_key(|t| t.transaction_date);

        let month_name = MONTH_NAMES
            .get(month as usize - 1)
            .copied()
            .unwrap_or("Mês");

        // 2. Configura o PDF
        // Carrega a fonte da pasta 'fonts/'
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Relatório {} {}", month_name, year));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(elements::Paragraph::new("RELATÓRIO MENSAL")
            .styled(style::Style::new().bold().with_font_size(18)));
        doc.push(elements::Paragraph::new(format!("{} de {}", month_name, year))
            .styled(style::Style::new().with_font_size(12)));

        doc.push(elements::Break::new(1.5));

        // --- RESUMO ---
        doc.push(elements::Paragraph::new(format!("Receitas: R$ {:.2}", summary.income)));
        doc.push(elements::Paragraph::new(format!("Despesas: R$ {:.2}", summary.expense)));
        doc.push(elements::Paragraph::new(format!("Saldo: R$ {:.2}", summary.net))
            .styled(style::Style::new().bold()));

        doc.push(elements::Break::new(2));

        // --- TABELA DE TRANSAÇÕES ---
        // Pesos das colunas: Data (2), Categoria (3), Descrição (4), Valor (2)
        let mut table = elements::TableLayout::new(vec![2, 3, 4, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table.row()
            .element(elements::Paragraph::new("Data").styled(style_bold))
            .element(elements::Paragraph::new("Categoria").styled(style_bold))
            .element(elements::Paragraph::new("Descrição").styled(style_bold))
            .element(elements::Paragraph::new("Valor").styled(style_bold))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        for t in rows {
            let signed = match t.kind {
                TransactionKind::Income => t.amount,
                TransactionKind::Expense => -t.amount,
            };
            table.row()
                .element(elements::Paragraph::new(t.transaction_date.format("%d/%m/%Y").to_string()))
                .element(elements::Paragraph::new(t.category.clone()))
                .element(elements::Paragraph::new(t.description.clone()))
                .element(elements::Paragraph::new(format_signed(signed)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- TOTAL ---
        let mut total_paragraph = elements::Paragraph::new(
            format!("SALDO DO MÊS: R$ {:.2}", summary.net)
        );
        total_paragraph.set_alignment(genpdf::Alignment::Right);
        doc.push(total_paragraph.styled(style::Style::new().bold().with_font_size(12)));

        // 3. Renderiza para Buffer (Memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

fn format_signed(amount: Decimal) -> String {
    if amount.is_sign_negative() {
        format!("-R$ {:.2}", -amount)
    } else {
        format!("R$ {:.2}", amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_amounts_carry_the_currency_prefix() {
        assert_eq!(format_signed("150.00".parse().unwrap()), "R$ 150.00");
        assert_eq!(format_signed("-72.50".parse().unwrap()), "-R$ 72.50");
    }
}
