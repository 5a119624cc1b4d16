// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Transactions ---
        handlers::transactions::create_transaction,
        handlers::transactions::get_all_transactions,
        handlers::transactions::update_transaction,
        handlers::transactions::delete_transaction,

        // --- Categories ---
        handlers::categories::create_category,
        handlers::categories::get_all_categories,
        handlers::categories::delete_category,

        // --- Cards ---
        handlers::cards::create_card,
        handlers::cards::get_all_cards,
        handlers::cards::get_card_invoice,
        handlers::cards::update_card,
        handlers::cards::delete_card,

        // --- Installments ---
        handlers::installments::create_purchase,
        handlers::installments::get_all_installments,
        handlers::installments::get_installment_groups,
        handlers::installments::pay_installment,
        handlers::installments::unpay_installment,
        handlers::installments::update_purchase,
        handlers::installments::delete_purchase,

        // --- Fixed Expenses ---
        handlers::fixed_expenses::create_fixed_expense,
        handlers::fixed_expenses::get_all_fixed_expenses,
        handlers::fixed_expenses::get_overdue_fixed_expenses,
        handlers::fixed_expenses::pay_fixed_expense,
        handlers::fixed_expenses::update_fixed_expense,
        handlers::fixed_expenses::delete_fixed_expense,

        // --- Reports ---
        handlers::reports::get_monthly_summary,
        handlers::reports::get_yearly_series,
        handlers::reports::get_daily_series,
        handlers::reports::get_monthly_report_pdf,

        // --- Export ---
        handlers::export::export_data,
        handlers::export::import_data,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Transactions ---
            models::transaction::TransactionKind,
            models::transaction::Transaction,
            handlers::transactions::TransactionPayload,

            // --- Categories ---
            models::category::Category,
            handlers::categories::CreateCategoryPayload,

            // --- Cards ---
            models::card::CreditCard,
            models::card::CardInvoice,
            handlers::cards::CreateCardPayload,
            handlers::cards::UpdateCardPayload,

            // --- Installments ---
            models::installment::InstallmentStatus,
            models::installment::Installment,
            models::installment::InstallmentGroup,
            handlers::installments::CreatePurchasePayload,
            handlers::installments::UpdatePurchasePayload,

            // --- Fixed Expenses ---
            models::fixed_expense::FixedExpenseStatus,
            models::fixed_expense::DisplayStatus,
            models::fixed_expense::FixedExpense,
            models::fixed_expense::FixedExpenseView,
            handlers::fixed_expenses::FixedExpensePayload,

            // --- Reports ---
            models::report::MonthlySummary,
            models::report::YearlyChartEntry,
            models::report::DailyBalanceEntry,

            // --- Export ---
            models::export::ExportDump,
            models::export::ImportSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário"),
        (name = "Transactions", description = "Receitas e Despesas"),
        (name = "Categories", description = "Categorias de Transações"),
        (name = "Cards", description = "Cartões de Crédito e Faturas"),
        (name = "Installments", description = "Compras Parceladas"),
        (name = "FixedExpenses", description = "Despesas Fixas Mensais"),
        (name = "Reports", description = "Relatórios e Gráficos"),
        (name = "Export", description = "Backup e Restauração (JSON)")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
