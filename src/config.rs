// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CardRepository, CategoryRepository, FixedExpenseRepository, InstallmentRepository,
        TransactionRepository, UserRepository,
    },
    services::{
        auth::AuthService, document_service::DocumentService, export_service::ExportService,
        fixed_expense_service::FixedExpenseService, installment_service::InstallmentService,
        report_service::ReportService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,

    // Repositórios usados direto pelos handlers de CRUD simples
    pub transaction_repo: TransactionRepository,
    pub category_repo: CategoryRepository,
    pub card_repo: CardRepository,

    // Serviços com regra de negócio
    pub auth_service: AuthService,
    pub installment_service: InstallmentService,
    pub fixed_expense_service: FixedExpenseService,
    pub report_service: ReportService,
    pub document_service: DocumentService,
    pub export_service: ExportService,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem chama decide
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let category_repo = CategoryRepository::new(db_pool.clone());
        let transaction_repo = TransactionRepository::new(db_pool.clone());
        let card_repo = CardRepository::new(db_pool.clone());
        let installment_repo = InstallmentRepository::new(db_pool.clone());
        let fixed_expense_repo = FixedExpenseRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo,
            category_repo.clone(),
            jwt_secret.clone(),
            db_pool.clone(),
        );
        let installment_service = InstallmentService::new(
            installment_repo.clone(),
            transaction_repo.clone(),
            card_repo.clone(),
            db_pool.clone(),
        );
        let fixed_expense_service = FixedExpenseService::new(
            fixed_expense_repo.clone(),
            transaction_repo.clone(),
            db_pool.clone(),
        );
        let report_service = ReportService::new(transaction_repo.clone());
        let document_service = DocumentService::new(transaction_repo.clone());
        let export_service = ExportService::new(
            category_repo.clone(),
            card_repo.clone(),
            transaction_repo.clone(),
            installment_repo,
            fixed_expense_repo,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            transaction_repo,
            category_repo,
            card_repo,
            auth_service,
            installment_service,
            fixed_expense_service,
            report_service,
            document_service,
            export_service,
        })
    }
}
