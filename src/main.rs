//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

// Importações principais
use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Define as rotas de usuário (protegidas pelo middleware)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me));

    let transaction_routes = Router::new()
        .route("/"
               ,post(handlers::transactions::create_transaction)
               .get(handlers::transactions::get_all_transactions)
        )
        .route("/{id}"
               ,put(handlers::transactions::update_transaction)
               .delete(handlers::transactions::delete_transaction)
        );

    let category_routes = Router::new()
        .route("/"
               ,post(handlers::categories::create_category)
               .get(handlers::categories::get_all_categories)
        )
        .route("/{id}", delete(handlers::categories::delete_category));

    let card_routes = Router::new()
        .route("/"
               ,post(handlers::cards::create_card)
               .get(handlers::cards::get_all_cards)
        )
        .route("/{id}"
               ,put(handlers::cards::update_card)
               .delete(handlers::cards::delete_card)
        )
        .route("/{id}/invoice", get(handlers::cards::get_card_invoice));

    let installment_routes = Router::new()
        .route("/", get(handlers::installments::get_all_installments))
        .route("/groups", get(handlers::installments::get_installment_groups))
        .route("/purchases", post(handlers::installments::create_purchase))
        .route("/purchases/{purchaseId}"
               ,put(handlers::installments::update_purchase)
               .delete(handlers::installments::delete_purchase)
        )
        .route("/{id}/pay", post(handlers::installments::pay_installment))
        .route("/{id}/unpay", post(handlers::installments::unpay_installment));

    let fixed_expense_routes = Router::new()
        .route("/"
               ,post(handlers::fixed_expenses::create_fixed_expense)
               .get(handlers::fixed_expenses::get_all_fixed_expenses)
        )
        .route("/overdue", get(handlers::fixed_expenses::get_overdue_fixed_expenses))
        .route("/{id}"
               ,put(handlers::fixed_expenses::update_fixed_expense)
               .delete(handlers::fixed_expenses::delete_fixed_expense)
        )
        .route("/{id}/pay", post(handlers::fixed_expenses::pay_fixed_expense));

    let report_routes = Router::new()
        .route("/monthly", get(handlers::reports::get_monthly_summary))
        .route("/monthly/pdf", get(handlers::reports::get_monthly_report_pdf))
        .route("/yearly", get(handlers::reports::get_yearly_series))
        .route("/daily", get(handlers::reports::get_daily_series));

    let export_routes = Router::new()
        .route("/export", get(handlers::export::export_data))
        .route("/import", post(handlers::export::import_data));

    // Tudo que mexe em dados do usuário passa pelo guard de autenticação
    let protected_routes = Router::new()
        .nest("/api/users", user_routes)
        .nest("/api/transactions", transaction_routes)
        .nest("/api/categories", category_routes)
        .nest("/api/cards", card_routes)
        .nest("/api/installments", installment_routes)
        .nest("/api/fixed-expenses", fixed_expense_routes)
        .nest("/api/reports", report_routes)
        .nest("/api", export_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
