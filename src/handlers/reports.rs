// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::report::{DailyBalanceEntry, MonthlySummary, YearlyChartEntry},
};

#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthQuery {
    #[validate(range(min = 1970, max = 9999, message = "Ano inválido."))]
    pub year: i32,

    #[validate(range(min = 1, max = 12, message = "O mês deve estar entre 1 e 12."))]
    pub month: u32,
}

#[derive(Debug, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct YearQuery {
    #[validate(range(min = 1970, max = 9999, message = "Ano inválido."))]
    pub year: i32,
}

// GET /api/reports/monthly?year=&month=
#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    tag = "Reports",
    params(MonthQuery),
    responses(
        (status = 200, description = "Totais do mês (receita, despesa, saldo)", body = MonthlySummary)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_monthly_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlySummary>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let summary = app_state
        .report_service
        .monthly(user.id, query.year, query.month)
        .await?;

    Ok(Json(summary))
}

// GET /api/reports/yearly?year=
#[utoipa::path(
    get,
    path = "/api/reports/yearly",
    tag = "Reports",
    params(YearQuery),
    responses(
        (status = 200, description = "Série de 12 meses para o gráfico anual", body = Vec<YearlyChartEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_yearly_series(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<YearlyChartEntry>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let series = app_state.report_service.yearly(user.id, query.year).await?;

    Ok(Json(series))
}

// GET /api/reports/daily?year=&month=
#[utoipa::path(
    get,
    path = "/api/reports/daily",
    tag = "Reports",
    params(MonthQuery),
    responses(
        (status = 200, description = "Saldo por dia do mês (dias vazios valem 0)", body = Vec<DailyBalanceEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_daily_series(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<DailyBalanceEntry>>, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let series = app_state
        .report_service
        .daily(user.id, query.year, query.month)
        .await?;

    Ok(Json(series))
}

// GET /api/reports/monthly/pdf?year=&month=
#[utoipa::path(
    get,
    path = "/api/reports/monthly/pdf",
    tag = "Reports",
    params(MonthQuery),
    responses(
        (status = 200, description = "Relatório mensal em PDF", content_type = "application/pdf")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_monthly_report_pdf(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate().map_err(AppError::ValidationError)?;

    let pdf_bytes = app_state
        .document_service
        .generate_monthly_report_pdf(user.id, query.year, query.month)
        .await?;

    let filename = format!("relatorio-{}-{:02}.pdf", query.year, query.month);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        pdf_bytes,
    ))
}
