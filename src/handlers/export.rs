// src/handlers/export.rs

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::export::{ExportDump, ImportSummary},
};

// GET /api/export
#[utoipa::path(
    get,
    path = "/api/export",
    tag = "Export",
    responses(
        (status = 200, description = "Dump completo dos dados do usuário", body = ExportDump)
    ),
    security(("api_jwt" = []))
)]
pub async fn export_data(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let dump = app_state.export_service.export(user.id).await?;

    // Serve direto como download
    Ok((
        StatusCode::OK,
        [(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"financas-backup.json\"".to_string(),
        )],
        Json(dump),
    ))
}

// POST /api/import
#[utoipa::path(
    post,
    path = "/api/import",
    tag = "Export",
    request_body = ExportDump,
    responses(
        (status = 200, description = "Dados importados com IDs regenerados", body = ImportSummary),
        (status = 400, description = "Arquivo de importação inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_data(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(dump): Json<ExportDump>,
) -> Result<Json<ImportSummary>, AppError> {
    let summary = app_state.export_service.import(user.id, dump).await?;
    Ok(Json(summary))
}
