use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Transação não encontrada")]
    TransactionNotFound,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Categorias padrão não podem ser excluídas")]
    DefaultCategoryImmutable,

    #[error("Cartão não encontrado")]
    CardNotFound,

    #[error("Limite de {0} cartões por usuário atingido")]
    CardQuotaReached(usize),

    #[error("Parcela não encontrada")]
    InstallmentNotFound,

    #[error("Compra parcelada não encontrada")]
    PurchaseNotFound,

    #[error("A parcela não está pendente")]
    InstallmentNotPending,

    #[error("A parcela não está paga")]
    InstallmentNotPaid,

    #[error("O valor da compra não pode ser alterado após o pagamento de uma parcela")]
    PurchaseHasPaidInstallments,

    #[error("Despesa fixa não encontrada")]
    FixedExpenseNotFound,

    #[error("A despesa fixa já foi paga neste ciclo")]
    FixedExpenseAlreadyPaid,

    #[error("Arquivo de importação inválido: {0}")]
    InvalidImportFile(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "Este e-mail já está em uso.".to_string())
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "E-mail ou senha inválidos.".to_string())
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Token de autenticação inválido ou ausente.".to_string())
            }
            AppError::UserNotFound
            | AppError::TransactionNotFound
            | AppError::CategoryNotFound
            | AppError::CardNotFound
            | AppError::InstallmentNotFound
            | AppError::PurchaseNotFound
            | AppError::FixedExpenseNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::DefaultCategoryImmutable
            | AppError::CardQuotaReached(_)
            | AppError::InstallmentNotPending
            | AppError::InstallmentNotPaid
            | AppError::PurchaseHasPaidInstallments
            | AppError::FixedExpenseAlreadyPaid => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::InvalidImportFile(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.".to_string())
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_domain_errors_map_to_404() {
        let res = AppError::CardNotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = AppError::InstallmentNotFound.into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn state_conflicts_map_to_409() {
        let res = AppError::DefaultCategoryImmutable.into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = AppError::PurchaseHasPaidInstallments.into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);

        let res = AppError::CardQuotaReached(4).into_response();
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_token_maps_to_401() {
        let res = AppError::InvalidToken.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn bad_import_maps_to_400() {
        let res = AppError::InvalidImportFile("versão desconhecida".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
