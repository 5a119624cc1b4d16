// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CategoryRepository, UserRepository},
    models::{
        auth::{Claims, User},
        category::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES},
        transaction::TransactionKind,
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    category_repo: CategoryRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        category_repo: CategoryRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self { user_repo, category_repo, jwt_secret, pool }
    }

    pub async fn register_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        // 1. Hashing (fora da transação, não toca no banco)
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))?
            ?;

        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        // 2. Cria o usuário
        let new_user = match self.user_repo.create_user(&mut *tx, email, &hashed_password).await {
            Err(AppError::DatabaseError(e)) if is_unique_violation(&e) => {
                return Err(AppError::EmailAlreadyExists);
            }
            other => other?,
        };

        // 3. Semeia as categorias padrão do usuário na MESMA transação.
        // Se qualquer insert falhar, o usuário criado acima é desfeito.
        for name in DEFAULT_INCOME_CATEGORIES {
            self.category_repo
                .create(&mut *tx, new_user.id, name, TransactionKind::Income, true)
                .await?;
        }
        for name in DEFAULT_EXPENSE_CATEGORIES {
            self.category_repo
                .create(&mut *tx, new_user.id, name, TransactionKind::Expense, true)
                .await?;
        }

        // 4. Se chegou aqui, deu tudo certo. "Commita" a transação.
        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        tracing::info!("🆕 Usuário registrado com categorias padrão semeadas.");

        // 5. Gera o token
        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))?
        ?;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// Código 23505 = unique_violation no Postgres
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
