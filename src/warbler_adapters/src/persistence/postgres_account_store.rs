use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use sqlx::PgPool;
use warbler_core::{AccountId, AccountStore, AccountStoreError, Email, MIN_PASSWORD_LENGTH, Password};

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresAccountStore { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn create_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AccountId, AccountStoreError> {
        if password.is_weak() {
            return Err(AccountStoreError::InvalidCredentials(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let password_hash = compute_password_hash(password.clone())
            .await
            .map_err(AccountStoreError::Network)?;

        let account_id = AccountId::generate();
        let query = sqlx::query(
            r#"
                INSERT INTO accounts (id, email, password_hash)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(account_id.as_str())
        .bind(email.as_str().to_lowercase())
        .bind(password_hash.expose_secret().as_str());

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AccountStoreError::DuplicateEmail;
                }
            }
            AccountStoreError::Network(e.to_string())
        })?;

        Ok(account_id)
    }
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
async fn compute_password_hash(password: Password) -> Result<Secret<String>, String> {
    let current_span: tracing::Span = tracing::Span::current();

    let result = tokio::task::spawn_blocking(move || {
        current_span.in_scope(move || {
            let salt: SaltString = SaltString::generate(rand_core::OsRng);
            let hasher = Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
            );
            hasher
                .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                .map(|h| Secret::from(h.to_string()))
                .map_err(|e| e.to_string())
        })
    })
    .await
    .map_err(|e| e.to_string())?;

    result
}
