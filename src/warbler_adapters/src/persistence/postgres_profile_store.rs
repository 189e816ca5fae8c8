use sqlx::PgPool;
use warbler_core::{AccountId, ProfileRecord, ProfileStore, ProfileStoreError};

#[derive(Clone)]
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresProfileStore { pool }
    }
}

#[async_trait::async_trait]
impl ProfileStore for PostgresProfileStore {
    #[tracing::instrument(name = "Writing profile to PostgreSQL", skip_all, fields(%account_id))]
    async fn write_record(
        &self,
        account_id: &AccountId,
        record: ProfileRecord,
    ) -> Result<(), ProfileStoreError> {
        let query = sqlx::query(
            r#"
                INSERT INTO profiles (account_id, email, username, full_name, profile_image_url)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (account_id) DO UPDATE
                SET email = EXCLUDED.email,
                    username = EXCLUDED.username,
                    full_name = EXCLUDED.full_name,
                    profile_image_url = EXCLUDED.profile_image_url,
                    updated_at = now()
            "#,
        )
        .bind(account_id.as_str())
        .bind(record.email)
        .bind(record.username)
        .bind(record.full_name)
        .bind(record.profile_image_url);

        query
            .execute(&self.pool)
            .await
            .map_err(|e| ProfileStoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving profile from PostgreSQL", skip_all, fields(%account_id))]
    async fn fetch_record(
        &self,
        account_id: &AccountId,
    ) -> Result<ProfileRecord, ProfileStoreError> {
        let row = sqlx::query_as::<_, (String, String, String, String)>(
            r#"
                SELECT email, username, full_name, profile_image_url
                FROM profiles
                WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileStoreError::Unexpected(e.to_string()))?;

        let Some((email, username, full_name, profile_image_url)) = row else {
            return Err(ProfileStoreError::NotFound);
        };

        Ok(ProfileRecord {
            email,
            username,
            full_name,
            profile_image_url,
        })
    }
}
