//! User repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use roost_types::{KycStatus, UserRole};

use crate::{DbError, DbResult, DbUser};

pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a password account with a pending email OTP
    pub async fn create(
        &self,
        email: &str,
        fullname: &str,
        password_hash: &str,
        email_otp: &str,
        otp_expires_at: DateTime<Utc>,
    ) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (email, fullname, password_hash, email_otp, otp_expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(fullname)
        .bind(password_hash)
        .bind(email_otp)
        .bind(otp_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::on_conflict(e, "email already registered"))?;

        Ok(user)
    }

    /// Create or link a Google account. An existing user with the same
    /// email gets the google_id attached; otherwise a new, already-verified
    /// account is created.
    pub async fn upsert_google(
        &self,
        google_id: &str,
        email: &str,
        fullname: &str,
    ) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (email, fullname, google_id, email_verified)
            VALUES ($1, $2, $3, TRUE)
            ON CONFLICT (email)
            DO UPDATE SET google_id = EXCLUDED.google_id, updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(fullname)
        .bind(google_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_google_id(&self, google_id: &str) -> DbResult<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>("SELECT * FROM users WHERE google_id = $1")
            .bind(google_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn list_all(&self) -> DbResult<Vec<DbUser>> {
        let users =
            sqlx::query_as::<_, DbUser>("SELECT * FROM users ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(users)
    }

    /// Store a fresh email OTP (registration resend, forgot-password)
    pub async fn set_email_otp(
        &self,
        email: &str,
        otp: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET email_otp = $2, otp_expires_at = $3, updated_at = NOW()
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(otp)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    /// Mark the email verified and consume the OTP
    pub async fn mark_email_verified(&self, email: &str) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET email_verified = TRUE, email_otp = NULL, otp_expires_at = NULL,
                updated_at = NOW()
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    /// Replace the password hash and consume the OTP
    pub async fn reset_password(&self, email: &str, password_hash: &str) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET password_hash = $2, email_otp = NULL, otp_expires_at = NULL,
                updated_at = NOW()
            WHERE email = $1
            RETURNING *
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    /// Store a phone number with a pending SMS OTP
    pub async fn set_phone_otp(
        &self,
        id: Uuid,
        phone: &str,
        otp: &str,
        expires_at: DateTime<Utc>,
    ) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET phone = $2, phone_otp = $3, otp_expires_at = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(phone)
        .bind(otp)
        .bind(expires_at)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    /// Partial profile update; changing the phone number clears its
    /// verified flag until the new number passes the OTP flow again.
    pub async fn update_profile(
        &self,
        id: Uuid,
        fullname: Option<&str>,
        phone: Option<&str>,
    ) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET fullname = COALESCE($2, fullname),
                phone = COALESCE($3, phone),
                phone_verified = CASE WHEN $3 IS NULL THEN phone_verified ELSE FALSE END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(fullname)
        .bind(phone)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    pub async fn mark_phone_verified(&self, id: Uuid) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET phone_verified = TRUE, phone_otp = NULL, otp_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    pub async fn update_kyc_status(&self, id: Uuid, status: KycStatus) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET kyc_status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    pub async fn update_role(&self, id: Uuid, role: UserRole) -> DbResult<DbUser> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound("User not found".to_string()));
        }

        Ok(())
    }
}
