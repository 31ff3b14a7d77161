use crate::auth::repo_types::User;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

impl User {
    /// Find a user by email. Lookup is exact: emails are case-sensitive as stored.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, is_verified,
                   verify_otp, verify_otp_expires_at, reset_otp, reset_otp_expires_at, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, is_verified,
                   verify_otp, verify_otp_expires_at, reset_otp, reset_otp_expires_at, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new unverified user with hashed password and no outstanding OTPs.
    pub async fn create(
        db: &PgPool,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, is_verified,
                      verify_otp, verify_otp_expires_at, reset_otp, reset_otp_expires_at, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    /// Store a fresh verification code, replacing any previous one.
    pub async fn set_verify_otp(
        db: &PgPool,
        id: Uuid,
        otp: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET verify_otp = $2, verify_otp_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(otp)
        .bind(expires_at)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Flip the account to verified and consume the verification code.
    pub async fn mark_verified(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET is_verified = TRUE, verify_otp = NULL, verify_otp_expires_at = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Store a fresh password-reset code, replacing any previous one.
    pub async fn set_reset_otp(
        db: &PgPool,
        id: Uuid,
        otp: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET reset_otp = $2, reset_otp_expires_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(otp)
        .bind(expires_at)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Overwrite the password hash and consume the reset code.
    pub async fn update_password(db: &PgPool, id: Uuid, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2, reset_otp = NULL, reset_otp_expires_at = NULL
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(())
    }
}
