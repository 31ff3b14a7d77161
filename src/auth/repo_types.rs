use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. OTP columns are NULL whenever no code of
/// that purpose is outstanding.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub verify_otp: Option<String>,
    pub verify_otp_expires_at: Option<OffsetDateTime>,
    pub reset_otp: Option<String>,
    pub reset_otp_expires_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
}
