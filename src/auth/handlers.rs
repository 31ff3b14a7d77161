use axum::{
    extract::{FromRef, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            LoginRequest, MessageResponse, RegisterRequest, ResetPasswordRequest,
            SendResetOtpRequest, StatusResponse, VerifyAccountRequest, VerifyResetOtpRequest,
        },
        extractors::{clear_session_cookie, session_cookie, AuthUser},
        jwt::JwtKeys,
        otp::{check_otp, generate_otp, otp_expiry},
        password::{hash_password, verify_password},
        repo_types::User,
    },
    error::ApiError,
    mailer::EmailMessage,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/send-verify-otp", post(send_verify_otp))
        .route("/verify-account", post(verify_account))
        .route("/is-auth", get(is_auth))
        .route("/send-reset-otp", post(send_reset_otp))
        .route("/verify-otp", post(verify_reset_otp))
        .route("/reset-password", post(reset_password))
}

fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn session_headers(state: &AppState, token: &str) -> Result<HeaderMap, ApiError> {
    let keys = JwtKeys::from_ref(state);
    let cookie = session_cookie(token, keys.session_ttl.as_secs(), state.config.cookie_secure)
        .map_err(|e| ApiError::Internal(e.into()))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok(headers)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, HeaderMap, Json<MessageResponse>), ApiError> {
    let name = payload.name.trim();
    let email = payload.email.trim();

    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Missing details".into()));
    }
    if !is_valid_email(email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::Validation("Password too short".into()));
    }

    // Ensure email is not taken
    if User::find_by_email(&state.db, email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict("User already exists".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(&state.db, name, email, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    let headers = session_headers(&state, &token)?;

    // Welcome email is best effort: a relay failure never fails registration.
    let welcome = EmailMessage {
        to: user.email.clone(),
        subject: "Welcome to AuthMail".into(),
        body: format!(
            "Welcome to AuthMail. Your account has been created with the email id: {}",
            user.email
        ),
    };
    if let Err(err) = state.mailer.send(&welcome).await {
        warn!(error = %err, email = %user.email, "welcome email failed");
    }

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        headers,
        Json(MessageResponse::ok("User registered successfully")),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let email = payload.email.trim();

    if email.is_empty() || payload.password.is_empty() {
        return Err(ApiError::Validation("Email and password are required".into()));
    }

    let user = match User::find_by_email(&state.db, email).await? {
        Some(user) => user,
        None => {
            warn!(email = %email, "login unknown email");
            return Err(ApiError::Auth("Invalid email".into()));
        }
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Auth("Invalid password".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;
    let headers = session_headers(&state, &token)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok((headers, Json(MessageResponse::ok("Login successful"))))
}

/// Idempotent: succeeds whether or not a session cookie was present.
#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let cookie = clear_session_cookie(state.config.cookie_secure)
        .map_err(|e| ApiError::Internal(e.into()))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);
    Ok((headers, Json(MessageResponse::ok("Logged out"))))
}

#[instrument(skip(state))]
pub async fn send_verify_otp(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    if user.is_verified {
        return Err(ApiError::AlreadyVerified);
    }

    let otp = generate_otp();
    User::set_verify_otp(&state.db, user.id, &otp, otp_expiry()).await?;

    state
        .mailer
        .send(&EmailMessage {
            to: user.email.clone(),
            subject: "Account Verification OTP".into(),
            body: format!("Your OTP is {otp}. Please verify your account."),
        })
        .await?;

    info!(user_id = %user.id, "verification otp sent");
    Ok(Json(MessageResponse::ok("Verification OTP sent to email")))
}

#[instrument(skip(state, payload))]
pub async fn verify_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<VerifyAccountRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let otp = payload.otp.trim();
    if otp.is_empty() {
        return Err(ApiError::Validation("Missing OTP".into()));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    check_otp(user.verify_otp.as_deref(), user.verify_otp_expires_at, otp)?;
    User::mark_verified(&state.db, user.id).await?;

    info!(user_id = %user.id, "email verified");
    Ok(Json(MessageResponse::ok("Email verified successfully")))
}

pub async fn is_auth(AuthUser(_user_id): AuthUser) -> Json<StatusResponse> {
    Json(StatusResponse { success: true })
}

#[instrument(skip(state, payload))]
pub async fn send_reset_otp(
    State(state): State<AppState>,
    Json(payload): Json<SendResetOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() {
        return Err(ApiError::Validation("Email is required".into()));
    }

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let otp = generate_otp();
    User::set_reset_otp(&state.db, user.id, &otp, otp_expiry()).await?;

    state
        .mailer
        .send(&EmailMessage {
            to: user.email.clone(),
            subject: "Password Reset OTP".into(),
            body: format!("Your OTP is {otp}. Use this OTP to reset your password."),
        })
        .await?;

    info!(user_id = %user.id, "reset otp sent");
    Ok(Json(MessageResponse::ok("Password reset OTP sent to email")))
}

/// Pure check of a reset code, used before showing the new-password form.
#[instrument(skip(state, payload))]
pub async fn verify_reset_otp(
    State(state): State<AppState>,
    Json(payload): Json<VerifyResetOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = payload.email.trim();
    let otp = payload.otp.trim();
    if email.is_empty() || otp.is_empty() {
        return Err(ApiError::Validation("Email and OTP are required".into()));
    }

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    check_otp(user.reset_otp.as_deref(), user.reset_otp_expires_at, otp)?;
    Ok(Json(MessageResponse::ok("OTP verified successfully")))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let email = payload.email.trim();
    let otp = payload.otp.trim();
    if email.is_empty() || otp.is_empty() || payload.new_password.is_empty() {
        return Err(ApiError::Validation(
            "Email, OTP and new password are required".into(),
        ));
    }

    let user = User::find_by_email(&state.db, email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    check_otp(user.reset_otp.as_deref(), user.reset_otp_expires_at, otp)?;

    let hash = hash_password(&payload.new_password)?;
    User::update_password(&state.db, user.id, &hash).await?;

    info!(user_id = %user.id, "password reset");
    Ok(Json(MessageResponse::ok(
        "Password has been reset successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_regex_accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn email_regex_rejects_malformed_addresses() {
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn status_response_serialization() {
        let json = serde_json::to_string(&StatusResponse { success: true }).unwrap();
        assert_eq!(json, r#"{"success":true}"#);
    }
}
