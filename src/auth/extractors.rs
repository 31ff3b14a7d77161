use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
};
use jsonwebtoken::errors::ErrorKind;
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::ApiError;

pub const SESSION_COOKIE: &str = "token";

/// Extracts and validates the session token, returning the user ID.
/// The cookie takes precedence over the Authorization header.
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let token = extract_session_token(&parts.headers).ok_or_else(|| {
            ApiError::Auth("Not authorized. Please login again.".to_string())
        })?;

        match keys.verify(&token) {
            Ok(claims) => Ok(AuthUser(claims.sub)),
            Err(err) if matches!(err.kind(), ErrorKind::ExpiredSignature) => {
                warn!("session token expired");
                Err(ApiError::Auth("Session expired. Please login again.".to_string()))
            }
            Err(err) => {
                warn!(error = %err, "session token rejected");
                Err(ApiError::Auth("Invalid token. Please login again.".to_string()))
            }
        }
    }
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = cookie_value(headers, SESSION_COOKIE) {
        return Some(token);
    }
    let auth = headers.get(AUTHORIZATION)?.to_str().ok()?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(|t| t.trim().to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == name && !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

/// Set-Cookie value carrying a fresh session token.
pub fn session_cookie(
    token: &str,
    max_age_secs: u64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Set-Cookie value that removes the session cookie from the client.
pub fn clear_session_cookie(secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}
