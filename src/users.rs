use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::instrument;

use crate::{
    auth::{extractors::AuthUser, User},
    error::ApiError,
    state::AppState,
};

/// Redacted view of the user record: never the password hash or OTP fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub name: String,
    pub is_account_verified: bool,
}

#[derive(Debug, Serialize)]
pub struct UserDataResponse {
    pub success: bool,
    pub user: UserView,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/data", get(user_data))
}

#[instrument(skip(state))]
pub async fn user_data(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserDataResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(UserDataResponse {
        success: true,
        user: UserView {
            name: user.name,
            is_account_verified: user.is_verified,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_view_is_redacted_and_camel_cased() {
        let response = UserDataResponse {
            success: true,
            user: UserView {
                name: "Ada".into(),
                is_account_verified: false,
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""isAccountVerified":false"#));
        assert!(json.contains("Ada"));
        assert!(!json.contains("password"));
        assert!(!json.contains("otp"));
    }
}
