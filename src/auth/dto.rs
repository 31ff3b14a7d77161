use serde::{Deserialize, Serialize};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for account verification.
#[derive(Debug, Deserialize)]
pub struct VerifyAccountRequest {
    #[serde(default)]
    pub otp: String,
}

/// Request body for requesting a password-reset code.
#[derive(Debug, Deserialize)]
pub struct SendResetOtpRequest {
    #[serde(default)]
    pub email: String,
}

/// Request body for the pure reset-code check.
#[derive(Debug, Deserialize)]
pub struct VerifyResetOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

/// Request body for resetting the password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub new_password: String,
}

/// Standard `{success, message}` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Bare success flag, returned by the session probe.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_response_serialization() {
        let json = serde_json::to_string(&MessageResponse::ok("Login successful")).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains("Login successful"));
    }

    #[test]
    fn reset_password_request_uses_camel_case() {
        let request: ResetPasswordRequest = serde_json::from_str(
            r#"{"email":"a@b.c","otp":"123456","newPassword":"hunter22"}"#,
        )
        .unwrap();
        assert_eq!(request.new_password, "hunter22");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let request: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(request.name.is_empty());
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }
}
