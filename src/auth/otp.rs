use rand::Rng;
use time::{Duration, OffsetDateTime};

use crate::error::ApiError;

/// Both OTP purposes share the same 10-minute window.
pub const OTP_TTL: Duration = Duration::minutes(10);

/// 6-digit numeric code from the thread-local CSPRNG.
pub fn generate_otp() -> String {
    let mut rng = rand::thread_rng();
    rng.gen_range(100_000..1_000_000).to_string()
}

pub fn otp_expiry() -> OffsetDateTime {
    OffsetDateTime::now_utc() + OTP_TTL
}

/// Checks a submitted code against the stored one. Mismatch (or no stored
/// code at all) is reported before expiry, matching the consumption order of
/// both the verification and reset flows.
pub fn check_otp(
    stored: Option<&str>,
    expires_at: Option<OffsetDateTime>,
    submitted: &str,
) -> Result<(), ApiError> {
    let stored = match stored {
        Some(code) if !code.is_empty() => code,
        _ => return Err(ApiError::InvalidOtp),
    };
    if stored != submitted {
        return Err(ApiError::InvalidOtp);
    }
    match expires_at {
        Some(at) if at > OffsetDateTime::now_utc() => Ok(()),
        _ => Err(ApiError::ExpiredOtp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_is_six_decimal_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn check_accepts_matching_unexpired_code() {
        let expires = OffsetDateTime::now_utc() + Duration::minutes(5);
        assert!(check_otp(Some("123456"), Some(expires), "123456").is_ok());
    }

    #[test]
    fn check_rejects_missing_stored_code() {
        let expires = OffsetDateTime::now_utc() + Duration::minutes(5);
        let err = check_otp(None, Some(expires), "123456").unwrap_err();
        assert!(matches!(err, ApiError::InvalidOtp));

        let err = check_otp(Some(""), Some(expires), "123456").unwrap_err();
        assert!(matches!(err, ApiError::InvalidOtp));
    }

    #[test]
    fn check_rejects_mismatched_code() {
        let expires = OffsetDateTime::now_utc() + Duration::minutes(5);
        let err = check_otp(Some("123456"), Some(expires), "654321").unwrap_err();
        assert!(matches!(err, ApiError::InvalidOtp));
    }

    #[test]
    fn check_rejects_expired_code() {
        let expired = OffsetDateTime::now_utc() - Duration::seconds(1);
        let err = check_otp(Some("123456"), Some(expired), "123456").unwrap_err();
        assert!(matches!(err, ApiError::ExpiredOtp));
    }

    #[test]
    fn mismatch_is_reported_before_expiry() {
        let expired = OffsetDateTime::now_utc() - Duration::minutes(1);
        let err = check_otp(Some("123456"), Some(expired), "000000").unwrap_err();
        assert!(matches!(err, ApiError::InvalidOtp));
    }
}
