use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_days: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub allowed_origins: Vec<String>,
    pub cookie_secure: bool,
    pub mail: Option<MailConfig>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "authmail".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "authmail-users".into()),
            ttl_days: std::env::var("JWT_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7),
        };
        let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        // Without relay credentials the service falls back to a logging mailer.
        let mail = std::env::var("MAIL_API_KEY").ok().map(|api_key| MailConfig {
            api_url: std::env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "https://api.brevo.com/v3/smtp/email".into()),
            api_key,
            sender_email: std::env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "no-reply@authmail.dev".into()),
            sender_name: std::env::var("SENDER_NAME").unwrap_or_else(|_| "AuthMail".into()),
        });

        Ok(Self {
            database_url,
            jwt,
            allowed_origins,
            cookie_secure,
            mail,
        })
    }
}
