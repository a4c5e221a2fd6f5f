use crate::error::config::ConfigError;

/// Server configuration sourced from environment variables.
pub struct Config {
    pub listen_addr: String,
    /// Origin the processor redirects back to after checkout.
    pub public_url: String,
    pub database_url: String,
    pub identity_url: String,
    pub identity_api_key: String,
    pub checkout_url: String,
    /// Absent when the payment integration is not configured; checkout
    /// endpoints then answer 503.
    pub checkout_secret_key: Option<String>,
    pub admin_token_secret: String,
    pub admin_setup_key: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            listen_addr: optional("LISTEN_ADDR")?.unwrap_or_else(|| "0.0.0.0:3000".to_string()),
            public_url: optional("PUBLIC_URL")?
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            database_url: required("DATABASE_URL")?,
            identity_url: required("IDENTITY_URL")?,
            identity_api_key: required("IDENTITY_API_KEY")?,
            checkout_url: optional("CHECKOUT_URL")?
                .unwrap_or_else(|| "https://api.stripe.com".to_string()),
            checkout_secret_key: optional("CHECKOUT_SECRET_KEY")?,
            admin_token_secret: required("ADMIN_TOKEN_SECRET")?,
            admin_setup_key: required("ADMIN_SETUP_KEY")?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(std::env::VarError::NotPresent) => Err(ConfigError::MissingVar(name)),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidVar(name)),
    }
}

fn optional(name: &'static str) -> Result<Option<String>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidVar(name)),
    }
}
