use crate::ClientError;
use secrecy::SecretString;
use std::path::PathBuf;

pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://cpaas.messagecentral.com";
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_AI_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_COUNTRY_CODE: &str = "91";

#[derive(Clone, Debug)]
pub struct Config {
    pub identity_base_url: String,
    /// Absent credentials are not a startup error: OTP operations report a
    /// configuration error when first attempted instead.
    pub identity_customer_id: Option<String>,
    pub identity_auth_token: Option<SecretString>,
    pub country_code: String,
    pub store_base_url: String,
    pub store_api_key: SecretString,
    pub ai_base_url: String,
    pub ai_api_key: Option<SecretString>,
    pub ai_model: String,
    pub session_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ClientError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let store_base_url = get("VITALOG_STORE_BASE_URL")
            .ok_or_else(|| ClientError::Config("VITALOG_STORE_BASE_URL missing".into()))?;
        let store_api_key = get("VITALOG_STORE_API_KEY")
            .ok_or_else(|| ClientError::Config("VITALOG_STORE_API_KEY missing".into()))?;
        let session_path = get("VITALOG_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".vitalog/session.json"));

        Ok(Self {
            identity_base_url: get("VITALOG_MSG_CENTRAL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_IDENTITY_BASE_URL.into()),
            identity_customer_id: get("VITALOG_MSG_CENTRAL_CUSTOMER_ID"),
            identity_auth_token: get("VITALOG_MSG_CENTRAL_AUTH_TOKEN")
                .map(|t| SecretString::new(t.into())),
            country_code: get("VITALOG_COUNTRY_CODE")
                .unwrap_or_else(|| DEFAULT_COUNTRY_CODE.into()),
            store_base_url,
            store_api_key: SecretString::new(store_api_key.into()),
            ai_base_url: get("VITALOG_AI_BASE_URL").unwrap_or_else(|| DEFAULT_AI_BASE_URL.into()),
            ai_api_key: get("VITALOG_GEMINI_API_KEY").map(|k| SecretString::new(k.into())),
            ai_model: get("VITALOG_AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.into()),
            session_path,
        })
    }
}
