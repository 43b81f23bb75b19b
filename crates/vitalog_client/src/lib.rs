//! Collaborator traits and document types for the Vitalog health tracker,
//! plus reqwest-based implementations of the remote collaborators.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

pub mod config;
pub mod http_ai;
pub mod http_identity;
pub mod http_store;
pub mod observability;
pub mod session_file;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("configuration error: {0}")]
    Config(String),
    /// Rejection message from a provider, surfaced to the user verbatim.
    #[error("{0}")]
    Provider(String),
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub age: u32,
    /// Centimeters.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    #[serde(rename = "bloodGroup")]
    pub blood_group: String,
    pub gender: Gender,
}

/// One calendar day's logged metrics. Exactly one document exists per
/// (user, date); `date` is the document key.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyRecord {
    /// YYYY-MM-DD.
    pub date: String,
    pub steps: u32,
    /// Milliliters.
    pub water: u32,
    /// Hours.
    pub sleep: f64,
    /// Kilocalories.
    pub calories: u32,
    /// Grams. `None` means protein was never logged for this day, which is
    /// distinct from an explicit zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
}

/// A persisted login. Its existence is the sole authentication signal.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(rename = "providerId")]
    pub provider_id: String,
}

static NON_DIGITS: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"[^0-9]").expect("literal pattern"));

/// Strip everything but digits from a phone number.
pub fn sanitize_phone(phone_number: &str) -> String {
    NON_DIGITS.replace_all(phone_number, "").into_owned()
}

impl Session {
    /// Derive the stable session for a verified phone number. The uid is a
    /// deterministic function of the digits so the same phone always maps
    /// to the same user documents.
    pub fn for_phone(phone_number: &str) -> Self {
        let digits = sanitize_phone(phone_number);
        Self {
            uid: format!("user_{digits}"),
            phone_number: phone_number.to_string(),
            provider_id: "message_central".to_string(),
        }
    }
}

/// Providers occasionally return ids as JSON numbers instead of strings.
fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(n.to_string().into()),
        Some(other) => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Phone-OTP identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Request a verification code for a phone number. Returns the handle
    /// needed to confirm the code.
    async fn send_verification(&self, phone_number: &str) -> Result<String, ClientError>;
    /// Confirm a code against a verification handle. `Ok(true)` only on an
    /// explicit success response from the provider.
    async fn confirm_verification(&self, handle: &str, code: &str) -> Result<bool, ClientError>;
}

/// Per-user document store for the profile singleton and daily records.
/// Writes are merge-style: fields absent from the payload are preserved.
#[async_trait]
pub trait HealthStore: Send + Sync + 'static {
    async fn get_profile(&self, user_id: &str) -> Result<Option<UserProfile>, ClientError>;
    async fn put_profile(&self, user_id: &str, profile: &UserProfile) -> Result<(), ClientError>;
    async fn get_daily_record(
        &self,
        user_id: &str,
        date: &str,
    ) -> Result<Option<DailyRecord>, ClientError>;
    async fn put_daily_record(
        &self,
        user_id: &str,
        record: &DailyRecord,
    ) -> Result<(), ClientError>;
    /// Most recent records first, at most `limit` of them.
    async fn list_recent_records(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<DailyRecord>, ClientError>;
}

/// Conversational wellness backend. Best effort: failures come back as a
/// user-facing apology string, never as an error.
#[async_trait]
pub trait WellnessAssistant: Send + Sync + 'static {
    async fn ask(&self, system_instruction: &str, question: &str) -> String;
}

/// Local session persistence. Single writer (the session gate); reads are
/// cheap and synchronous.
pub trait SessionStore: Send + Sync + 'static {
    fn current(&self) -> Option<Session>;
    fn set(&self, session: Session) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}
