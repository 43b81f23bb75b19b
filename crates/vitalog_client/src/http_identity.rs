//! Message Central OTP client.
//!
//! This module provides a reqwest-based implementation of the
//! [`IdentityProvider`](crate::IdentityProvider) trait against the
//! Message Central verification REST API.

use crate::{ClientError, IdentityProvider, sanitize_phone};
use async_trait::async_trait;
use metrics::counter;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

const SUCCESS_CODE: u16 = 200;

/// OTP verification client for the Message Central CPaaS API.
#[derive(Clone, Debug)]
pub struct MessageCentralClient {
    base_url: String,
    customer_id: Option<String>,
    auth_token: Option<SecretString>,
    country_code: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct VerificationEnvelope {
    #[serde(rename = "responseCode", deserialize_with = "code_as_u16")]
    response_code: u16,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<VerificationData>,
}

#[derive(Debug, Deserialize)]
struct VerificationData {
    #[serde(
        rename = "verificationId",
        default,
        deserialize_with = "crate::deserialize_opt_string"
    )]
    verification_id: Option<String>,
}

/// The provider flips between `"responseCode": 200` and `"200"`.
fn code_as_u16<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| D::Error::custom("response code out of range")),
        serde_json::Value::String(s) => s
            .parse::<u16>()
            .map_err(|_| D::Error::custom(format!("non-numeric response code {s:?}"))),
        other => Err(D::Error::custom(format!(
            "expected response code, got {other}"
        ))),
    }
}

impl MessageCentralClient {
    pub fn new(
        base_url: &str,
        customer_id: Option<String>,
        auth_token: Option<SecretString>,
        country_code: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            customer_id,
            auth_token,
            country_code: country_code.into(),
            client,
        }
    }

    /// Both credentials must be present before any provider call.
    fn credentials(&self) -> Result<(&str, &SecretString), ClientError> {
        match (&self.customer_id, &self.auth_token) {
            (Some(id), Some(token)) => Ok((id, token)),
            _ => Err(ClientError::Config(
                "Message Central credentials missing".into(),
            )),
        }
    }

    async fn read_envelope(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<VerificationEnvelope, ClientError> {
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: body.chars().take(256).collect(),
            });
        }
        Ok(resp.json::<VerificationEnvelope>().await?)
    }
}

#[async_trait]
impl IdentityProvider for MessageCentralClient {
    async fn send_verification(&self, phone_number: &str) -> Result<String, ClientError> {
        let (customer_id, auth_token) = self.credentials()?;
        counter!("vitalog_identity_requests_total", "op" => "send").increment(1);

        // The provider expects the bare national number; keep the trailing
        // ten digits and pass the country code separately.
        let digits = sanitize_phone(phone_number);
        let start = digits.len().saturating_sub(10);
        let mobile = &digits[start..];

        let url = format!("{}/verification/v3/send", self.base_url);
        let envelope = self
            .read_envelope(
                self.client
                    .post(&url)
                    .query(&[
                        ("countryCode", self.country_code.as_str()),
                        ("customerId", customer_id),
                        ("flowType", "SMS"),
                        ("mobileNumber", mobile),
                    ])
                    .header("authToken", auth_token.expose_secret()),
            )
            .await?;

        if envelope.response_code == SUCCESS_CODE {
            envelope
                .data
                .and_then(|d| d.verification_id)
                .ok_or_else(|| ClientError::Provider("verification id missing".into()))
        } else {
            counter!("vitalog_identity_failures_total", "op" => "send").increment(1);
            Err(ClientError::Provider(
                envelope.message.unwrap_or_else(|| "Failed to send OTP".into()),
            ))
        }
    }

    async fn confirm_verification(&self, handle: &str, code: &str) -> Result<bool, ClientError> {
        let (_, auth_token) = self.credentials()?;
        counter!("vitalog_identity_requests_total", "op" => "confirm").increment(1);

        let url = format!("{}/verification/v3/validateOtp", self.base_url);
        let envelope = self
            .read_envelope(
                self.client
                    .get(&url)
                    .query(&[("verificationId", handle), ("code", code)])
                    .header("authToken", auth_token.expose_secret()),
            )
            .await?;

        // Any non-success code means "wrong or expired OTP", not an error.
        Ok(envelope.response_code == SUCCESS_CODE)
    }
}
