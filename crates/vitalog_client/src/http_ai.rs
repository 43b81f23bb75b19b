//! Wellness assistant client.
//!
//! Talks to a Gemini-style `generateContent` endpoint. Chat is best effort:
//! any transport, auth, or parse failure is converted into a fixed apology
//! string so the chat surface never has to render an error state.

use crate::{ClientError, WellnessAssistant};
use async_trait::async_trait;
use metrics::counter;
use secrecy::{ExposeSecret, SecretString};

#[derive(Clone, Debug)]
pub struct GeminiAssistant {
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    client: reqwest::Client,
}

impl GeminiAssistant {
    pub fn new(base_url: &str, api_key: Option<SecretString>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("reqwest client build should not fail");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
            client,
        }
    }

    async fn generate(&self, system_instruction: &str, question: &str) -> Result<String, ClientError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or_else(|| ClientError::Config("AI api key missing".into()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = serde_json::json!({
            "contents": [{
                "parts": [{
                    "text": format!("{system_instruction}\n\nUser question: {question}")
                }]
            }]
        });

        counter!("vitalog_ai_requests_total").increment(1);
        let resp = self
            .client
            .post(&url)
            .query(&[("key", key.expose_secret())])
            .json(&body)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: body.chars().take(256).collect(),
            });
        }

        let value = resp.json::<serde_json::Value>().await?;
        value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| ClientError::Provider("empty completion".into()))
    }
}

#[async_trait]
impl WellnessAssistant for GeminiAssistant {
    async fn ask(&self, system_instruction: &str, question: &str) -> String {
        match self.generate(system_instruction, question).await {
            Ok(text) => text,
            Err(e) => {
                counter!("vitalog_ai_failures_total").increment(1);
                tracing::error!(error = %e, "assistant request failed");
                format!("Sorry, I'm having trouble connecting. Error: {e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_becomes_apology() {
        let assistant = GeminiAssistant::new("http://localhost", None, "gemini-flash-latest");
        let answer = assistant.ask("be helpful", "how much water?").await;
        assert!(answer.starts_with("Sorry, I'm having trouble connecting."));
    }
}
