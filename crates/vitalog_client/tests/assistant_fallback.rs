use secrecy::SecretString;
use vitalog_client::WellnessAssistant;
use vitalog_client::http_ai::GeminiAssistant;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn assistant_for(server: &MockServer) -> GeminiAssistant {
    GeminiAssistant::new(
        &server.uri(),
        Some(SecretString::new("ai-key".into())),
        "gemini-flash-latest",
    )
}

#[tokio::test]
async fn ask_returns_completion_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-flash-latest:generateContent"))
        .and(query_param("key", "ai-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Aim for around 2.5 liters spread over the day." }]
                }
            }]
        })))
        .mount(&mock_server)
        .await;

    let answer = assistant_for(&mock_server)
        .ask("wellness questions only", "how much water should I drink?")
        .await;
    assert_eq!(answer, "Aim for around 2.5 liters spread over the day.");
}

#[tokio::test]
async fn backend_failure_becomes_apology_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-flash-latest:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let answer = assistant_for(&mock_server)
        .ask("wellness questions only", "hello")
        .await;
    assert!(answer.starts_with("Sorry, I'm having trouble connecting."));
}

#[tokio::test]
async fn malformed_completion_becomes_apology_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-flash-latest:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": []
        })))
        .mount(&mock_server)
        .await;

    let answer = assistant_for(&mock_server)
        .ask("wellness questions only", "hello")
        .await;
    assert!(answer.starts_with("Sorry, I'm having trouble connecting."));
}
