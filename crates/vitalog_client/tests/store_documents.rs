use secrecy::SecretString;
use vitalog_client::http_store::ReqwestHealthStore;
use vitalog_client::{DailyRecord, Gender, HealthStore, UserProfile};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> ReqwestHealthStore {
    ReqwestHealthStore::new(&server.uri(), SecretString::new("key".into()))
}

fn sample_profile() -> UserProfile {
    UserProfile {
        name: Some("Asha".into()),
        age: 25,
        height: 170.0,
        weight: 70.0,
        blood_group: "O+".into(),
        gender: Gender::Female,
    }
}

#[tokio::test]
async fn missing_profile_maps_to_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/user_1/profile"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let profile = store_for(&mock_server)
        .get_profile("user_1")
        .await
        .expect("get");
    assert!(profile.is_none());
}

#[tokio::test]
async fn put_profile_is_a_merge_write() {
    let mock_server = MockServer::start().await;
    let profile = sample_profile();

    Mock::given(method("PUT"))
        .and(path("/v1/users/user_1/profile"))
        .and(query_param("merge", "true"))
        .and(body_json(serde_json::json!({
            "name": "Asha",
            "age": 25,
            "height": 170.0,
            "weight": 70.0,
            "bloodGroup": "O+",
            "gender": "female"
        })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    store_for(&mock_server)
        .put_profile("user_1", &profile)
        .await
        .expect("put");
}

#[tokio::test]
async fn daily_record_round_trips_by_date_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/user_1/days/2025-11-03"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "date": "2025-11-03",
            "steps": 4200,
            "water": 1500,
            "sleep": 7.5,
            "calories": 1800
        })))
        .mount(&mock_server)
        .await;

    let record = store_for(&mock_server)
        .get_daily_record("user_1", "2025-11-03")
        .await
        .expect("get")
        .expect("present");
    assert_eq!(record.steps, 4200);
    // protein was never logged for this day
    assert!(record.protein.is_none());

    Mock::given(method("PUT"))
        .and(path("/v1/users/user_1/days/2025-11-03"))
        .and(query_param("merge", "true"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    store_for(&mock_server)
        .put_daily_record("user_1", &record)
        .await
        .expect("put");
}

#[tokio::test]
async fn list_recent_records_passes_order_and_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/user_1/days"))
        .and(query_param("order", "desc"))
        .and(query_param("limit", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "date": "2025-11-03", "steps": 4200, "water": 1500, "sleep": 7.5, "calories": 1800 },
            { "date": "2025-11-02", "steps": 8000, "water": 2000, "sleep": 6.0, "calories": 2100, "protein": 80.0 }
        ])))
        .mount(&mock_server)
        .await;

    let records = store_for(&mock_server)
        .list_recent_records("user_1", 30)
        .await
        .expect("list");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].date, "2025-11-03");
    assert_eq!(records[1].protein, Some(80.0));
}

#[tokio::test]
async fn server_error_is_surfaced_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/users/user_1/profile"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&mock_server)
        .await;

    let err = store_for(&mock_server).get_profile("user_1").await.unwrap_err();
    assert!(matches!(
        err,
        vitalog_client::ClientError::Api { status: 503, .. }
    ));
}
