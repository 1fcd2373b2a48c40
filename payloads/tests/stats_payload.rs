use payloads::ClientError;
use payloads::responses::AppStats;
use reqwest::StatusCode;

#[test]
fn stats_document_matches_the_backend_contract() {
    let body = serde_json::json!({
        "user_count": 42,
        "post_count": 918,
        "comment_count": 3274,
        "active_sessions": 17,
        "generated_at": "2026-08-01T12:00:00Z",
    });

    let stats: AppStats = serde_json::from_value(body).unwrap();
    assert_eq!(stats.user_count, 42);
    assert_eq!(stats.active_sessions, 17);
}

#[test]
fn api_error_displays_the_response_text() {
    let error = ClientError::APIError(
        StatusCode::INTERNAL_SERVER_ERROR,
        "stats are temporarily unavailable".to_string(),
    );
    assert_eq!(error.to_string(), "stats are temporarily unavailable");
}
