pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

/// Resume uploads above this size are rejected before parsing.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/match", post(handlers::handle_match))
        .route("/api/v1/score", post(handlers::handle_score))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::extraction::canned::CannedBackend;
    use crate::scoring::weights::ScoringConfig;

    fn test_router() -> Router {
        let backend = CannedBackend::new(json!({}), json!({}), &[]);
        build_router(AppState {
            config: Config {
                anthropic_api_key: "test-key".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                scoring: ScoringConfig::default(),
                feedback_enabled: false,
            },
            backend: Arc::new(backend),
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "matcher-api");
    }

    #[tokio::test]
    async fn test_score_endpoint() {
        let request = post_json(
            "/api/v1/score",
            json!({
                "jd": {
                    "Key Skills": "Python, SQL, Airflow",
                    "Years of Experience": "2 years",
                    "Location": "Remote"
                },
                "resume": {
                    "Key Skills": "Python, SQL",
                    "Years of Experience": "3 years 0 months",
                    "Notice Period": "Immediate"
                },
                "matched_skills": ["Python", "SQL", "Spark"]
            }),
        );
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["matched_skills"], json!(["Python", "SQL"]));
        assert_eq!(body["missing_skills"], json!(["Airflow"]));
        assert_eq!(body["attribute_scores"]["Location Match"], 100.0);
        assert!(body["breakdown"]
            .as_str()
            .unwrap()
            .starts_with("===== Resume Match Breakdown ====="));
    }

    #[tokio::test]
    async fn test_score_endpoint_rejects_invalid_bundle() {
        let request = post_json(
            "/api/v1/score",
            json!({
                "jd": {"Location": ["Pune", "Mumbai"], "Key Skills": 7.5},
                "resume": {},
                "matched_skills": []
            }),
        );
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
    }

    #[tokio::test]
    async fn test_match_requires_resume_file() {
        let boundary = "X-MATCH-BOUNDARY";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"job_description\"\r\n\r\n\
             Senior Go developer, 5+ years\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/match")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("resume"));
    }
}
