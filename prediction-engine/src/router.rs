use std::{future::ready, sync::Arc};

use axum::{
    http::{Method, StatusCode},
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::api::endpoints;
use crate::metrics_utils::track_metrics;
use crate::prediction::PredictionPolicy;
use crate::store::AggregationStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AggregationStore>,
    pub policy: PredictionPolicy,
}

pub fn router(
    store: Arc<AggregationStore>,
    policy: PredictionPolicy,
    metrics: Option<PrometheusHandle>,
) -> Router {
    let state = AppState { store, policy };

    // Browser clients call the API from arbitrary origins.
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_origin(AllowOrigin::mirror_request());

    let status_router = Router::new()
        .route("/", get(endpoints::index))
        .route("/health", get(endpoints::index))
        .route("/_readiness", get(|| ready(StatusCode::OK)))
        .route("/_liveness", get(|| ready(StatusCode::OK)));

    let api_router = Router::new()
        .route("/api/models/status", get(endpoints::model_status))
        .route("/api/chat/predict", post(endpoints::chat))
        .route("/api/:category/upload", post(endpoints::upload))
        .route("/api/:category/predict", post(endpoints::predict))
        .route("/api/:category/rank", get(endpoints::rank));

    let router = Router::new()
        .merge(status_router)
        .merge(api_router)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(track_metrics))
        .layer(cors)
        .with_state(state);

    match metrics {
        Some(recorder_handle) => {
            router.route("/metrics", get(move || ready(recorder_handle.render())))
        }
        None => router,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{self, Request},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(
            Arc::new(AggregationStore::new()),
            PredictionPolicy::default(),
            None,
        )
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(http::Method::POST)
                    .uri(uri)
                    .header(http::header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_owned()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn index() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "working");
    }

    #[tokio::test]
    async fn upload_then_predict() {
        let app = app();

        let (status, body) = post_json(
            app.clone(),
            "/api/offers/upload",
            &json!({
                "data": [
                    {"name": "a", "clicks": 10, "revenue": 100},
                    {"name": "b", "clicks": 30, "revenue": 300},
                ]
            })
            .to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Offer data uploaded", "total": 2}));

        let (status, body) = post_json(app, "/api/offers/predict", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "predicted_clicks": 20,
                "predicted_conversions": 1,
                "predicted_revenue": 200,
                "confidence": 0.7,
                "based_on_records": 2,
            })
        );
    }

    #[tokio::test]
    async fn upload_rejects_single_object() {
        let (status, body) =
            post_json(app(), "/api/campaigns/upload", r#"{"data": {"name": "x"}}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Data must be a list"}));
    }

    #[tokio::test]
    async fn upload_rejects_malformed_json() {
        let (status, _) = post_json(app(), "/api/offers/upload", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_upload_body_uploads_nothing() {
        let (status, body) = post_json(app(), "/api/email/upload", "").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Email data uploaded", "total": 0}));
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let (status, body) = post_json(app(), "/api/coupons/predict", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "unknown category: coupons"}));
    }

    #[tokio::test]
    async fn predict_without_data_is_bad_request() {
        let (status, body) = post_json(app(), "/api/offers/predict", "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "No historical offer data available"}));
    }

    #[tokio::test]
    async fn chat_routes_to_its_own_handler() {
        let (status, body) = post_json(app(), "/api/chat/predict", r#"{"prompt": ""}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"reply": "Please ask a valid question."}));
    }
}
