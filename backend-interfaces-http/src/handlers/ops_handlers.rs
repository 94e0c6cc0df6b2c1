use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use tokio::time::{timeout, Duration};
use tracing::error;

use backend_application::AppState;
use backend_domain::DeliveryRecord;

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(serde::Serialize)]
struct TargetStatus {
    status: String,
    configured: bool,
}

#[derive(serde::Deserialize)]
pub struct DeliveryQuery {
    pub limit: Option<usize>,
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

pub async fn health_ready(State(state): State<AppState>) -> StatusCode {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);
    let checks = async {
        let logs = state.health_service.check_log_directory().await?;
        let state_dir = state.health_service.check_state_directory().await?;
        anyhow::Ok(logs && state_dir)
    };
    match timeout(timeout_duration, checks).await {
        Ok(Ok(true)) => StatusCode::OK,
        Ok(Ok(false)) => StatusCode::SERVICE_UNAVAILABLE,
        Ok(Err(err)) => {
            error!("ready check failed: {}", err);
            StatusCode::SERVICE_UNAVAILABLE
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}

pub async fn notify_target_check(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(TargetStatus {
                status: "unauthorized".to_string(),
                configured: false,
            }),
        )
            .into_response();
    }

    let configured = state.notify_sink.is_configured();
    if !configured {
        return (
            StatusCode::OK,
            Json(TargetStatus {
                status: "unset".to_string(),
                configured,
            }),
        )
            .into_response();
    }

    let timeout_secs = state.config.request_timeout_seconds.max(1);
    match timeout(
        Duration::from_secs(timeout_secs),
        state.notify_sink.check_target(),
    )
    .await
    {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(TargetStatus {
                status: "ok".to_string(),
                configured,
            }),
        )
            .into_response(),
        Ok(Err(err)) => {
            error!("notify target check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(TargetStatus {
                    status: "error".to_string(),
                    configured,
                }),
            )
                .into_response()
        }
        Err(_) => {
            error!("notify target check timeout after {}s", timeout_secs);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(TargetStatus {
                    status: "timeout".to_string(),
                    configured,
                }),
            )
                .into_response()
        }
    }
}

pub async fn list_notify_deliveries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<DeliveryQuery>,
) -> Result<Json<Vec<DeliveryRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let deliveries = state.notify_sink.list_deliveries(limit).await;
    Ok(Json(deliveries))
}

pub async fn last_notify_delivery(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Option<DeliveryRecord>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let last = state.notify_sink.last_delivery().await;
    Ok(Json(last))
}
