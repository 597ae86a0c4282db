use axum::http::StatusCode;

/// Health check endpoint
///
/// Returns 200 OK if the service is running.
/// Unauthenticated and suitable for load-balancer probes.
#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Service is healthy"),
    ),
    tag = "health"
)]
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
