use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Method, Request, header},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::info;

fn header_value(req: &Request<Body>, name: header::HeaderName) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Logs method, path, IP address, origin and user-agent for each incoming
/// request, then the status and latency once it has been handled.
/// CORS preflight `OPTIONS` requests are passed through silently.
///
/// ```ignore
/// use axum::Router;
/// use axum::middleware::from_fn;
/// use api::middleware::log_request;
///
/// let app = Router::new().layer(from_fn(log_request));
/// ```
///
/// The client IP comes from `ConnectInfo`, which is only present when the
/// router is served with `into_make_service_with_connect_info`.
pub async fn log_request(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".into());
    let origin = header_value(&req, header::ORIGIN);
    let user_agent = header_value(&req, header::USER_AGENT);

    info!(
        method = ?method,
        path = %path,
        ip = %ip,
        origin = %origin,
        user_agent = %user_agent,
        "Incoming request"
    );

    let started = Instant::now();
    let response = next.run(req).await;

    info!(
        method = ?method,
        path = %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );

    response
}
