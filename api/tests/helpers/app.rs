use api::{middleware::log_request, routes::routes, state::AppState};
use axum::{Router, body::Body, http::Request, middleware::from_fn, response::Response};
use db::test_utils::setup_test_db;
use marker::testing::ScriptedExecutor;
use marker::traits::assessor::Assessor;
use std::convert::Infallible;
use std::sync::Arc;
use tower::ServiceExt;
use tower::util::BoxCloneService;

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

/// A fresh in-memory database behind the full `/api` router.
pub async fn make_test_app() -> TestApp {
    make_test_app_with(ScriptedExecutor::new(), None).await
}

/// Same as [`make_test_app`] with scripted code execution and an optional assessor.
pub async fn make_test_app_with(
    executor: ScriptedExecutor,
    assessor: Option<Arc<dyn Assessor>>,
) -> TestApp {
    util::test_helpers::disable_external_services();

    let db = setup_test_db().await;
    let app_state = AppState::new(db, Arc::new(executor), assessor);

    Router::new()
        .nest("/api", routes(app_state))
        .layer(from_fn(log_request))
        .into_service()
        .boxed_clone()
}
