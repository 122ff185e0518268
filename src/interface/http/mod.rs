//! 리뷰 이벤트 수신과 운영자 엔드포인트를 제공하는 HTTP 인터페이스.

mod handlers;
mod middleware;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use crate::interface::composition::AppComposition;

pub use handlers::{DEFAULT_REDIRECT, OUTCOME_HEADER, OutcomeResponse, TestPromptRequest};
pub use middleware::require_operator;

/// 전체 라우터. `/admin` 하위는 운영자 토큰이 필요하다.
pub fn router(app: Arc<AppComposition>) -> Router {
    let admin = Router::new()
        .route("/reviews/{id}/reply", get(handlers::manual_reply))
        .route("/test-prompt", post(handlers::test_prompt))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&app),
            require_operator,
        ));

    Router::new()
        .route("/", get(handlers::health))
        .route("/health", get(handlers::health))
        .route("/events/review-posted", post(handlers::review_posted))
        .route("/events/review-status", post(handlers::review_status))
        .nest("/admin", admin)
        .with_state(app)
}

/// 주소에 바인딩하고 서버가 끝날 때까지 요청을 처리한다.
pub async fn serve(app: Arc<AppComposition>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "replypilot listening");

    axum::serve(listener, router(app))
        .await
        .context("http server stopped with an error")
}
