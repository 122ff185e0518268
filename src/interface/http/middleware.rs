//! 운영자 엔드포인트 인증 미들웨어.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use tracing::{error, warn};

use crate::interface::composition::AppComposition;

/// `Authorization: Bearer <admin_token>`을 검사한다.
/// 토큰이 설정되지 않았으면 운영자 기능 자체를 막는다(403).
pub async fn require_operator(
    State(app): State<Arc<AppComposition>>,
    req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected = app
        .admin_token()
        .map_err(|err| {
            error!("failed to load operator token: {err:#}");
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            warn!("operator endpoint called but no admin token is configured");
            StatusCode::FORBIDDEN
        })?;

    let presented = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !token_matches(presented, &expected) {
        return Err(StatusCode::FORBIDDEN);
    }

    Ok(next.run(req).await)
}

/// 토큰 내용과 무관한 시간으로 비교한다. 길이가 다르면 바로 불일치.
fn token_matches(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_must_match_exactly() {
        assert!(token_matches("op-secret", "op-secret"));
        assert!(!token_matches("op-secreT", "op-secret"));
        assert!(!token_matches("op-secret-longer", "op-secret"));
        assert!(!token_matches("", "op-secret"));
    }
}
