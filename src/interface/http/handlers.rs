//! HTTP 핸들러. 유스케이스 결과를 JSON/리다이렉트 응답으로 변환한다.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};
use url::Url;

use crate::application::usecases::test_prompt::PromptPreview;
use crate::domain::event::{ReviewPosted, ReviewStatusChanged};
use crate::domain::reply::ReplyOutcome;
use crate::domain::review::{CommentId, ProductId};
use crate::interface::composition::AppComposition;

/// Referer가 없거나 다른 호스트일 때 돌아갈 경로.
pub const DEFAULT_REDIRECT: &str = "/";
/// 수동 실행 결과 종류를 담는 응답 헤더.
pub const OUTCOME_HEADER: HeaderName = HeaderName::from_static("x-reply-outcome");

type ApiResult<T> = Result<T, (StatusCode, String)>;

/// 디스패치 결과 응답 본문.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeResponse {
    pub outcome: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<CommentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_at: Option<DateTime<Utc>>,
}

impl From<&ReplyOutcome> for OutcomeResponse {
    fn from(outcome: &ReplyOutcome) -> Self {
        let (reply_id, run_at) = match outcome {
            ReplyOutcome::Posted { reply_id, .. } => (Some(*reply_id), None),
            ReplyOutcome::Scheduled { run_at, .. } => (None, Some(*run_at)),
            ReplyOutcome::Skipped(_) | ReplyOutcome::Failed(_) => (None, None),
        };
        Self {
            outcome: outcome_kind(outcome).to_string(),
            message: outcome.to_string(),
            reply_id,
            run_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestPromptRequest {
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub review: String,
}

fn internal(err: anyhow::Error) -> (StatusCode, String) {
    error!("request failed: {err:#}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal error".to_string(),
    )
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") })),
    )
}

pub async fn review_posted(
    State(app): State<Arc<AppComposition>>,
    Json(event): Json<ReviewPosted>,
) -> ApiResult<Json<OutcomeResponse>> {
    let outcome = app
        .dispatch_usecase()
        .on_review_posted(&event)
        .await
        .map_err(internal)?;
    Ok(Json(OutcomeResponse::from(&outcome)))
}

pub async fn review_status(
    State(app): State<Arc<AppComposition>>,
    Json(event): Json<ReviewStatusChanged>,
) -> ApiResult<Json<OutcomeResponse>> {
    let outcome = app
        .dispatch_usecase()
        .on_status_changed(&event)
        .await
        .map_err(internal)?;
    Ok(Json(OutcomeResponse::from(&outcome)))
}

/// 운영자 수동 실행. 결과와 무관하게 이전 페이지로 되돌려 보낸다.
pub async fn manual_reply(
    State(app): State<Arc<AppComposition>>,
    Path(review_id): Path<CommentId>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let outcome = app
        .dispatch_usecase()
        .manual_trigger(review_id)
        .await
        .map_err(internal)?;
    let kind = outcome_kind(&outcome);
    info!(review_id, outcome = kind, "manual reply finished: {outcome}");

    let target = redirect_target(&headers);
    Ok((
        [(OUTCOME_HEADER, HeaderValue::from_static(kind))],
        Redirect::to(&target),
    )
        .into_response())
}

pub async fn test_prompt(
    State(app): State<Arc<AppComposition>>,
    Json(request): Json<TestPromptRequest>,
) -> ApiResult<Json<PromptPreview>> {
    let preview = app
        .test_prompt_usecase()
        .execute(request.product_id, &request.review)
        .await
        .map_err(internal)?;
    Ok(Json(preview))
}

fn outcome_kind(outcome: &ReplyOutcome) -> &'static str {
    match outcome {
        ReplyOutcome::Posted { .. } => "posted",
        ReplyOutcome::Scheduled { .. } => "scheduled",
        ReplyOutcome::Skipped(_) => "skipped",
        ReplyOutcome::Failed(_) => "failed",
    }
}

/// 같은 호스트의 Referer만 따른다. 상대 경로는 그대로 허용한다.
fn redirect_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        return DEFAULT_REDIRECT.to_string();
    };

    if referer.starts_with('/') && !referer.starts_with("//") {
        return referer.to_string();
    }

    let host = headers.get(header::HOST).and_then(|v| v.to_str().ok());
    match (Url::parse(referer), host) {
        (Ok(url), Some(host)) if authority(&url).as_deref() == Some(host) => referer.to_string(),
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

fn authority(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
