//! Provider HTTP API 호출 공용 유틸리티.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};

/// provider 호출 타임아웃(초).
pub const PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Provider API 호출용 기본 HTTP 클라이언트를 생성한다.
pub fn build_api_client() -> Client {
    // TLS 설정 실패 등 예외 상황에서는 기본 클라이언트로 폴백한다.
    // 폴백 시에도 요청 단위 타임아웃은 `send_raw`에서 다시 적용된다.
    Client::builder()
        .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// 전송 결과의 상태 코드와 본문 원문.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// 요청을 전송하고 본문을 문자열로 읽는다. 전송/읽기 실패는 사람이 읽을 메시지로 반환한다.
pub async fn send_raw(request: RequestBuilder) -> Result<RawResponse, String> {
    let response = request
        .timeout(Duration::from_secs(PROVIDER_TIMEOUT_SECS))
        .send()
        .await
        .map_err(describe_transport_error)?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| format!("failed to read provider response body: {err}"))?;

    Ok(RawResponse { status, body })
}

fn describe_transport_error(err: reqwest::Error) -> String {
    if err.is_timeout() {
        format!("provider request timed out after {PROVIDER_TIMEOUT_SECS}s")
    } else if err.is_connect() {
        format!("failed to connect to provider: {err}")
    } else {
        format!("provider request failed: {err}")
    }
}
