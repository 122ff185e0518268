//! replypilot library root.
//! Clean Architecture + DDD 계층을 외부에 노출한다.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interface;

use application::usecases::inspect_config::InspectConfigUseCase;
use application::usecases::test_prompt::PromptPreview;
use domain::reply::ReplyOutcome;
use domain::review::{CommentId, ProductId};
use infrastructure::adapters::JsonConfigRepository;
use infrastructure::store::MemoryStore;
use interface::composition::{AppComposition, run_due_replies};

/// 이벤트 수신/운영자 HTTP 서버와 지연 답글 워커를 함께 실행한다.
pub async fn serve(addr: SocketAddr, store_path: &Path) -> Result<()> {
    let (app, due) = AppComposition::new(MemoryStore::open(store_path)?);
    let app = Arc::new(app);
    tokio::spawn(run_due_replies(Arc::clone(&app), due));
    interface::http::serve(app, addr).await
}

/// 운영자 수동 실행(지연/활성화 무시, 중복 검사 유지).
pub async fn reply_now(review_id: CommentId, store_path: &Path) -> Result<ReplyOutcome> {
    let (app, _due) = AppComposition::new(MemoryStore::open(store_path)?);
    app.dispatch_usecase().manual_trigger(review_id).await
}

/// 저장 없이 프롬프트와 답글을 미리 본다.
pub async fn test_prompt(
    product_id: Option<ProductId>,
    review: &str,
    store_path: &Path,
) -> Result<PromptPreview> {
    let (app, _due) = AppComposition::new(MemoryStore::open(store_path)?);
    app.test_prompt_usecase().execute(product_id, review).await
}

/// 설정 점검 JSON 출력용 함수.
pub fn inspect_config_pretty_json() -> Result<String> {
    InspectConfigUseCase {
        config_repo: &JsonConfigRepository,
    }
    .execute()
}
