//! 애플리케이션 계층이 의존하는 포트(추상 인터페이스) 모음.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::config::{Config, GenerationConfig};
use crate::domain::context::ReviewContext;
use crate::domain::reply::GenerationError;
use crate::domain::review::{
    Comment, CommentId, NewReply, Product, ProductId, ReplyInsert, SiteIdentity, UserId,
    UserIdentity,
};

/// 설정 로딩/점검을 담당하는 저장소 포트.
pub trait ConfigRepository: Send + Sync {
    /// 비밀값(env 등)까지 해석된 설정 레코드를 반환한다.
    fn load(&self) -> Result<Config>;
    fn inspect_pretty_json(&self) -> Result<String>;
}

/// 리뷰/답글 코멘트 저장소 포트.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn get_comment(&self, id: CommentId) -> Result<Option<Comment>>;
    /// 해당 리뷰에 승인된 자식 답글이 하나라도 있는지 확인한다.
    async fn has_approved_reply(&self, parent_id: CommentId) -> Result<bool>;
    /// 같은 상품의 승인된 답글(최상위 제외)을 최신순으로 최대 `limit`개 조회한다.
    async fn recent_approved_replies(&self, product_id: ProductId, limit: usize)
    -> Result<Vec<Comment>>;
    /// 승인 답글을 기록한다. 이미 승인 답글이 있으면 `AlreadyReplied`를 반환해야 한다.
    async fn insert_reply(&self, reply: NewReply) -> Result<ReplyInsert>;
}

/// 상품 조회 포트. 상품이 아닌 게시물은 `None`이다.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;
}

/// 사이트 정체성과 사용자 조회 포트.
#[async_trait]
pub trait SiteDirectory: Send + Sync {
    async fn site_identity(&self) -> Result<SiteIdentity>;
    async fn user_by_id(&self, id: UserId) -> Result<Option<UserIdentity>>;
    async fn user_by_email(&self, email: &str) -> Result<Option<UserIdentity>>;
}

/// 리뷰 ID 기준 일회성 지연 실행 포트. 예약 후 취소는 지원하지 않는다.
pub trait ReplyScheduler: Send + Sync {
    /// 예약 시각을 반환한다. 같은 리뷰가 이미 대기 중이면 기존 예약을 유지한다.
    fn schedule_once(&self, review_id: CommentId, delay: Duration) -> Result<DateTime<Utc>>;
}

/// 답글 생성 전략 포트(provider 호출 / mock).
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    fn id(&self) -> &'static str;
    async fn generate(&self, context: &ReviewContext, prompt: &str)
    -> Result<String, GenerationError>;
}

/// 설정에 맞는 생성 전략을 구성하는 팩토리 포트.
pub trait GeneratorFactory: Send + Sync {
    fn build(&self, config: &GenerationConfig) -> Box<dyn ReplyGenerator>;
}
