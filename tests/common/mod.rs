#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use replypilot::application::config::{Config, GenerationConfig};
use replypilot::application::ports::{GeneratorFactory, ReplyGenerator};
use replypilot::domain::context::ReviewContext;
use replypilot::domain::reply::GenerationError;
use replypilot::domain::review::{
    Comment, CommentStatus, Product, ProductAttribute, SiteIdentity, UserIdentity,
};
use replypilot::infrastructure::adapters::{GeneratorFactoryAdapter, StaticConfigRepository};
use replypilot::infrastructure::scheduler::DueReplies;
use replypilot::infrastructure::store::{MemoryStore, StoreSnapshot};
use replypilot::interface::composition::AppComposition;

pub const PRODUCT_ID: u64 = 7;
pub const OWNER_ID: u64 = 1;
pub const POOR_REVIEW: u64 = 100;
pub const HAPPY_REVIEW: u64 = 101;
pub const PENDING_REVIEW: u64 = 102;
pub const EXISTING_REPLY: u64 = 103;
pub const ORPHAN_REVIEW: u64 = 104;

pub fn comment(
    id: u64,
    product_id: u64,
    parent_id: u64,
    content: &str,
    status: CommentStatus,
    minutes: i64,
) -> Comment {
    Comment {
        id,
        product_id,
        parent_id,
        author_name: if parent_id == 0 { "Ana" } else { "Mug House" }.to_string(),
        author_email: "ana@example.com".to_string(),
        user_id: 0,
        content: content.to_string(),
        status,
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes),
    }
}

/// Blue Mug 상품 하나와 리뷰 몇 개가 있는 상점.
pub fn snapshot() -> StoreSnapshot {
    StoreSnapshot {
        site: SiteIdentity {
            name: "Mug House".to_string(),
            admin_email: "owner@mughouse.test".to_string(),
        },
        users: vec![UserIdentity {
            id: OWNER_ID,
            display_name: "Mug House Team".to_string(),
            email: "owner@mughouse.test".to_string(),
        }],
        products: vec![Product {
            id: PRODUCT_ID,
            title: "Blue Mug".to_string(),
            sku: "MUG-BLUE".to_string(),
            short_description: "<p>A sturdy blue mug.</p>".to_string(),
            description: String::new(),
            price: "12.50".to_string(),
            attributes: vec![ProductAttribute {
                key: "pa_size".to_string(),
                name: Some("Size".to_string()),
                options: Some(vec!["350ml".to_string()]),
            }],
            permalink: "https://mughouse.test/blue-mug".to_string(),
        }],
        comments: vec![
            comment(POOR_REVIEW, PRODUCT_ID, 0, "This is poor quality", CommentStatus::Approved, 0),
            comment(HAPPY_REVIEW, PRODUCT_ID, 0, "Love it!", CommentStatus::Approved, 1),
            comment(PENDING_REVIEW, PRODUCT_ID, 0, "Nice enough", CommentStatus::Pending, 2),
            comment(EXISTING_REPLY, PRODUCT_ID, PENDING_REVIEW, "<p>Thanks a lot!</p>", CommentStatus::Approved, 3),
            comment(ORPHAN_REVIEW, 999, 0, "Is this the blog?", CommentStatus::Approved, 4),
        ],
    }
}

/// 지연 없는 mock 모드 설정.
pub fn mock_config() -> Config {
    Config {
        mock_mode: Some(true),
        delay_seconds: Some(0),
        ..Config::default()
    }
}

pub fn app(config: Config) -> (AppComposition, DueReplies) {
    app_with(config, snapshot())
}

pub fn app_with(config: Config, snapshot: StoreSnapshot) -> (AppComposition, DueReplies) {
    AppComposition::with_parts(
        Box::new(StaticConfigRepository::new(config)),
        MemoryStore::new(snapshot),
        Box::new(GeneratorFactoryAdapter),
    )
}

/// 고정 답글을 돌려주며 받은 컨텍스트와 프롬프트를 기록하는 생성기.
#[derive(Clone)]
pub struct ScriptedFactory {
    pub reply: Result<String, GenerationError>,
    pub seen: Arc<Mutex<Vec<(ReviewContext, String)>>>,
}

impl ScriptedFactory {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            seen: Arc::default(),
        }
    }

    pub fn contexts(&self) -> Vec<ReviewContext> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(|(ctx, _)| ctx.clone())
            .collect()
    }
}

impl GeneratorFactory for ScriptedFactory {
    fn build(&self, _config: &GenerationConfig) -> Box<dyn ReplyGenerator> {
        Box::new(self.clone())
    }
}

#[async_trait]
impl ReplyGenerator for ScriptedFactory {
    fn id(&self) -> &'static str {
        "scripted"
    }

    async fn generate(
        &self,
        context: &ReviewContext,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        self.seen
            .lock()
            .unwrap()
            .push((context.clone(), prompt.to_string()));
        self.reply.clone()
    }
}

pub fn scripted_app(config: Config, factory: &ScriptedFactory) -> (AppComposition, DueReplies) {
    AppComposition::with_parts(
        Box::new(StaticConfigRepository::new(config)),
        MemoryStore::new(snapshot()),
        Box::new(factory.clone()),
    )
}
