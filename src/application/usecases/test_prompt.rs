//! 운영자 진단용: 상품 ID와 샘플 리뷰로 프롬프트와 답글을 미리 본다(저장하지 않음).

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::ports::{
    CommentStore, ConfigRepository, GeneratorFactory, ProductCatalog, SiteDirectory,
};
use crate::application::usecases::generate_reply::{generate, load_review_context};
use crate::domain::context::ReviewInput;
use crate::domain::review::ProductId;

pub const TEST_CUSTOMER_NAME: &str = "Test Customer";

/// 진단 결과. 생성 실패 시 `reply`는 `ERROR:` 문자열이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptPreview {
    pub prompt: String,
    pub reply: String,
}

pub struct TestPromptUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub comments: &'a dyn CommentStore,
    pub products: &'a dyn ProductCatalog,
    pub directory: &'a dyn SiteDirectory,
    pub generator_factory: &'a dyn GeneratorFactory,
}

impl<'a> TestPromptUseCase<'a> {
    /// 설정과 무관하게(비활성 상태여도) 프롬프트 구성과 생성만 수행한다.
    pub async fn execute(&self, product_id: Option<ProductId>, review: &str) -> Result<PromptPreview> {
        let config = self
            .config_repo
            .load()
            .context("failed to load replypilot config")?
            .generation();

        let product = match product_id.filter(|id| *id > 0) {
            Some(id) => self
                .products
                .get_product(id)
                .await
                .with_context(|| format!("failed to load product {id}"))?,
            None => None,
        };

        let input = ReviewInput {
            customer_name: TEST_CUSTOMER_NAME.to_string(),
            text: review.to_string(),
        };
        let ctx = load_review_context(
            self.comments,
            self.directory,
            &config,
            &input,
            product.as_ref(),
        )
        .await?;

        let (prompt, result) = generate(self.generator_factory, &config, &ctx).await;
        let reply = match result {
            Ok(text) => text,
            Err(err) => err.to_string(),
        };

        Ok(PromptPreview { prompt, reply })
    }
}
