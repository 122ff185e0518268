//! 리뷰 하나에 대해 컨텍스트 구성 → 프롬프트 → 생성 → 정규화 → 게시를 수행하는 유스케이스.

mod context;
mod publish;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::config::GenerationConfig;
use crate::application::ports::{
    CommentStore, ConfigRepository, GeneratorFactory, ProductCatalog, SiteDirectory,
};
use crate::domain::context::{ReviewContext, ReviewInput};
use crate::domain::policy::check_reviewable;
use crate::domain::prompt::compile_prompt;
use crate::domain::reply::{GenerationError, ReplyOutcome, SkipReason};
use crate::domain::review::CommentId;
use crate::domain::sanitize::sanitize_reply;

pub(crate) use context::load_review_context;
use publish::post_reply;

/// 답글 생성과 게시 전체 흐름을 조율한다.
pub struct GenerateReplyUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
    pub comments: &'a dyn CommentStore,
    pub products: &'a dyn ProductCatalog,
    pub directory: &'a dyn SiteDirectory,
    pub generator_factory: &'a dyn GeneratorFactory,
}

impl<'a> GenerateReplyUseCase<'a> {
    /// 설정을 새로 읽어 실행한다(지연 예약 콜백 진입점).
    pub async fn execute(&self, review_id: CommentId) -> Result<ReplyOutcome> {
        let config = self
            .config_repo
            .load()
            .context("failed to load replypilot config")?
            .generation();
        self.execute_with(&config, review_id).await
    }

    /// 이미 읽은 설정으로 실행한다.
    /// 중복 답글 검사는 생성 전에 한 번, 게시 시 저장소 제약으로 한 번 더 이뤄진다.
    pub async fn execute_with(
        &self,
        config: &GenerationConfig,
        review_id: CommentId,
    ) -> Result<ReplyOutcome> {
        let Some(review) = self
            .comments
            .get_comment(review_id)
            .await
            .with_context(|| format!("failed to load review {review_id}"))?
        else {
            info!(review_id, "review not found; skipping");
            return Ok(ReplyOutcome::Skipped(SkipReason::ReviewNotFound));
        };

        let product = self
            .products
            .get_product(review.product_id)
            .await
            .with_context(|| format!("failed to load product {}", review.product_id))?;

        if let Err(reason) = check_reviewable(&review, product.is_some()) {
            info!(review_id, reason = reason.message(), "not eligible; skipping");
            return Ok(ReplyOutcome::Skipped(reason));
        }

        if self
            .comments
            .has_approved_reply(review_id)
            .await
            .with_context(|| format!("failed to check existing replies for review {review_id}"))?
        {
            info!(review_id, "already replied; skipping");
            return Ok(ReplyOutcome::Skipped(SkipReason::AlreadyReplied));
        }

        let ctx = load_review_context(
            self.comments,
            self.directory,
            config,
            &ReviewInput::from(&review),
            product.as_ref(),
        )
        .await?;

        let raw = match generate(self.generator_factory, config, &ctx).await.1 {
            Ok(text) => text,
            Err(err) => {
                warn!(review_id, kind = err.kind(), "reply generation failed: {err}");
                return Ok(ReplyOutcome::Failed(err));
            }
        };

        let text = sanitize_reply(&raw);
        if text.is_empty() {
            warn!(review_id, "generated reply is empty after sanitizing; nothing posted");
            return Ok(ReplyOutcome::Skipped(SkipReason::EmptyReply));
        }

        post_reply(self, config, &review, text).await
    }
}

/// 프롬프트를 컴파일하고 설정된 전략으로 답글을 생성한다.
pub(crate) async fn generate(
    factory: &dyn GeneratorFactory,
    config: &GenerationConfig,
    ctx: &ReviewContext,
) -> (String, Result<String, GenerationError>) {
    let prompt = compile_prompt(ctx);
    let generator = factory.build(config);
    info!(strategy = generator.id(), "generating reply");
    let result = generator.generate(ctx, &prompt).await;
    (prompt, result)
}
