//! 리뷰 이벤트를 받아 즉시/지연 답글 실행을 결정하는 디스패치 유스케이스.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::application::config::GenerationConfig;
use crate::application::ports::ReplyScheduler;
use crate::application::usecases::generate_reply::GenerateReplyUseCase;
use crate::domain::event::{ReviewPosted, ReviewStatusChanged};
use crate::domain::policy::check_reviewable;
use crate::domain::reply::{ReplyOutcome, SkipReason};
use crate::domain::review::{Comment, CommentId, CommentStatus};

/// 승인 이벤트 → (대상 판정) → {건너뜀 | 지연 예약 | 즉시 생성/게시}.
pub struct DispatchReplyUseCase<'a> {
    pub generate: GenerateReplyUseCase<'a>,
    pub scheduler: &'a dyn ReplyScheduler,
}

impl<'a> DispatchReplyUseCase<'a> {
    /// 리뷰 게시 이벤트. 게시 즉시 승인된 최상위 상품 리뷰만 처리한다.
    pub async fn on_review_posted(&self, event: &ReviewPosted) -> Result<ReplyOutcome> {
        let config = self.load_config()?;
        if !config.enabled {
            return Ok(ReplyOutcome::Skipped(SkipReason::Disabled));
        }

        let Some(review) = self
            .generate
            .comments
            .get_comment(event.review_id)
            .await
            .with_context(|| format!("failed to load review {}", event.review_id))?
        else {
            return Ok(ReplyOutcome::Skipped(SkipReason::ReviewNotFound));
        };

        if let Err(reason) = self.check_target(&review).await? {
            return Ok(ReplyOutcome::Skipped(reason));
        }
        if !event.approved {
            debug!(review_id = event.review_id, "posted review awaits moderation");
            return Ok(ReplyOutcome::Skipped(SkipReason::NotApproved));
        }

        self.dispatch(&config, event.review_id).await
    }

    /// 리뷰 상태 전이 이벤트. 새 상태가 approved일 때만 처리한다.
    pub async fn on_status_changed(&self, event: &ReviewStatusChanged) -> Result<ReplyOutcome> {
        let config = self.load_config()?;
        if !config.enabled {
            return Ok(ReplyOutcome::Skipped(SkipReason::Disabled));
        }

        if let Err(reason) = self.check_target(&event.review).await? {
            return Ok(ReplyOutcome::Skipped(reason));
        }
        if event.new_status != CommentStatus::Approved {
            debug!(
                review_id = event.review.id,
                from = event.old_status.code(),
                to = event.new_status.code(),
                "status change ignored"
            );
            return Ok(ReplyOutcome::Skipped(SkipReason::NotApproved));
        }

        self.dispatch(&config, event.review.id).await
    }

    /// 운영자 수동 실행. 활성화 여부와 지연을 무시하지만 중복 답글 검사는 그대로 적용된다.
    pub async fn manual_trigger(&self, review_id: CommentId) -> Result<ReplyOutcome> {
        let config = self.load_config()?;
        info!(review_id, "manual reply requested");
        self.generate.execute_with(&config, review_id).await
    }

    /// 지연이 설정되어 있으면 (이미 답글이 없을 때) 예약하고, 아니면 바로 생성/게시한다.
    pub async fn dispatch(
        &self,
        config: &GenerationConfig,
        review_id: CommentId,
    ) -> Result<ReplyOutcome> {
        if config.reply_delay_seconds > 0 {
            if self
                .generate
                .comments
                .has_approved_reply(review_id)
                .await
                .with_context(|| format!("failed to check replies for review {review_id}"))?
            {
                debug!(review_id, "review already answered, nothing to schedule");
                return Ok(ReplyOutcome::Skipped(SkipReason::AlreadyReplied));
            }
            let run_at = self
                .scheduler
                .schedule_once(review_id, Duration::from_secs(config.reply_delay_seconds))
                .with_context(|| format!("failed to schedule reply for review {review_id}"))?;
            info!(review_id, run_at = %run_at.to_rfc3339(), "reply scheduled");
            return Ok(ReplyOutcome::Scheduled { review_id, run_at });
        }

        self.generate.execute_with(config, review_id).await
    }

    fn load_config(&self) -> Result<GenerationConfig> {
        Ok(self
            .generate
            .config_repo
            .load()
            .context("failed to load replypilot config")?
            .generation())
    }

    async fn check_target(&self, review: &Comment) -> Result<Result<(), SkipReason>> {
        let product_known = self
            .generate
            .products
            .get_product(review.product_id)
            .await
            .with_context(|| format!("failed to load product {}", review.product_id))?
            .is_some();
        Ok(check_reviewable(review, product_known))
    }
}
