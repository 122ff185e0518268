//! 작성자 결정 및 답글 게시 단계.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::config::GenerationConfig;
use crate::application::usecases::generate_reply::GenerateReplyUseCase;
use crate::domain::policy::resolve_reply_author;
use crate::domain::reply::{ReplyOutcome, SkipReason};
use crate::domain::review::{Comment, NewReply, ReplyAuthor, ReplyInsert};

/// 설정된 사용자 ID 또는 관리자 이메일로 게시 작성자를 결정한다.
pub(super) async fn resolve_author(
    use_case: &GenerateReplyUseCase<'_>,
    config: &GenerationConfig,
) -> Result<ReplyAuthor> {
    let site = use_case
        .directory
        .site_identity()
        .await
        .context("failed to load site identity")?;

    let configured = if config.author_user_id > 0 {
        let user = use_case
            .directory
            .user_by_id(config.author_user_id)
            .await
            .context("failed to look up configured reply author")?;
        if user.is_none() {
            warn!(
                user_id = config.author_user_id,
                "configured reply author not found; falling back to admin identity"
            );
        }
        user
    } else {
        None
    };

    let admin = if configured.is_none() && !site.admin_email.is_empty() {
        use_case
            .directory
            .user_by_email(&site.admin_email)
            .await
            .context("failed to look up admin identity")?
    } else {
        None
    };

    Ok(resolve_reply_author(configured, admin, &site))
}

/// 정규화된 답글을 리뷰의 승인된 자식 코멘트로 기록한다.
pub(super) async fn post_reply(
    use_case: &GenerateReplyUseCase<'_>,
    config: &GenerationConfig,
    review: &Comment,
    text: String,
) -> Result<ReplyOutcome> {
    let author = resolve_author(use_case, config).await?;
    let reply = NewReply {
        product_id: review.product_id,
        parent_id: review.id,
        content: text.clone(),
        author,
    };

    match use_case
        .comments
        .insert_reply(reply)
        .await
        .with_context(|| format!("failed to insert reply for review {}", review.id))?
    {
        ReplyInsert::Inserted(reply_id) => {
            info!(review_id = review.id, reply_id, "reply posted");
            Ok(ReplyOutcome::Posted { reply_id, text })
        }
        ReplyInsert::AlreadyReplied => {
            info!(review_id = review.id, "another trigger replied first; discarding");
            Ok(ReplyOutcome::Skipped(SkipReason::AlreadyReplied))
        }
    }
}
