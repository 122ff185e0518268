//! 리뷰 컨텍스트(사이트/상품/과거 답글) 준비 단계.

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::config::GenerationConfig;
use crate::application::ports::{CommentStore, SiteDirectory};
use crate::domain::context::{ReviewContext, ReviewInput};
use crate::domain::review::Product;

/// 저장소를 읽어 프롬프트용 컨텍스트를 만든다. 부수효과는 없다.
pub(crate) async fn load_review_context(
    comments: &dyn CommentStore,
    directory: &dyn SiteDirectory,
    config: &GenerationConfig,
    review: &ReviewInput,
    product: Option<&Product>,
) -> Result<ReviewContext> {
    let site = directory
        .site_identity()
        .await
        .context("failed to load site identity")?;

    let prior_replies = match product {
        Some(product) if config.sample_count > 0 => comments
            .recent_approved_replies(product.id, config.sample_count)
            .await
            .with_context(|| format!("failed to load previous replies for product {}", product.id))?
            .into_iter()
            .take(config.sample_count)
            .map(|c| c.content)
            .collect(),
        _ => Vec::new(),
    };
    debug!(samples = prior_replies.len(), "collected previous replies for tone");

    Ok(ReviewContext::build(
        &site,
        review,
        product,
        &config.guidelines,
        &config.policy_notes,
        prior_replies,
    ))
}
