//! 외부 호출 없이 고정 템플릿으로 답글을 만드는 mock 전략.

use async_trait::async_trait;

use crate::application::ports::ReplyGenerator;
use crate::domain::context::ReviewContext;
use crate::domain::reply::GenerationError;

const FALLBACK_CUSTOMER_NAME: &str = "Dear customer";
const NEGATIVE_MARKERS: [&str; 2] = ["bad", "poor"];

pub struct MockGenerator;

#[async_trait]
impl ReplyGenerator for MockGenerator {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        context: &ReviewContext,
        _prompt: &str,
    ) -> Result<String, GenerationError> {
        Ok(mock_reply(context))
    }
}

/// 부정 표현이 있으면 사과 템플릿, 아니면 감사 템플릿을 반환한다.
pub fn mock_reply(context: &ReviewContext) -> String {
    let name = if context.customer_name.is_empty() {
        FALLBACK_CUSTOMER_NAME
    } else {
        context.customer_name.as_str()
    };
    let title = &context.product.title;

    if is_negative(&context.review_text) {
        format!(
            "Hi {name}, we're sorry to hear about your experience with {title}. \
             Please send your order number to our support so we can fix this right away."
        )
    } else {
        format!(
            "Hi {name}! Thanks for sharing your feedback about {title}. We truly appreciate it! \
             If you need any help or tips on using it, just let us know. Enjoy!"
        )
    }
}

fn is_negative(review_text: &str) -> bool {
    let lowered = review_text.to_lowercase();
    NEGATIVE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}
