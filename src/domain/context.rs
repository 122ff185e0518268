//! 프롬프트 입력이 되는 리뷰 컨텍스트 구성 규칙.

use serde::Serialize;

use crate::domain::review::{Comment, Product, SiteIdentity};
use crate::domain::sanitize::strip_markup;

/// 컨텍스트 구성 시점의 상품 읽기 전용 스냅샷.
/// 상품이 없으면 모든 필드가 빈 값이므로 템플릿 단계가 항상 성립한다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductSnapshot {
    pub title: String,
    pub sku: String,
    pub short_description: String,
    pub description: String,
    pub price: String,
    pub attributes: Vec<String>,
    pub permalink: String,
}

impl ProductSnapshot {
    pub fn from_product(product: Option<&Product>) -> Self {
        let Some(product) = product else {
            return Self::default();
        };

        Self {
            title: product.title.clone(),
            sku: product.sku.clone(),
            short_description: strip_markup(&product.short_description),
            description: strip_markup(&product.description),
            price: product.price.clone(),
            attributes: product
                .attributes
                .iter()
                .map(|attr| attr.display_line())
                .collect(),
            permalink: product.permalink.clone(),
        }
    }
}

/// 고객 리뷰 원문과 작성자 이름.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewInput {
    pub customer_name: String,
    pub text: String,
}

impl From<&Comment> for ReviewInput {
    fn from(comment: &Comment) -> Self {
        Self {
            customer_name: comment.author_name.clone(),
            text: comment.content.clone(),
        }
    }
}

/// 프롬프트 컴파일러가 소비하는 불변 컨텍스트.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewContext {
    pub site_name: String,
    pub review_text: String,
    pub customer_name: String,
    pub product: ProductSnapshot,
    pub guidelines: String,
    /// 최신순, 최대 sample_count개
    pub prior_replies: Vec<String>,
    pub policy_notes: String,
}

impl ReviewContext {
    /// 리뷰/상품/사이트/과거 답글로 컨텍스트를 만든다. 과거 답글은 호출자가 이미 제한/정렬한 값이다.
    pub fn build(
        site: &SiteIdentity,
        review: &ReviewInput,
        product: Option<&Product>,
        guidelines: &str,
        policy_notes: &str,
        prior_replies: Vec<String>,
    ) -> Self {
        Self {
            site_name: site.name.clone(),
            review_text: strip_markup(&review.text),
            customer_name: strip_markup(&review.customer_name),
            product: ProductSnapshot::from_product(product),
            guidelines: guidelines.trim().to_string(),
            prior_replies: prior_replies
                .iter()
                .map(|reply| strip_markup(reply))
                .collect(),
            policy_notes: policy_notes.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review::ProductAttribute;

    fn site() -> SiteIdentity {
        SiteIdentity {
            name: "Mug House".to_string(),
            admin_email: "owner@mughouse.test".to_string(),
        }
    }

    #[test]
    fn missing_product_yields_empty_snapshot() {
        let review = ReviewInput {
            customer_name: "Ana".to_string(),
            text: "Nice".to_string(),
        };
        let ctx = ReviewContext::build(&site(), &review, None, "", "", Vec::new());
        assert_eq!(ctx.product, ProductSnapshot::default());
        assert!(ctx.product.attributes.is_empty());
    }

    #[test]
    fn strips_markup_from_review_and_product_text() {
        let product = Product {
            id: 7,
            title: "Blue Mug".to_string(),
            sku: "MUG-1".to_string(),
            short_description: "<p>Short</p>".to_string(),
            description: "<div>Long <em>text</em></div>".to_string(),
            price: "12.50".to_string(),
            attributes: vec![
                ProductAttribute {
                    key: "pa_size".to_string(),
                    name: Some("Size".to_string()),
                    options: Some(vec!["S".to_string(), "L".to_string()]),
                },
                ProductAttribute {
                    key: "custom".to_string(),
                    name: None,
                    options: None,
                },
            ],
            permalink: "https://mughouse.test/blue-mug".to_string(),
        };
        let review = ReviewInput {
            customer_name: "<b>Ana</b>".to_string(),
            text: "<p>Great <i>mug</i></p>".to_string(),
        };
        let ctx = ReviewContext::build(
            &site(),
            &review,
            Some(&product),
            "  Be warm.  ",
            "",
            vec!["<p>Thanks!</p>".to_string()],
        );

        assert_eq!(ctx.review_text, "Great mug");
        assert_eq!(ctx.customer_name, "Ana");
        assert_eq!(ctx.product.short_description, "Short");
        assert_eq!(ctx.product.description, "Long text");
        assert_eq!(ctx.product.attributes, vec!["Size: S, L", "custom"]);
        assert_eq!(ctx.guidelines, "Be warm.");
        assert_eq!(ctx.prior_replies, vec!["Thanks!"]);
    }
}
