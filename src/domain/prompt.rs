//! 리뷰 컨텍스트를 단일 지시문 프롬프트로 렌더링한다.
//!
//! 섹션 순서는 고정이며, 원본 데이터가 비어 있는 섹션은 헤더까지 통째로 생략한다.
//! 같은 컨텍스트는 항상 바이트 단위로 같은 프롬프트를 만든다.

use crate::domain::context::ReviewContext;

/// provider 호출 시 system 메시지로 보내는 고정 문구.
pub const SYSTEM_MESSAGE: &str = "You are a customer support assistant for an online store.";

const INSTRUCTIONS: &[&str] = &[
    "- Keep it friendly, helpful, and on-brand.",
    "- If the review is positive, express gratitude.",
    "- If there's an issue, apologize briefly and provide a clear next step (email/WhatsApp/order number/help article).",
    "- Avoid revealing internal policies not public on the site.",
    "- Write in the same language as the review.",
    "- One concise paragraph (2–5 sentences).",
];

pub fn compile_prompt(ctx: &ReviewContext) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "You are a helpful support assistant for a WooCommerce shop named \"{}\".",
        ctx.site_name
    ));
    lines.push(
        "Your task: reply to a product review as the shop in a warm, concise, and brand-aligned tone."
            .to_string(),
    );

    if !ctx.guidelines.is_empty() {
        lines.push(format!("Brand voice & guidelines:\n{}", ctx.guidelines));
    }

    if !ctx.prior_replies.is_empty() {
        lines.push(
            "Here are previous replies from this shop. Mirror their style and phrasing:".to_string(),
        );
        for reply in &ctx.prior_replies {
            lines.push(format!("- Example reply: {reply}"));
        }
    }

    let p = &ctx.product;
    lines.push("Product context:".to_string());
    lines.push(format!("- Title: {}", p.title));
    if !p.sku.is_empty() {
        lines.push(format!("- SKU: {}", p.sku));
    }
    if !p.price.is_empty() {
        lines.push(format!("- Price: {}", p.price));
    }
    if !p.short_description.is_empty() {
        lines.push(format!("- Short desc: {}", p.short_description));
    }
    if !p.description.is_empty() {
        lines.push(format!("- Details: {}", p.description));
    }
    let attributes: Vec<&str> = p
        .attributes
        .iter()
        .map(String::as_str)
        .filter(|a| !a.is_empty())
        .collect();
    if !attributes.is_empty() {
        lines.push(format!("- Attributes: {}", attributes.join(", ")));
    }

    if !ctx.policy_notes.is_empty() {
        lines.push(format!("Policy notes (if relevant): {}", ctx.policy_notes));
    }

    lines.push(format!(
        "Customer review (from {}):\n\"{}\"",
        ctx.customer_name, ctx.review_text
    ));

    lines.push("Instructions:".to_string());
    lines.extend(INSTRUCTIONS.iter().map(|line| line.to_string()));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::ProductSnapshot;

    fn minimal_context() -> ReviewContext {
        ReviewContext {
            site_name: "Mug House".to_string(),
            review_text: "Love it!".to_string(),
            customer_name: "Ana".to_string(),
            product: ProductSnapshot {
                title: "Blue Mug".to_string(),
                ..ProductSnapshot::default()
            },
            guidelines: String::new(),
            prior_replies: Vec::new(),
            policy_notes: String::new(),
        }
    }

    #[test]
    fn minimal_prompt_has_exact_shape() {
        let expected = [
            "You are a helpful support assistant for a WooCommerce shop named \"Mug House\".",
            "Your task: reply to a product review as the shop in a warm, concise, and brand-aligned tone.",
            "Product context:",
            "- Title: Blue Mug",
            "Customer review (from Ana):\n\"Love it!\"",
            "Instructions:",
            "- Keep it friendly, helpful, and on-brand.",
            "- If the review is positive, express gratitude.",
            "- If there's an issue, apologize briefly and provide a clear next step (email/WhatsApp/order number/help article).",
            "- Avoid revealing internal policies not public on the site.",
            "- Write in the same language as the review.",
            "- One concise paragraph (2–5 sentences).",
        ]
        .join("\n");

        assert_eq!(compile_prompt(&minimal_context()), expected);
    }

    #[test]
    fn omits_empty_guidelines_and_attributes() {
        let prompt = compile_prompt(&minimal_context());
        assert!(!prompt.contains("Brand voice"));
        assert!(!prompt.contains("Attributes"));
        assert!(!prompt.contains("Example reply"));
        assert!(!prompt.contains("Policy notes"));
        assert!(!prompt.contains("- SKU:"));
    }

    #[test]
    fn full_context_keeps_section_order() {
        let mut ctx = minimal_context();
        ctx.guidelines = "Friendly, no emojis.".to_string();
        ctx.prior_replies = vec!["Thanks a lot!".to_string(), "So glad!".to_string()];
        ctx.product.sku = "MUG-1".to_string();
        ctx.product.price = "12.50".to_string();
        ctx.product.short_description = "Ceramic mug".to_string();
        ctx.product.description = "Dishwasher safe".to_string();
        ctx.product.attributes = vec!["Color: Blue".to_string(), String::new()];
        ctx.policy_notes = "30 day returns".to_string();

        let prompt = compile_prompt(&ctx);
        let order = [
            "Brand voice & guidelines:\nFriendly, no emojis.",
            "- Example reply: Thanks a lot!",
            "- Example reply: So glad!",
            "Product context:",
            "- Title: Blue Mug",
            "- SKU: MUG-1",
            "- Price: 12.50",
            "- Short desc: Ceramic mug",
            "- Details: Dishwasher safe",
            "- Attributes: Color: Blue\n",
            "Policy notes (if relevant): 30 day returns",
            "Customer review (from Ana)",
            "Instructions:",
        ];
        let mut cursor = 0;
        for needle in order {
            let found = prompt[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("missing or out of order: {needle}"));
            cursor += found + needle.len();
        }
    }

    #[test]
    fn compile_is_deterministic() {
        let mut ctx = minimal_context();
        ctx.prior_replies = vec!["A".to_string(), "B".to_string()];
        assert_eq!(compile_prompt(&ctx), compile_prompt(&ctx.clone()));
    }
}
