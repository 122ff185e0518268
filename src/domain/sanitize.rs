//! 마크업 제거와 생성 답글 후처리 규칙.

use std::sync::LazyLock;

use regex::Regex;

/// 민감 정보 노출을 막기 위해 가리는 단어 목록.
pub const REDACTED_TERMS: &[&str] = &["credit card", "password"];
pub const REDACTION_MASK: &str = "****";

static SCRIPT_OR_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("valid script/style pattern")
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static DENYLIST: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = REDACTED_TERMS
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){alternation}")).expect("valid denylist pattern")
});

/// script/style 블록과 모든 태그를 제거하고 앞뒤 공백을 정리한다.
pub fn strip_markup(text: &str) -> String {
    let without_blocks = SCRIPT_OR_STYLE.replace_all(text, "");
    TAG.replace_all(&without_blocks, "").trim().to_string()
}

/// 생성된 답글을 게시 가능한 한 줄 텍스트로 정규화한다.
/// 두 번 적용해도 결과가 같다.
pub fn sanitize_reply(text: &str) -> String {
    let stripped = strip_markup(text);
    let collapsed = WHITESPACE.replace_all(&stripped, " ");
    DENYLIST
        .replace_all(collapsed.trim(), REDACTION_MASK)
        .into_owned()
}
