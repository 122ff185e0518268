//! 도메인 정책(자동 답글 대상 판정, 답글 작성자 결정).

use crate::domain::reply::SkipReason;
use crate::domain::review::{Comment, ReplyAuthor, SiteIdentity, UserIdentity};

/// 자동 답글 대상인지 판정한다: 상품 리뷰이면서 최상위(답글이 아닌) 코멘트.
pub fn check_reviewable(comment: &Comment, product_known: bool) -> Result<(), SkipReason> {
    if comment.product_id == 0 || !product_known {
        return Err(SkipReason::NotProductReview);
    }
    if !comment.is_top_level() {
        return Err(SkipReason::NotTopLevel);
    }
    Ok(())
}

/// 게시 작성자를 결정한다.
/// 설정된 사용자 → 관리자 이메일과 일치하는 사용자 → 사이트 이름/관리자 이메일(user_id 0) 순.
pub fn resolve_reply_author(
    configured: Option<UserIdentity>,
    admin: Option<UserIdentity>,
    site: &SiteIdentity,
) -> ReplyAuthor {
    match configured.or(admin) {
        Some(user) => ReplyAuthor {
            user_id: user.id,
            display_name: user.display_name,
            email: user.email,
        },
        None => ReplyAuthor {
            user_id: 0,
            display_name: site.name.clone(),
            email: site.admin_email.clone(),
        },
    }
}
