//! 외부 플랫폼에서 들어오는 리뷰 이벤트.

use serde::Deserialize;

use crate::domain::review::{Comment, CommentId, CommentStatus};

/// 새 리뷰가 게시됨. `approved`는 게시 즉시 승인되었는지 여부.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewPosted {
    pub review_id: CommentId,
    #[serde(default)]
    pub approved: bool,
}

/// 리뷰 상태 전이(예: pending → approved).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReviewStatusChanged {
    pub old_status: CommentStatus,
    pub new_status: CommentStatus,
    pub review: Comment,
}
