//! 답글 생성 결과와 실패 분류.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::review::CommentId;

/// 생성 실패 시 호출자에게 노출되는 문자열은 항상 이 접두어로 시작한다.
pub const ERROR_PREFIX: &str = "ERROR:";

/// 답글 생성 실패 분류. `Display` 결과가 곧 `ERROR:` 센티널 문자열이다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("ERROR: EMPTY URL or API KEY")]
    MissingCredentials,
    #[error("ERROR: invalid provider URL ({0})")]
    InvalidEndpoint(String),
    #[error("ERROR: {0}")]
    Transport(String),
    #[error("ERROR: HTTP {status} - {reason}{}", debug_suffix(.detail))]
    Http {
        status: u16,
        reason: String,
        detail: Option<String>,
    },
    #[error("ERROR: Unrecognized response structure{}", debug_suffix(.detail))]
    UnrecognizedResponse { detail: Option<String> },
}

impl GenerationError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials | Self::InvalidEndpoint(_) => "configuration",
            Self::Transport(_) => "transport",
            Self::Http { .. } | Self::UnrecognizedResponse { .. } => "provider",
        }
    }
}

fn debug_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("\n{detail}"),
        None => String::new(),
    }
}

/// 답글을 만들지 않고 조용히 끝나는 조건.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Disabled,
    ReviewNotFound,
    NotProductReview,
    NotTopLevel,
    NotApproved,
    AlreadyReplied,
    EmptyReply,
}

impl SkipReason {
    pub fn message(self) -> &'static str {
        match self {
            Self::Disabled => "auto-reply disabled",
            Self::ReviewNotFound => "review not found",
            Self::NotProductReview => "not a product review",
            Self::NotTopLevel => "comment is a reply, not a review",
            Self::NotApproved => "review is not approved",
            Self::AlreadyReplied => "ALREADY REPLIED",
            Self::EmptyReply => "generated reply was empty",
        }
    }
}

/// 리뷰 하나에 대한 디스패치/생성 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyOutcome {
    Posted { reply_id: CommentId, text: String },
    Scheduled { review_id: CommentId, run_at: DateTime<Utc> },
    Skipped(SkipReason),
    Failed(GenerationError),
}

impl ReplyOutcome {
    pub fn is_posted(&self) -> bool {
        matches!(self, Self::Posted { .. })
    }
}

impl fmt::Display for ReplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Posted { text, .. } => f.write_str(text),
            Self::Scheduled { review_id, run_at } => {
                write!(f, "reply for review {review_id} scheduled at {}", run_at.to_rfc3339())
            }
            Self::Skipped(reason) => f.write_str(reason.message()),
            Self::Failed(err) => write!(f, "{err}"),
        }
    }
}
