//! 리뷰/상품/작성자 도메인 엔티티와 값 객체.

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

pub type CommentId = u64;
pub type ProductId = u64;
pub type UserId = u64;

/// 코멘트 승인 상태. 역직렬화는 플랫폼 상태 문자열(`unapproved`, `hold`, `1` ...)도 받는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Approved,
    #[default]
    Pending,
    Spam,
    Trash,
}

impl CommentStatus {
    /// 상태 문자열(approved/approve/1, unapproved/hold/0 ...)을 해석한다.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "approved" | "approve" | "1" => Some(Self::Approved),
            "pending" | "unapproved" | "hold" | "0" => Some(Self::Pending),
            "spam" => Some(Self::Spam),
            "trash" | "trashed" => Some(Self::Trash),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Spam => "spam",
            Self::Trash => "trash",
        }
    }
}

impl<'de> Deserialize<'de> for CommentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| de::Error::custom(format!("unknown comment status: {raw}")))
    }
}

/// 상품에 달린 코멘트. `parent_id == 0`이면 최상위 고객 리뷰, 아니면 답글이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub product_id: ProductId,
    #[serde(default)]
    pub parent_id: CommentId,
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub author_email: String,
    #[serde(default)]
    pub user_id: UserId,
    pub content: String,
    #[serde(default)]
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_top_level(&self) -> bool {
        self.parent_id == 0
    }

    pub fn is_approved(&self) -> bool {
        self.status == CommentStatus::Approved
    }
}

/// 상품 속성. 이름과 옵션 값이 모두 있으면 `name: v1, v2`, 아니면 원래 키로 표시된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

impl ProductAttribute {
    pub fn display_line(&self) -> String {
        match (&self.name, &self.options) {
            (Some(name), Some(options)) => format!("{}: {}", name, options.join(", ")),
            _ => self.key.clone(),
        }
    }
}

/// 외부 상품 저장소의 상품 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub attributes: Vec<ProductAttribute>,
    #[serde(default)]
    pub permalink: String,
}

/// 사이트 정체성(이름, 관리자 이메일).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteIdentity {
    pub name: String,
    pub admin_email: String,
}

/// 답글 작성자로 사용할 수 있는 사용자.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
}

/// 답글 게시 시 사용할 작성자 정보.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyAuthor {
    pub user_id: UserId,
    pub display_name: String,
    pub email: String,
}

/// 저장소에 새로 기록할 승인된 답글.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReply {
    pub product_id: ProductId,
    pub parent_id: CommentId,
    pub content: String,
    pub author: ReplyAuthor,
}

/// 답글 삽입 결과. 저장소가 리뷰당 하나의 승인 답글 제약을 원자적으로 검사한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyInsert {
    Inserted(CommentId),
    AlreadyReplied,
}
