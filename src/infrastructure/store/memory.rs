//! 메모리 기반 코멘트/상품/사이트 저장소.
//!
//! 답글 중복 검사와 삽입은 하나의 잠금 안에서 수행되어 동시 트리거에도 리뷰당 답글이 하나로 유지된다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ports::{CommentStore, ProductCatalog, SiteDirectory};
use crate::domain::review::{
    Comment, CommentId, CommentStatus, NewReply, Product, ProductId, ReplyInsert, SiteIdentity,
    UserId, UserIdentity,
};

/// 저장소 파일 형식.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub site: SiteIdentity,
    #[serde(default)]
    pub users: Vec<UserIdentity>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

pub struct MemoryStore {
    state: Mutex<StoreSnapshot>,
    persist_path: Option<PathBuf>,
}

impl MemoryStore {
    pub fn new(snapshot: StoreSnapshot) -> Self {
        Self {
            state: Mutex::new(snapshot),
            persist_path: None,
        }
    }

    /// 스냅샷 파일을 읽고, 답글이 추가될 때마다 같은 파일에 다시 쓴다.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read store snapshot: {}", path.display()))?;
        let snapshot: StoreSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse store snapshot: {}", path.display()))?;
        debug!(
            path = %path.display(),
            products = snapshot.products.len(),
            comments = snapshot.comments.len(),
            "store snapshot loaded"
        );

        Ok(Self {
            state: Mutex::new(snapshot),
            persist_path: Some(path.to_path_buf()),
        })
    }

    /// 현재 상태 사본.
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(self.lock()?.clone())
    }

    /// 특정 리뷰에 달린 답글 목록(입력 순서).
    pub fn replies_to(&self, parent_id: CommentId) -> Result<Vec<Comment>> {
        Ok(self
            .lock()?
            .comments
            .iter()
            .filter(|c| c.parent_id == parent_id)
            .cloned()
            .collect())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreSnapshot>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("store state lock poisoned"))
    }

    fn persist(&self, snapshot: &StoreSnapshot) -> Result<()> {
        let Some(path) = &self.persist_path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write store snapshot: {}", path.display()))
    }
}

fn is_approved_reply_to(comment: &Comment, parent_id: CommentId) -> bool {
    comment.parent_id == parent_id && comment.is_approved()
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn get_comment(&self, id: CommentId) -> Result<Option<Comment>> {
        Ok(self.lock()?.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn has_approved_reply(&self, parent_id: CommentId) -> Result<bool> {
        Ok(self
            .lock()?
            .comments
            .iter()
            .any(|c| is_approved_reply_to(c, parent_id)))
    }

    async fn recent_approved_replies(
        &self,
        product_id: ProductId,
        limit: usize,
    ) -> Result<Vec<Comment>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let state = self.lock()?;
        let mut replies: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.product_id == product_id && !c.is_top_level() && c.is_approved())
            .cloned()
            .collect();
        replies.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        replies.truncate(limit);
        Ok(replies)
    }

    async fn insert_reply(&self, reply: NewReply) -> Result<ReplyInsert> {
        let mut state = self.lock()?;
        if state
            .comments
            .iter()
            .any(|c| is_approved_reply_to(c, reply.parent_id))
        {
            return Ok(ReplyInsert::AlreadyReplied);
        }

        let id = state.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        state.comments.push(Comment {
            id,
            product_id: reply.product_id,
            parent_id: reply.parent_id,
            author_name: reply.author.display_name,
            author_email: reply.author.email,
            user_id: reply.author.user_id,
            content: reply.content,
            status: CommentStatus::Approved,
            created_at: Utc::now(),
        });
        if let Err(err) = self.persist(&state) {
            state.comments.pop();
            return Err(err);
        }

        Ok(ReplyInsert::Inserted(id))
    }
}

#[async_trait]
impl ProductCatalog for MemoryStore {
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.lock()?.products.iter().find(|p| p.id == id).cloned())
    }
}

#[async_trait]
impl SiteDirectory for MemoryStore {
    async fn site_identity(&self) -> Result<SiteIdentity> {
        Ok(self.lock()?.site.clone())
    }

    async fn user_by_id(&self, id: UserId) -> Result<Option<UserIdentity>> {
        Ok(self.lock()?.users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<UserIdentity>> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }
}
