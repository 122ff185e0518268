//! tokio 타이머 기반 일회성 답글 예약.
//!
//! 예약 시각이 되면 리뷰 ID를 채널로 흘려보내고, 소비 쪽 워커가 생성/게시를 실행한다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::debug;

use crate::application::ports::ReplyScheduler;
use crate::domain::review::CommentId;

type PendingJobs = Arc<Mutex<HashMap<CommentId, DateTime<Utc>>>>;

pub struct TokioReplyScheduler {
    sender: mpsc::UnboundedSender<CommentId>,
    pending: PendingJobs,
}

/// 예약 시각이 도래한 리뷰 ID 수신 측.
pub struct DueReplies {
    receiver: mpsc::UnboundedReceiver<CommentId>,
    pending: PendingJobs,
}

impl TokioReplyScheduler {
    pub fn new() -> (Self, DueReplies) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pending = PendingJobs::default();
        (
            Self {
                sender,
                pending: Arc::clone(&pending),
            },
            DueReplies { receiver, pending },
        )
    }

    /// 아직 실행되지 않은 예약 수.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|jobs| jobs.len()).unwrap_or(0)
    }
}

impl ReplyScheduler for TokioReplyScheduler {
    fn schedule_once(&self, review_id: CommentId, delay: Duration) -> Result<DateTime<Utc>> {
        let runtime = Handle::try_current().context("delayed replies need a tokio runtime")?;
        let mut pending = self
            .pending
            .lock()
            .map_err(|_| anyhow!("scheduler state lock poisoned"))?;

        if let Some(run_at) = pending.get(&review_id) {
            debug!(review_id, "reply already scheduled; keeping existing job");
            return Ok(*run_at);
        }

        let run_at = Utc::now()
            + chrono::Duration::from_std(delay).context("reply delay out of range")?;
        pending.insert(review_id, run_at);

        let sender = self.sender.clone();
        runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            // 수신 측이 종료되었으면 예약도 함께 사라진다.
            let _ = sender.send(review_id);
        });

        Ok(run_at)
    }
}

impl DueReplies {
    /// 다음으로 실행할 리뷰 ID를 기다린다. 모든 송신 측이 사라지면 `None`.
    pub async fn recv(&mut self) -> Option<CommentId> {
        let review_id = self.receiver.recv().await?;
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(&review_id);
        }
        Some(review_id)
    }
}
