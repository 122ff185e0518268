//! 애플리케이션 조립(composition root) 모듈.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::application::ports::{ConfigRepository, GeneratorFactory};
use crate::application::usecases::dispatch::DispatchReplyUseCase;
use crate::application::usecases::generate_reply::GenerateReplyUseCase;
use crate::application::usecases::inspect_config::InspectConfigUseCase;
use crate::application::usecases::test_prompt::TestPromptUseCase;
use crate::domain::reply::ReplyOutcome;
use crate::infrastructure::adapters::{GeneratorFactoryAdapter, JsonConfigRepository};
use crate::infrastructure::scheduler::{DueReplies, TokioReplyScheduler};
use crate::infrastructure::store::MemoryStore;

/// 실행 시점 의존성을 한 곳에서 조립하는 컨테이너.
pub struct AppComposition {
    config_repo: Box<dyn ConfigRepository>,
    store: MemoryStore,
    generator_factory: Box<dyn GeneratorFactory>,
    scheduler: TokioReplyScheduler,
}

impl AppComposition {
    /// 기본 설정 저장소(JSON 파일)와 생성 전략 팩토리로 조립한다.
    pub fn new(store: MemoryStore) -> (Self, DueReplies) {
        Self::with_config_repo(Box::new(JsonConfigRepository), store)
    }

    /// 설정 저장소를 외부에서 주입한다.
    pub fn with_config_repo(
        config_repo: Box<dyn ConfigRepository>,
        store: MemoryStore,
    ) -> (Self, DueReplies) {
        Self::with_parts(config_repo, store, Box::new(GeneratorFactoryAdapter))
    }

    pub fn with_parts(
        config_repo: Box<dyn ConfigRepository>,
        store: MemoryStore,
        generator_factory: Box<dyn GeneratorFactory>,
    ) -> (Self, DueReplies) {
        let (scheduler, due) = TokioReplyScheduler::new();
        (
            Self {
                config_repo,
                store,
                generator_factory,
                scheduler,
            },
            due,
        )
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// 운영자 엔드포인트 토큰. 요청마다 설정을 다시 읽는다.
    pub fn admin_token(&self) -> Result<Option<String>> {
        Ok(self
            .config_repo
            .load()
            .context("failed to load replypilot config")?
            .admin_token)
    }

    /// 답글 생성/게시 유스케이스를 생성한다.
    pub fn generate_reply_usecase(&self) -> GenerateReplyUseCase<'_> {
        GenerateReplyUseCase {
            config_repo: self.config_repo.as_ref(),
            comments: &self.store,
            products: &self.store,
            directory: &self.store,
            generator_factory: self.generator_factory.as_ref(),
        }
    }

    /// 이벤트 디스패치 유스케이스를 생성한다.
    pub fn dispatch_usecase(&self) -> DispatchReplyUseCase<'_> {
        DispatchReplyUseCase {
            generate: self.generate_reply_usecase(),
            scheduler: &self.scheduler,
        }
    }

    /// 프롬프트 진단 유스케이스를 생성한다.
    pub fn test_prompt_usecase(&self) -> TestPromptUseCase<'_> {
        TestPromptUseCase {
            config_repo: self.config_repo.as_ref(),
            comments: &self.store,
            products: &self.store,
            directory: &self.store,
            generator_factory: self.generator_factory.as_ref(),
        }
    }

    /// 설정 점검 유스케이스를 생성한다.
    pub fn inspect_config_usecase(&self) -> InspectConfigUseCase<'_> {
        InspectConfigUseCase {
            config_repo: self.config_repo.as_ref(),
        }
    }
}

/// 예약 시각이 된 리뷰를 순서대로 생성/게시한다. 스케줄러가 사라지면 종료된다.
pub async fn run_due_replies(app: Arc<AppComposition>, mut due: DueReplies) {
    while let Some(review_id) = due.recv().await {
        match app.generate_reply_usecase().execute(review_id).await {
            Ok(ReplyOutcome::Posted { reply_id, .. }) => {
                info!(review_id, reply_id, "scheduled reply posted");
            }
            Ok(outcome) => info!(review_id, %outcome, "scheduled reply finished without posting"),
            Err(err) => error!(review_id, "scheduled reply failed: {err:#}"),
        }
    }
}
