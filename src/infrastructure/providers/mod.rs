//! 답글 생성 전략 구현 모듈.
//! chat-completions 호환 HTTP provider와 로컬 mock 템플릿을 제공한다.

mod api_runner;
pub mod completion;
pub mod mock;

use tracing::debug;

use crate::application::config::GenerationConfig;
use crate::application::ports::ReplyGenerator;

pub use api_runner::{PROVIDER_TIMEOUT_SECS, build_api_client};
pub use completion::CompletionGenerator;
pub use mock::MockGenerator;

/// 설정에 맞는 생성 전략을 고른다. mock 모드가 켜져 있으면 네트워크를 쓰지 않는다.
pub fn build_generator(config: &GenerationConfig) -> Box<dyn ReplyGenerator> {
    let generator: Box<dyn ReplyGenerator> = if config.mock_mode {
        Box::new(MockGenerator)
    } else {
        Box::new(CompletionGenerator::new(config))
    };
    debug!(strategy = generator.id(), "selected reply generator");
    generator
}
