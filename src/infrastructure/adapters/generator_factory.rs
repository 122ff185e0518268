//! 답글 생성 전략 팩토리 포트 구현 어댑터.

use crate::application::config::GenerationConfig;
use crate::application::ports::{GeneratorFactory, ReplyGenerator};
use crate::infrastructure::providers;

/// 설정의 mock 플래그로 provider/mock 전략을 고르는 팩토리.
pub struct GeneratorFactoryAdapter;

impl GeneratorFactory for GeneratorFactoryAdapter {
    fn build(&self, config: &GenerationConfig) -> Box<dyn ReplyGenerator> {
        providers::build_generator(config)
    }
}
