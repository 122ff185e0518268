//! 설정 저장소 포트 구현 어댑터.

use anyhow::Result;

use crate::application::config::Config;
use crate::application::ports::ConfigRepository;
use crate::infrastructure::config;

/// JSON 기반 설정 저장소 어댑터. 호출마다 파일을 다시 읽는다.
pub struct JsonConfigRepository;

impl ConfigRepository for JsonConfigRepository {
    fn load(&self) -> Result<Config> {
        config::load()
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        config::inspect_pretty_json()
    }
}

/// 메모리에 고정된 설정을 돌려주는 저장소. 라이브러리 사용과 테스트용이다.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigRepository {
    config: Config,
}

impl StaticConfigRepository {
    pub fn new(config: Config) -> Self {
        Self {
            config: config::with_resolved_secrets(config),
        }
    }
}

impl ConfigRepository for StaticConfigRepository {
    fn load(&self) -> Result<Config> {
        Ok(self.config.clone())
    }

    fn inspect_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }
}
