//! 적용 중인 답글 설정(병합 경로, 보정된 값, 비밀값 출처)을 확인하는 유스케이스.

use anyhow::Result;

use crate::application::ports::ConfigRepository;

pub struct InspectConfigUseCase<'a> {
    pub config_repo: &'a dyn ConfigRepository,
}

impl<'a> InspectConfigUseCase<'a> {
    /// 비밀값 자체는 포함하지 않는 점검 JSON을 반환한다.
    pub fn execute(&self) -> Result<String> {
        self.config_repo.inspect_pretty_json()
    }
}
