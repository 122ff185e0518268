//! 애플리케이션이 사용하는 설정 스키마(순수 데이터).
//!
//! 주의: 파일/환경변수 접근은 `infrastructure`에서만 수행한다.
//! 저장된 레코드는 신뢰할 수 없으므로 숫자 값은 해석 시점에 항상 범위를 보정한다.

mod lenient;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_KEY_HEADER: &str = "Authorization";
pub const DEFAULT_API_KEY_VALUE: &str = "Bearer %s";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 400;
pub const DEFAULT_SAMPLE_COUNT: usize = 5;
pub const DEFAULT_DELAY_SECONDS: u64 = 10;

pub const TEMPERATURE_RANGE: (f64, f64) = (0.0, 2.0);
pub const MAX_TOKENS_RANGE: (i64, i64) = (10, 4000);
pub const SAMPLE_COUNT_RANGE: (i64, i64) = (0, 20);
pub const DELAY_SECONDS_RANGE: (i64, i64) = (0, 3600);

/// 평면 key→value 설정 레코드. 모든 필드는 선택값이며 미지정 시 기본값을 쓴다.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// 자동 답글 활성화(기본 true)
    #[serde(default, deserialize_with = "lenient::flag")]
    pub enabled: Option<bool>,
    /// provider 원본 응답을 오류 메시지에 포함할지 여부(기본 false)
    #[serde(default, deserialize_with = "lenient::flag")]
    pub debug: Option<bool>,
    /// completion 엔드포인트 URL
    #[serde(default, deserialize_with = "lenient::text")]
    pub provider_url: Option<String>,
    /// API 키(직접값)
    #[serde(default, deserialize_with = "lenient::text", skip_serializing)]
    pub api_key: Option<String>,
    /// API 키를 읽을 환경변수 이름
    #[serde(default, deserialize_with = "lenient::text")]
    pub api_key_env: Option<String>,
    /// 인증 헤더 이름(기본 Authorization)
    #[serde(default, deserialize_with = "lenient::text")]
    pub api_key_header: Option<String>,
    /// 인증 헤더 값 템플릿, `%s` 자리에 키가 들어간다(기본 `Bearer %s`)
    #[serde(default, deserialize_with = "lenient::text")]
    pub api_key_value: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub max_tokens: Option<i64>,
    /// 어조 학습에 사용할 과거 답글 수
    #[serde(default, deserialize_with = "lenient::integer")]
    pub examples: Option<i64>,
    /// 브랜드 보이스/스타일 지침
    #[serde(default, deserialize_with = "lenient::text")]
    pub guidelines: Option<String>,
    /// 답글 작성자 사용자 ID(0이면 관리자 이메일로 해석)
    #[serde(default, deserialize_with = "lenient::integer")]
    pub role_author_id: Option<i64>,
    /// 외부 호출 없이 로컬 템플릿으로 답글 생성
    #[serde(default, deserialize_with = "lenient::flag")]
    pub mock_mode: Option<bool>,
    /// 승인 후 답글까지 지연(초)
    #[serde(default, deserialize_with = "lenient::integer")]
    pub delay_seconds: Option<i64>,
    /// 프롬프트에 넣을 정책 요약(선택)
    #[serde(default, deserialize_with = "lenient::text")]
    pub policy_notes: Option<String>,
    /// 운영자 엔드포인트 Bearer 토큰(직접값)
    #[serde(default, deserialize_with = "lenient::text", skip_serializing)]
    pub admin_token: Option<String>,
    /// 운영자 토큰을 읽을 환경변수 이름
    #[serde(default, deserialize_with = "lenient::text")]
    pub admin_token_env: Option<String>,
}

/// 한 번의 호출 동안 고정되는, 보정이 끝난 생성 설정.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub enabled: bool,
    pub debug: bool,
    pub provider_url: String,
    pub api_key: String,
    pub api_key_header: String,
    pub api_key_value_template: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub sample_count: usize,
    pub mock_mode: bool,
    pub reply_delay_seconds: u64,
    pub author_user_id: u64,
    pub guidelines: String,
    pub policy_notes: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Config::default().generation()
    }
}

impl GenerationConfig {
    /// 범위를 벗어난 숫자 값을 다시 보정한다. 외부에서 직접 구성한 값에도 안전하다.
    pub fn clamped(mut self) -> Self {
        self.temperature = clamp_temperature(Some(self.temperature));
        self.max_tokens = clamp_int(Some(i64::from(self.max_tokens)), MAX_TOKENS_RANGE, 0) as u32;
        self.sample_count =
            clamp_int(Some(saturating_i64(self.sample_count)), SAMPLE_COUNT_RANGE, 0) as usize;
        self.reply_delay_seconds = clamp_int(
            Some(saturating_i64(self.reply_delay_seconds)),
            DELAY_SECONDS_RANGE,
            0,
        ) as u64;
        self
    }
}

impl Config {
    /// 기본값 적용 + 범위 보정을 거친 생성 설정으로 변환한다.
    pub fn generation(&self) -> GenerationConfig {
        GenerationConfig {
            enabled: self.enabled.unwrap_or(true),
            debug: self.debug.unwrap_or(false),
            provider_url: trimmed(&self.provider_url),
            api_key: trimmed(&self.api_key),
            api_key_header: self
                .api_key_header
                .as_deref()
                .map(str::trim)
                .unwrap_or(DEFAULT_API_KEY_HEADER)
                .to_string(),
            api_key_value_template: self
                .api_key_value
                .clone()
                .unwrap_or_else(|| DEFAULT_API_KEY_VALUE.to_string()),
            model: self
                .model
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_MODEL)
                .to_string(),
            temperature: clamp_temperature(self.temperature),
            max_tokens: clamp_int(self.max_tokens, MAX_TOKENS_RANGE, DEFAULT_MAX_TOKENS as i64)
                as u32,
            sample_count: clamp_int(self.examples, SAMPLE_COUNT_RANGE, DEFAULT_SAMPLE_COUNT as i64)
                as usize,
            mock_mode: self.mock_mode.unwrap_or(false),
            reply_delay_seconds: clamp_int(
                self.delay_seconds,
                DELAY_SECONDS_RANGE,
                DEFAULT_DELAY_SECONDS as i64,
            ) as u64,
            author_user_id: self.role_author_id.unwrap_or(0).max(0) as u64,
            guidelines: trimmed(&self.guidelines),
            policy_notes: trimmed(&self.policy_notes),
        }
    }

    /// 후순위(나중 파일) 값으로 덮어쓰는 병합 규칙.
    pub fn merge_from(&mut self, other: Config) {
        merge_field(&mut self.enabled, other.enabled);
        merge_field(&mut self.debug, other.debug);
        merge_field(&mut self.provider_url, other.provider_url);
        merge_field(&mut self.api_key, other.api_key);
        merge_field(&mut self.api_key_env, other.api_key_env);
        merge_field(&mut self.api_key_header, other.api_key_header);
        merge_field(&mut self.api_key_value, other.api_key_value);
        merge_field(&mut self.model, other.model);
        merge_field(&mut self.temperature, other.temperature);
        merge_field(&mut self.max_tokens, other.max_tokens);
        merge_field(&mut self.examples, other.examples);
        merge_field(&mut self.guidelines, other.guidelines);
        merge_field(&mut self.role_author_id, other.role_author_id);
        merge_field(&mut self.mock_mode, other.mock_mode);
        merge_field(&mut self.delay_seconds, other.delay_seconds);
        merge_field(&mut self.policy_notes, other.policy_notes);
        merge_field(&mut self.admin_token, other.admin_token);
        merge_field(&mut self.admin_token_env, other.admin_token_env);
    }
}

pub fn clamp_temperature(value: Option<f64>) -> f64 {
    match value {
        Some(t) if t.is_finite() => t.clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1),
        _ => DEFAULT_TEMPERATURE,
    }
}

fn clamp_int(value: Option<i64>, (min, max): (i64, i64), default: i64) -> i64 {
    value.unwrap_or(default).clamp(min, max)
}

fn saturating_i64(value: impl TryInto<i64>) -> i64 {
    value.try_into().unwrap_or(i64::MAX)
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn merge_field<T>(target: &mut Option<T>, incoming: Option<T>) {
    if incoming.is_some() {
        *target = incoming;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_settings_record() {
        let cfg = Config::default().generation();
        assert!(cfg.enabled);
        assert!(!cfg.mock_mode);
        assert!(!cfg.debug);
        assert_eq!(cfg.api_key_header, "Authorization");
        assert_eq!(cfg.api_key_value_template, "Bearer %s");
        assert_eq!(cfg.model, "gpt-4o-mini");
        assert_eq!(cfg.temperature, 0.3);
        assert_eq!(cfg.max_tokens, 400);
        assert_eq!(cfg.sample_count, 5);
        assert_eq!(cfg.reply_delay_seconds, 10);
        assert_eq!(cfg.author_user_id, 0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let raw: Config = serde_json::from_str(
            r#"{"temperature":"9","max_tokens":1,"examples":99,"delay_seconds":-5,"role_author_id":-3}"#,
        )
        .unwrap();
        let cfg = raw.generation();
        assert_eq!(cfg.temperature, 2.0);
        assert_eq!(cfg.max_tokens, 10);
        assert_eq!(cfg.sample_count, 20);
        assert_eq!(cfg.reply_delay_seconds, 0);
        assert_eq!(cfg.author_user_id, 0);
    }

    #[test]
    fn clamped_repairs_hand_built_config() {
        let cfg = GenerationConfig {
            temperature: f64::NAN,
            max_tokens: 100_000,
            sample_count: 500,
            reply_delay_seconds: 86_400,
            ..GenerationConfig::default()
        }
        .clamped();
        assert_eq!(cfg.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(cfg.max_tokens, 4000);
        assert_eq!(cfg.sample_count, 20);
        assert_eq!(cfg.reply_delay_seconds, 3600);
    }

    #[test]
    fn clamped_saturates_huge_unsigned_values() {
        let cfg = GenerationConfig {
            sample_count: usize::MAX,
            reply_delay_seconds: u64::MAX,
            ..GenerationConfig::default()
        }
        .clamped();
        assert_eq!(cfg.sample_count, 20);
        assert_eq!(cfg.reply_delay_seconds, 3600);
    }

    #[test]
    fn later_record_overrides_field_by_field() {
        let mut base: Config =
            serde_json::from_str(r#"{"model":"a","mock_mode":"yes","examples":3}"#).unwrap();
        let overlay: Config = serde_json::from_str(r#"{"model":"b"}"#).unwrap();
        base.merge_from(overlay);
        let cfg = base.generation();
        assert_eq!(cfg.model, "b");
        assert!(cfg.mock_mode);
        assert_eq!(cfg.sample_count, 3);
    }
}
