//! 적용 설정 진단(inspection) 뷰 모델.

use serde::Serialize;

use super::loader::LoadedConfig;
use super::resolve::{resolve_admin_token, resolve_api_key};
use crate::application::config::Config;

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInspection {
    pub searched_paths: Vec<String>,
    pub loaded_paths: Vec<String>,
    pub raw: Config,
    pub effective: EffectiveSettings,
    pub credentials: CredentialsInspection,
}

/// 기본값 적용과 범위 보정이 끝난 값. 비밀값은 제외한다.
#[derive(Debug, Clone, Serialize)]
pub struct EffectiveSettings {
    pub enabled: bool,
    pub debug: bool,
    pub provider_url: String,
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
    pub resolved_strategy: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialsInspection {
    pub api_key_source: Option<String>,
    pub api_key_resolved: bool,
    pub admin_token_source: Option<String>,
    pub admin_token_resolved: bool,
}

impl ConfigInspection {
    pub(crate) fn from_loaded(loaded: LoadedConfig) -> Self {
        let api_key = resolve_api_key(&loaded.config);
        let admin_token = resolve_admin_token(&loaded.config);
        let generation = Config {
            api_key: api_key.credential.clone(),
            ..loaded.config.clone()
        }
        .generation();

        let resolved_strategy = if generation.mock_mode {
            "mock"
        } else if generation.provider_url.is_empty() || generation.api_key.is_empty() {
            "provider (incomplete: missing URL or API key)"
        } else {
            "provider"
        };

        Self {
            searched_paths: loaded
                .searched_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            loaded_paths: loaded
                .loaded_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            raw: loaded.config.clone(),
            effective: EffectiveSettings {
                enabled: generation.enabled,
                debug: generation.debug,
                provider_url: generation.provider_url,
                api_key_header: generation.api_key_header,
                api_key_value_template: generation.api_key_value_template,
                model: generation.model,
                temperature: generation.temperature,
                max_tokens: generation.max_tokens,
                sample_count: generation.sample_count,
                mock_mode: generation.mock_mode,
                reply_delay_seconds: generation.reply_delay_seconds,
                author_user_id: generation.author_user_id,
                guidelines: generation.guidelines,
                policy_notes: generation.policy_notes,
                resolved_strategy: resolved_strategy.to_string(),
            },
            credentials: CredentialsInspection {
                api_key_source: api_key.source,
                api_key_resolved: api_key.credential.is_some(),
                admin_token_source: admin_token.source,
                admin_token_resolved: admin_token.credential.is_some(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn inspection_never_serializes_secrets() {
        let config: Config = serde_json::from_str(
            r#"{"api_key":"sk-secret","admin_token":"op-secret","provider_url":"https://llm.test/v1"}"#,
        )
        .unwrap();
        let inspection = ConfigInspection::from_loaded(LoadedConfig {
            config,
            searched_paths: vec![PathBuf::from("a.json")],
            loaded_paths: vec![PathBuf::from("a.json")],
        });

        let json = serde_json::to_string(&inspection).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!json.contains("op-secret"));
        assert!(inspection.credentials.api_key_resolved);
        assert_eq!(inspection.effective.resolved_strategy, "provider");
    }
}
