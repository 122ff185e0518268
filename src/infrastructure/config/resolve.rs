//! 설정의 비밀값(inline/env)을 실제 런타임 값으로 해석하는 유틸리티.
//!
//! - 환경변수 접근은 인프라 계층에서만 수행한다.

use std::env;

use crate::application::config::Config;

/// 비밀값 해석 결과. `source`는 점검 출력용 라벨이다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialResolution {
    pub credential: Option<String>,
    pub source: Option<String>,
}

/// provider API 키는 `api_key` 우선, 없으면 `api_key_env`를 조회한다.
pub fn resolve_api_key(cfg: &Config) -> CredentialResolution {
    resolve_secret(cfg.api_key.as_deref(), cfg.api_key_env.as_deref())
}

/// 운영자 토큰은 `admin_token` 우선, 없으면 `admin_token_env`를 조회한다.
pub fn resolve_admin_token(cfg: &Config) -> CredentialResolution {
    resolve_secret(cfg.admin_token.as_deref(), cfg.admin_token_env.as_deref())
}

/// 비밀값을 해석해 설정 레코드에 채워 넣는다.
pub fn with_resolved_secrets(mut cfg: Config) -> Config {
    cfg.api_key = resolve_api_key(&cfg).credential;
    cfg.admin_token = resolve_admin_token(&cfg).credential;
    cfg
}

fn resolve_secret(inline: Option<&str>, env_name: Option<&str>) -> CredentialResolution {
    if let Some(value) = inline.map(str::trim).filter(|v| !v.is_empty()) {
        return CredentialResolution {
            credential: Some(value.to_string()),
            source: Some("inline".to_string()),
        };
    }

    let Some(env_name) = env_name.map(str::trim).filter(|v| !v.is_empty()) else {
        return CredentialResolution::default();
    };

    match env::var(env_name).ok().map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => CredentialResolution {
            credential: Some(v),
            source: Some(format!("env:{env_name}")),
        },
        _ => CredentialResolution {
            credential: None,
            source: Some(format!("env:{env_name} (missing)")),
        },
    }
}
