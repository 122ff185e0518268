//! Chat-completions 호환 HTTP provider 어댑터.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use tracing::{debug, warn};
use url::Url;

use crate::application::config::GenerationConfig;
use crate::application::ports::ReplyGenerator;
use crate::domain::context::ReviewContext;
use crate::domain::prompt::SYSTEM_MESSAGE;
use crate::domain::reply::GenerationError;

use super::api_runner::{build_api_client, send_raw};

type Extractor = fn(&Value) -> Option<String>;

/// 응답 스키마별 답글 추출기. 앞에서부터 시도하고 처음 일치한 값을 쓴다.
const EXTRACTORS: &[(&str, Extractor)] = &[
    ("chat_completion", extract_chat_completion),
    ("text", extract_text_field),
    ("output", extract_output_field),
];

pub struct CompletionGenerator {
    client: Client,
    config: GenerationConfig,
}

impl CompletionGenerator {
    /// 저장된 설정을 신뢰하지 않으므로 숫자 범위를 다시 보정해 보관한다.
    pub fn new(config: &GenerationConfig) -> Self {
        Self::with_client(build_api_client(), config)
    }

    pub fn with_client(client: Client, config: &GenerationConfig) -> Self {
        Self {
            client,
            config: config.clone().clamped(),
        }
    }

    fn debug_detail(&self, payload: impl FnOnce() -> String) -> Option<String> {
        self.config.debug.then(payload)
    }
}

#[async_trait]
impl ReplyGenerator for CompletionGenerator {
    fn id(&self) -> &'static str {
        "provider"
    }

    async fn generate(
        &self,
        _context: &ReviewContext,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let url = self.config.provider_url.trim();
        let key = self.config.api_key.trim();
        if url.is_empty() || key.is_empty() {
            return Err(GenerationError::MissingCredentials);
        }
        let endpoint =
            Url::parse(url).map_err(|err| GenerationError::InvalidEndpoint(err.to_string()))?;

        let mut request = self
            .client
            .post(endpoint)
            .header(CONTENT_TYPE, "application/json")
            .json(&build_request_body(&self.config, prompt));

        let header_name = self.config.api_key_header.trim();
        if !header_name.is_empty() {
            request = request.header(
                header_name,
                render_key_template(&self.config.api_key_value_template, key),
            );
        }

        debug!(model = %self.config.model, "requesting completion");
        let response = send_raw(request).await.map_err(GenerationError::Transport)?;

        if !response.status.is_success() {
            warn!(status = response.status.as_u16(), "provider returned an error status");
            return Err(GenerationError::Http {
                status: response.status.as_u16(),
                reason: response
                    .status
                    .canonical_reason()
                    .unwrap_or_default()
                    .to_string(),
                detail: self.debug_detail(|| response.body.clone()),
            });
        }

        let Ok(json) = serde_json::from_str::<Value>(&response.body) else {
            return Err(GenerationError::UnrecognizedResponse {
                detail: self.debug_detail(|| response.body.clone()),
            });
        };

        extract_reply(&json).ok_or_else(|| GenerationError::UnrecognizedResponse {
            detail: self.debug_detail(|| json.to_string()),
        })
    }
}

/// chat-completions 형식 요청 본문(system + user 두 메시지).
pub fn build_request_body(config: &GenerationConfig, prompt: &str) -> Value {
    json!({
        "model": config.model,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
        "messages": [
            { "role": "system", "content": SYSTEM_MESSAGE },
            { "role": "user", "content": prompt }
        ]
    })
}

/// `%s` 한 자리에 키를 넣는 sprintf 방식 템플릿 치환. `%%`는 `%`로 출력한다.
pub fn render_key_template(template: &str, key: &str) -> String {
    let mut out = String::with_capacity(template.len() + key.len());
    let mut substituted = false;
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') if !substituted => {
                chars.next();
                out.push_str(key);
                substituted = true;
            }
            _ => out.push('%'),
        }
    }

    out
}

/// 알려진 응답 스키마에서 답글 텍스트를 추출한다.
pub fn extract_reply(response: &Value) -> Option<String> {
    EXTRACTORS.iter().find_map(|(name, extractor)| {
        let text = extractor(response)?;
        debug!(schema = name, "matched provider response schema");
        Some(text.trim().to_string())
    })
}

fn extract_chat_completion(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(scalar_text)
}

fn extract_text_field(response: &Value) -> Option<String> {
    response.get("text").and_then(scalar_text)
}

fn extract_output_field(response: &Value) -> Option<String> {
    response.get("output").and_then(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::ProductSnapshot;

    fn context() -> ReviewContext {
        ReviewContext {
            site_name: "Mug House".to_string(),
            review_text: "Love it!".to_string(),
            customer_name: "Ana".to_string(),
            product: ProductSnapshot::default(),
            guidelines: String::new(),
            prior_replies: Vec::new(),
            policy_notes: String::new(),
        }
    }

    #[test]
    fn extractors_follow_priority_order() {
        let chat = json!({
            "choices": [{ "message": { "content": "  from chat  " } }],
            "text": "from text",
            "output": "from output"
        });
        assert_eq!(extract_reply(&chat).as_deref(), Some("from chat"));

        let text = json!({ "text": "from text", "output": "from output" });
        assert_eq!(extract_reply(&text).as_deref(), Some("from text"));

        let output = json!({ "output": "from output" });
        assert_eq!(extract_reply(&output).as_deref(), Some("from output"));

        assert_eq!(extract_reply(&json!({ "foo": "bar" })), None);
        assert_eq!(extract_reply(&json!({ "text": null })), None);
        assert_eq!(extract_reply(&json!("just a string")), None);
    }

    #[test]
    fn key_template_substitutes_once() {
        assert_eq!(render_key_template("Bearer %s", "sk-1"), "Bearer sk-1");
        assert_eq!(render_key_template("%s", "sk-1"), "sk-1");
        assert_eq!(render_key_template("Key %s %s", "k"), "Key k %s");
        assert_eq!(render_key_template("100%% %s", "k"), "100% k");
        assert_eq!(render_key_template("static", "k"), "static");
    }

    #[test]
    fn request_body_carries_two_messages() {
        let config = GenerationConfig {
            model: "m-1".to_string(),
            temperature: 0.5,
            max_tokens: 123,
            ..GenerationConfig::default()
        };
        let body = build_request_body(&config, "PROMPT");
        assert_eq!(body["model"], "m-1");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 123);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], SYSTEM_MESSAGE);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "PROMPT");
    }

    #[test]
    fn out_of_range_settings_are_reclamped() {
        let config = GenerationConfig {
            temperature: 7.5,
            max_tokens: 1,
            ..GenerationConfig::default()
        };
        let generator = CompletionGenerator::new(&config);
        assert_eq!(generator.config.temperature, 2.0);
        assert_eq!(generator.config.max_tokens, 10);
    }

    #[tokio::test]
    async fn missing_url_or_key_short_circuits() {
        // 도달 불가능한 주소여도 네트워크 호출 전에 반환되어야 한다.
        let no_key = GenerationConfig {
            provider_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            ..GenerationConfig::default()
        };
        let err = CompletionGenerator::new(&no_key)
            .generate(&context(), "prompt")
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::MissingCredentials);

        let no_url = GenerationConfig {
            api_key: "sk-1".to_string(),
            ..GenerationConfig::default()
        };
        let err = CompletionGenerator::new(&no_url)
            .generate(&context(), "prompt")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("ERROR:"));
    }

    #[tokio::test]
    async fn invalid_url_is_a_configuration_error() {
        let config = GenerationConfig {
            provider_url: "not a url".to_string(),
            api_key: "sk-1".to_string(),
            ..GenerationConfig::default()
        };
        let err = CompletionGenerator::new(&config)
            .generate(&context(), "prompt")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }
}
