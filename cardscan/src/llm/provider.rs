use std::sync::Arc;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{CardscanError, Result};
use crate::llm::api::LlmApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Option<Arc<LlmConfig>>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Self {
        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => match &config.base_url {
                Some(base_url) => LlmBackend::OpenAICompatible {
                    base_url: base_url.clone(),
                },
                None => {
                    return Self::unavailable(&format!(
                        "Unknown provider in model: {}",
                        config.model
                    ))
                }
            },
        };

        let needs_api_key = matches!(backend, LlmBackend::OpenAI | LlmBackend::OpenRouter);
        if needs_api_key && config.api_key.is_none() {
            return Self::unavailable("OPENAI_API_KEY is not set");
        }

        Self {
            backend,
            config: Some(Arc::new(config.clone())),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: LlmBackend::Unavailable {
                reason: reason.to_string(),
            },
            config: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub async fn complete(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        options: Option<&CompletionOptions>,
    ) -> Result<String> {
        let config = match (&self.backend, self.config.as_deref()) {
            (LlmBackend::Unavailable { reason }, _) => {
                return Err(CardscanError::LlmUnavailable(reason.clone()))
            }
            (_, None) => {
                return Err(CardscanError::LlmUnavailable(
                    "No config available".to_string(),
                ))
            }
            (_, Some(config)) => config,
        };

        let client = LlmApiClient::new(config)?;
        client.complete(prompt, system_prompt, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn llm_config(model: &str, api_key: Option<&str>, base_url: Option<&str>) -> LlmConfig {
        LlmConfig {
            model: model.to_string(),
            api_key: api_key.map(str::to_string),
            base_url: base_url.map(str::to_string),
            timeout_secs: 5,
            max_retries: 0,
        }
    }

    #[test]
    fn test_openai_without_key_is_unavailable() {
        let provider = LlmProvider::new(&llm_config("openai/gpt-4o-mini", None, None));
        assert!(!provider.is_available());
        assert_eq!(
            provider.backend(),
            &LlmBackend::Unavailable {
                reason: "OPENAI_API_KEY is not set".to_string()
            }
        );
    }

    #[test]
    fn test_openai_with_key_is_available() {
        let provider = LlmProvider::new(&llm_config("openai/gpt-4o-mini", Some("sk-test"), None));
        assert!(provider.is_available());
        assert_eq!(provider.backend(), &LlmBackend::OpenAI);
    }

    #[test]
    fn test_local_backends_need_no_key() {
        let provider = LlmProvider::new(&llm_config("ollama/llama3", None, None));
        assert_eq!(provider.backend(), &LlmBackend::Ollama);

        let provider = LlmProvider::new(&llm_config("lmstudio/qwen", None, None));
        assert_eq!(provider.backend(), &LlmBackend::LmStudio);
    }

    #[test]
    fn test_unknown_provider_needs_base_url() {
        let provider = LlmProvider::new(&llm_config("my-model", None, None));
        assert!(!provider.is_available());

        let provider = LlmProvider::new(&llm_config(
            "my-model",
            None,
            Some("http://localhost:8080/v1"),
        ));
        assert_eq!(
            provider.backend(),
            &LlmBackend::OpenAICompatible {
                base_url: "http://localhost:8080/v1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_complete_when_unavailable_fails_fast() {
        let provider = LlmProvider::unavailable("no key");
        let result = provider.complete("prompt", None, None).await;
        match result {
            Err(CardscanError::LlmUnavailable(reason)) => assert_eq!(reason, "no key"),
            other => panic!("expected unavailable error, got {other:?}"),
        }
    }
}
