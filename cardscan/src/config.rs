use std::env;
use std::path::PathBuf;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn parse_env_opt<T: std::str::FromStr>(var: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Ignoring.", val, var, e);
                None
            }
        },
        Err(_) => None,
    }
}

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_STRUCTURED_LANGUAGES: &str = "eng+tur";
pub const DEFAULT_LLM_MODEL: &str = "openai/gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub scratch: ScratchConfig,
    pub llm: LlmConfig,
    pub run_mode: RunMode,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a request body, multipart and JSON alike.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub model: String,
    /// Tesseract language codes joined with `+`, e.g. `eng` or `eng+tur`.
    pub languages: String,
    /// Languages used by the LLM-structured upload route.
    pub structured_languages: String,
    /// `None` waits for the engine indefinitely.
    pub timeout_secs: Option<u64>,
}

impl OcrConfig {
    /// Same engine and timeout, different Tesseract languages.
    pub fn with_languages(&self, languages: &str) -> Self {
        Self {
            languages: languages.to_string(),
            ..self.clone()
        }
    }
}

/// LLM configuration for the card structuring step
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone)]
pub struct ScratchConfig {
    pub dir: PathBuf,
}

/// Controls how much failure detail reaches HTTP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Production,
    Development,
}

impl RunMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => RunMode::Development,
            _ => RunMode::Production,
        }
    }

    pub fn exposes_stack(&self) -> bool {
        matches!(self, RunMode::Development)
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model: "local/tesseract".to_string(),
            languages: "eng".to_string(),
            structured_languages: DEFAULT_STRUCTURED_LANGUAGES.to_string(),
            timeout_secs: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("CARDSCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("PORT", DEFAULT_PORT),
                max_upload_bytes: parse_env_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            },
            ocr: OcrConfig {
                model: env::var("OCR_MODEL").unwrap_or_else(|_| "local/tesseract".to_string()),
                languages: env::var("OCR_LANGUAGES").unwrap_or_else(|_| "eng".to_string()),
                structured_languages: env::var("OCR_STRUCTURED_LANGUAGES")
                    .unwrap_or_else(|_| DEFAULT_STRUCTURED_LANGUAGES.to_string()),
                timeout_secs: parse_env_opt("OCR_TIMEOUT"),
            },
            scratch: ScratchConfig {
                dir: env::var("SCRATCH_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| env::temp_dir()),
            },
            llm: LlmConfig {
                model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
                api_key: env::var("OPENAI_API_KEY")
                    .or_else(|_| env::var("LLM_API_KEY"))
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                base_url: env::var("LLM_BASE_URL").ok(),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 30),
                max_retries: parse_env_or("LLM_MAX_RETRIES", 2),
            },
            run_mode: env::var("APP_ENV")
                .or_else(|_| env::var("NODE_ENV"))
                .map(|v| RunMode::parse(&v))
                .unwrap_or(RunMode::Production),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

/// Known LLM providers that use OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
