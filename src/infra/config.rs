use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 600_000;

/// Everything the process needs, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub llm: LlmConfig,
}

/// Settings for the chat-completion provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Shape of the optional TOML file named by `CLASSIFIER_CONFIG`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    port: Option<u16>,
    #[serde(default)]
    llm: FileLlm,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileLlm {
    api_key: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    connect_timeout_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

/// Loads a local `.env` into the process environment. A missing file is fine.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
}

impl Config {
    /// Defaults, then the TOML file (if `CLASSIFIER_CONFIG` is set), then environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let file = match non_empty_var("CLASSIFIER_CONFIG") {
            Some(path) => read_file(Path::new(&path))?,
            None => FileConfig::default(),
        };

        let mut cfg = Config {
            port: file.port.unwrap_or(DEFAULT_PORT),
            llm: LlmConfig::default(),
        };
        let f = file.llm;
        if let Some(v) = f.api_key {
            cfg.llm.api_key = Some(v);
        }
        if let Some(v) = f.base_url {
            cfg.llm.base_url = v;
        }
        if let Some(v) = f.model {
            cfg.llm.model = v;
        }
        if let Some(v) = f.connect_timeout_ms {
            cfg.llm.connect_timeout_ms = v;
        }
        if let Some(v) = f.timeout_ms {
            cfg.llm.timeout_ms = v;
        }

        if let Some(v) = parsed_var::<u16>("PORT") {
            cfg.port = v;
        }
        if let Some(v) = non_empty_var("OPENAI_API_KEY") {
            cfg.llm.api_key = Some(v);
        }
        if let Some(v) = non_empty_var("OPENAI_BASE_URL") {
            cfg.llm.base_url = v;
        }
        if let Some(v) = non_empty_var("CLASSIFIER_MODEL") {
            cfg.llm.model = v;
        }
        if let Some(v) = parsed_var::<u64>("LLM_CONNECT_TIMEOUT_MS") {
            cfg.llm.connect_timeout_ms = v;
        }
        if let Some(v) = parsed_var::<u64>("LLM_TIMEOUT_MS") {
            cfg.llm.timeout_ms = v;
        }
        Ok(cfg)
    }

    /// Checks that the service can actually serve requests.
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.llm.api_key.as_deref() {
            Some(k) if !k.trim().is_empty() => {}
            _ => anyhow::bail!("OPENAI_API_KEY is not set"),
        }
        if self.port == 0 {
            anyhow::bail!("PORT cannot be 0");
        }
        let base = self.llm.base_url.as_str();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!("OPENAI_BASE_URL must be an http(s) URL, got {base}");
        }
        if self.llm.model.trim().is_empty() {
            anyhow::bail!("CLASSIFIER_MODEL cannot be empty");
        }
        if self.llm.timeout_ms == 0 || self.llm.connect_timeout_ms == 0 {
            anyhow::bail!("LLM timeouts must be greater than 0");
        }
        Ok(())
    }
}

fn read_file(path: &Path) -> anyhow::Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Unparseable values fall back to the previous layer.
fn parsed_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = non_empty_var(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment value");
            None
        }
    }
}
