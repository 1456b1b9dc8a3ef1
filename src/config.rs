use std::env;
use std::time::Duration;

pub const PRIMARY_API_KEY_VAR: &str = "GPT_API_KEY";
pub const FALLBACK_API_KEY_VAR: &str = "NEXT_PUBLIC_GPT_API_KEY";

pub const DEFAULT_WIDTH: u32 = 1024;
pub const DEFAULT_HEIGHT: u32 = 1024;

pub const DEFAULT_ENDPOINT: &str = "https://chatgpt-42.p.rapidapi.com/texttoimage";
pub const DEFAULT_RAPIDAPI_HOST: &str = "chatgpt-42.p.rapidapi.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Per-request settings for a generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            api_key: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl GenerationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The configured key, or `None` when it is unset or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Supplies configuration to the handler at request time.
pub trait ConfigProvider: Send + Sync {
    fn load(&self) -> GenerationConfig;
}

impl ConfigProvider for GenerationConfig {
    fn load(&self) -> GenerationConfig {
        self.clone()
    }
}

/// Reads the API key from the process environment on every call.
#[derive(Debug, Clone)]
pub struct EnvConfigProvider {
    pub primary_var: String,
    pub fallback_var: String,
    pub width: u32,
    pub height: u32,
}

impl Default for EnvConfigProvider {
    fn default() -> Self {
        EnvConfigProvider {
            primary_var: PRIMARY_API_KEY_VAR.to_string(),
            fallback_var: FALLBACK_API_KEY_VAR.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vars(mut self, primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        self.primary_var = primary.into();
        self.fallback_var = fallback.into();
        self
    }

    fn read_var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn load(&self) -> GenerationConfig {
        let api_key =
            Self::read_var(&self.primary_var).or_else(|| Self::read_var(&self.fallback_var));

        GenerationConfig {
            api_key,
            width: self.width,
            height: self.height,
        }
    }
}

/// Where and how the upstream provider is reached.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub rapidapi_host: String,
    pub timeout: Duration,
    /// Ignore `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub bypass_proxy: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            rapidapi_host: DEFAULT_RAPIDAPI_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
            bypass_proxy: false,
        }
    }
}

impl UpstreamConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn without_proxy(mut self) -> Self {
        self.bypass_proxy = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        ServerConfig { host, port }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}
