//! Gateway configuration.

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Secondary credential variable, checked when [`API_KEY_ENV`] is unset or blank.
pub const API_KEY_FALLBACK_ENV: &str = "API_KEY";

/// Environment variable overriding the model identifier.
pub const MODEL_ENV: &str = "REPORTLENS_MODEL";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default REST endpoint prefix.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Options for the language-model gateway.
#[derive(Clone, PartialEq)]
pub struct GatewayConfig {
    /// API credential; `None` disables every remote call
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Endpoint prefix; the model and method are appended
    pub base_url: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,

    /// Sampling temperature (provider default when unset)
    pub temperature: Option<f32>,
}

impl GatewayConfig {
    /// Create new gateway options with defaults and no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build options from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build options from a variable lookup. Blank values count as unset.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut config = Self::new();
        if let Some(key) = var(API_KEY_ENV).or_else(|| var(API_KEY_FALLBACK_ENV)) {
            config = config.with_api_key(key);
        }
        if let Some(model) = var(MODEL_ENV) {
            config = config.with_model(model);
        }
        config
    }

    /// Set the API credential. Blank keys count as missing.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.trim().is_empty() {
            None
        } else {
            Some(key.trim().to_string())
        };
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = model.trim().to_string();
        }
        self
    }

    /// Set the endpoint prefix.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout in seconds (minimum 1).
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.max(1);
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature.clamp(0.0, 2.0));
        self
    }

    /// Whether a credential is present.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 60,
            temperature: None,
        }
    }
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}
