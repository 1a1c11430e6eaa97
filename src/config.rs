use thiserror::Error;

pub const DEFAULT_PROVIDER_BASE_URL: &str = "https://api.polar.sh/v1";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is required in production (or ALLOW_UNVERIFIED_WEBHOOKS=true)")]
    UnverifiedInProduction(&'static str),
}

#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub provider_base_url: String,
    pub provider_api_key: Option<String>,
    pub webhook_secret: Option<String>,
    pub environment: Environment,
    pub provider_timeout_ms: u64,
    pub allow_unverified: bool,
}

// Secrets stay out of logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("provider_base_url", &self.provider_base_url)
            .field("provider_api_key", &redact(&self.provider_api_key))
            .field("webhook_secret", &redact(&self.webhook_secret))
            .field("environment", &self.environment)
            .field("provider_timeout_ms", &self.provider_timeout_ms)
            .field("allow_unverified", &self.allow_unverified)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Self {
            bind_addr: get("BIND_ADDR")
                .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            provider_base_url: get("PROVIDER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_PROVIDER_BASE_URL.to_string()),
            provider_api_key: get("PROVIDER_API_KEY"),
            webhook_secret: get("PROVIDER_WEBHOOK_SECRET"),
            environment: get("ENVIRONMENT")
                .map(|v| Environment::parse(&v))
                .unwrap_or(Environment::Development),
            provider_timeout_ms: get("PROVIDER_TIMEOUT_MS")
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_PROVIDER_TIMEOUT_MS),
            allow_unverified: get("ALLOW_UNVERIFIED_WEBHOOKS")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Checks the trust-by-default settings.
    ///
    /// Returns the warnings to log at startup. In production a missing secret
    /// or API key is an error unless `allow_unverified` is set.
    pub fn validate(&self) -> Result<Vec<String>, ConfigError> {
        let mut warnings = Vec::new();
        let missing = [
            ("PROVIDER_WEBHOOK_SECRET", self.webhook_secret.is_none()),
            ("PROVIDER_API_KEY", self.provider_api_key.is_none()),
        ];

        for (name, is_missing) in missing {
            if !is_missing {
                continue;
            }
            if self.environment.is_production() && !self.allow_unverified {
                return Err(ConfigError::UnverifiedInProduction(name));
            }
            let effect = if name == "PROVIDER_WEBHOOK_SECRET" {
                "webhook signatures will NOT be checked"
            } else {
                "payments will NOT be confirmed with the provider"
            };
            warnings.push(format!("{name} not set: {effect}"));
        }

        Ok(warnings)
    }

    pub fn expose_error_details(&self) -> bool {
        !self.environment.is_production()
    }
}
