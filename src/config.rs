use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration structure for signup-flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SignupConfig {
    /// Account service connection
    pub backend: BackendConfig,
    /// Registration workflow behaviour
    pub workflow: WorkflowConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the account service API
    pub endpoint: String,
    /// Project identifier sent with every request
    pub project_id: String,
    /// HTTP request timeout, 0 leaves it unbounded
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Route navigated to after a completed registration
    pub home_route: String,
    /// Route of the sign-in page linked from the form
    pub sign_in_route: String,
    /// Upper bound for each remote step, 0 disables the bound
    pub step_timeout_ms: u64,
}

impl WorkflowConfig {
    pub fn step_timeout(&self) -> Option<Duration> {
        (self.step_timeout_ms > 0).then(|| Duration::from_millis(self.step_timeout_ms))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON structured logs instead of plain text
    pub json_logs: bool,
    /// Log registration counters on exit
    pub metrics_enabled: bool,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                endpoint: "https://cloud.appwrite.io/v1".to_string(),
                project_id: String::new(),
                request_timeout_ms: 15_000,
            },
            workflow: WorkflowConfig {
                home_route: "/".to_string(),
                sign_in_route: "/sign-in".to_string(),
                step_timeout_ms: 30_000,
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                json_logs: false,
                metrics_enabled: false,
            },
        }
    }
}

impl SignupConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (signup-flow.toml)
    /// 3. Environment variables (prefixed with SIGNUP_FLOW_, nested keys split by `__`)
    pub fn load() -> Result<Self> {
        let file = Path::new("signup-flow.toml");
        Self::load_with_file(file.exists().then_some(file))
    }

    /// Same layering as [`SignupConfig::load`] with an explicit file
    pub fn load_with_file(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("SIGNUP_FLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: SignupConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
