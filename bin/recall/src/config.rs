use std::env;

use recall_srs::{ConfigError, SchedulerConfig};

/// Runtime environment, selects the log format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Read `RECALL_ENV`; anything other than `production`/`prod` is development
    pub(crate) fn from_env() -> Self {
        match env::var("RECALL_ENV").as_deref() {
            Ok("production" | "prod") => Self::Production,
            _ => Self::Development,
        }
    }

    pub(crate) const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct CliConfig {
    pub(crate) environment: Environment,
    pub(crate) scheduler: SchedulerConfig,
}

impl CliConfig {
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            scheduler: SchedulerConfig::from_env()?,
        })
    }
}
