use crate::core::{AppError, Currency, Result};
use serde::Deserialize;
use std::env;

/// Main engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub reports: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// Currency used for all computed amounts and display strings
    pub currency: Currency,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// How long a report may run before the caller gets a deferred
    /// download link instead of an inline payload
    pub inline_timeout_secs: u64,
    /// How long a deferred download link stays valid before it 404s
    pub link_retention_days: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                currency: env::var("ENGINE_CURRENCY")
                    .unwrap_or_else(|_| "USD".to_string())
                    .parse()
                    .map_err(|_| AppError::Configuration("Invalid ENGINE_CURRENCY".to_string()))?,
            },
            reports: ReportConfig {
                inline_timeout_secs: env::var("REPORT_INLINE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid REPORT_INLINE_TIMEOUT_SECS".to_string())
                    })?,
                link_retention_days: env::var("REPORT_LINK_RETENTION_DAYS")
                    .unwrap_or_else(|_| "90".to_string())
                    .parse()
                    .map_err(|_| {
                        AppError::Configuration("Invalid REPORT_LINK_RETENTION_DAYS".to_string())
                    })?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.reports.inline_timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Report inline timeout must be greater than 0".to_string(),
            ));
        }

        if self.reports.link_retention_days <= 0 {
            return Err(AppError::Configuration(
                "Report link retention must be greater than 0 days".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            inline_timeout_secs: 10,
            link_retention_days: 90,
        }
    }
}
