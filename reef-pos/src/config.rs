//! Application configuration
//!
//! All options can be set on the command line or through environment
//! variables (a `.env` file is loaded first):
//!
//! | Flag | Env | Default |
//! |------|-----|---------|
//! | --api-url | REEF_API_URL | http://localhost:4000 |
//! | --work-dir | REEF_WORK_DIR | .reef-pos |
//! | --tables | REEF_TABLES | 12 |
//! | --timeout | REEF_TIMEOUT | 30 |
//! | --tax-percent | REEF_TAX_PERCENT | 5 |

use clap::Parser;
use std::path::PathBuf;

/// Reef POS - restaurant point of sale terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "reef-pos", version, about)]
pub struct AppConfig {
    /// Backend base URL
    #[arg(long, env = "REEF_API_URL", default_value = "http://localhost:4000")]
    pub api_url: String,

    /// Work directory for the stored token and log files
    #[arg(long, env = "REEF_WORK_DIR", default_value = ".reef-pos")]
    pub work_dir: PathBuf,

    /// Number of tables on the table grid
    #[arg(long, env = "REEF_TABLES", default_value_t = 12)]
    pub tables: u32,

    /// Request timeout in seconds
    #[arg(long, env = "REEF_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Default tax percentage applied to new receipts
    #[arg(long, env = "REEF_TAX_PERCENT", default_value_t = 5.0)]
    pub tax_percent: f64,
}

impl AppConfig {
    /// Custom values for tests
    pub fn with_overrides(api_url: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        let mut config = Self::parse_from(["reef-pos"]);
        config.api_url = api_url.into();
        config.work_dir = work_dir.into();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::try_parse_from(["reef-pos"]).unwrap();
        assert_eq!(config.api_url, "http://localhost:4000");
        assert_eq!(config.work_dir, PathBuf::from(".reef-pos"));
        assert_eq!(config.tables, 12);
        assert_eq!(config.timeout, 30);
        assert_eq!(config.tax_percent, 5.0);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = AppConfig::try_parse_from([
            "reef-pos",
            "--api-url",
            "https://pos.example.com",
            "--tables",
            "20",
            "--tax-percent",
            "7.5",
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://pos.example.com");
        assert_eq!(config.tables, 20);
        assert_eq!(config.tax_percent, 7.5);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::with_overrides("http://127.0.0.1:9999", "/tmp/reef-test");
        assert_eq!(config.api_url, "http://127.0.0.1:9999");
        assert_eq!(config.work_dir, PathBuf::from("/tmp/reef-test"));
    }
}
