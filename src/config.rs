//! Configuration management for the SixSplit server

use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub sweep: SweepConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory the client UI is served from
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the strip files
    pub temp_dir: String,
    /// Where the assembled PDF is written. Cleanup and the orphan sweep
    /// delete everything inside `temp_dir`, so a PDF path in there is
    /// rejected at startup.
    pub pdf_path: String,
}

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    pub max_age_secs: u64,
}

impl SweepConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                static_dir: "static".to_string(),
            },
            storage: StorageConfig {
                temp_dir: "temp".to_string(),
                pdf_path: "output.pdf".to_string(),
            },
            sweep: SweepConfig {
                enabled: true,
                interval_secs: 900,
                max_age_secs: 3600,
            },
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .unwrap_or(5000),
                static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            },
            storage: StorageConfig {
                temp_dir: env::var("TEMP_DIR").unwrap_or_else(|_| "temp".to_string()),
                pdf_path: env::var("PDF_PATH").unwrap_or_else(|_| "output.pdf".to_string()),
            },
            sweep: SweepConfig {
                enabled: env::var("SWEEP_ENABLED")
                    .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                    .unwrap_or(true),
                interval_secs: env::var("SWEEP_INTERVAL_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(900),
                max_age_secs: env::var("SWEEP_MAX_AGE_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3600),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.temp_dir, "temp");
        assert!(config.sweep.enabled);
        assert_eq!(config.sweep.interval(), Duration::from_secs(900));
        assert_eq!(config.sweep.max_age(), Duration::from_secs(3600));
    }
}
