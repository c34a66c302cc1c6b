use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - BLAST base URL is an absolute http(s) URL
/// - Database and program are set
/// - Poll budget and request timeout are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    let blast = &config.blast;
    let url = Url::parse(&blast.base_url).map_err(|e| {
        ConfigError::ValidationError(format!("blast.base_url is not a valid URL: {}", e))
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::ValidationError(format!(
            "blast.base_url must use http or https, got {}",
            url.scheme()
        )));
    }

    if blast.database.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "blast.database cannot be empty".to_string(),
        ));
    }
    if blast.program.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "blast.program cannot be empty".to_string(),
        ));
    }
    if blast.max_attempts == 0 {
        return Err(ConfigError::ValidationError(
            "blast.max_attempts must be at least 1".to_string(),
        ));
    }
    if blast.request_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "blast.request_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
