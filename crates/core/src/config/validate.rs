use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Site domain and storage folder are not empty
/// - At least one track may be in flight
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.site.domain.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "site.domain cannot be empty".to_string(),
        ));
    }

    if config.storage.base_folder.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.base_folder cannot be empty".to_string(),
        ));
    }

    if config.crawl.max_concurrent_tracks == 0 {
        return Err(ConfigError::ValidationError(
            "crawl.max_concurrent_tracks must be at least 1".to_string(),
        ));
    }

    Ok(())
}
