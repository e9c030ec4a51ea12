//! Semantic validation of loaded configuration values.

use super::config_struct::Config;
use crate::error::ConfigError;

impl Config {
    /// Check values that deserialize fine but cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = url::Url::parse(&self.execution.endpoint).map_err(|e| {
            ConfigError::Validation(format!(
                "execution.endpoint '{}' is not a valid URL: {e}",
                self.execution.endpoint
            ))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "execution.endpoint must use http or https, got '{}'",
                endpoint.scheme()
            )));
        }

        if self.execution.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "execution.timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.window_width <= 0.0 || self.window_height <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "window size must be positive, got {}x{}",
                self.window_width, self.window_height
            )));
        }

        Ok(())
    }
}
