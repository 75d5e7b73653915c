//! Viewer settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Largest accepted `page_speed`.
pub const MAX_PAGE_SPEED: f32 = 100.0;

/// Viewer-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Multiplier applied to the visible row count for page up/down.
    pub page_speed: f32,
    /// Whether `j`/`k` also move the highlight.
    pub vim_mode: bool,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Tickets requested per API page.
    pub page_size: u32,
    /// Pages the background feed may fetch ahead of the viewer.
    pub prefetch_pages: usize,
}

impl Settings {
    /// Validate setting ranges.
    pub fn validate(&self) -> Result<()> {
        if !(self.page_speed > 0.0 && self.page_speed <= MAX_PAGE_SPEED) {
            return Err(ConfigError::ValidationError(format!(
                "page_speed must be greater than 0 and at most {}, got {}",
                MAX_PAGE_SPEED, self.page_speed
            )));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::ValidationError(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.prefetch_pages == 0 {
            return Err(ConfigError::ValidationError(
                "prefetch_pages must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_speed: 1.0,
            vim_mode: false,
            tick_rate_ms: 100,
            page_size: 100,
            prefetch_pages: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_non_positive_page_speed_rejected() {
        for page_speed in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let settings = Settings {
                page_speed,
                ..Settings::default()
            };
            assert!(settings.validate().is_err());
        }
    }

    #[test]
    fn test_page_speed_upper_bound() {
        let at_limit = Settings {
            page_speed: MAX_PAGE_SPEED,
            ..Settings::default()
        };
        assert!(at_limit.validate().is_ok());

        let huge = Settings {
            page_speed: 1e30,
            ..Settings::default()
        };
        assert!(huge
            .validate()
            .unwrap_err()
            .to_string()
            .contains("page_speed"));
    }

    #[test]
    fn test_zero_prefetch_rejected() {
        let settings = Settings {
            prefetch_pages: 0,
            ..Settings::default()
        };
        assert!(settings
            .validate()
            .unwrap_err()
            .to_string()
            .contains("prefetch_pages"));
    }
}
