use crate::error::{AssistantError, Result};
use url::Url;

/// Base URL of the AI Scanner backend when nothing else is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8054/api/scanner";

/// Smallest accepted selection edge, in CSS pixels
pub const MIN_SELECTION_SIZE: f64 = 20.0;

/// Configuration for an [`Assistant`](crate::widget::Assistant) and its backend client
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    /// Base URL that `/health`, `/chat`, `/ask` and `/analyze` are appended to
    pub api_base: String,

    /// Minimum width and height of a selection rectangle
    pub min_selection_size: f64,

    /// Probe `/health` before every real request
    pub health_check: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            min_selection_size: MIN_SELECTION_SIZE,
            health_check: true,
        }
    }
}

impl AssistantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the backend base URL
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Builder method: set the minimum selection size
    pub fn min_selection_size(mut self, size: f64) -> Self {
        self.min_selection_size = size;
        self
    }

    /// Builder method: toggle the pre-flight health probe
    pub fn health_check(mut self, enabled: bool) -> Self {
        self.health_check = enabled;
        self
    }

    /// Check the configuration and return the base URL without a trailing slash
    pub fn validate(&self) -> Result<String> {
        let parsed = Url::parse(&self.api_base)
            .map_err(|e| AssistantError::InvalidConfig(format!("api_base '{}': {}", self.api_base, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AssistantError::InvalidConfig(format!(
                "api_base must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if !(self.min_selection_size.is_finite() && self.min_selection_size >= 0.0) {
            return Err(AssistantError::InvalidConfig(format!(
                "min_selection_size must be a non-negative number, got {}",
                self.min_selection_size
            )));
        }

        Ok(self.api_base.trim_end_matches('/').to_string())
    }
}
