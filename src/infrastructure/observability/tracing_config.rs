/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub level: String,
}

impl TracingConfig {
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Turns JSON output on. `LOG_FORMAT=json` already does this, so a
    /// `false` here never switches it back off.
    pub fn with_json_format(mut self, enabled: bool) -> Self {
        self.json_format |= enabled;
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
            level: "info".to_string(),
        }
    }
}
