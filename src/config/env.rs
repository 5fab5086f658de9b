//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "SUITE_RUNNER";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from SUITE_RUNNER_BASE_URL
    pub base_url: Option<String>,
    /// Delay between triggers from SUITE_RUNNER_DELAY_MS
    pub delay_ms: Option<u64>,
    /// Request timeout from SUITE_RUNNER_TIMEOUT
    pub timeout: Option<u64>,
    /// Report directory from SUITE_RUNNER_OUTPUT_DIR
    pub output_dir: Option<String>,
    /// Config file from SUITE_RUNNER_CONFIG
    pub config_file: Option<String>,
    /// Log level from SUITE_RUNNER_LOG
    pub log_level: Option<String>,
    /// Disable colors from SUITE_RUNNER_NO_COLOR
    pub no_color: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            base_url: get_env("BASE_URL"),
            delay_ms: get_env_parse("DELAY_MS"),
            timeout: get_env_parse("TIMEOUT"),
            output_dir: get_env("OUTPUT_DIR"),
            config_file: get_env("CONFIG"),
            log_level: get_env("LOG"),
            no_color: get_env_bool("NO_COLOR"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.delay_ms.is_some()
            || self.timeout.is_some()
            || self.output_dir.is_some()
            || self.config_file.is_some()
            || self.log_level.is_some()
            || self.no_color.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_BASE_URL:    {:?}", ENV_PREFIX, self.base_url);
        println!("  {}_DELAY_MS:    {:?}", ENV_PREFIX, self.delay_ms);
        println!("  {}_TIMEOUT:     {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_OUTPUT_DIR:  {:?}", ENV_PREFIX, self.output_dir);
        println!("  {}_CONFIG:      {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_LOG:         {:?}", ENV_PREFIX, self.log_level);
        println!("  {}_NO_COLOR:    {:?}", ENV_PREFIX, self.no_color);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable and parse to type
fn get_env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    get_env(name).and_then(|v| v.parse().ok())
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Print all SUITE_RUNNER environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_BASE_URL    Base URL of the test service (default http://localhost:8000)");
    println!("  {ENV_PREFIX}_DELAY_MS    Pause between triggers in milliseconds (default 5000)");
    println!("  {ENV_PREFIX}_TIMEOUT     Per-request timeout in seconds (default 30)");
    println!("  {ENV_PREFIX}_OUTPUT_DIR  Directory for test-results-*.json reports");
    println!("  {ENV_PREFIX}_CONFIG      Path to configuration file");
    println!("  {ENV_PREFIX}_LOG         Log level (trace, debug, info, warn, error)");
    println!("  {ENV_PREFIX}_NO_COLOR    Disable colored output (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_BASE_URL=http://10.0.0.100:8000");
    println!("  suite-runner run");
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sets variables for the lifetime of the guard
    struct EnvGuard {
        previous: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn set(vars: &[(&str, &str)]) -> Self {
            let previous = vars
                .iter()
                .map(|(k, v)| {
                    let key = format!("{ENV_PREFIX}_{k}");
                    let old = env::var(&key).ok();
                    env::set_var(&key, v);
                    (key, old)
                })
                .collect();
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in &self.previous {
                match value {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    fn test_env_config_default() {
        let config = EnvConfig::default();
        assert!(config.base_url.is_none());
        assert!(!config.has_any());
    }

    #[test]
    fn test_env_load() {
        let _guard = EnvGuard::set(&[
            ("BASE_URL", "http://10.0.0.1:8000"),
            ("DELAY_MS", "250"),
            ("TIMEOUT", "not-a-number"),
        ]);

        let config = EnvConfig::load();
        assert_eq!(config.base_url.as_deref(), Some("http://10.0.0.1:8000"));
        assert_eq!(config.delay_ms, Some(250));
        assert_eq!(config.timeout, None);
        assert!(config.has_any());
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = EnvGuard::set(&[("NO_COLOR", "yes")]);

        let config = EnvConfig::load();
        assert_eq!(config.no_color, Some(true));
    }
}
