//! Service configuration

use std::time::Duration;

/// Configuration for the service: where to listen, how often to sweep
/// expired entries, and how much map capacity to pre-allocate.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (default: 127.0.0.1:8080)
    pub bind_addr: String,

    /// Interval between expiration sweeps (default: 250ms)
    pub sweep_interval: Duration,

    /// Initial capacity of the store map (default: 1024)
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "127.0.0.1:8080".to_string(),
            sweep_interval: Duration::from_millis(250),
            initial_capacity: 1024,
        }
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable
    ///
    /// Recognized variables: `TYPEDKV_ADDR`, `TYPEDKV_SWEEP_INTERVAL_MS`,
    /// `TYPEDKV_CAPACITY`.
    pub fn from_env() -> Self {
        let mut config = Config::default();

        if let Ok(addr) = std::env::var("TYPEDKV_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(ms) = env_parse::<u64>("TYPEDKV_SWEEP_INTERVAL_MS") {
            config.sweep_interval = Duration::from_millis(ms);
        }
        if let Some(capacity) = env_parse::<usize>("TYPEDKV_CAPACITY") {
            config.initial_capacity = capacity;
        }

        config
    }

    /// Set the bind address
    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    /// Set the sweep interval
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Set the initial store capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.sweep_interval, Duration::from_millis(250));
        assert_eq!(config.initial_capacity, 1024);
    }

    #[test]
    fn test_builder_setters() {
        let config = Config::new()
            .with_bind_addr("0.0.0.0:9000")
            .with_sweep_interval(Duration::from_millis(50))
            .with_initial_capacity(64);

        assert_eq!(config.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.sweep_interval, Duration::from_millis(50));
        assert_eq!(config.initial_capacity, 64);
    }
}
