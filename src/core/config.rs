//! Search agent configuration.
//!
//! `Config` holds process-wide settings the search workers read, currently
//! the neural network used for leaf evaluation. It is a plain value: build
//! it once, then hand it (or a `SharedConfig`) to the components that need
//! it. Nothing in the crate reads configuration from globals.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

/// Agent configuration parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the neural network weights file. Empty when unset.
    neural_net_path: String,

    /// Use a randomly initialised network instead of loading weights.
    neural_net_is_random: bool,
}

impl Config {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the neural network path (builder pattern).
    #[must_use]
    pub fn with_neural_net(mut self, path: impl Into<String>) -> Self {
        self.set_neural_net_path(path, false);
        self
    }

    /// Use a randomly initialised network stored at `path` (builder pattern).
    #[must_use]
    pub fn with_random_neural_net(mut self, path: impl Into<String>) -> Self {
        self.set_neural_net_path(path, true);
        self
    }

    /// Set the neural network path and whether it is randomly initialised.
    pub fn set_neural_net_path(&mut self, path: impl Into<String>, is_random: bool) {
        self.neural_net_path = path.into();
        self.neural_net_is_random = is_random;
    }

    /// Get the neural network path.
    #[must_use]
    pub fn neural_net_path(&self) -> &str {
        &self.neural_net_path
    }

    /// Check if the network is randomly initialised.
    #[must_use]
    pub fn is_neural_net_random(&self) -> bool {
        self.neural_net_is_random
    }
}

/// `Config` shared between search worker threads.
///
/// Readers take a snapshot with `get`; writers replace fields under the
/// write lock. Cloning the handle shares the same configuration.
#[derive(Clone, Debug, Default)]
pub struct SharedConfig {
    inner: Arc<RwLock<Config>>,
}

impl SharedConfig {
    /// Wrap a configuration for sharing.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn get(&self) -> Config {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Update the neural network settings.
    pub fn set_neural_net_path(&self, path: impl Into<String>, is_random: bool) {
        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.set_neural_net_path(path, is_random);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.neural_net_path(), "");
        assert!(!config.is_neural_net_random());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Config::new().with_neural_net("nets/v3.bin");
        assert_eq!(config.neural_net_path(), "nets/v3.bin");
        assert!(!config.is_neural_net_random());

        let config = Config::new().with_random_neural_net("nets/scratch.bin");
        assert!(config.is_neural_net_random());
    }

    #[test]
    fn test_shared_config_visible_across_threads() {
        let shared = SharedConfig::new(Config::new().with_neural_net("a.bin"));
        let writer = shared.clone();

        std::thread::spawn(move || writer.set_neural_net_path("b.bin", true))
            .join()
            .unwrap();

        let snapshot = shared.get();
        assert_eq!(snapshot.neural_net_path(), "b.bin");
        assert!(snapshot.is_neural_net_random());
    }

    #[test]
    fn test_serialization() {
        let config = Config::new().with_neural_net("nets/v3.bin");
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
