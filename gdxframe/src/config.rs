//! Session configuration

use std::path::{Path, PathBuf};

use gdxframe_core::constants::DEFAULT_PRODUCER;
use tracing::debug;

/// Configuration for a [`ContainerSession`](crate::ContainerSession)
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Defer record streaming until a symbol is first loaded
    pub lazy_load: bool,
    /// System directory of the runtime handed to the codec
    pub system_dir: Option<PathBuf>,
    /// Producer tag written into new containers
    pub producer: String,
    /// Guess domains for symbols read from containers without domain info
    pub infer_domains: bool,
}

impl SessionConfig {
    /// Config that defers record streaming
    pub fn lazy() -> Self {
        Self::default().with_lazy_load(true)
    }

    /// Set lazy loading
    pub fn with_lazy_load(mut self, lazy_load: bool) -> Self {
        self.lazy_load = lazy_load;
        self
    }

    /// Set the runtime system directory
    ///
    /// Existing directories are canonicalized; anything else is passed to the
    /// codec as given so it can report the problem itself.
    pub fn with_system_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.system_dir = Some(match dir.canonicalize() {
            Ok(resolved) if resolved.is_dir() => resolved,
            _ => {
                debug!(dir = %dir.display(), "system directory not resolved");
                dir.to_path_buf()
            }
        });
        self
    }

    /// Set the producer tag
    pub fn with_producer(mut self, producer: impl Into<String>) -> Self {
        self.producer = producer.into();
        self
    }

    /// Enable or disable domain inference
    pub fn with_domain_inference(mut self, infer_domains: bool) -> Self {
        self.infer_domains = infer_domains;
        self
    }

    /// System directory as the string handed to codecs
    pub fn system_dir_str(&self) -> Option<String> {
        self.system_dir
            .as_ref()
            .map(|dir| dir.to_string_lossy().replace('\\', "/"))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lazy_load: false,
            system_dir: None,
            producer: DEFAULT_PRODUCER.to_string(),
            infer_domains: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert!(!config.lazy_load);
        assert!(config.infer_domains);
        assert_eq!(config.producer, "gdxframe");
        assert!(config.system_dir_str().is_none());
    }

    #[test]
    fn test_builder() {
        let config = SessionConfig::lazy()
            .with_producer("model-run")
            .with_domain_inference(false);
        assert!(config.lazy_load);
        assert!(!config.infer_domains);
        assert_eq!(config.producer, "model-run");
    }

    #[test]
    fn test_system_dir_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig::default().with_system_dir(dir.path());
        let resolved = config.system_dir.clone().unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.is_dir());

        let missing = SessionConfig::default().with_system_dir("no/such/dir");
        assert_eq!(missing.system_dir_str().as_deref(), Some("no/such/dir"));
    }
}
