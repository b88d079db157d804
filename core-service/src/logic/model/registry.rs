//! Oracle Registry
//!
//! Holds the active classifier. Readers clone the `Arc` and release the
//! lock before running inference, so a reload never waits on a request and
//! a request never sees a half-swapped model. Loading always happens outside
//! the lock; a failed load leaves the current oracle in place.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use super::artifact::{load_artifact, ArtifactError, LoadedOracle, ModelInfo};
use super::inference::AdOracle;

#[derive(Clone)]
struct ActiveOracle {
    oracle: Arc<dyn AdOracle>,
    info: ModelInfo,
}

pub struct OracleRegistry {
    artifact_path: PathBuf,
    active: RwLock<Option<ActiveOracle>>,
}

impl OracleRegistry {
    /// Empty registry bound to an artifact path
    pub fn new(artifact_path: impl Into<PathBuf>) -> Self {
        Self {
            artifact_path: artifact_path.into(),
            active: RwLock::new(None),
        }
    }

    /// Try an initial load; start empty (and log why) on failure
    pub fn load_or_empty(artifact_path: impl Into<PathBuf>) -> Self {
        let registry = Self::new(artifact_path);
        if let Err(e) = registry.reload() {
            log::warn!(
                "No model loaded from {}: {}. Predictions will fail until /reload-model succeeds",
                registry.artifact_path.display(),
                e
            );
        }
        registry
    }

    pub fn artifact_path(&self) -> &Path {
        &self.artifact_path
    }

    /// Current oracle, if any
    pub fn get(&self) -> Option<Arc<dyn AdOracle>> {
        self.active.read().as_ref().map(|a| Arc::clone(&a.oracle))
    }

    pub fn is_loaded(&self) -> bool {
        self.active.read().is_some()
    }

    pub fn info(&self) -> Option<ModelInfo> {
        self.active.read().as_ref().map(|a| a.info.clone())
    }

    /// Re-read the artifact and swap it in
    pub fn reload(&self) -> Result<ModelInfo, ArtifactError> {
        let loaded = load_artifact(&self.artifact_path)?;
        Ok(self.install(loaded))
    }

    /// Replace the active oracle
    pub fn install(&self, loaded: LoadedOracle) -> ModelInfo {
        let LoadedOracle { oracle, info } = loaded;
        let previous = self.active.write().replace(ActiveOracle {
            oracle,
            info: info.clone(),
        });

        match previous {
            Some(old) => log::info!("Model replaced ({} -> {})", old.info.kind, info.kind),
            None => log::info!("Model installed ({})", info.kind),
        }
        info
    }
}

impl std::fmt::Debug for OracleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleRegistry")
            .field("artifact_path", &self.artifact_path)
            .field("info", &self.info())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::generate_training_data;
    use crate::logic::model::logistic::{LogisticModel, TrainingParams};

    fn write_model(path: &Path, seed: u64) {
        let params = TrainingParams { epochs: 50, ..Default::default() };
        LogisticModel::fit(&generate_training_data(400, seed), &params)
            .unwrap()
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_empty_when_artifact_missing() {
        let dir = tempfile::tempdir().unwrap();
        let registry = OracleRegistry::load_or_empty(dir.path().join("missing.json"));

        assert!(!registry.is_loaded());
        assert!(registry.get().is_none());
        assert!(registry.info().is_none());
    }

    #[test]
    fn test_reload_swaps_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_model(&path, 1);

        let registry = OracleRegistry::load_or_empty(&path);
        let first = registry.info().unwrap();
        let held = registry.get().unwrap();

        write_model(&path, 2);
        let second = registry.reload().unwrap();

        assert_ne!(first.checksum, second.checksum);
        assert_eq!(registry.info().unwrap().checksum, second.checksum);
        // Readers that grabbed the old oracle keep a working reference
        assert_eq!(held.kind(), "logistic");
    }

    #[test]
    fn test_failed_reload_keeps_old_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        write_model(&path, 1);

        let registry = OracleRegistry::load_or_empty(&path);
        let before = registry.info().unwrap();

        std::fs::write(&path, b"corrupted").unwrap();
        assert!(registry.reload().is_err());

        assert!(registry.is_loaded());
        assert_eq!(registry.info().unwrap().checksum, before.checksum);
    }
}
