//! Service container for dependency injection
//!
//! Wires the data source and prompter chosen by [`Settings`] into services.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::application::{Guide, LoadService};
use crate::config::Settings;
use crate::infrastructure::traits::{
    is_remote, DataSource, FileDataSource, HttpDataSource, Prompter, StdinPrompter,
};
use crate::infrastructure::InfraResult;

/// Container holding the I/O boundaries of one run.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Where the collections come from
    pub source: Arc<dyn DataSource>,

    /// Interactive input
    pub prompter: Arc<dyn Prompter>,
}

impl ServiceContainer {
    /// Create a container with real implementations.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let source: Arc<dyn DataSource> = if is_remote(&settings.data_dir) {
            Arc::new(HttpDataSource::new(
                settings.data_dir.clone(),
                Duration::from_secs(settings.http_timeout_secs),
            )?)
        } else {
            Arc::new(FileDataSource::new(&settings.data_dir))
        };
        debug!("data source: {}", source.describe());
        Ok(Self::with_deps(settings, source, Arc::new(StdinPrompter)))
    }

    /// Create a container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        source: Arc<dyn DataSource>,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            source,
            prompter,
        }
    }

    pub fn load_service(&self) -> LoadService {
        LoadService::new(
            Arc::clone(&self.source),
            self.settings.nodes_file.clone(),
            self.settings.edges_file.clone(),
        )
    }

    /// New session, loaded once.
    pub fn load_guide(&self) -> Guide {
        let mut guide = Guide::new(self.settings.start_id);
        guide.load(&self.load_service());
        guide
    }
}
