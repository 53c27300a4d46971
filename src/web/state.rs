use std::sync::Arc;
use tokio::sync::Mutex;

use crate::catalog::{Catalog, CatalogError, CatalogHandle};
use crate::propagate::Sgp4Factory;
use crate::tracker::Tracker;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tracker: Arc<Mutex<Tracker>>,
    pub catalog: CatalogHandle,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let catalog = CatalogHandle::new(catalog);
        let tracker = Tracker::new(
            catalog.clone(),
            config.observer.observer(),
            config.tracking.cutoffs(),
        );
        Self {
            config: Arc::new(config),
            tracker: Arc::new(Mutex::new(tracker)),
            catalog,
        }
    }

    /// Re-reads the configured catalog file on a blocking thread. The
    /// tracker is not locked; its next tick picks up the new catalog.
    pub async fn reload_catalog(&self) -> Result<Arc<Catalog>, ReloadError> {
        let handle = self.catalog.clone();
        let path = self.config.catalog.path.clone();
        let result = tokio::task::spawn_blocking(move || handle.reload_from(&path, &Sgp4Factory))
            .await
            .map_err(|e| ReloadError::Join(e.to_string()))?;
        Ok(result?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("reload task failed: {0}")]
    Join(String),
}
