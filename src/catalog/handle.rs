use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use super::error::CatalogError;
use super::loader::Catalog;
use crate::propagate::PropagatorFactory;

/// Shared slot holding the current catalog.
///
/// Readers take an `Arc` snapshot and keep using it for the whole tick, so a
/// concurrent [`CatalogHandle::replace`] is only observed by the next tick.
#[derive(Clone, Default)]
pub struct CatalogHandle {
    slot: Arc<RwLock<Option<Arc<Catalog>>>>,
}

impl CatalogHandle {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(Arc::new(catalog)))),
        }
    }

    pub fn snapshot(&self) -> Option<Arc<Catalog>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Swaps in `catalog`, returning the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Option<Arc<Catalog>> {
        self.swap(Arc::new(catalog))
    }

    fn swap(&self, catalog: Arc<Catalog>) -> Option<Arc<Catalog>> {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        slot.replace(catalog)
    }

    /// Parses `path` and swaps it in. On failure the current catalog stays
    /// in effect.
    pub fn reload_from(
        &self,
        path: &Path,
        factory: &dyn PropagatorFactory,
    ) -> Result<Arc<Catalog>, CatalogError> {
        match Catalog::from_file(path, factory) {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                let previous = self.swap(catalog.clone());
                log::info!(
                    "Catalog reloaded: {} records (was {})",
                    catalog.len(),
                    previous.map(|c| c.len()).unwrap_or(0)
                );
                Ok(catalog)
            }
            Err(e) => {
                log::error!("Catalog reload from {} failed: {}", path.display(), e);
                Err(e)
            }
        }
    }
}
