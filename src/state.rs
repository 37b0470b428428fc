use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::ServerConfig;
use crate::error::StoreError;
use crate::store::FavoritesStore;

/// Shared handles behind every request handler.
pub struct AppState {
    pub catalog: CatalogClient,
    pub store: FavoritesStore,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Arc<Self>, StoreError> {
        let store = FavoritesStore::open(&config.database_path)?;
        let catalog = CatalogClient::new(config.catalog_base_url.clone());

        Ok(Arc::new(AppState { catalog, store }))
    }
}
