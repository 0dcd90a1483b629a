use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::database::{
    DatabaseError, DatabaseManager, MemoryStore, PgStore, PostStore, ProfileStore, StoreHealth, UserStore,
};
use crate::services::{PostService, ProfileService};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub profiles: Arc<ProfileService>,
    pub posts: Arc<PostService>,
    pub users: Arc<dyn UserStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl AppState {
    pub fn new<S>(store: Arc<S>, config: AppConfig) -> Self
    where
        S: ProfileStore + PostStore + UserStore + StoreHealth + 'static,
    {
        let profiles = ProfileService::new(store.clone(), store.clone(), &config);
        let posts = PostService::new(store.clone(), &config);

        Self {
            config: Arc::new(config),
            profiles: Arc::new(profiles),
            posts: Arc::new(posts),
            users: store.clone(),
            health: store,
        }
    }

    /// Build the configured backend; Postgres is migrated before use.
    pub async fn from_config(config: AppConfig) -> Result<Self, DatabaseError> {
        match config.database.backend {
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                Ok(Self::new(Arc::new(MemoryStore::new()), config))
            }
            StoreBackend::Postgres => {
                let manager = DatabaseManager::connect(&config.database).await?;
                manager.migrate().await?;
                Ok(Self::new(Arc::new(PgStore::new(manager)), config))
            }
        }
    }
}
