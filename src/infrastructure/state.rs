//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{FavoriteRepository, PropertyRepository, UserRepository};
use crate::infrastructure::{
    SeaOrmFavoriteRepository, SeaOrmPropertyRepository, SeaOrmUserRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub property_repo: Arc<dyn PropertyRepository>,
    pub favorite_repo: Arc<dyn FavoriteRepository>,
    pub user_repo: Arc<dyn UserRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories sharing one connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            property_repo: Arc::new(SeaOrmPropertyRepository::new(db.clone())),
            favorite_repo: Arc::new(SeaOrmFavoriteRepository::new(db.clone())),
            user_repo: Arc::new(SeaOrmUserRepository::new(db)),
        }
    }
}
