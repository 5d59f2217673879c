use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::config::Config;
use crate::profile::store::{KeyValueStore, SqliteKvStore};

pub type DbPool = Pool<SqliteConnectionManager>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    /// Backing store for per-user profile photos.
    pub photos: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// State whose photos live in the application database.
    pub fn new(db: DbPool, config: Config) -> Self {
        let photos = Arc::new(SqliteKvStore::new(db.clone()));
        Self { db, config, photos }
    }
}
