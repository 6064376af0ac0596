pub mod memory;
pub mod mongo;
pub mod store;

pub use memory::MemoryUserStore;
pub use mongo::MongoDB;
pub use store::UserStore;

use std::sync::Arc;

use crate::config::{Settings, StoreBackend};
use crate::utils::AppError;

/// Builds the process-wide store selected by `STORE_BACKEND`.
pub async fn connect(settings: &Settings) -> Result<Arc<dyn UserStore>, AppError> {
    match settings.backend {
        StoreBackend::MongoDB => {
            log::info!(
                "📊 Database: {} (db={}, collection={})",
                settings.redacted_uri(),
                settings.db_name,
                settings.users_collection
            );
            let db = MongoDB::new(settings).await?;
            log::info!("✅ MongoDB connected successfully");
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            log::warn!("⚠️  Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
