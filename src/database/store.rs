use async_trait::async_trait;

use crate::models::UserDocument;
use crate::utils::AppError;

/// Document-store operations the user service needs, against one fixed collection.
///
/// Each mutating call is a single atomic store operation and reports whether it
/// applied, so callers never have to pair an existence check with a write.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every stored document, store-native order, `_id` stripped.
    async fn find_all(&self) -> Result<Vec<UserDocument>, AppError>;

    /// Point lookup on the application `id`, `_id` stripped.
    async fn find_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError>;

    async fn exists_by_id(&self, id: &str) -> Result<bool, AppError>;

    /// Inserts `doc` unless a document with `id` already exists. Returns `false` on conflict.
    async fn insert_if_absent(&self, id: &str, doc: UserDocument) -> Result<bool, AppError>;

    /// `$set`-merges `fields` into the document with `id`. Returns `false` if none matched.
    async fn set_fields(&self, id: &str, fields: UserDocument) -> Result<bool, AppError>;

    /// Returns `false` if nothing was deleted.
    async fn remove(&self, id: &str) -> Result<bool, AppError>;

    async fn ping(&self) -> Result<(), AppError>;

    fn backend_name(&self) -> &'static str;
}
