use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::UserStore;
use crate::models::{UserDocument, STORE_ID_FIELD, USER_ID_FIELD};
use crate::utils::AppError;

/// In-process store. Keeps insertion order, which stands in for store-native order.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<UserDocument>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn has_id(doc: &UserDocument, id: &str) -> bool {
    matches!(doc.get(USER_ID_FIELD), Some(Value::String(v)) if v == id)
}

fn without_store_id(doc: &UserDocument) -> UserDocument {
    let mut out = doc.clone();
    out.remove(STORE_ID_FIELD);
    out
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_all(&self) -> Result<Vec<UserDocument>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().map(without_store_id).collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserDocument>, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| has_id(u, id)).map(without_store_id))
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, AppError> {
        let users = self.users.read().await;
        Ok(users.iter().any(|u| has_id(u, id)))
    }

    async fn insert_if_absent(&self, id: &str, doc: UserDocument) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| has_id(u, id)) {
            return Ok(false);
        }
        users.push(doc);
        Ok(true)
    }

    async fn set_fields(&self, id: &str, fields: UserDocument) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| has_id(u, id)) {
            Some(user) => {
                for (key, value) in fields {
                    if key != STORE_ID_FIELD {
                        user.insert(key, value);
                    }
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, id: &str) -> Result<bool, AppError> {
        let mut users = self.users.write().await;
        match users.iter().position(|u| has_id(u, id)) {
            Some(idx) => {
                users.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
