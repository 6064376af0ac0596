// ==================== USER STORE ACCESS ====================
// Operações de usuário sobre a coleção configurada.
// Resultados de domínio (duplicado / inexistente) voltam como Envelope, nunca como erro.

use std::sync::Arc;

use crate::{
    database::UserStore,
    models::{user_id, Envelope, UserDocument},
    utils::AppError,
};

/// Store Access Layer shared by every request handler.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.store.ping().await
    }

    /// All users, no filtering or pagination.
    pub async fn list_all(&self) -> Result<Vec<UserDocument>, AppError> {
        let users = self.store.find_all().await?;
        log::debug!("📋 Listed {} users", users.len());
        Ok(users)
    }

    /// Inserts `doc` verbatim unless its `id` is taken.
    pub async fn create(&self, doc: UserDocument) -> Result<Envelope, AppError> {
        let id = user_id(&doc)?.to_string();

        if self.exists_by_id(&id).await? {
            log::warn!("⚠️ User {} already exists", id);
            return Ok(Envelope::already_exists(&id));
        }

        // The store re-checks atomically; a concurrent create may still win here.
        if !self.store.insert_if_absent(&id, doc).await? {
            log::warn!("⚠️ User {} created concurrently", id);
            return Ok(Envelope::already_exists(&id));
        }

        log::info!("✅ User {} created", id);
        Ok(Envelope::created())
    }

    /// The stored document, or a Failure envelope when `id` is unknown.
    pub async fn read(&self, id: &str) -> Result<Result<UserDocument, Envelope>, AppError> {
        log::debug!("🔍 Reading user {}", id);

        match self.store.find_by_id(id).await? {
            Some(user) => Ok(Ok(user)),
            None => Ok(Err(Envelope::not_found(id))),
        }
    }

    /// Merges every field of `doc` into the stored user; other fields are kept.
    pub async fn update(&self, doc: UserDocument) -> Result<Envelope, AppError> {
        let id = user_id(&doc)?.to_string();

        if !self.store.set_fields(&id, doc).await? {
            log::warn!("⚠️ Update of unknown user {}", id);
            return Ok(Envelope::not_found(&id));
        }

        log::info!("✅ User {} updated", id);
        Ok(Envelope::updated())
    }

    pub async fn delete(&self, id: &str) -> Result<Envelope, AppError> {
        if !self.store.remove(id).await? {
            log::warn!("⚠️ Delete of unknown user {}", id);
            return Ok(Envelope::not_found(id));
        }

        log::info!("🗑️  User {} deleted", id);
        Ok(Envelope::deleted(id))
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, AppError> {
        self.store.exists_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryUserStore;
    use serde_json::{json, Value};

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserStore::new()))
    }

    fn user(value: Value) -> UserDocument {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_then_read_returns_submitted_fields() {
        let svc = service();
        let submitted = user(json!({
            "id": "1630215c-2608-44b9-aad4-9d56d8aafd9f",
            "firstName": "Forris",
            "address": {"city": "Dekalb", "zip": "60115"}
        }));

        assert_eq!(svc.create(submitted.clone()).await.unwrap(), Envelope::created());
        assert_eq!(
            svc.read("1630215c-2608-44b9-aad4-9d56d8aafd9f").await.unwrap(),
            Ok(submitted)
        );
    }

    #[tokio::test]
    async fn test_duplicate_create_fails_and_keeps_original() {
        let svc = service();
        svc.create(user(json!({"id": "dup", "name": "first"}))).await.unwrap();

        let second = svc.create(user(json!({"id": "dup", "name": "second"}))).await.unwrap();
        assert_eq!(
            serde_json::to_value(&second).unwrap(),
            json!({"Failure": "User with id dup already exists!"})
        );

        let all = svc.list_all().await.unwrap();
        assert_eq!(all, vec![user(json!({"id": "dup", "name": "first"}))]);
    }

    #[tokio::test]
    async fn test_update_merges_only_given_fields() {
        let svc = service();
        svc.create(user(json!({"id": "u1", "name": "A", "email": "a@test"}))).await.unwrap();

        assert_eq!(
            svc.update(user(json!({"id": "u1", "name": "B"}))).await.unwrap(),
            Envelope::updated()
        );
        assert_eq!(
            svc.read("u1").await.unwrap(),
            Ok(user(json!({"id": "u1", "name": "B", "email": "a@test"})))
        );
    }

    #[tokio::test]
    async fn test_update_unknown_user_is_a_no_op() {
        let svc = service();
        svc.create(user(json!({"id": "u1"}))).await.unwrap();

        assert_eq!(
            svc.update(user(json!({"id": "ghost", "name": "B"}))).await.unwrap(),
            Envelope::not_found("ghost")
        );
        assert_eq!(svc.list_all().await.unwrap(), vec![user(json!({"id": "u1"}))]);
    }

    #[tokio::test]
    async fn test_delete_lifecycle() {
        let svc = service();
        svc.create(user(json!({"id": "u1", "name": "A"}))).await.unwrap();
        svc.create(user(json!({"id": "u2", "name": "B"}))).await.unwrap();

        assert_eq!(svc.delete("u1").await.unwrap(), Envelope::deleted("u1"));
        assert_eq!(svc.read("u1").await.unwrap(), Err(Envelope::not_found("u1")));
        assert_eq!(svc.delete("u1").await.unwrap(), Envelope::not_found("u1"));
        assert_eq!(svc.list_all().await.unwrap(), vec![user(json!({"id": "u2", "name": "B"}))]);
    }

    #[tokio::test]
    async fn test_full_scenario() {
        let svc = service();
        svc.create(user(json!({"id": "u1", "name": "A"}))).await.unwrap();
        assert_eq!(svc.read("u1").await.unwrap(), Ok(user(json!({"id": "u1", "name": "A"}))));

        svc.update(user(json!({"id": "u1", "name": "B"}))).await.unwrap();
        assert_eq!(svc.read("u1").await.unwrap(), Ok(user(json!({"id": "u1", "name": "B"}))));

        svc.delete("u1").await.unwrap();
        let missing = svc.read("u1").await.unwrap().unwrap_err();
        assert_eq!(
            serde_json::to_value(missing).unwrap(),
            json!({"Failure": "User with id u1 does not exists!"})
        );
    }

    #[tokio::test]
    async fn test_missing_id_is_invalid_request() {
        let svc = service();
        let err = svc.create(user(json!({"name": "anonymous"}))).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidRequest(_)));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_creates_keep_one_document() {
        let svc = service();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let svc = svc.clone();
                tokio::spawn(async move {
                    svc.create(user(json!({"id": "race", "n": i}))).await.unwrap()
                })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().is_success() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }
}
