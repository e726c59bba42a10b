use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{StoreError, User, UserChanges, UserStore};

/// Mutex-guarded map with the same semantics as the Postgres store, so the
/// test suite can drive the full HTTP stack without a database.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            first_name: None,
            last_name: None,
            created_at: OffsetDateTime::now_utc(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, StoreError> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &changes.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
        }
        let user = users.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = Some(last_name);
        }
        Ok(user.clone())
    }

    async fn wipe(&self) -> Result<(), StoreError> {
        self.users.lock().unwrap().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let store = InMemoryUserStore::default();
        store.create("a@example.com", "hash").await.unwrap();
        let err = store.create("a@example.com", "hash").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let store = InMemoryUserStore::default();
        let user = store.create("a@example.com", "hash").await.unwrap();

        let updated = store
            .update(
                user.id,
                UserChanges {
                    first_name: Some("Ada".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "a@example.com");
        assert_eq!(updated.first_name.as_deref(), Some("Ada"));
        assert_eq!(updated.last_name, None);
        assert_eq!(updated.password_hash, "hash");
    }

    #[tokio::test]
    async fn update_rejects_email_held_by_another_user() {
        let store = InMemoryUserStore::default();
        store.create("a@example.com", "hash").await.unwrap();
        let other = store.create("b@example.com", "hash").await.unwrap();

        let err = store
            .update(
                other.id,
                UserChanges {
                    email: Some("a@example.com".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
    }

    #[tokio::test]
    async fn update_keeps_own_email() {
        let store = InMemoryUserStore::default();
        let user = store.create("a@example.com", "hash").await.unwrap();

        let updated = store
            .update(
                user.id,
                UserChanges {
                    email: Some("a@example.com".into()),
                    last_name: Some("Lovelace".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.last_name.as_deref(), Some("Lovelace"));
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = InMemoryUserStore::default();
        let err = store
            .update(Uuid::new_v4(), UserChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn wipe_clears_all_rows() {
        let store = InMemoryUserStore::default();
        let user = store.create("a@example.com", "hash").await.unwrap();
        store.wipe().await.unwrap();
        assert!(store.find_by_id(user.id).await.unwrap().is_none());
    }
}
