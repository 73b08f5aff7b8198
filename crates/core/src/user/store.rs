//! User store

use std::sync::Arc;

use super::model::{NewUser, User, UserPatch};
use crate::collection::Collection;
use crate::id::UserId;
use crate::storage::PersistenceAdapter;
use crate::Result;

/// Insertion-ordered user collection persisted under `"users"`
///
/// The store does not validate names and does not know about tasks; use
/// [`Board`](crate::Board) to get validation and the assignment cascade.
pub struct UserStore {
    users: Collection<User>,
}

impl UserStore {
    /// Open the store, loading any previously saved users
    pub async fn open(storage: Arc<dyn PersistenceAdapter>) -> Result<Self> {
        Ok(Self {
            users: Collection::open(storage).await?,
        })
    }

    /// Create a user with a fresh id
    pub async fn create(&self, user: impl Into<NewUser>) -> Result<User> {
        let user = user.into();
        self.users.insert_with(|id| user.into_user(id)).await
    }

    /// Snapshot of all users in creation order
    pub async fn list(&self) -> Vec<User> {
        self.users.list().await
    }

    pub async fn get(&self, id: UserId) -> Option<User> {
        self.users.get(id).await
    }

    /// Users with the given age, in creation order
    pub async fn users_by_age(&self, age: u32) -> Vec<User> {
        self.users.filter(|user| user.age == Some(age)).await
    }

    /// Apply `patch` to a user. Returns `false` if there is no such user.
    pub async fn update(&self, id: UserId, patch: UserPatch) -> Result<bool> {
        let updated = self.users.modify(id, |user| patch.apply(user)).await?;
        Ok(updated.is_some())
    }

    /// Remove a user. Returns `false` if there is no such user.
    pub async fn delete(&self, id: UserId) -> Result<bool> {
        Ok(self.users.remove(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};
    use tempfile::TempDir;

    async fn create_test_store() -> UserStore {
        UserStore::open(Arc::new(MemoryStorage::new())).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_user() {
        let store = create_test_store().await;

        let user = store.create(NewUser::new("Nick").with_age(38)).await.unwrap();

        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.name, "Nick");
        assert_eq!(user.age, Some(38));
    }

    #[tokio::test]
    async fn test_ids_are_distinct() {
        let store = create_test_store().await;

        let mut ids = Vec::new();
        for name in ["Nick", "John", "Liz", "Mel", "Nick"] {
            ids.push(store.create(name).await.unwrap().id);
        }

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[tokio::test]
    async fn test_store_does_not_validate_names() {
        let store = create_test_store().await;

        let user = store.create("").await.unwrap();
        assert_eq!(user.name, "");
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let store = create_test_store().await;
        store.create("Nick").await.unwrap();
        store.create("John").await.unwrap();
        store.create("Liz").await.unwrap();

        let names: Vec<String> = store.list().await.into_iter().map(|u| u.name).collect();
        assert_eq!(names, vec!["Nick", "John", "Liz"]);
    }

    #[tokio::test]
    async fn test_list_is_a_snapshot() {
        let store = create_test_store().await;
        store.create("Nick").await.unwrap();

        let mut users = store.list().await;
        users[0].name = "Changed".to_string();
        users.clear();

        let users = store.list().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Nick");
    }

    #[tokio::test]
    async fn test_get_user() {
        let store = create_test_store().await;
        let nick = store.create("Nick").await.unwrap();

        assert_eq!(store.get(nick.id).await, Some(nick));
        assert!(store.get(UserId::new(42)).await.is_none());
    }

    #[tokio::test]
    async fn test_update_user() {
        let store = create_test_store().await;
        let nick = store.create(NewUser::new("Nick").with_age(38)).await.unwrap();
        let john = store.create(NewUser::new("John").with_age(27)).await.unwrap();

        let updated = store
            .update(nick.id, UserPatch::new().name("Nicholas"))
            .await
            .unwrap();
        assert!(updated);

        let nick = store.get(nick.id).await.unwrap();
        assert_eq!(nick.name, "Nicholas");
        assert_eq!(nick.age, Some(38));
        assert_eq!(store.get(john.id).await, Some(john));
    }

    #[tokio::test]
    async fn test_update_nonexistent_user() {
        let store = create_test_store().await;
        store.create("Nick").await.unwrap();
        let before = store.list().await;

        let updated = store
            .update(UserId::new(99), UserPatch::new().name("Ghost"))
            .await
            .unwrap();

        assert!(!updated);
        assert_eq!(store.list().await, before);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let store = create_test_store().await;
        let nick = store.create("Nick").await.unwrap();
        let john = store.create("John").await.unwrap();

        assert!(store.delete(nick.id).await.unwrap());
        assert!(store.get(nick.id).await.is_none());
        assert_eq!(store.list().await, vec![john]);

        // Delete again should return false
        assert!(!store.delete(nick.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_users_by_age() {
        let store = create_test_store().await;
        let nick = store.create(NewUser::new("Nick").with_age(24)).await.unwrap();
        store.create(NewUser::new("John").with_age(27)).await.unwrap();
        store.create("Liz").await.unwrap();
        let mel = store.create(NewUser::new("Mel").with_age(24)).await.unwrap();

        assert_eq!(store.users_by_age(24).await, vec![nick, mel]);
        assert!(store.users_by_age(99).await.is_empty());
    }

    #[tokio::test]
    async fn test_persistence_across_instances() {
        let temp_dir = TempDir::new().unwrap();

        let created = {
            let store = UserStore::open(Arc::new(FileStorage::new(temp_dir.path())))
                .await
                .unwrap();
            store.create(NewUser::new("Nick").with_age(38)).await.unwrap();
            store.create("John").await.unwrap();
            store.list().await
        };

        let store = UserStore::open(Arc::new(FileStorage::new(temp_dir.path())))
            .await
            .unwrap();
        assert_eq!(store.list().await, created);

        // The counter resumes after the persisted ids
        let liz = store.create("Liz").await.unwrap();
        assert_eq!(liz.id, UserId::new(3));
    }
}
