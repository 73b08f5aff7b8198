//! Generic persisted collection
//!
//! Shared by the user and task stores: an insertion-ordered list guarded by
//! one lock, an id sequence, and a write-through to the persistence adapter.
//! A mutation is applied to a copy of the list, the copy is saved, and only
//! then does it replace the live list, so a failed save changes nothing.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::id::IdSequence;
use crate::storage::{self, PersistenceAdapter};
use crate::{Error, Result};

/// A record owned by a [`Collection`]
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Copy + Eq + fmt::Display + From<u64> + Into<u64> + Send + Sync;

    /// Key under which the collection is persisted
    const COLLECTION: &'static str;

    fn id(&self) -> Self::Id;
}

struct State<T> {
    items: Vec<T>,
    ids: IdSequence,
}

pub(crate) struct Collection<T: Entity> {
    state: RwLock<State<T>>,
    storage: Arc<dyn PersistenceAdapter>,
}

impl<T: Entity> Collection<T> {
    /// Load the collection from `storage`, empty if nothing was saved
    pub async fn open(storage: Arc<dyn PersistenceAdapter>) -> Result<Self> {
        let items: Vec<T> = storage::load_collection(storage.as_ref(), T::COLLECTION).await?;
        let (items, ids) =
            match IdSequence::after(items.iter().map(|item| Into::<u64>::into(item.id()))) {
                Some(ids) => (items, ids),
                None => {
                    warn!(
                        "Discarding '{}' collection holding an id past the counter range, starting empty",
                        T::COLLECTION
                    );
                    (Vec::new(), IdSequence::new())
                }
            };
        info!("Loaded {} {}", items.len(), T::COLLECTION);

        Ok(Self {
            state: RwLock::new(State { items, ids }),
            storage,
        })
    }

    pub async fn list(&self) -> Vec<T> {
        self.state.read().await.items.clone()
    }

    pub async fn get(&self, id: T::Id) -> Option<T> {
        let state = self.state.read().await;
        state.items.iter().find(|item| item.id() == id).cloned()
    }

    pub async fn filter<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send,
    {
        let state = self.state.read().await;
        state.items.iter().filter(|item| predicate(*item)).cloned().collect()
    }

    /// Allocate an id, build the entity with it and append it
    pub async fn insert_with<F>(&self, build: F) -> Result<T>
    where
        F: FnOnce(T::Id) -> T + Send,
    {
        let mut state = self.state.write().await;
        let Some(raw) = state.ids.allocate() else {
            return Err(Error::Storage(format!(
                "No ids left in the '{}' collection",
                T::COLLECTION
            )));
        };
        let id = T::Id::from(raw);
        let entity = build(id);

        let mut next = state.items.clone();
        next.push(entity.clone());
        self.persist(&next).await?;
        state.items = next;

        debug!("Created {} entry {}", T::COLLECTION, id);
        Ok(entity)
    }

    /// Apply `change` to the entity with `id`, `None` if there is none
    pub async fn modify<F>(&self, id: T::Id, change: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut T) + Send,
    {
        let mut state = self.state.write().await;
        let Some(index) = state.items.iter().position(|item| item.id() == id) else {
            debug!("No {} entry {} to update", T::COLLECTION, id);
            return Ok(None);
        };

        let mut next = state.items.clone();
        change(&mut next[index]);
        let updated = next[index].clone();
        self.persist(&next).await?;
        state.items = next;

        debug!("Updated {} entry {}", T::COLLECTION, id);
        Ok(Some(updated))
    }

    /// Apply `change` to every entity matching `predicate`.
    ///
    /// Saves once if anything matched and returns the ids touched.
    pub async fn modify_where<P, F>(&self, predicate: P, change: F) -> Result<Vec<T::Id>>
    where
        P: Fn(&T) -> bool + Send,
        F: Fn(&mut T) + Send,
    {
        let mut state = self.state.write().await;
        let mut next = state.items.clone();
        let mut touched = Vec::new();
        for item in next.iter_mut().filter(|item| predicate(&**item)) {
            change(item);
            touched.push(item.id());
        }

        if touched.is_empty() {
            return Ok(touched);
        }

        self.persist(&next).await?;
        state.items = next;

        debug!("Updated {} {} entries", touched.len(), T::COLLECTION);
        Ok(touched)
    }

    /// Remove the entity with `id`, returning it
    pub async fn remove(&self, id: T::Id) -> Result<Option<T>> {
        let mut state = self.state.write().await;
        let Some(index) = state.items.iter().position(|item| item.id() == id) else {
            debug!("No {} entry {} to delete", T::COLLECTION, id);
            return Ok(None);
        };

        let mut next = state.items.clone();
        let removed = next.remove(index);
        self.persist(&next).await?;
        state.items = next;

        debug!("Deleted {} entry {}", T::COLLECTION, id);
        Ok(Some(removed))
    }

    async fn persist(&self, items: &[T]) -> Result<()> {
        storage::save_collection(self.storage.as_ref(), T::COLLECTION, items).await
    }
}
