//! # Snapshot Persistence
//!
//! A `ResourceActor` can mirror its whole store into a [`KeyValueStore`] after each
//! committed mutation, and restore it when it starts. This is the "synchronized to
//! local storage" behaviour of the cart and the order ledger: one JSON array under
//! a records key, plus (optionally) the next sequence number under a counter key.

use crate::entity::ActorEntity;
use crate::error::StorageError;
use crate::storage::{load_json, save_json, KeyValueStore};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;

/// State recovered from a store.
#[derive(Debug)]
pub struct Snapshot<T> {
    pub records: Vec<T>,
    /// `None` when no counter was stored; the actor derives one from the records.
    pub next_id: Option<u32>,
}

/// Loads and saves an actor's entities.
#[async_trait]
pub trait Persistence<T: ActorEntity>: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Snapshot<T>>, StorageError>;

    /// Writes every record (ordered by id) and the next id.
    async fn save(&self, records: &[&T], next_id: u32) -> Result<(), StorageError>;
}

/// JSON-array persistence over a [`KeyValueStore`].
pub struct JsonPersistence<T> {
    store: Arc<dyn KeyValueStore>,
    records_key: String,
    counter_key: Option<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> JsonPersistence<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, records_key: impl Into<String>) -> Self {
        Self {
            store,
            records_key: records_key.into(),
            counter_key: None,
            _entity: PhantomData,
        }
    }

    /// Also persist the id sequence under its own key.
    pub fn with_counter(mut self, counter_key: impl Into<String>) -> Self {
        self.counter_key = Some(counter_key.into());
        self
    }
}

#[async_trait]
impl<T> Persistence<T> for JsonPersistence<T>
where
    T: ActorEntity + Serialize + DeserializeOwned,
{
    async fn load(&self) -> Result<Option<Snapshot<T>>, StorageError> {
        let records: Option<Vec<T>> = load_json(self.store.as_ref(), &self.records_key).await?;
        let next_id = match &self.counter_key {
            Some(key) => load_json::<u32>(self.store.as_ref(), key).await?,
            None => None,
        };
        match (records, next_id) {
            (None, None) => Ok(None),
            (records, next_id) => Ok(Some(Snapshot {
                records: records.unwrap_or_default(),
                next_id,
            })),
        }
    }

    async fn save(&self, records: &[&T], next_id: u32) -> Result<(), StorageError> {
        save_json(self.store.as_ref(), &self.records_key, records).await?;
        if let Some(key) = &self.counter_key {
            save_json(self.store.as_ref(), key, &next_id).await?;
        }
        Ok(())
    }
}
