//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the server half of every resource in the
//! ordering core. It owns the entity store, processes requests one at a time, and
//! optionally mirrors the store into a key/value store after each mutation.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::persistence::Persistence;
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Architecture Note
/// This struct owns the state (`store`) and the receiver end of the channel. Each
/// actor processes its messages *sequentially*, so the store needs no `Mutex`: the
/// POS, the kitchen and the dashboard all mutate the order ledger through the same
/// mailbox and their writes are applied one after another.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor (server) and a client.
/// 2.  **Configure**: optionally `starting_at()` and `with_persistence()`.
/// 3.  **Run**: spawn `actor.run(context)`; the context is injected into every hook.
///
/// ```rust
/// use kcb_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Ticket { id: u32 }
/// #[derive(Debug)] struct TicketCreate;
/// #[derive(Debug)] enum TicketAction {}
/// #[derive(Debug, thiserror::Error)] #[error("ticket error")] struct TicketError;
///
/// #[async_trait]
/// impl ActorEntity for Ticket {
///     type Id = u32;
///     type Create = TicketCreate;
///     type Update = ();
///     type Action = TicketAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = TicketError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: TicketCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: TicketAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Ticket>::new(10);
///     let actor = actor.starting_at(1001);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(TicketCreate).await.unwrap();
///     assert_eq!(id, 1001);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: reserves the next free sequence number, builds the entity with
///   `from_create_params`, runs `on_create`, stores it, commits.
/// * **Get / List**: clones out of the store; `List` is ordered by id.
/// * **Update**: runs `on_update` on the stored entity, commits, returns the new state.
/// * **Delete**: runs `on_delete`, removes, commits.
/// * **Action**: runs `handle_action`; commits only when the action succeeded.
///
/// A commit bumps the revision published to [`ResourceClient::subscribe`] and, when
/// persistence is configured, writes the snapshot. A failed write is logged and the
/// in-memory state is kept.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    next_id: u32,
    persistence: Option<Box<dyn Persistence<T>>>,
    revision: watch::Sender<u64>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; when it is full, client calls wait.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (revision, changes) = watch::channel(0);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
            persistence: None,
            revision,
        };
        let client = ResourceClient::new(sender, changes);
        (actor, client)
    }

    /// First sequence number handed out when nothing was restored.
    pub fn starting_at(mut self, first_id: u32) -> Self {
        self.next_id = first_id;
        self
    }

    /// Restore from, and mirror every commit into, `persistence`.
    pub fn with_persistence(mut self, persistence: impl Persistence<T> + 'static) -> Self {
        self.persistence = Some(Box::new(persistence));
        self
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook. It is supplied here rather than in
    /// `new()` so actors can be wired to clients created after them.
    pub async fn run(mut self, context: T::Context) {
        // "StaffOrder" instead of "king_bowl::model::order::StaffOrder"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");

        self.restore(entity_type).await;
        info!(entity_type, size = self.store.len(), next_id = self.next_id, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let number = self.next_free_number();
                    let id = T::Id::from(number);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            self.next_id = number + 1;
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            self.commit(entity_type).await;
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items = self.sorted().into_iter().cloned().collect::<Vec<_>>();
                    debug!(entity_type, size = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        let updated = item.clone();
                        info!(entity_type, %id, "Updated");
                        self.commit(entity_type).await;
                        let _ = respond_to.send(Ok(updated));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        self.commit(entity_type).await;
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => {
                                info!(entity_type, %id, "Action ok");
                                self.commit(entity_type).await;
                            }
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// Next unused sequence number. Skips ids already present, which can only
    /// happen when a snapshot was restored without its counter. The counter only
    /// moves once a create succeeds, so rejected creates leave no gaps.
    fn next_free_number(&self) -> u32 {
        let mut number = self.next_id;
        while self.store.contains_key(&T::Id::from(number)) {
            number += 1;
        }
        number
    }

    fn sorted(&self) -> Vec<&T> {
        let mut items: Vec<&T> = self.store.values().collect();
        items.sort_by(|a, b| a.id().cmp(b.id()));
        items
    }

    async fn restore(&mut self, entity_type: &'static str) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        match persistence.load().await {
            Ok(Some(snapshot)) => {
                let restored = snapshot.records.len() as u32;
                self.store = snapshot
                    .records
                    .into_iter()
                    .map(|item| (item.id().clone(), item))
                    .collect();
                self.next_id = snapshot.next_id.unwrap_or(self.next_id + restored);
                info!(entity_type, size = self.store.len(), "Restored from storage");
            }
            Ok(None) => debug!(entity_type, "Nothing stored, starting empty"),
            Err(e) => warn!(entity_type, error = %e, "Stored state unreadable, starting empty"),
        }
    }

    async fn commit(&mut self, entity_type: &'static str) {
        self.revision.send_modify(|revision| *revision += 1);

        let Some(persistence) = &self.persistence else {
            return;
        };
        let records = self.sorted();
        if let Err(e) = persistence.save(&records, self.next_id).await {
            warn!(entity_type, error = %e, "Failed to persist snapshot");
        }
    }
}
