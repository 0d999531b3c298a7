use async_trait::async_trait;
use kcb_framework::{
    ActorEntity, FrameworkError, JsonPersistence, KeyValueStore, MemoryStore, ResourceActor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Ticket {
    id: u32,
    table: u8,
    fired: bool,
}

#[derive(Debug)]
struct TicketCreate {
    table: u8,
}

#[derive(Debug)]
struct TicketUpdate {
    table: Option<u8>,
}

#[derive(Debug)]
enum TicketAction {
    Fire,
}

#[derive(Debug, thiserror::Error)]
enum TicketError {
    #[error("Table {0} does not exist")]
    NoSuchTable(u8),
    #[error("Ticket already fired")]
    AlreadyFired,
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Action = TicketAction;
    type ActionResult = bool;
    type Context = ();
    type Error = TicketError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
        if params.table == 0 || params.table > 12 {
            return Err(TicketError::NoSuchTable(params.table));
        }
        Ok(Self {
            id,
            table: params.table,
            fired: false,
        })
    }

    async fn on_update(&mut self, update: TicketUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(table) = update.table {
            self.table = table;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: TicketAction, _ctx: &()) -> Result<bool, Self::Error> {
        match action {
            TicketAction::Fire if self.fired => Err(TicketError::AlreadyFired),
            TicketAction::Fire => {
                self.fired = true;
                Ok(true)
            }
        }
    }
}

fn persisted(store: &Arc<MemoryStore>) -> JsonPersistence<Ticket> {
    let store: Arc<dyn KeyValueStore> = store.clone();
    JsonPersistence::new(store, "tickets").with_counter("ticket_counter")
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let id: u32 = client.create(TicketCreate { table: 4 }).await.unwrap();
    assert_eq!(id, 1);

    let fired = client.perform_action(id, TicketAction::Fire).await.unwrap();
    assert!(fired);

    let ticket: Ticket = client.get(id).await.unwrap().unwrap();
    assert!(ticket.fired);

    let updated = client
        .update(id, TicketUpdate { table: Some(7) })
        .await
        .unwrap();
    assert_eq!(updated.table, 7);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());

    let missing = client.delete(id).await;
    assert!(matches!(missing, Err(FrameworkError::NotFound(_))));
}

#[tokio::test]
async fn test_entity_errors_downcast_to_their_type() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(TicketCreate { table: 40 }).await.unwrap_err();
    let typed = err.into_entity_error::<TicketError>().unwrap();
    assert!(matches!(typed, TicketError::NoSuchTable(40)));

    // The rejected create did not use up a number.
    let id = client.create(TicketCreate { table: 1 }).await.unwrap();
    assert_eq!(id, 1);
    client.perform_action(id, TicketAction::Fire).await.unwrap();
    let err = client
        .perform_action(id, TicketAction::Fire)
        .await
        .unwrap_err();
    assert!(matches!(
        err.into_entity_error::<TicketError>(),
        Ok(TicketError::AlreadyFired)
    ));
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    let actor = actor.starting_at(1001);
    tokio::spawn(actor.run(()));

    for table in [3, 1, 2] {
        client.create(TicketCreate { table }).await.unwrap();
    }

    let ids: Vec<u32> = client.list().await.unwrap().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1001, 1002, 1003]);
}

#[tokio::test]
async fn test_revision_tracks_committed_mutations_only() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));
    let mut changes = client.subscribe();

    let id = client.create(TicketCreate { table: 2 }).await.unwrap();
    changes.changed().await.unwrap();
    assert_eq!(client.revision(), 1);

    client.perform_action(id, TicketAction::Fire).await.unwrap();
    // Rejected: already fired
    let _ = client.perform_action(id, TicketAction::Fire).await;
    let _ = client.create(TicketCreate { table: 99 }).await;
    client.get(id).await.unwrap();

    assert_eq!(client.revision(), 2);
}

#[tokio::test]
async fn test_state_survives_restart() {
    let store = Arc::new(MemoryStore::new());

    let (actor, client) = ResourceActor::<Ticket>::new(10);
    let handle = tokio::spawn(actor.with_persistence(persisted(&store)).run(()));
    let first = client.create(TicketCreate { table: 5 }).await.unwrap();
    let second = client.create(TicketCreate { table: 6 }).await.unwrap();
    client.perform_action(first, TicketAction::Fire).await.unwrap();
    client.delete(second).await.unwrap();
    drop(client);
    handle.await.unwrap();

    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.with_persistence(persisted(&store)).run(()));

    let tickets = client.list().await.unwrap();
    assert_eq!(tickets.len(), 1);
    assert!(tickets[0].fired);

    // The counter is restored, so deleted ids are never reused.
    let third = client.create(TicketCreate { table: 8 }).await.unwrap();
    assert_eq!(third, 3);
}

#[tokio::test]
async fn test_corrupt_storage_starts_empty() {
    let store = Arc::new(MemoryStore::new());
    store.set("tickets", "[{\"id\":".to_string()).await.unwrap();

    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.with_persistence(persisted(&store)).run(()));

    assert!(client.list().await.unwrap().is_empty());
    let id = client.create(TicketCreate { table: 1 }).await.unwrap();
    assert_eq!(id, 1);

    // The next commit overwrites the unreadable value.
    let raw = store.get("tickets").await.unwrap().unwrap();
    let saved: Vec<Ticket> = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved.len(), 1);
}
