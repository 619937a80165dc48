use std::fmt;

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::{
    core::{
        query::{self, PageRequest, PersonPage},
        store::{PersonStore, StoreError},
    },
    export::{self, ExportError},
    filter::PersonFilter,
    person::{Person, PersonDraft},
    types::PersonId,
};

use super::events::RosterEvent;

/// Errors returned by [`RosterHandle`] calls.
#[derive(Debug)]
pub enum RuntimeError {
    /// The store rejected the operation.
    Store(StoreError),
    /// Workbook encoding failed.
    Export(ExportError),
    /// The blocking export task panicked or was cancelled.
    Join(String),
    /// The runtime task has stopped.
    ChannelClosed,
}

impl From<StoreError> for RuntimeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ExportError> for RuntimeError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::Store(err) => err.fmt(f),
            RuntimeError::Export(err) => err.fmt(f),
            RuntimeError::Join(msg) => write!(f, "join error: {msg}"),
            RuntimeError::ChannelClosed => f.write_str("roster runtime is not running"),
        }
    }
}

impl std::error::Error for RuntimeError {}

/// Channel sizing for [`spawn_roster`].
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Pending commands before callers wait.
    pub command_queue_bound: usize,
    /// Events buffered per lagging subscriber.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}

/// Cloneable front door to the task that owns the [`PersonStore`].
#[derive(Clone)]
pub struct RosterHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<RosterEvent>,
}

enum Command {
    List {
        filter: Option<PersonFilter>,
        page: PageRequest,
        resp: oneshot::Sender<PersonPage>,
    },
    Oldest {
        resp: oneshot::Sender<PersonPage>,
    },
    FullNames {
        resp: oneshot::Sender<Vec<String>>,
    },
    Snapshot {
        resp: oneshot::Sender<Vec<Person>>,
    },
    Get {
        id: PersonId,
        resp: oneshot::Sender<Result<Person, RuntimeError>>,
    },
    Create {
        draft: PersonDraft,
        resp: oneshot::Sender<Person>,
    },
    Update {
        person: Person,
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    Delete {
        id: PersonId,
        resp: oneshot::Sender<Result<Person, RuntimeError>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

/// Moves `store` into a new task and returns the handle that talks to it.
///
/// Must be called from within a tokio runtime.
pub fn spawn_roster(store: PersonStore, config: RuntimeConfig) -> RosterHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.command_queue_bound.max(1));
    let (events_tx, _) = broadcast::channel::<RosterEvent>(config.event_capacity.max(1));

    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        tracing::debug!(records = store.len(), "roster runtime started");
        while let Some(cmd) = cmd_rx.recv().await {
            if handle_command(cmd, &mut store, &events_tx_loop) {
                break;
            }
        }
        tracing::debug!("roster runtime stopped");
    });

    RosterHandle { cmd_tx, events_tx }
}

impl RosterHandle {
    /// Receives [`RosterEvent`]s for mutations committed after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RosterEvent> {
        self.events_tx.subscribe()
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(make(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// One page of the whole roster.
    pub async fn list_all(&self, page: PageRequest) -> Result<PersonPage, RuntimeError> {
        self.request(|resp| Command::List {
            filter: None,
            page,
            resp,
        })
        .await
    }

    /// One page of the records matching `filter`.
    pub async fn list_by_filter(
        &self,
        filter: PersonFilter,
        page: PageRequest,
    ) -> Result<PersonPage, RuntimeError> {
        self.request(|resp| Command::List {
            filter: Some(filter),
            page,
            resp,
        })
        .await
    }

    /// Earliest-born record as a one-item page.
    pub async fn oldest(&self) -> Result<PersonPage, RuntimeError> {
        self.request(|resp| Command::Oldest { resp }).await
    }

    /// Every full name in store order.
    pub async fn all_full_names(&self) -> Result<Vec<String>, RuntimeError> {
        self.request(|resp| Command::FullNames { resp }).await
    }

    /// Point-in-time copy of every record in store order.
    pub async fn snapshot(&self) -> Result<Vec<Person>, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    /// Encodes a snapshot as `.xlsx` off the runtime task.
    pub async fn export_all(&self) -> Result<Vec<u8>, RuntimeError> {
        let people = self.snapshot().await?;
        let bytes = tokio::task::spawn_blocking(move || export::export_people(&people))
            .await
            .map_err(|e| RuntimeError::Join(e.to_string()))??;
        Ok(bytes)
    }

    /// Record with `id`, or [`StoreError::NotFound`].
    pub async fn get_by_id(&self, id: PersonId) -> Result<Person, RuntimeError> {
        self.request(|resp| Command::Get { id, resp }).await?
    }

    /// Stores `draft` under a fresh id at the front of the roster.
    pub async fn create(&self, draft: PersonDraft) -> Result<Person, RuntimeError> {
        self.request(|resp| Command::Create { draft, resp }).await
    }

    /// Replaces the record with `person.id`; returns its position in store order.
    pub async fn update(&self, person: Person) -> Result<usize, RuntimeError> {
        self.request(|resp| Command::Update { person, resp }).await?
    }

    /// Removes and returns the record with `id`.
    pub async fn delete_by_id(&self, id: PersonId) -> Result<Person, RuntimeError> {
        self.request(|resp| Command::Delete { id, resp }).await?
    }

    /// Stops the runtime task; later calls fail with [`RuntimeError::ChannelClosed`].
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }
}

fn handle_command(
    cmd: Command,
    store: &mut PersonStore,
    events_tx: &broadcast::Sender<RosterEvent>,
) -> bool {
    match cmd {
        Command::List { filter, page, resp } => {
            let _ = resp.send(query::query(store, filter.as_ref(), page));
        }
        Command::Oldest { resp } => {
            let _ = resp.send(query::oldest(store));
        }
        Command::FullNames { resp } => {
            let _ = resp.send(query::full_names(store));
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(store.all().to_vec());
        }
        Command::Get { id, resp } => {
            let res = store.find_by_id(id).cloned().map_err(RuntimeError::from);
            let _ = resp.send(res);
        }
        Command::Create { draft, resp } => {
            let person = store.insert(draft).clone();
            tracing::info!(id = person.id, "person created");
            let _ = events_tx.send(RosterEvent::Created { id: person.id });
            let _ = resp.send(person);
        }
        Command::Update { person, resp } => {
            let id = person.id;
            let res = store.update(person).map_err(RuntimeError::from);
            match &res {
                Ok(index) => {
                    tracing::info!(id, index, "person updated");
                    let _ = events_tx.send(RosterEvent::Updated { id, index: *index });
                }
                Err(err) => tracing::warn!(id, %err, "update rejected"),
            }
            let _ = resp.send(res);
        }
        Command::Delete { id, resp } => {
            let res = store.delete_by_id(id).map_err(RuntimeError::from);
            match &res {
                Ok(_) => {
                    tracing::info!(id, "person deleted");
                    let _ = events_tx.send(RosterEvent::Deleted { id });
                }
                Err(err) => tracing::warn!(id, %err, "delete rejected"),
            }
            let _ = resp.send(res);
        }
        Command::Shutdown { resp } => {
            let _ = resp.send(());
            return true;
        }
    }

    false
}
