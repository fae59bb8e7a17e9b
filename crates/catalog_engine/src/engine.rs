use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use catalog_logging::{catalog_debug, catalog_error};

use crate::client::{CatalogApi, ClientSettings, ReqwestCatalogClient};
use crate::{EngineEvent, FetchError, Mutation, RequestId, SearchParams};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    Search {
        request_id: RequestId,
        params: SearchParams,
    },
    LoadItem {
        id: String,
    },
    Mutate {
        mutation: Mutation,
    },
}

/// Runs backend calls on a worker thread and hands results back as events.
///
/// Commands never block the caller. Every command yields exactly one event,
/// whether the call succeeded or failed.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, EngineError> {
        let client = ReqwestCatalogClient::new(settings)?;
        Self::with_api(Arc::new(client))
    }

    /// Same as `new`, with any `CatalogApi` implementation behind it.
    pub fn with_api(api: Arc<dyn CatalogApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(api.as_ref(), command).await;
                    if event_tx.send(event).is_err() {
                        catalog_debug!("Engine event dropped; receiver is gone");
                    }
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn search(&self, request_id: RequestId, params: SearchParams) {
        self.send(EngineCommand::Search { request_id, params });
    }

    pub fn load_item(&self, id: impl Into<String>) {
        self.send(EngineCommand::LoadItem { id: id.into() });
    }

    pub fn mutate(&self, mutation: Mutation) {
        self.send(EngineCommand::Mutate { mutation });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            catalog_error!("Engine worker has stopped; command dropped");
        }
    }
}

async fn handle_command(api: &dyn CatalogApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Search { request_id, params } => EngineEvent::SearchCompleted {
            request_id,
            result: api.search(&params).await,
        },
        EngineCommand::LoadItem { id } => {
            let result = api.item(&id).await;
            EngineEvent::ItemLoaded { id, result }
        }
        EngineCommand::Mutate { mutation } => {
            let result = api.mutate(&mutation).await;
            EngineEvent::MutationCompleted { mutation, result }
        }
    }
}
