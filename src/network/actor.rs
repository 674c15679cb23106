//! Network actor - runs the countries query in the Tokio runtime

use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, fetch_countries};

/// Network actor that processes fetch commands
pub struct NetworkActor {
    client: reqwest::Client,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<u64>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>, timeout_secs: u64) -> Self {
        NetworkActor {
            client: create_client(timeout_secs),
            response_tx,
            active_requests: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchCountries { id, endpoint }) => {
                            let (cancel_tx, mut cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, cancel_tx);

                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, endpoint = %endpoint, "Fetching countries");
                                tokio::select! {
                                    biased;

                                    _ = &mut cancel_rx => {
                                        tracing::info!(id, "Fetch abandoned");
                                    }
                                    result = fetch_countries(&client, &endpoint, id) => {
                                        match &result {
                                            NetworkResponse::Countries { countries, time_ms, .. } => {
                                                tracing::info!(id, count = countries.len(), time_ms, "Countries fetched");
                                            }
                                            NetworkResponse::Error { message, .. } => {
                                                tracing::warn!(id, error = %message, "Countries query failed");
                                            }
                                        }
                                        let _ = response_tx.send(result);
                                    }
                                }
                                id
                            });
                        }

                        Some(NetworkCommand::CancelFetch(id)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling fetch");
                                let _ = cancel_tx.send(());
                            }
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            break;
                        }
                    }
                }

                Some(result) = self.active_requests.join_next() => {
                    if let Ok(id) = result {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }

        // Let cancelled tasks observe the signal before the runtime drops them
        while self.active_requests.join_next().await.is_some() {}
    }
}
