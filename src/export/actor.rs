//! Export actor - writes spreadsheets off the async runtime threads

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::constants::EXPORT_MIME_TYPE;
use crate::export::xlsx::write_xlsx;
use crate::messages::{ExportCommand, ExportResponse};

/// Export actor that processes spreadsheet commands
pub struct ExportActor {
    response_tx: mpsc::UnboundedSender<ExportResponse>,
    active_exports: JoinSet<()>,
}

impl ExportActor {
    pub fn new(response_tx: mpsc::UnboundedSender<ExportResponse>) -> Self {
        ExportActor {
            response_tx,
            active_exports: JoinSet::new(),
        }
    }

    /// Run the export actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<ExportCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(ExportCommand::WriteSpreadsheet { id, rows, path }) => {
                            let response_tx = self.response_tx.clone();

                            self.active_exports.spawn(async move {
                                tracing::info!(id, rows = rows.len(), path = %path.display(), mime = EXPORT_MIME_TYPE, "Exporting");
                                let target = path.clone();
                                let result = tokio::task::spawn_blocking(move || write_xlsx(&rows, &target)).await;

                                let response = match result {
                                    Ok(Ok(count)) => {
                                        tracing::info!(id, rows = count, "Export complete");
                                        ExportResponse::Saved { id, path, rows: count }
                                    }
                                    Ok(Err(e)) => {
                                        tracing::error!(id, error = %e, "Export failed");
                                        ExportResponse::Failed { id, message: format!("{:#}", e) }
                                    }
                                    Err(e) => {
                                        tracing::error!(id, error = %e, "Export task panicked");
                                        ExportResponse::Failed { id, message: e.to_string() }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(ExportCommand::Shutdown) | None => break,
                    }
                }

                Some(_result) = self.active_exports.join_next() => {}
            }
        }

        // Wait for in-flight exports
        while self.active_exports.join_next().await.is_some() {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Country;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_export_round_trip_through_actor() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Countries.xlsx");

        let (resp_tx, mut resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        tokio::spawn(ExportActor::new(resp_tx).run(cmd_rx));

        let rows = vec![Country::new("Chad"), Country::new("Benin"), Country::new("Togo")];
        cmd_tx
            .send(ExportCommand::WriteSpreadsheet { id: 3, rows, path: path.clone() })
            .unwrap();

        match resp_rx.recv().await {
            Some(ExportResponse::Saved { id, path: saved, rows }) => {
                assert_eq!(id, 3);
                assert_eq!(rows, 3);
                assert_eq!(saved, path);
                assert!(path.exists());
            }
            other => panic!("unexpected response: {:?}", other),
        }
        cmd_tx.send(ExportCommand::Shutdown).unwrap();
    }
}
