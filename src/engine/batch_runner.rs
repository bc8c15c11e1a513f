use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, warn};

use crate::engine::{AccountRecord, LedgerEngine, Operation, OperationRecord};
use crate::models::Account;
use crate::storage::Storage;

/// Counts reported at the end of a batch run.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub applied: usize,
    pub rejected: usize,
    pub malformed: usize
}

/// Streams CSV input through a [`LedgerEngine`].
pub struct BatchRunner<S: Storage> {
    engine: Arc<LedgerEngine<S>>,
    backpressure: usize
}

impl<S: Storage> BatchRunner<S> {
    pub fn new(engine: Arc<LedgerEngine<S>>) -> Self {
        Self {
            engine,
            backpressure: 256
        }
    }

    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    /// Registers every account of the catalog at `path`. Malformed rows and rejected
    /// accounts are logged and counted, they do not stop the load.
    pub async fn load_accounts(&self, path: &str) -> anyhow::Result<RunSummary> {
        let (sender, mut receiver) = mpsc::channel::<AccountRecord>(self.backpressure);
        let csv_handle = spawn_csv_reader(path.to_string(), sender);
        let mut summary = RunSummary::default();

        while let Some(record) = receiver.recv().await {
            match self.engine.register_account(Account::from(record)).await {
                Ok(()) => summary.applied += 1,
                Err(error) => {
                    warn!("Account rejected: {error}");
                    summary.rejected += 1;
                }
            }
        }

        summary.malformed = join_reader(csv_handle).await;

        Ok(summary)
    }

    /// Applies every operation of the CSV at `path` in file order.
    pub async fn run(&self, path: &str) -> anyhow::Result<RunSummary> {
        let (sender, mut receiver) = mpsc::channel::<OperationRecord>(self.backpressure);
        let csv_handle = spawn_csv_reader(path.to_string(), sender);
        let mut summary = RunSummary::default();

        while let Some(record) = receiver.recv().await {
            let operation = match Operation::try_from(record) {
                Ok(operation) => operation,
                Err(error) => {
                    error!("{error}");
                    summary.malformed += 1;
                    continue;
                }
            };

            match self.engine.apply(&operation).await {
                Ok(receipt) => {
                    debug!("Operation [{}] appended [{}] transactions", operation.label(), receipt.transactions.len());

                    if let Some(account_id) = receipt.opened_account {
                        debug!("Operation [{}] opened account [{account_id}]", operation.label());
                    }

                    summary.applied += 1;
                },
                Err(error) => {
                    //NOTE: None of the ledger errors are fatal, the operation is dropped and the run continues
                    warn!("Operation [{}] rejected: {error}", operation.label());
                    summary.rejected += 1;
                }
            }
        }

        summary.malformed += join_reader(csv_handle).await;

        Ok(summary)
    }
}

/// Reads `path` on the blocking pool, forwarding each row that deserializes and
/// returning the number of rows that did not.
fn spawn_csv_reader<T>(path: String, sender: mpsc::Sender<T>) -> JoinHandle<usize>
where
    T: DeserializeOwned + Send + 'static
{
    spawn_blocking(move || {
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) => {
                error!("Error opening CSV at path: {path} | {error}");
                return 0;
            }
        };

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut malformed = 0;

        for result in reader.deserialize::<T>() {
            match result {
                Ok(record) => {
                    if sender.blocking_send(record).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    error!("CSV deserialization error: {error}");
                    malformed += 1;
                }
            }
        }

        malformed
    })
}

async fn join_reader(handle: JoinHandle<usize>) -> usize {
    handle.await.unwrap_or_else(|error| {
        error!("CSV ingestion failed: {error}");
        0
    })
}
