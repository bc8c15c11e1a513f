mod batch_runner;
mod ledger_engine;
mod operation;
mod records;

pub use batch_runner::BatchRunner;
pub use ledger_engine::LedgerEngine;
pub use operation::Operation;
pub use records::{AccountRecord, OperationRecord};
