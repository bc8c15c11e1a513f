use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Record error: field '{field}' is required for '{operation}' operations")]
    MissingField {
        operation: &'static str,
        field: &'static str
    }
}

impl RecordError {
    pub fn missing_field(operation: &'static str, field: &'static str) -> Self {
        Self::MissingField { operation, field }
    }
}
