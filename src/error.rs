use thiserror::Error;

/// Errors of the aggregation tree and its interaction controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("node '{parent}' already has a child '{key}'")]
    DuplicateKey { parent: String, key: String },
    #[error("node '{parent}' has no child '{key}'")]
    NotFound { parent: String, key: String },
    #[error("row {index} is out of range, the view has {len} rows")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors while reading a bank statement CSV. Any of them rejects the whole file.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read the statement file")]
    Io(#[from] std::io::Error),
    #[error("could not split the statement into CSV records")]
    Csv(#[from] csv::Error),
    #[error("the statement has no header row")]
    MissingHeader,
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: invalid date in column '{column}': {value:?}")]
    InvalidDate {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("line {line}: invalid amount in column '{column}': {value:?}")]
    InvalidAmount {
        line: u64,
        column: &'static str,
        value: String,
    },
}
