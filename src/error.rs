//! Error taxonomy for the credit policy engine
//!
//! Every variant is fatal to the run that raised it: the pipeline is
//! deterministic, so retrying with unchanged input would reproduce the
//! same error. Harnesses surface the message verbatim and abort.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A column the pipeline cannot run without is absent from the schema.
    #[error("Required column '{column}' not found in input data")]
    MissingRequiredColumn { column: String },

    /// The status filter removed every row.
    #[error("No paid invoices found after filtering - check your Status column values")]
    NoPaidInvoices,

    /// No row carries a parseable last payment date, so lateness cannot be
    /// computed for anything.
    #[error("No invoice has a usable last payment date")]
    EmptyAfterDateFilter,

    /// Malformed configuration, e.g. a non-positive day-count convention.
    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
