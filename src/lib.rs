//! Receivables System - Credit policy derivation for accounts receivable ledgers
//!
//! This library provides:
//! - Invoice ledger ingestion from CSV detail exports
//! - A five-stage policy pipeline: paid-status filter, lateness scoring,
//!   per-contact aggregation, risk classification, credit-term derivation
//! - Report table projection, CSV export, and renderer highlight rules

pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod report;

// Re-export commonly used types
pub use config::PolicyConfig;
pub use engine::{derive_policy, ContactAggregate, CreditPolicyEngine, RiskLevel};
pub use error::{EngineError, EngineResult};
pub use ledger::{load_invoices, InvoiceLedger, RawInvoice};
pub use report::{build_report, row_highlight, write_csv, ReportRow, RowHighlight};
