//! Invoice record types and the in-memory ledger

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical column names after header normalization
pub const COL_CONTACT: &str = "Contact";
pub const COL_STATUS: &str = "Status";
pub const COL_INVOICE_DATE: &str = "Invoice_Date";
pub const COL_DUE_DATE: &str = "Due_Date";
pub const COL_LAST_PAYMENT_DATE: &str = "Last_Payment_Date";
pub const COL_INVOICE_TOTAL: &str = "Invoice_Total";

/// A single invoice line item as ingested, before any cleaning.
///
/// Every field is optional: source exports routinely carry blank cells and
/// unparseable dates, and the pipeline decides per field how to degrade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInvoice {
    pub contact: Option<String>,
    pub status: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub last_payment_date: Option<NaiveDate>,
    pub invoice_total: Option<f64>,
}

/// Which of the canonical columns the source schema actually carried.
///
/// The engine uses this to tell "column absent" (degrade or fail at the
/// schema level) apart from "cell blank in a present column" (a per-row
/// data condition).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSet {
    pub contact: bool,
    pub status: bool,
    pub invoice_date: bool,
    pub due_date: bool,
    pub last_payment_date: bool,
    pub invoice_total: bool,
}

impl ColumnSet {
    /// Every canonical column present
    pub fn all() -> Self {
        Self {
            contact: true,
            status: true,
            invoice_date: true,
            due_date: true,
            last_payment_date: true,
            invoice_total: true,
        }
    }
}

/// One complete input dataset for a policy run.
#[derive(Debug, Clone)]
pub struct InvoiceLedger {
    pub rows: Vec<RawInvoice>,
    pub columns: ColumnSet,
}

impl InvoiceLedger {
    pub fn new(rows: Vec<RawInvoice>, columns: ColumnSet) -> Self {
        Self { rows, columns }
    }

    /// Ledger built from fully typed records, e.g. a deserialized JSON
    /// payload. Every canonical column counts as present.
    pub fn from_records(rows: Vec<RawInvoice>) -> Self {
        Self::new(rows, ColumnSet::all())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
