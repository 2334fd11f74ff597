//! Invoice ledger: record types and CSV ingestion

mod data;
pub mod loader;

pub use data::{
    ColumnSet, InvoiceLedger, RawInvoice, COL_CONTACT, COL_DUE_DATE, COL_INVOICE_DATE,
    COL_INVOICE_TOTAL, COL_LAST_PAYMENT_DATE, COL_STATUS,
};
pub use loader::{load_invoices, load_invoices_from_reader, DATE_FORMAT};
