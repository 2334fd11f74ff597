//! CSV ingestion for receivable invoice detail exports
//!
//! Headers are matched after trimming whitespace and replacing internal
//! spaces with underscores, so "Last Payment Date" and "Last_Payment_Date"
//! resolve to the same column. Unparseable dates and amounts are coerced to
//! missing rather than failing the load; the engine decides per field how
//! missing data degrades.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use log::debug;

use super::data::{
    ColumnSet, InvoiceLedger, RawInvoice, COL_CONTACT, COL_DUE_DATE, COL_INVOICE_DATE,
    COL_INVOICE_TOTAL, COL_LAST_PAYMENT_DATE, COL_STATUS,
};
use crate::error::EngineResult;

/// Textual date format of the source exports, e.g. "13 Jan 2025"
pub const DATE_FORMAT: &str = "%d %b %Y";

/// Load a ledger from a CSV file.
///
/// `skip_rows` lines are discarded before the header row; Xero's
/// "Receivable Invoice Detail" export carries a four-line preamble.
pub fn load_invoices<P: AsRef<Path>>(path: P, skip_rows: usize) -> EngineResult<InvoiceLedger> {
    let file = File::open(path)?;
    load_invoices_from_reader(file, skip_rows)
}

/// Load a ledger from any reader producing CSV text.
pub fn load_invoices_from_reader<R: Read>(
    reader: R,
    skip_rows: usize,
) -> EngineResult<InvoiceLedger> {
    let mut buf = BufReader::new(reader);
    for _ in 0..skip_rows {
        let mut line = String::new();
        if buf.read_line(&mut line)? == 0 {
            break;
        }
    }

    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(buf);

    let normalized: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let position = |name: &str| normalized.iter().position(|h| h == name);

    let contact_idx = position(COL_CONTACT);
    let status_idx = position(COL_STATUS);
    let invoice_date_idx = position(COL_INVOICE_DATE);
    let due_date_idx = position(COL_DUE_DATE);
    let last_payment_idx = position(COL_LAST_PAYMENT_DATE);
    let total_idx = position(COL_INVOICE_TOTAL);

    let columns = ColumnSet {
        contact: contact_idx.is_some(),
        status: status_idx.is_some(),
        invoice_date: invoice_date_idx.is_some(),
        due_date: due_date_idx.is_some(),
        last_payment_date: last_payment_idx.is_some(),
        invoice_total: total_idx.is_some(),
    };

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        rows.push(RawInvoice {
            contact: cell(contact_idx).map(str::to_string),
            status: cell(status_idx).map(str::to_string),
            invoice_date: cell(invoice_date_idx).and_then(parse_date),
            due_date: cell(due_date_idx).and_then(parse_date),
            last_payment_date: cell(last_payment_idx).and_then(parse_date),
            invoice_total: cell(total_idx).and_then(parse_amount),
        });
    }
    debug!("Loaded {} invoice rows", rows.len());

    Ok(InvoiceLedger::new(rows, columns))
}

fn normalize_header(raw: &str) -> String {
    raw.trim().replace(' ', "_")
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn load(csv: &str) -> InvoiceLedger {
        load_invoices_from_reader(Cursor::new(csv), 0).expect("Failed to load")
    }

    #[test]
    fn test_header_normalization() {
        let ledger = load(
            " Contact , Invoice Date ,Due Date,Last Payment Date,Status,Invoice Total\n\
             Acme,01 Jan 2025,31 Jan 2025,05 Feb 2025,Paid,1000\n",
        );
        assert_eq!(ledger.columns, ColumnSet::all());
        assert_eq!(ledger.len(), 1);

        let row = &ledger.rows[0];
        assert_eq!(row.contact.as_deref(), Some("Acme"));
        assert_eq!(row.status.as_deref(), Some("Paid"));
        assert_eq!(row.due_date, NaiveDate::from_ymd_opt(2025, 1, 31));
        assert_eq!(row.last_payment_date, NaiveDate::from_ymd_opt(2025, 2, 5));
        assert_eq!(row.invoice_total, Some(1000.0));
    }

    #[test]
    fn test_unparseable_dates_become_missing() {
        let ledger = load(
            "Contact,Due_Date,Last_Payment_Date,Invoice_Total\n\
             Acme,not a date,2025-02-05,500\n",
        );
        let row = &ledger.rows[0];
        assert_eq!(row.due_date, None);
        // ISO dates are not the export format either
        assert_eq!(row.last_payment_date, None);
        assert_eq!(row.invoice_total, Some(500.0));
    }

    #[test]
    fn test_missing_columns_recorded() {
        let ledger = load(
            "Contact,Invoice_Total\n\
             Acme,100\n",
        );
        assert!(ledger.columns.contact);
        assert!(ledger.columns.invoice_total);
        assert!(!ledger.columns.status);
        assert!(!ledger.columns.due_date);
        assert!(!ledger.columns.last_payment_date);
    }

    #[test]
    fn test_skip_rows_reaches_header() {
        let csv = "Receivable Invoice Detail\n\
                   Demo Company\n\
                   ,,\n\
                   ,,\n\
                   Contact,Status,Invoice_Total\n\
                   Acme,Paid,250\n";
        let ledger =
            load_invoices_from_reader(Cursor::new(csv), 4).expect("Failed to load");
        assert!(ledger.columns.contact);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.rows[0].invoice_total, Some(250.0));
    }

    #[test]
    fn test_blank_cells_and_thousands_separators() {
        let ledger = load(
            "Contact,Status,Invoice_Total\n\
             ,Paid,\"1,250.50\"\n\
             Acme,,\n",
        );
        assert_eq!(ledger.rows[0].contact, None);
        assert_eq!(ledger.rows[0].invoice_total, Some(1250.50));
        assert_eq!(ledger.rows[1].status, None);
        assert_eq!(ledger.rows[1].invoice_total, None);
    }

    #[test]
    fn test_non_padded_days_parse() {
        let ledger = load(
            "Contact,Last_Payment_Date,Invoice_Total\n\
             Acme,5 Feb 2025,100\n",
        );
        assert_eq!(
            ledger.rows[0].last_payment_date,
            NaiveDate::from_ymd_opt(2025, 2, 5)
        );
    }
}
