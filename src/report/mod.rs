//! Report table: the published projection of the engine output
//!
//! Downstream collaborators (spreadsheet export, conditional row coloring)
//! consume these rows; the engine's internal aggregate never leaves the
//! library unprojected.

use std::io::Write;

use serde::Serialize;

use crate::engine::{ContactAggregate, RiskLevel};
use crate::error::EngineResult;

/// One row of the report, serialized under the external column names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Contact")]
    pub contact: String,
    /// "Yes" / "No"
    #[serde(rename = "High_Value")]
    pub high_value: String,
    #[serde(rename = "Late_Fee_Applicable")]
    pub late_fee_applicable: bool,
    #[serde(rename = "Number_of_Delays")]
    pub number_of_delays: u32,
    #[serde(rename = "Reduction_in_Term_Days")]
    pub reduction_in_term_days: u32,
    #[serde(rename = "Revised_Credit_Terms")]
    pub revised_credit_terms: u32,
    /// "High" / "Normal"
    #[serde(rename = "Risk")]
    pub risk: String,
    #[serde(rename = "Schedule")]
    pub schedule: String,
}

impl From<&ContactAggregate> for ReportRow {
    fn from(aggregate: &ContactAggregate) -> Self {
        Self {
            contact: aggregate.contact.clone(),
            high_value: if aggregate.high_value { "Yes" } else { "No" }.to_string(),
            late_fee_applicable: aggregate.late_fee_applicable,
            number_of_delays: aggregate.delay_count,
            reduction_in_term_days: aggregate.term_reduction_days,
            revised_credit_terms: aggregate.revised_credit_term_days,
            risk: aggregate.risk_level.as_str().to_string(),
            schedule: aggregate.reminder_schedule.clone(),
        }
    }
}

/// Project engine output onto the report table, preserving row order.
pub fn build_report(aggregates: &[ContactAggregate]) -> Vec<ReportRow> {
    aggregates.iter().map(ReportRow::from).collect()
}

/// Write the report as CSV, header included.
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Row emphasis for renderers that color the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RowHighlight {
    /// Whole row green: top-tier customer by volume
    HighValue,
    /// Whole row red: high-risk customer
    HighRisk,
    /// Red emphasis on the late-fee cell only
    LateFee,
    None,
}

type HighlightRule = (fn(&ReportRow) -> bool, RowHighlight);

/// Ordered precedence, evaluated top-down; the first matching rule wins,
/// so a high-value row never shows risk coloring.
const HIGHLIGHT_RULES: &[HighlightRule] = &[
    (|row| row.high_value == "Yes", RowHighlight::HighValue),
    (|row| row.risk == "High", RowHighlight::HighRisk),
    (|row| row.late_fee_applicable, RowHighlight::LateFee),
];

pub fn row_highlight(row: &ReportRow) -> RowHighlight {
    HIGHLIGHT_RULES
        .iter()
        .find(|(applies, _)| applies(row))
        .map(|&(_, highlight)| highlight)
        .unwrap_or(RowHighlight::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use crate::engine::derive_policy;
    use crate::ledger::{InvoiceLedger, RawInvoice};
    use chrono::NaiveDate;

    fn row(high_value: &str, risk: &str, late_fee: bool) -> ReportRow {
        ReportRow {
            contact: "X".to_string(),
            high_value: high_value.to_string(),
            late_fee_applicable: late_fee,
            number_of_delays: 0,
            reduction_in_term_days: 0,
            revised_credit_terms: 30,
            risk: risk.to_string(),
            schedule: "Normal".to_string(),
        }
    }

    #[test]
    fn test_highlight_precedence() {
        // High value wins over everything
        assert_eq!(row_highlight(&row("Yes", "High", true)), RowHighlight::HighValue);
        // Then risk
        assert_eq!(row_highlight(&row("No", "High", true)), RowHighlight::HighRisk);
        // Then the late-fee cell
        assert_eq!(row_highlight(&row("No", "Normal", true)), RowHighlight::LateFee);
        assert_eq!(row_highlight(&row("No", "Normal", false)), RowHighlight::None);
    }

    #[test]
    fn test_csv_shape() {
        let rows = vec![row("Yes", "Normal", false)];
        let mut out = Vec::new();
        write_csv(&rows, &mut out).expect("Failed to write");
        let text = String::from_utf8(out).expect("Invalid UTF-8");
        assert_eq!(
            text,
            "Contact,High_Value,Late_Fee_Applicable,Number_of_Delays,\
             Reduction_in_Term_Days,Revised_Credit_Terms,Risk,Schedule\n\
             X,Yes,false,0,0,30,Normal,Normal\n"
        );
    }

    #[test]
    fn test_report_bytes_are_idempotent() {
        let config = PolicyConfig::default();
        let date = |d: u32| NaiveDate::from_ymd_opt(2025, 1, d);
        let ledger = InvoiceLedger::from_records(vec![
            RawInvoice {
                contact: Some("Acme".to_string()),
                status: Some("Paid".to_string()),
                invoice_date: date(1),
                due_date: date(10),
                last_payment_date: date(20),
                invoice_total: Some(1000.0),
            },
            RawInvoice {
                contact: Some("Borealis".to_string()),
                status: Some("Paid".to_string()),
                invoice_date: date(1),
                due_date: date(10),
                last_payment_date: date(9),
                invoice_total: Some(2500.0),
            },
        ]);

        let render = || {
            let aggregates = derive_policy(&ledger, &config).expect("Pipeline failed");
            let mut out = Vec::new();
            write_csv(&build_report(&aggregates), &mut out).expect("Failed to write");
            out
        };
        assert_eq!(render(), render());
    }
}
