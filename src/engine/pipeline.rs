//! The credit policy derivation pipeline
//!
//! A pure batch computation over one in-memory ledger: filter paid rows,
//! normalize dates and score lateness, then aggregate, classify, and derive
//! revised terms per contact. No I/O, no shared state; concurrent runs over
//! separate ledgers are independent.

use log::{debug, warn};

use super::aggregate::{aggregate_contacts, ContactAggregate};
use super::stats::round2;
use crate::config::PolicyConfig;
use crate::error::{EngineError, EngineResult};
use crate::ledger::{
    ColumnSet, InvoiceLedger, RawInvoice, COL_CONTACT, COL_DUE_DATE, COL_INVOICE_DATE,
    COL_INVOICE_TOTAL, COL_LAST_PAYMENT_DATE, COL_STATUS,
};

/// Status value a row must carry to enter the pipeline. Case-sensitive.
pub const PAID_STATUS: &str = "Paid";

/// An invoice that survived cleaning, with lateness metrics attached.
#[derive(Debug, Clone)]
pub struct ScoredInvoice {
    pub contact: String,
    pub invoice_total: f64,
    pub is_late: bool,
    pub days_late: i64,
    /// Cost-of-capital loss for this invoice, rounded to cents
    pub late_impact: f64,
}

pub struct CreditPolicyEngine {
    config: PolicyConfig,
}

impl CreditPolicyEngine {
    /// Build an engine, rejecting malformed configuration up front.
    pub fn new(config: PolicyConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Run the full pipeline over one ledger, producing one row per contact.
    pub fn derive_policy(&self, ledger: &InvoiceLedger) -> EngineResult<Vec<ContactAggregate>> {
        check_schema(&ledger.columns)?;
        let paid = filter_paid(&ledger.rows, ledger.columns.status)?;
        let scored = score_lateness(&paid, &self.config)?;
        Ok(aggregate_contacts(&scored, &self.config))
    }
}

/// One-shot convenience over [`CreditPolicyEngine`].
pub fn derive_policy(
    ledger: &InvoiceLedger,
    config: &PolicyConfig,
) -> EngineResult<Vec<ContactAggregate>> {
    CreditPolicyEngine::new(config.clone())?.derive_policy(ledger)
}

/// Contact and invoice totals are indispensable; lateness needs at least one
/// of the two date columns. Anything else degrades with a warning.
fn check_schema(columns: &ColumnSet) -> EngineResult<()> {
    if !columns.contact {
        return Err(EngineError::MissingRequiredColumn {
            column: COL_CONTACT.to_string(),
        });
    }
    if !columns.invoice_total {
        return Err(EngineError::MissingRequiredColumn {
            column: COL_INVOICE_TOTAL.to_string(),
        });
    }
    if !columns.due_date && !columns.last_payment_date {
        return Err(EngineError::MissingRequiredColumn {
            column: format!("{COL_DUE_DATE}' / '{COL_LAST_PAYMENT_DATE}"),
        });
    }
    if !columns.invoice_date {
        warn!("Column '{COL_INVOICE_DATE}' not found in input data");
    }
    if !columns.due_date {
        warn!("Column '{COL_DUE_DATE}' not found - treating every invoice as paid on time");
    }
    if !columns.last_payment_date {
        warn!("Column '{COL_LAST_PAYMENT_DATE}' not found in input data");
    }
    Ok(())
}

/// Stage 1: retain rows with status "Paid". A schema without a Status
/// column skips the filter entirely.
fn filter_paid(rows: &[RawInvoice], has_status: bool) -> EngineResult<Vec<&RawInvoice>> {
    if !has_status {
        warn!("Column '{COL_STATUS}' not found - skipping paid invoice filtering");
        return Ok(rows.iter().collect());
    }

    let paid: Vec<&RawInvoice> = rows
        .iter()
        .filter(|row| row.status.as_deref() == Some(PAID_STATUS))
        .collect();
    debug!("Filtered to {} paid invoices", paid.len());

    if paid.is_empty() {
        return Err(EngineError::NoPaidInvoices);
    }
    Ok(paid)
}

/// Stage 2: drop rows without a payment date, then score lateness.
///
/// A missing due date makes a row unprovably late, so it scores as on time;
/// only a missing last payment date excludes a row outright.
fn score_lateness(rows: &[&RawInvoice], config: &PolicyConfig) -> EngineResult<Vec<ScoredInvoice>> {
    let daily_rate = config.wacc / config.days_in_year as f64;

    let mut scored = Vec::with_capacity(rows.len());
    let mut datable = 0usize;
    for row in rows {
        let Some(paid_on) = row.last_payment_date else {
            continue;
        };
        datable += 1;

        let Some(contact) = row.contact.as_deref().filter(|c| !c.is_empty()) else {
            debug!("Dropping invoice with no contact");
            continue;
        };
        let invoice_total = row.invoice_total.unwrap_or(0.0);

        let (is_late, days_late) = match row.due_date {
            Some(due) if paid_on > due => (true, (paid_on - due).num_days()),
            _ => (false, 0),
        };
        let late_impact = if is_late {
            round2(days_late as f64 * invoice_total * daily_rate)
        } else {
            0.0
        };

        scored.push(ScoredInvoice {
            contact: contact.to_string(),
            invoice_total,
            is_late,
            days_late,
            late_impact,
        });
    }

    if datable == 0 {
        return Err(EngineError::EmptyAfterDateFilter);
    }
    debug!("Scored {} invoices with usable payment dates", scored.len());
    Ok(scored)
}
