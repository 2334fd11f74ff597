//! Credit policy derivation engine

mod aggregate;
mod pipeline;
mod stats;

pub use aggregate::{ContactAggregate, RiskLevel};
pub use pipeline::{derive_policy, CreditPolicyEngine, ScoredInvoice, PAID_STATUS};
pub use stats::{quantile, round2};
