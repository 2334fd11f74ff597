//! Lambda HTTP surface for the credit policy engine
//!
//! POST a JSON body `{"config": {...}, "invoices": [...]}` (config fields
//! all optional); the response is the report table as JSON. Engine errors
//! come back as 400 with the message verbatim, never partial output.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde::Deserialize;

use receivables_system::{
    config::PolicyConfig,
    engine::CreditPolicyEngine,
    ledger::InvoiceLedger,
    report::build_report,
    RawInvoice,
};

#[derive(Debug, Deserialize)]
struct ReportRequest {
    #[serde(default)]
    config: PolicyConfig,
    invoices: Vec<RawInvoice>,
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let request: ReportRequest = match serde_json::from_slice(event.body().as_ref()) {
        Ok(request) => request,
        Err(err) => return bad_request(format!("invalid request body: {err}")),
    };

    let engine = match CreditPolicyEngine::new(request.config) {
        Ok(engine) => engine,
        Err(err) => return bad_request(err.to_string()),
    };

    let ledger = InvoiceLedger::from_records(request.invoices);
    match engine.derive_policy(&ledger) {
        Ok(aggregates) => {
            let body = serde_json::to_string(&build_report(&aggregates))?;
            Ok(Response::builder()
                .status(200)
                .header("content-type", "application/json")
                .body(Body::from(body))?)
        }
        Err(err) => bad_request(err.to_string()),
    }
}

fn bad_request(message: String) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(400)
        .header("content-type", "text/plain")
        .body(Body::from(message))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
