//! Lambda entrypoint shared by every function.
//!
//! This module owns the single error boundary of an invocation:
//! - Event parsing (delegated to `invocation`)
//! - The function call itself (any [`Function`] implementation)
//! - Envelope building (delegated to `envelope`)
//!
//! Whatever fails along the way becomes the same 400 response.

use async_trait::async_trait;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::{error, info};

use super::{envelope, invocation};
use crate::core::models::{HandlerResponse, Invocation, Outcome};
use crate::errors::FunctionError;

/// One serverless function: a resource id and query in, an [`Outcome`] out.
#[async_trait]
pub trait Function: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Value of the `Expiration-Time` header, when configured.
    fn expiration_time(&self) -> Option<&str>;

    async fn call(&self, invocation: &Invocation) -> Result<Outcome, FunctionError>;
}

/// Run one invocation end to end and always produce a response.
#[tracing::instrument(level = "info", skip(function, payload), fields(function = function.name()))]
pub async fn respond<F>(function: &F, payload: &Value, request_id: &str) -> HandlerResponse
where
    F: Function + ?Sized,
{
    let meta = envelope::InvocationMeta::start(
        request_id,
        function.expiration_time().map(str::to_string),
    );

    let result = match invocation::parse_event(payload) {
        Ok(invocation) => {
            info!(
                resource_id = %invocation.resource_id(),
                query_params = invocation.query.len(),
                "Parsed invocation"
            );
            function.call(&invocation).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => {
            let response = envelope::from_outcome(&outcome, &meta);
            info!(
                status = response.status_code,
                elapsed_ms = %meta.elapsed_millis(),
                "Invocation succeeded"
            );
            response
        }
        Err(e) => {
            error!(
                error = %e,
                elapsed_ms = %meta.elapsed_millis(),
                "Invocation failed"
            );
            envelope::error(&e)
        }
    }
}

/// Lambda handler for a single function.
///
/// # Errors
///
/// Never fails on its own: every invocation error is folded into a 400
/// response. The `Result` matches what `lambda_runtime` expects.
pub async fn function_handler<F>(
    function: &F,
    event: LambdaEvent<Value>,
) -> Result<HandlerResponse, Error>
where
    F: Function + ?Sized,
{
    let (payload, context) = event.into_parts();
    Ok(respond(function, &payload, &context.request_id).await)
}

/// Serve `function` on the Lambda runtime until the platform shuts it down.
///
/// # Errors
///
/// Returns an error if the runtime loop itself fails.
pub async fn run<F>(function: F) -> Result<(), Error>
where
    F: Function,
{
    let function = &function;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(function, event).await
    }))
    .await
}
