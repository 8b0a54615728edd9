// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

use std::{env, sync::Arc};

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use serverless_diagnostics_core::{handle, logger, Config, DiagnosticResponse, InvocationContext};

#[tokio::main]
pub async fn main() -> Result<(), Error> {
    let log_level = env::var("DIAG_LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    let env_filter = format!("h2=off,hyper=off,{}", log_level);
    let filter = EnvFilter::try_new(env_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .event_format(logger::Formatter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    debug!("Logging subsystem enabled");

    let config = match Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Error creating config on diagnostics function startup: {e}");
            return Err(e.into());
        }
    };
    info!(
        "Starting diagnostics function, listing {} directories and running {} commands",
        config.list_dirs.len(),
        config.commands.len()
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let config = Arc::clone(&config);
        async move { function_handler(event, &config).await }
    }))
    .await
}

async fn function_handler(
    event: LambdaEvent<Value>,
    config: &Config,
) -> Result<DiagnosticResponse, Error> {
    let (_payload, context) = event.into_parts();
    let ctx = invocation_context(&context);
    Ok(handle(&ctx, config).await?)
}

fn invocation_context(context: &lambda_runtime::Context) -> InvocationContext {
    InvocationContext::from_deadline_ms(context.request_id.clone(), context.deadline)
}
