// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use hyper::{
    header,
    http::{self, HeaderValue},
    Response, StatusCode,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
pub const MARKER_HEADER: &str = "x-diagnostics-marker";

/// Builds the HTTP response carrying a finished report.
///
/// The status is always 200; collection failures live in the body. The only
/// error is a construction one, e.g. a marker value that is not a valid
/// header value.
pub fn create_report_response(
    body: String,
    marker: Option<&str>,
) -> http::Result<Response<String>> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, TEXT_PLAIN_UTF8);
    if let Some(marker) = marker {
        builder = builder.header(MARKER_HEADER, HeaderValue::from_str(marker)?);
    }
    debug!("Report response is {} bytes", body.len());
    builder.body(body)
}

/// API Gateway proxy integration response, the shape a Lambda function
/// returns to have its result served over HTTP.
///
/// ```json
/// {
///     "statusCode": 200,
///     "headers": { "content-type": "text/plain; charset=utf-8" },
///     "body": "Hello from Amazon λ!\n...",
///     "isBase64Encoded": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl From<Response<String>> for DiagnosticResponse {
    fn from(response: Response<String>) -> Self {
        let (parts, body) = response.into_parts();
        let headers = parts
            .headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        Self {
            status_code: parts.status.as_u16(),
            headers,
            body,
            is_base64_encoded: false,
        }
    }
}
