//! HTTP gateway to the incident service.
//!
//! Every operation is a single attempt: no retry, no backoff, no caching.
//! Failures are classified into [`ApiError`] and surfaced untransformed;
//! interpreting them is the caller's job. Each call is independent and the
//! client keeps no state beyond the fixed base address.

use std::fmt;
use std::future::Future;

use futures::future::{select, Either};
use futures::pin_mut;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

use crate::models::{EventRecord, Incident, IncidentSummary, NewEvent};

/// Hard per-request bound. The service has no long-running endpoints, so a
/// request that takes longer than this is treated as failed.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// Service root, fixed at build time via `BLACKBOX_API_URL`. The relative
/// default keeps local development same-origin behind a dev-server proxy.
pub fn api_base_url() -> &'static str {
    option_env!("BLACKBOX_API_URL").unwrap_or("/api")
}

fn endpoint(path: &str) -> String {
    format!("{}{}", api_base_url(), path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The service answered 404: the requested resource does not exist.
    NotFound,
    /// Any other non-2xx response.
    Http { status: u16, message: String },
    /// The request could not be sent or the connection dropped.
    Network(String),
    /// No response within [`REQUEST_TIMEOUT_MS`].
    Timeout,
    /// A 2xx response whose body did not match the expected shape.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound => write!(f, "not found"),
            ApiError::Http { status, message } => {
                if message.is_empty() {
                    write!(f, "server returned HTTP {}", status)
                } else {
                    write!(f, "server returned HTTP {}: {}", status, message)
                }
            }
            ApiError::Network(message) => write!(f, "network error: {}", message),
            ApiError::Timeout => {
                write!(f, "request timed out after {}ms", REQUEST_TIMEOUT_MS)
            }
            ApiError::Decode(message) => write!(f, "unexpected response body: {}", message),
        }
    }
}

/// Race a request against the fixed timeout. The losing request future is
/// dropped; any late completion on the wire is simply ignored.
async fn with_timeout<F, T>(fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    pin_mut!(fut);
    pin_mut!(timeout);
    match select(fut, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

/// Classify a non-2xx response; 404 gets its own variant so callers can
/// distinguish a missing resource from a transport or server fault.
async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.status() == 404 {
        return Err(ApiError::NotFound);
    }
    if !response.ok() {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Http { status, message });
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = ensure_ok(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// `GET /incidents` with optional filter params (e.g. `status`,
/// `environment`). Returns summaries ordered by the server.
pub async fn list_incidents(params: &[(&str, &str)]) -> Result<Vec<IncidentSummary>, ApiError> {
    let request = Request::get(&endpoint("/incidents")).query(params.iter().copied());
    with_timeout(async move {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    })
    .await
}

/// `GET /incidents/{id}`: the full record including its timeline.
pub async fn get_incident(id: i64) -> Result<Incident, ApiError> {
    let request = Request::get(&endpoint(&format!("/incidents/{}", id)));
    with_timeout(async move {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    })
    .await
}

/// `PATCH /incidents/{id}/resolve`. The acknowledgement body carries nothing
/// the views need; callers refetch the incident for server truth instead.
pub async fn resolve_incident(id: i64) -> Result<(), ApiError> {
    let request = Request::patch(&endpoint(&format!("/incidents/{}/resolve", id)));
    with_timeout(async move {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        ensure_ok(response).await?;
        Ok(())
    })
    .await
}

/// `GET /events` with optional filter params (`service`, `environment`,
/// `level`, `limit`). Raw ingested events, primarily for debugging.
pub async fn list_events(params: &[(&str, &str)]) -> Result<Vec<EventRecord>, ApiError> {
    let request = Request::get(&endpoint("/events")).query(params.iter().copied());
    with_timeout(async move {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    })
    .await
}

/// `POST /events`: ingest a single event.
pub async fn create_event(event: &NewEvent) -> Result<EventRecord, ApiError> {
    let request = Request::post(&endpoint("/events"))
        .json(event)
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    with_timeout(async move {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_path() {
        // Without BLACKBOX_API_URL set at build time the base is relative.
        assert_eq!(endpoint("/incidents"), "/api/incidents");
        assert_eq!(endpoint("/incidents/42/resolve"), "/api/incidents/42/resolve");
    }

    #[test]
    fn error_display_is_operator_readable() {
        assert_eq!(ApiError::NotFound.to_string(), "not found");
        assert_eq!(
            ApiError::Http {
                status: 500,
                message: String::new()
            }
            .to_string(),
            "server returned HTTP 500"
        );
        assert_eq!(
            ApiError::Http {
                status: 422,
                message: "bad payload".into()
            }
            .to_string(),
            "server returned HTTP 422: bad payload"
        );
        assert!(ApiError::Timeout.to_string().contains("10000ms"));
        assert!(ApiError::Network("connection refused".into())
            .to_string()
            .contains("connection refused"));
    }

    #[test]
    fn not_found_is_distinct_from_other_errors() {
        assert_ne!(
            ApiError::NotFound,
            ApiError::Http {
                status: 500,
                message: String::new()
            }
        );
        assert_ne!(ApiError::NotFound, ApiError::Timeout);
    }
}
