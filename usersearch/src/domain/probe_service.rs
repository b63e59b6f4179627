//! Diagnostic probing of directory endpoints.
//!
//! The prober sits outside the live search path. It exercises a fixed
//! endpoint set plus one match-everything query and records what each
//! answered, so operators can tell a retired endpoint apart from a
//! directory that simply has no matching users.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::hits::RawSearchPage;
use crate::domain::ports::{DirectoryEndpoint, DirectoryRoute, EndpointQuery};

/// Match-everything CQL exercised by the probe.
const PROBE_CQL: &str = "user.fullname~\"*\"";
/// Filter applied when probing the user-search route itself.
const KNOWN_USERS_CQL: &str = "user.type=\"known\"";
/// Status signalling a retired endpoint.
const STATUS_GONE: u16 = 410;
/// Upper bound on captured error text.
const ERROR_PREVIEW_CHAR_LIMIT: usize = 200;

/// Result of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointProbe {
    /// Probe label.
    pub name: &'static str,
    /// HTTP status, when a response arrived at all.
    pub status: Option<u16>,
    /// Whether the endpoint answered with a success status.
    pub ok: bool,
    /// Truncated error text for transport failures and unexpected
    /// non-ok statuses. A plain 410 carries no text; that status is
    /// the finding.
    pub error: Option<String>,
}

/// Result of the match-everything CQL probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CqlProbe {
    /// HTTP status, when a response arrived at all.
    pub status: Option<u16>,
    /// Whether the query answered with a success status.
    pub ok: bool,
    /// Number of raw hits decoded from an ok response.
    pub result_count: Option<usize>,
    /// Truncated error text when the query failed.
    pub error: Option<String>,
}

/// Aggregate endpoint health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticReport {
    /// Per-endpoint results, in probe order.
    pub endpoints: Vec<EndpointProbe>,
    /// Match-everything query result.
    pub cql: CqlProbe,
    /// Whether any probe reached its endpoint successfully.
    pub reachable: bool,
    /// Endpoints that answered 410 Gone and are presumed retired.
    pub deprecated: Vec<&'static str>,
}

/// Prober exercising a fixed endpoint set for operational diagnosis.
pub struct DiagnosticProber {
    endpoint: Arc<dyn DirectoryEndpoint>,
}

impl DiagnosticProber {
    /// Build a prober over a directory endpoint.
    #[must_use]
    pub const fn new(endpoint: Arc<dyn DirectoryEndpoint>) -> Self {
        Self { endpoint }
    }

    /// Probe every endpoint and the match-everything query.
    ///
    /// Probes run independently; one failing never aborts the rest,
    /// and nothing here feeds back into the live search path.
    pub async fn probe(&self) -> DiagnosticReport {
        let targets = [
            (
                "content",
                EndpointQuery::listing(DirectoryRoute::ContentListing, 1),
            ),
            (
                "space",
                EndpointQuery::listing(DirectoryRoute::SpaceListing, 1),
            ),
            (
                "user-current",
                EndpointQuery::listing(DirectoryRoute::CurrentUser, 1),
            ),
            (
                "user-search",
                EndpointQuery::with_cql(DirectoryRoute::UserSearch, KNOWN_USERS_CQL, 1),
            ),
        ];

        let mut endpoints = Vec::with_capacity(targets.len());
        for (name, query) in targets {
            endpoints.push(self.probe_endpoint(name, &query).await);
        }
        let cql = self.probe_cql().await;

        let reachable = cql.ok || endpoints.iter().any(|probe| probe.ok);
        let deprecated = endpoints
            .iter()
            .filter(|probe| probe.status == Some(STATUS_GONE))
            .map(|probe| probe.name)
            .collect();

        DiagnosticReport {
            endpoints,
            cql,
            reachable,
            deprecated,
        }
    }

    async fn probe_endpoint(&self, name: &'static str, query: &EndpointQuery) -> EndpointProbe {
        match self.endpoint.execute(query).await {
            Ok(response) => {
                let capture_error = !response.ok() && response.status != STATUS_GONE;
                EndpointProbe {
                    name,
                    status: Some(response.status),
                    ok: response.ok(),
                    error: capture_error.then(|| error_preview(&response.body)),
                }
            }
            Err(error) => {
                tracing::debug!(name, %error, "endpoint probe failed");
                EndpointProbe {
                    name,
                    status: None,
                    ok: false,
                    error: Some(error.to_string()),
                }
            }
        }
    }

    async fn probe_cql(&self) -> CqlProbe {
        let query = EndpointQuery::with_cql(DirectoryRoute::UserSearch, PROBE_CQL, 1);
        match self.endpoint.execute(&query).await {
            Ok(response) if response.ok() => {
                // Raw hit count only; the prober records, it never filters.
                let count = serde_json::from_str::<RawSearchPage>(&response.body)
                    .map(|page| page.results.len())
                    .unwrap_or(0);
                CqlProbe {
                    status: Some(response.status),
                    ok: true,
                    result_count: Some(count),
                    error: None,
                }
            }
            Ok(response) => CqlProbe {
                status: Some(response.status),
                ok: false,
                result_count: None,
                error: Some(error_preview(&response.body)),
            },
            Err(error) => {
                tracing::debug!(%error, "match-everything probe failed");
                CqlProbe {
                    status: None,
                    ok: false,
                    result_count: None,
                    error: Some(error.to_string()),
                }
            }
        }
    }
}

fn error_preview(body: &str) -> String {
    body.chars().take(ERROR_PREVIEW_CHAR_LIMIT).collect()
}
