//! Driven port for executing queries against the external directory.
//!
//! The domain owns the request and response shapes so the strategy
//! chain and the diagnostic prober can stay adapter-agnostic.

use async_trait::async_trait;

use super::define_port_error;

/// Routes exposed by the external directory service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryRoute {
    /// CQL-scoped user search.
    UserSearch,
    /// General content search, spanning every entity type.
    ContentSearch,
    /// Identity of the authenticated caller.
    CurrentUser,
    /// Paged content listing.
    ContentListing,
    /// Paged space listing.
    SpaceListing,
}

/// One request against the directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointQuery {
    /// Target route.
    pub route: DirectoryRoute,
    /// CQL expression; listing routes take none.
    pub cql: Option<String>,
    /// Maximum number of results requested.
    pub limit: u32,
}

impl EndpointQuery {
    /// Build a CQL-bearing query for a route.
    pub fn with_cql(route: DirectoryRoute, cql: impl Into<String>, limit: u32) -> Self {
        Self {
            route,
            cql: Some(cql.into()),
            limit,
        }
    }

    /// Build a listing query without a CQL expression.
    #[must_use]
    pub const fn listing(route: DirectoryRoute, limit: u32) -> Self {
        Self {
            route,
            cql: None,
            limit,
        }
    }
}

/// Raw response returned by the directory service.
///
/// Non-success statuses are delivered as responses rather than errors:
/// the search orchestrator advances on them and the prober records
/// them, so both need the status and body intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text; JSON on success, error detail otherwise.
    pub body: String,
}

impl EndpointResponse {
    /// Whether the status code signals success.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Errors surfaced while calling the directory service.
    pub enum DirectoryEndpointError {
        /// Network transport failed before receiving a response.
        Transport { message: String } =>
            "directory transport failed: {message}",
        /// Directory call exceeded the configured timeout.
        Timeout { message: String } =>
            "directory timeout: {message}",
        /// Adapter rejected the request before execution.
        InvalidRequest { message: String } =>
            "directory request invalid: {message}",
    }
}

impl DirectoryEndpointError {
    /// Return whether retrying this error is expected to help.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }
}

/// Port for executing directory queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryEndpoint: Send + Sync {
    /// Execute one query and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error only when no response arrived at all; non-ok
    /// statuses come back as [`EndpointResponse`] values.
    async fn execute(
        &self,
        query: &EndpointQuery,
    ) -> Result<EndpointResponse, DirectoryEndpointError>;
}

/// Fixture endpoint answering every query with an empty ok page.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureDirectoryEndpoint;

#[async_trait]
impl DirectoryEndpoint for FixtureDirectoryEndpoint {
    async fn execute(
        &self,
        _query: &EndpointQuery,
    ) -> Result<EndpointResponse, DirectoryEndpointError> {
        Ok(EndpointResponse {
            status: 200,
            body: r#"{"results":[]}"#.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::success(200, true)]
    #[case::created(201, true)]
    #[case::redirect(301, false)]
    #[case::bad_request(400, false)]
    #[case::gone(410, false)]
    #[case::server_error(500, false)]
    fn response_ok_tracks_status_class(#[case] status: u16, #[case] expected: bool) {
        let response = EndpointResponse {
            status,
            body: String::new(),
        };
        assert_eq!(response.ok(), expected);
    }

    #[test]
    fn transport_and_timeout_are_retryable() {
        assert!(DirectoryEndpointError::transport("reset").is_retryable());
        assert!(DirectoryEndpointError::timeout("deadline").is_retryable());
        assert!(!DirectoryEndpointError::invalid_request("bad url").is_retryable());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_endpoint_returns_empty_page() {
        let endpoint = FixtureDirectoryEndpoint;
        let response = endpoint
            .execute(&EndpointQuery::listing(DirectoryRoute::ContentListing, 1))
            .await
            .expect("fixture response");
        assert!(response.ok());
        assert_eq!(response.body, r#"{"results":[]}"#);
    }
}
