//! Reqwest-backed directory endpoint adapter.
//!
//! This adapter owns transport details only: route and query-string
//! construction, timeout handling, and HTTP error mapping. Bodies are
//! returned verbatim for the domain to decode.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::domain::ports::{
    DirectoryEndpoint, DirectoryEndpointError, DirectoryRoute, EndpointQuery, EndpointResponse,
};

const DEFAULT_USER_AGENT: &str = "usersearch-directory-client/0.1";

/// Outbound identity settings for directory requests.
pub struct DirectoryHttpIdentity {
    /// HTTP user-agent sent to the directory.
    pub user_agent: String,
}

impl Default for DirectoryHttpIdentity {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Directory adapter performing HTTP GET requests against one base URL.
///
/// The base URL must end with a trailing slash so route paths join
/// beneath it (e.g. `https://wiki.example.com/wiki/`).
pub struct DirectoryHttpEndpoint {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl DirectoryHttpEndpoint {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        Self::with_identity(base_url, timeout, DirectoryHttpIdentity::default())
    }

    /// Build an adapter with an explicit outbound identity.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_identity(
        base_url: Url,
        timeout: Duration,
        identity: DirectoryHttpIdentity,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            user_agent: identity.user_agent,
        })
    }

    fn route_url(&self, query: &EndpointQuery) -> Result<Url, DirectoryEndpointError> {
        let mut url = self
            .base_url
            .join(route_path(query.route))
            .map_err(|error| DirectoryEndpointError::invalid_request(error.to_string()))?;
        // The current-user route takes no parameters.
        if query.route != DirectoryRoute::CurrentUser {
            let mut pairs = url.query_pairs_mut();
            if let Some(cql) = &query.cql {
                pairs.append_pair("cql", cql);
            }
            pairs.append_pair("limit", &query.limit.to_string());
        }
        Ok(url)
    }
}

#[async_trait]
impl DirectoryEndpoint for DirectoryHttpEndpoint {
    async fn execute(
        &self,
        query: &EndpointQuery,
    ) -> Result<EndpointResponse, DirectoryEndpointError> {
        let url = self.route_url(query)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, self.user_agent.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;
        tracing::debug!(status, route = ?query.route, "directory request completed");
        Ok(EndpointResponse { status, body })
    }
}

fn route_path(route: DirectoryRoute) -> &'static str {
    match route {
        DirectoryRoute::UserSearch => "rest/api/search/user",
        DirectoryRoute::ContentSearch => "rest/api/search",
        DirectoryRoute::CurrentUser => "rest/api/user/current",
        DirectoryRoute::ContentListing => "rest/api/content",
        DirectoryRoute::SpaceListing => "rest/api/space",
    }
}

fn map_transport_error(error: reqwest::Error) -> DirectoryEndpointError {
    if error.is_timeout() {
        DirectoryEndpointError::timeout(error.to_string())
    } else {
        DirectoryEndpointError::transport(error.to_string())
    }
}
