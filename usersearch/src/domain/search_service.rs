//! Fallback orchestration over the ordered strategy chain.

use std::sync::Arc;

use crate::domain::hits;
use crate::domain::ports::{
    DirectoryEndpoint, DirectoryEndpointError, EndpointQuery, EndpointResponse,
};
use crate::domain::strategy::{self, SearchStrategy};
use crate::domain::user::DirectoryUser;

/// Outcome of driving one strategy to resolution.
///
/// Every failure mode collapses into an advance decision; no error
/// crosses a strategy boundary.
#[derive(Debug)]
enum StrategyOutcome {
    /// Strategy produced at least one usable user.
    Matched(Vec<DirectoryUser>),
    /// Ok response whose hits normalized to nothing usable.
    NoMatches,
    /// Applicability predicate rejected the query.
    Skipped,
    /// Transport failure or non-ok status.
    Failed,
}

/// User search service sequencing the fallback chain.
///
/// Strategies run strictly in order; the first one producing at least
/// one valid normalized user wins outright, even if a later phrasing
/// might match more broadly. Precision over recall.
pub struct UserSearchService {
    endpoint: Arc<dyn DirectoryEndpoint>,
    limit: u32,
}

impl UserSearchService {
    /// Build a service over a directory endpoint with the default page size.
    #[must_use]
    pub fn new(endpoint: Arc<dyn DirectoryEndpoint>) -> Self {
        Self::with_limit(endpoint, strategy::DEFAULT_RESULT_LIMIT)
    }

    /// Build a service with an explicit page size.
    #[must_use]
    pub const fn with_limit(endpoint: Arc<dyn DirectoryEndpoint>, limit: u32) -> Self {
        Self { endpoint, limit }
    }

    /// Search with every phrasing in order, returning the first match set.
    ///
    /// Strategy-local failures (inapplicable phrasing, transport errors,
    /// non-ok statuses, empty result pages) advance the chain and never
    /// surface to the caller. An empty list means every phrasing was
    /// exhausted without a match; a blank query short-circuits to that
    /// same empty list.
    pub async fn search(&self, query: &str) -> Vec<DirectoryUser> {
        if query.trim().is_empty() {
            tracing::debug!("blank query, nothing to search for");
            return Vec::new();
        }

        for strategy in strategy::fallback_chain() {
            match self.try_strategy(&strategy, query).await {
                StrategyOutcome::Matched(users) => {
                    tracing::debug!(
                        label = strategy.label(),
                        matches = users.len(),
                        "strategy matched"
                    );
                    return users;
                }
                StrategyOutcome::Skipped => {
                    tracing::debug!(label = strategy.label(), "strategy inapplicable, skipping");
                }
                StrategyOutcome::NoMatches => {
                    tracing::debug!(label = strategy.label(), "strategy found no usable users");
                }
                StrategyOutcome::Failed => {}
            }
        }

        tracing::warn!(query, "every search phrasing was exhausted without a match");
        Vec::new()
    }

    /// Run only the generic phrasing, surfacing endpoint failures.
    ///
    /// Callers that must distinguish "no matches" from "search is
    /// broken" use this instead of the fallback chain.
    ///
    /// # Errors
    ///
    /// Returns an error for blank queries, transport failures, and
    /// non-ok directory statuses.
    pub async fn search_strict(
        &self,
        query: &str,
    ) -> Result<Vec<DirectoryUser>, DirectoryEndpointError> {
        if query.trim().is_empty() {
            return Err(DirectoryEndpointError::invalid_request(
                "query must not be empty",
            ));
        }

        let strategy = strategy::generic_user();
        let response = self.invoke(&strategy, query).await?;
        if !response.ok() {
            return Err(map_status_error(&response));
        }
        Ok(hits::normalize_body(&response.body))
    }

    /// Drive one strategy from applicability check to normalized outcome.
    async fn try_strategy(&self, strategy: &SearchStrategy, query: &str) -> StrategyOutcome {
        if !strategy.applies_to(query) {
            return StrategyOutcome::Skipped;
        }

        let response = match self.invoke(strategy, query).await {
            Ok(response) => response,
            Err(error) => {
                tracing::debug!(label = strategy.label(), %error, "strategy invocation failed");
                return StrategyOutcome::Failed;
            }
        };
        if !response.ok() {
            tracing::debug!(
                label = strategy.label(),
                status = response.status,
                "strategy answered with non-ok status"
            );
            return StrategyOutcome::Failed;
        }

        let users = hits::normalize_body(&response.body);
        if users.is_empty() {
            StrategyOutcome::NoMatches
        } else {
            StrategyOutcome::Matched(users)
        }
    }

    async fn invoke(
        &self,
        strategy: &SearchStrategy,
        query: &str,
    ) -> Result<EndpointResponse, DirectoryEndpointError> {
        let request =
            EndpointQuery::with_cql(strategy.route(), strategy.build_cql(query), self.limit);
        self.endpoint.execute(&request).await
    }
}

/// Map a non-ok response to a caller-visible error for the strict path.
fn map_status_error(response: &EndpointResponse) -> DirectoryEndpointError {
    let message = format!("search failed with status {}", response.status);
    if (400..500).contains(&response.status) {
        DirectoryEndpointError::invalid_request(message)
    } else {
        DirectoryEndpointError::transport(message)
    }
}
