//! Declarative query strategies tried in order by the orchestrator.
//!
//! Each strategy encodes one way of phrasing a free-text query in the
//! directory's CQL dialect. Keeping the phrasing declarative (label,
//! route, applicability, CQL builder) lets strategies be unit-tested
//! and reordered without touching the orchestration loop.

use crate::domain::ports::DirectoryRoute;

/// Default page size requested from the directory.
pub const DEFAULT_RESULT_LIMIT: u32 = 20;

/// Which phrasing a strategy uses against the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// Field-scoped match on the display-name field.
    FullName,
    /// Broader match over the whole user record.
    GenericUser,
    /// Match on the account-identifier field; email-like queries only.
    AccountId,
    /// General content search filtered to user entities.
    ContentSearch,
}

/// One self-contained way of phrasing a user search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStrategy {
    kind: StrategyKind,
    label: &'static str,
}

impl SearchStrategy {
    /// Phrasing variant.
    #[must_use]
    pub const fn kind(&self) -> StrategyKind {
        self.kind
    }

    /// Stable tag used in diagnostics and logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Route this strategy queries.
    #[must_use]
    pub const fn route(&self) -> DirectoryRoute {
        match self.kind {
            StrategyKind::ContentSearch => DirectoryRoute::ContentSearch,
            StrategyKind::FullName | StrategyKind::GenericUser | StrategyKind::AccountId => {
                DirectoryRoute::UserSearch
            }
        }
    }

    /// Whether the strategy applies to this query text.
    ///
    /// The account-identifier field only matches email-like values, so
    /// that phrasing is skipped unless the query contains `@` or `.`.
    #[must_use]
    pub fn applies_to(&self, query: &str) -> bool {
        match self.kind {
            StrategyKind::AccountId => query.contains('@') || query.contains('.'),
            StrategyKind::FullName | StrategyKind::GenericUser | StrategyKind::ContentSearch => {
                true
            }
        }
    }

    /// Build the CQL expression embedding the query with a trailing wildcard.
    #[must_use]
    pub fn build_cql(&self, query: &str) -> String {
        let escaped = escape_cql_literal(query);
        match self.kind {
            StrategyKind::FullName => format!("user.fullname~\"{escaped}*\""),
            StrategyKind::GenericUser => format!("user~\"{escaped}*\""),
            StrategyKind::AccountId => format!("user.accountid~\"{escaped}*\""),
            StrategyKind::ContentSearch => format!("type=user AND text~\"{escaped}*\""),
        }
    }
}

/// Ordered fallback chain, most field-specific phrasing first.
#[must_use]
pub const fn fallback_chain() -> [SearchStrategy; 4] {
    [
        SearchStrategy {
            kind: StrategyKind::FullName,
            label: "fullname-search",
        },
        SearchStrategy {
            kind: StrategyKind::GenericUser,
            label: "user-search",
        },
        SearchStrategy {
            kind: StrategyKind::AccountId,
            label: "accountid-search",
        },
        SearchStrategy {
            kind: StrategyKind::ContentSearch,
            label: "general-search",
        },
    ]
}

/// The generic phrasing on its own, for callers that want exactly one
/// query with failures surfaced instead of swallowed.
#[must_use]
pub const fn generic_user() -> SearchStrategy {
    SearchStrategy {
        kind: StrategyKind::GenericUser,
        label: "user-search",
    }
}

fn escape_cql_literal(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for strategy phrasing.

    use super::*;
    use rstest::rstest;

    #[test]
    fn chain_orders_phrasings_most_specific_first() {
        let kinds: Vec<_> = fallback_chain().iter().map(SearchStrategy::kind).collect();
        assert_eq!(
            kinds,
            vec![
                StrategyKind::FullName,
                StrategyKind::GenericUser,
                StrategyKind::AccountId,
                StrategyKind::ContentSearch,
            ]
        );
    }

    #[rstest]
    #[case::fullname(StrategyKind::FullName, "user.fullname~\"jane*\"")]
    #[case::generic(StrategyKind::GenericUser, "user~\"jane*\"")]
    #[case::accountid(StrategyKind::AccountId, "user.accountid~\"jane*\"")]
    #[case::content(StrategyKind::ContentSearch, "type=user AND text~\"jane*\"")]
    fn builds_wildcard_cql_per_kind(#[case] kind: StrategyKind, #[case] expected: &str) {
        let strategy = fallback_chain()
            .into_iter()
            .find(|strategy| strategy.kind() == kind)
            .expect("kind present in chain");
        assert_eq!(strategy.build_cql("jane"), expected);
    }

    #[test]
    fn escapes_quotes_and_backslashes_in_query_text() {
        let strategy = generic_user();
        assert_eq!(
            strategy.build_cql(r#"ja"ne\"#),
            r#"user~"ja\"ne\\*""#
        );
    }

    #[rstest]
    #[case::email("jane.doe@x.com", true)]
    #[case::dotted("jane.doe", true)]
    #[case::plain("jane", false)]
    fn account_id_phrasing_requires_email_like_queries(#[case] query: &str, #[case] expected: bool) {
        let accountid = fallback_chain()
            .into_iter()
            .find(|strategy| strategy.kind() == StrategyKind::AccountId)
            .expect("accountid strategy");
        assert_eq!(accountid.applies_to(query), expected);
    }

    #[test]
    fn other_phrasings_apply_to_any_query() {
        for strategy in fallback_chain() {
            if strategy.kind() != StrategyKind::AccountId {
                assert!(strategy.applies_to("jane"), "{} should apply", strategy.label());
            }
        }
    }

    #[test]
    fn content_search_targets_the_general_route() {
        use crate::domain::ports::DirectoryRoute;

        for strategy in fallback_chain() {
            let expected = if strategy.kind() == StrategyKind::ContentSearch {
                DirectoryRoute::ContentSearch
            } else {
                DirectoryRoute::UserSearch
            };
            assert_eq!(strategy.route(), expected);
        }
    }
}
