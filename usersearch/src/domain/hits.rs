//! Raw search hits and their normalization into canonical users.
//!
//! Both search routes return pages shaped as `{ "results": [hit, ...] }`
//! where each hit wraps a user sub-record under variant field names for
//! the same logical attribute. Normalization collapses those variants
//! through prioritized fallback chains and drops hits that cannot be
//! resolved to a non-empty id and name.

use serde::Deserialize;

use crate::domain::user::DirectoryUser;

/// Identity classification marking a hit as a resolvable user.
const KNOWN_USER_TYPE: &str = "known";

/// One page of raw hits as returned by either search route.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchPage {
    /// Ordered raw hits; defaults to empty when the key is absent.
    #[serde(default)]
    pub results: Vec<RawSearchHit>,
}

/// One raw hit wrapping an optional user sub-record.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchHit {
    /// Embedded user record; anonymous hits omit it.
    #[serde(default)]
    pub user: Option<RawUserRecord>,
}

/// Variant-shaped user record embedded in a hit.
///
/// Which fields are populated depends on the route and directory
/// version that produced the hit, so every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct RawUserRecord {
    /// Identity classification; only `"known"` records resolve.
    #[serde(rename = "type")]
    pub user_type: Option<String>,
    /// Current account identifier.
    #[serde(rename = "accountId")]
    pub account_id: Option<String>,
    /// Legacy key predating account identifiers.
    #[serde(rename = "userKey")]
    pub user_key: Option<String>,
    /// Preferred display name.
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    /// Public-profile name.
    #[serde(rename = "publicName")]
    pub public_name: Option<String>,
    /// Login name.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
}

/// Decode a response body and normalize it into canonical users.
///
/// A body that is not the expected page shape normalizes to an empty
/// list rather than an error; the caller treats "nothing usable" and
/// "malformed" identically.
#[must_use]
pub fn normalize_body(body: &str) -> Vec<DirectoryUser> {
    let page: RawSearchPage = serde_json::from_str(body).unwrap_or_default();
    normalize_page(page)
}

/// Normalize a decoded page, dropping unresolvable hits.
///
/// Output order follows the page order; no deduplication or reranking
/// happens here.
#[must_use]
pub fn normalize_page(page: RawSearchPage) -> Vec<DirectoryUser> {
    page.results
        .into_iter()
        .filter_map(RawSearchHit::into_directory_user)
        .collect()
}

impl RawSearchHit {
    /// Resolve this hit to a canonical user, or drop it.
    fn into_directory_user(self) -> Option<DirectoryUser> {
        self.user.and_then(RawUserRecord::into_directory_user)
    }
}

impl RawUserRecord {
    fn into_directory_user(self) -> Option<DirectoryUser> {
        if self.user_type.as_deref() != Some(KNOWN_USER_TYPE) {
            return None;
        }
        let id = first_non_empty([self.account_id, self.user_key])?;
        let name = first_non_empty([self.display_name, self.public_name, self.username.clone()])?;
        DirectoryUser::new(id, name, self.email, self.username).ok()
    }
}

/// First candidate that is present and non-blank, in priority order.
fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.trim().is_empty())
}
