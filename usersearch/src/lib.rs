//! Resilient user search against an external directory service.
//!
//! The directory's query language offers several field-matching forms,
//! none of which is guaranteed to exist, behave consistently, or stay
//! available. This crate phrases the same free-text query several ways,
//! tries each phrasing in order, and returns the first phrasing that
//! yields at least one resolvable user.

pub mod domain;
pub mod outbound;

pub use domain::{DiagnosticProber, DiagnosticReport, DirectoryUser, UserSearchService};
pub use outbound::rest::{DirectoryHttpEndpoint, DirectoryHttpIdentity};
