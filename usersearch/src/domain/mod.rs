//! Domain types, ports, and services for directory user search.
//!
//! Purpose: keep all search semantics — strategy phrasing, fallback
//! orchestration, hit normalization, and diagnostic probing — free of
//! transport concerns. Outbound adapters implement the ports declared
//! under [`ports`].
//!
//! Public surface:
//! - `DirectoryUser` (alias to `user::DirectoryUser`) — canonical user identity.
//! - `UserSearchService` (alias to `search_service::UserSearchService`) — fallback search.
//! - `DiagnosticProber` (alias to `probe_service::DiagnosticProber`) — endpoint health probe.

pub mod hits;
pub mod ports;
pub mod probe_service;
pub mod search_service;
pub mod strategy;
pub mod user;


pub use self::probe_service::{CqlProbe, DiagnosticProber, DiagnosticReport, EndpointProbe};
pub use self::search_service::UserSearchService;
pub use self::strategy::{SearchStrategy, StrategyKind};
pub use self::user::{DirectoryUser, UserValidationError};
