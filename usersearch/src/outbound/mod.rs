//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no search logic: strategy phrasing,
//! normalization, and fallback decisions all live in the domain.

pub mod rest;
