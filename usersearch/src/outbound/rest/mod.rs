//! Directory REST adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `DirectoryEndpoint` port.

mod http_endpoint;

pub use http_endpoint::{DirectoryHttpEndpoint, DirectoryHttpIdentity};
