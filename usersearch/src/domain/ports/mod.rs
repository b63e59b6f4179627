//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod directory_endpoint;

#[cfg(test)]
pub use directory_endpoint::MockDirectoryEndpoint;
pub use directory_endpoint::{
    DirectoryEndpoint, DirectoryEndpointError, DirectoryRoute, EndpointQuery, EndpointResponse,
    FixtureDirectoryEndpoint,
};
