//! Wire-level contract shared by the router, clients and tests.

pub mod responses;
pub mod routes;

pub use responses::ApiResponse;
