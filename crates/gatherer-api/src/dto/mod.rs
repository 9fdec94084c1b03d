//! Data transfer objects for API requests and responses.

pub mod response;
