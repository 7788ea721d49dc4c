//! HTTP module
//!
//! The transport boundary to the Partners API.
//!
//! # Features
//!
//! - **Transport trait**: `post(url, headers, body)`, the only seam the fetch loop uses
//! - **HttpClient**: reqwest implementation, no retries
//! - **Throttle**: fixed delay before every request
//! - **Endpoint**: GraphQL URL and auth headers for an organization

mod client;
mod endpoint;
mod throttle;

pub use client::{HttpClient, HttpClientConfig, HttpResponse, Transport};
pub use endpoint::{Endpoint, ACCESS_TOKEN_HEADER, GRAPHQL_CONTENT_TYPE};
pub use throttle::RequestThrottle;
