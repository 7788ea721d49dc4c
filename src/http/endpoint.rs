//! GraphQL endpoint
//!
//! `POST <base_url>/<organization_id>/api/<api_version>/graphql.json` with a
//! raw GraphQL body and the partner access token.

use crate::error::{Error, Result};
use url::Url;

/// Content type for raw GraphQL bodies
pub const GRAPHQL_CONTENT_TYPE: &str = "application/graphql";

/// Header carrying the partner access token
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Request target for one organization
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
    headers: Vec<(String, String)>,
}

impl Endpoint {
    /// Build the endpoint for an organization
    pub fn new(
        base_url: &str,
        organization_id: &str,
        api_version: &str,
        access_token: &str,
    ) -> Result<Self> {
        if organization_id.is_empty() {
            return Err(Error::missing_field("organization_id"));
        }

        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))?;
        let url = base.join(&format!("{organization_id}/api/{api_version}/graphql.json"))?;

        Ok(Self {
            url: url.to_string(),
            headers: vec![
                ("Content-Type".to_string(), GRAPHQL_CONTENT_TYPE.to_string()),
                (ACCESS_TOKEN_HEADER.to_string(), access_token.to_string()),
            ],
        })
    }

    /// Full request URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

impl std::fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint").field("url", &self.url).finish_non_exhaustive()
    }
}
