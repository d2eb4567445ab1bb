pub mod errors;
#[cfg(test)]
pub mod fake;
pub mod http;
pub mod schemas;

use std::future::Future;

use crate::whitelist::Concept;

pub use errors::ApiError;
pub use http::HttpPartnerApi;

/// Concept kind used for partner merchant domains.
pub const DOMAIN_KIND: &str = "domain";

/// One page of concepts from the backend. `next_cursor` is `None` on the last page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptPage {
    pub concepts: Vec<Concept>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityLink {
    pub vanity_url: String,
}

/// The two backend operations the monitor depends on.
pub trait PartnerApi: Send + Sync {
    fn list_domains(
        &self,
        kind: &str,
        cursor: Option<&str>,
    ) -> impl Future<Output = Result<ConceptPage, ApiError>> + Send;

    fn create_vanity_link(
        &self,
        original_url: &str,
    ) -> impl Future<Output = Result<VanityLink, ApiError>> + Send;
}
