use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ApiError, ConceptPage, PartnerApi, VanityLink};
use crate::whitelist::Concept;

/// Scripted `PartnerApi` that records every call it receives.
#[derive(Default)]
pub struct FakePartnerApi {
    pages: Mutex<VecDeque<Result<ConceptPage, ApiError>>>,
    vanity: Mutex<VecDeque<Result<VanityLink, ApiError>>>,
    domain_calls: Mutex<Vec<(String, Option<String>)>>,
    vanity_calls: Mutex<Vec<String>>,
}

impl FakePartnerApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, values: &[&str], next_cursor: Option<&str>) -> Self {
        let page = ConceptPage {
            concepts: values.iter().map(|v| Concept::new(*v)).collect(),
            next_cursor: next_cursor.map(str::to_string),
        };
        self.pages.lock().unwrap().push_back(Ok(page));
        self
    }

    pub fn with_page_error(self, err: ApiError) -> Self {
        self.pages.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_vanity(self, vanity_url: &str) -> Self {
        self.vanity.lock().unwrap().push_back(Ok(VanityLink {
            vanity_url: vanity_url.to_string(),
        }));
        self
    }

    pub fn with_vanity_error(self, err: ApiError) -> Self {
        self.vanity.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn domain_calls(&self) -> Vec<(String, Option<String>)> {
        self.domain_calls.lock().unwrap().clone()
    }

    pub fn vanity_calls(&self) -> Vec<String> {
        self.vanity_calls.lock().unwrap().clone()
    }
}

impl PartnerApi for FakePartnerApi {
    async fn list_domains(&self, kind: &str, cursor: Option<&str>) -> Result<ConceptPage, ApiError> {
        self.domain_calls
            .lock()
            .unwrap()
            .push((kind.to_string(), cursor.map(str::to_string)));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::status(404, "no more scripted pages")))
    }

    async fn create_vanity_link(&self, original_url: &str) -> Result<VanityLink, ApiError> {
        self.vanity_calls.lock().unwrap().push(original_url.to_string());
        self.vanity
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::status(500, "no scripted vanity response")))
    }
}
