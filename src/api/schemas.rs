use serde::{Deserialize, Serialize};

use super::{ConceptPage, VanityLink};
use crate::whitelist::Concept;

#[derive(Debug, Deserialize)]
pub struct ConceptDto {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct ConceptPageResponse {
    #[serde(rename = "Concepts", default)]
    pub concepts: Vec<ConceptDto>,
    #[serde(rename = "NextCursor", default)]
    pub next_cursor: Option<String>,
}

impl From<ConceptPageResponse> for ConceptPage {
    fn from(resp: ConceptPageResponse) -> Self {
        Self {
            concepts: resp.concepts.into_iter().map(|c| Concept::new(c.value)).collect(),
            // Some backends send "" instead of omitting the cursor on the last page.
            next_cursor: resp.next_cursor.filter(|c| !c.is_empty()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateVanityRequest<'a> {
    #[serde(rename = "URL")]
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct VanityResponse {
    #[serde(rename = "VanityURL")]
    pub vanity_url: String,
}

impl From<VanityResponse> for VanityLink {
    fn from(resp: VanityResponse) -> Self {
        Self {
            vanity_url: resp.vanity_url,
        }
    }
}
