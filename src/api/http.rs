use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use super::schemas::{ConceptPageResponse, CreateVanityRequest, VanityResponse};
use super::{ApiError, ConceptPage, PartnerApi, VanityLink};
use crate::config::ApiConfig;

const APP_ID_HEADER: &str = "X-WF-AppID";
const DEVICE_TOKEN_HEADER: &str = "X-WF-DeviceToken";

/// `PartnerApi` over HTTPS.
pub struct HttpPartnerApi {
    client: Client,
    base_url: String,
    app_id: String,
    app_secret: String,
    device_token: Option<String>,
}

impl HttpPartnerApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.read_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.app_id.clone(),
            app_secret: config.app_secret.clone(),
            device_token: config.device_token().map(str::to_string),
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(APP_ID_HEADER, &self.app_id)
            .bearer_auth(&self.app_secret);
        match &self.device_token {
            Some(token) => request.header(DEVICE_TOKEN_HEADER, token),
            None => request,
        }
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        body.trim().to_string()
    };
    Err(ApiError::status(status.as_u16(), message))
}

impl PartnerApi for HttpPartnerApi {
    async fn list_domains(&self, kind: &str, cursor: Option<&str>) -> Result<ConceptPage, ApiError> {
        let url = format!("{}/v2/concept", self.base_url);
        let mut query = vec![("kind", kind)];
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor));
        }
        debug!(kind = %kind, cursor = ?cursor, "Requesting concept page");

        let request = self.authorize(self.client.get(&url).query(&query));
        let response = check_status(request.send().await?).await?;
        let page: ConceptPageResponse = response.json().await?;
        Ok(page.into())
    }

    async fn create_vanity_link(&self, original_url: &str) -> Result<VanityLink, ApiError> {
        let url = format!("{}/v2/vanity", self.base_url);
        debug!(url = %original_url, "Requesting vanity link");

        let request = self.authorize(
            self.client
                .post(&url)
                .json(&CreateVanityRequest { url: original_url }),
        );
        let response = check_status(request.send().await?).await?;
        let vanity: VanityResponse = response.json().await?;
        Ok(vanity.into())
    }
}
