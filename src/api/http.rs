//! REST fetcher for the CMNS-SDN management API

use super::error::FetchError;
use super::fetcher::{CollectionFetcher, InventorySource};
use crate::config::schema::ApiConfig;
use crate::models::{Address, Device, NodePayload, NodeType, Section, Site, Subnet};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Upper bound on pages followed for one collection
const MAX_PAGES: u32 = 1000;

/// Opaque session credential supplied by the caller's environment
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Read the token from the named environment variable, if set and non-empty
    pub fn from_env(var_name: &str) -> Option<Self> {
        std::env::var(var_name)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(Self)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Either a bare JSON array or a page envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody<T> {
    Paged {
        items: Vec<T>,
        #[serde(default)]
        total: Option<usize>,
    },
    Bare(Vec<T>),
}

/// HTTP fetcher
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
    credential: Option<Credential>,
    page_size: u32,
}

impl HttpApi {
    /// Create a new HTTP fetcher
    pub fn new(
        base_url: &str,
        credential: Option<Credential>,
        timeout: Duration,
        page_size: u32,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry paths: {}", base_url);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        tracing::debug!(
            "Created HTTP fetcher for {} (authenticated: {})",
            base_url,
            credential.is_some()
        );

        Ok(Self {
            client,
            base_url,
            credential,
            page_size: page_size.max(1),
        })
    }

    /// Create a fetcher from configuration, reading the token from `tokenEnv`
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let credential = Credential::from_env(&config.token_env);
        if credential.is_none() {
            tracing::warn!(
                "Environment variable {} not set, sending unauthenticated requests",
                config.token_env
            );
        }
        Self::new(
            &config.base_url,
            credential,
            Duration::from_secs(config.timeout_seconds),
            config.page_size,
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport {
                url: self.base_url.to_string(),
                message: "base URL cannot carry paths".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_page<T: DeserializeOwned>(&self, url: Url) -> Result<PageBody<T>, FetchError> {
        tracing::debug!("Fetching {}", url);

        let mut req = self.client.get(url.clone());
        if let Some(Credential(token)) = &self.credential {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !resp.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch a whole collection, following pages until `total` is reached
    ///
    /// Without a `total`, paging stops at the first empty or short page.
    async fn list<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<Vec<T>, FetchError> {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let mut url = self.endpoint(segments)?;
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("page_size", &self.page_size.to_string());

            match self.get_page::<T>(url).await? {
                PageBody::Bare(batch) => {
                    items.extend(batch);
                    return Ok(items);
                }
                PageBody::Paged { items: batch, total } => {
                    let received = batch.len();
                    items.extend(batch);
                    let more = match total {
                        Some(total) => items.len() < total,
                        None => received >= self.page_size as usize,
                    };
                    if received == 0 || !more {
                        return Ok(items);
                    }
                }
            }
        }

        tracing::warn!(
            "Stopped paging {} after {} pages ({} items)",
            segments.join("/"),
            MAX_PAGES,
            items.len()
        );
        Ok(items)
    }
}

#[async_trait]
impl CollectionFetcher for HttpApi {
    async fn list_children(
        &self,
        parent_type: NodeType,
        parent_id: &str,
    ) -> Result<Vec<NodePayload>, FetchError> {
        match parent_type {
            NodeType::Subnet => {
                let subnet_path = ["ipam", "subnets", parent_id, "subnets"];
                let address_path = ["ipam", "subnets", parent_id, "addresses"];
                let (subnets, addresses) = futures::try_join!(
                    self.list::<Subnet>(&subnet_path),
                    self.list::<Address>(&address_path),
                )?;
                Ok(subnets
                    .into_iter()
                    .map(NodePayload::Subnet)
                    .chain(addresses.into_iter().map(NodePayload::Address))
                    .collect())
            }
            NodeType::Site => {
                let devices = self
                    .list::<Device>(&["topology", "sites", parent_id, "devices"])
                    .await?;
                Ok(devices.into_iter().map(NodePayload::Device).collect())
            }
            other => Err(FetchError::UnsupportedParent(other)),
        }
    }

    fn fetcher_type(&self) -> &str {
        "http"
    }
}

#[async_trait]
impl InventorySource for HttpApi {
    async fn list_sections(&self) -> Result<Vec<Section>, FetchError> {
        self.list(&["ipam", "sections"]).await
    }

    async fn list_subnets(&self) -> Result<Vec<Subnet>, FetchError> {
        self.list(&["ipam", "subnets"]).await
    }

    async fn list_sites(&self) -> Result<Vec<Site>, FetchError> {
        self.list(&["topology", "sites"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpApi {
        HttpApi::new(base, None, Duration::from_secs(1), 50).unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let client = api("http://localhost:8000/api/");
        let url = client.endpoint(&["ipam", "subnets", "7", "addresses"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/ipam/subnets/7/addresses");

        let client = api("http://localhost:8000/api");
        let url = client.endpoint(&["topology", "sites"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/topology/sites");
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let client = api("http://localhost/");
        let url = client.endpoint(&["ipam", "subnets", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost/ipam/subnets/a%2Fb");
    }

    #[test]
    fn test_rejects_invalid_base() {
        assert!(HttpApi::new("not a url", None, Duration::from_secs(1), 10).is_err());
        assert!(HttpApi::new("mailto:ops@example.com", None, Duration::from_secs(1), 10).is_err());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let cred = Credential::new("secret-token");
        assert!(!format!("{:?}", cred).contains("secret"));
    }

    #[test]
    fn test_page_body_shapes() {
        let bare: PageBody<u32> = serde_json::from_str("[1, 2]").unwrap();
        assert!(matches!(bare, PageBody::Bare(v) if v == vec![1, 2]));

        let paged: PageBody<u32> = serde_json::from_str(r#"{"items": [3], "total": 4}"#).unwrap();
        assert!(matches!(paged, PageBody::Paged { items, total: Some(4) } if items == vec![3]));
    }
}
