use crate::domain::{
    directory::DirectoryFacade,
    models::{CustomerSummary, DeviceSummary, Page},
};
use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Backend directory reached over HTTP. Both resources answer
/// `GET /<resource>?keyword=&page=&size=` with a JSON page.
#[derive(Clone)]
pub struct HttpDirectory {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl HttpDirectory {
    pub fn new(api_base: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("fleetdesk/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn search<T: DeserializeOwned>(
        &self,
        resource: &str,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<T>, DirectoryError> {
        let url = format!("{}/{}", self.api_base, resource);
        let mut request = self.http.get(&url).query(&[
            ("keyword", keyword.to_string()),
            ("page", page.to_string()),
            ("size", size.to_string()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|source| DirectoryError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .json::<Page<T>>()
            .await
            .map_err(|source| DirectoryError::Decode { url, source })
    }
}

#[async_trait]
impl DirectoryFacade for HttpDirectory {
    async fn search_customers(
        &self,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<CustomerSummary>> {
        Ok(self.search("customers", keyword, page, size).await?)
    }

    async fn search_devices(
        &self,
        keyword: &str,
        page: u32,
        size: u32,
    ) -> Result<Page<DeviceSummary>> {
        Ok(self.search("devices", keyword, page, size).await?)
    }
}
