use crate::errors::MetadataError;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::fmt::Debug;

/// Downloads the bytes of a remote image.
#[async_trait]
pub trait ImageFetcher: Send + Sync + Debug {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MetadataError>;
}

/// Fetches images over HTTP(S) with a shared `reqwest` client.
#[derive(Clone, Debug, Default)]
pub struct HttpImageFetcher {
    client: ReqwestClient,
}

impl HttpImageFetcher {
    pub fn new(client: ReqwestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, MetadataError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(MetadataError::FetchStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.bytes().await?.to_vec())
    }
}
