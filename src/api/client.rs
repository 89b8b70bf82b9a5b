use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{QueryRecord, ViewSettings};

/// Anything that can produce the analytics record for a query hash
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, query_hash: &str) -> Result<QueryRecord>;
}

/// Fetches records from the HouseWatch analyze API
pub struct HttpRecordSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRecordSource {
    /// Build a source with the base URL and request timeout from settings
    pub fn new(settings: &ViewSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.poll.request_timeout())
            .build()?;

        Ok(Self::with_client(client, &settings.api_base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        HttpRecordSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint for a single query's detail record
    pub fn detail_url(&self, query_hash: &str) -> String {
        format!(
            "{}/api/analyze/{}/query_detail",
            self.base_url,
            urlencoding::encode(query_hash)
        )
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, query_hash: &str) -> Result<QueryRecord> {
        let url = self.detail_url(query_hash);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url,
            });
        }

        // Decode from bytes so malformed payloads surface as Decode, not Http
        let body = response.bytes().await?;
        let record = serde_json::from_slice(&body)?;
        Ok(record)
    }
}
