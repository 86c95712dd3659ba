use crate::parser::{parse_song_detail, parse_song_url, ParseError};
use crate::Song;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, error};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum MusicApiError {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    ParseError(#[from] ParseError),
    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
    #[error("Empty response for song {0}")]
    EmptyResponse(String),
}

impl MusicApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, MusicApiError::ReqwestError(error) if error.is_timeout())
    }
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

/// Client of the remote music metadata API. Configured headers are sent
/// with every request.
pub struct MusicApiClient {
    client: Client,
    endpoint: String,
}

impl MusicApiClient {
    pub fn create<'a>(
        endpoint: &str,
        headers: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, MusicApiError> {
        let mut header_map = HeaderMap::new();

        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| MusicApiError::InvalidHeader(name.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| MusicApiError::InvalidHeader(name.as_str().to_string()))?;
            header_map.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(header_map)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub async fn song_detail(&self, id: &str) -> Result<Song, MusicApiError> {
        #[derive(Serialize)]
        struct Query<'a> {
            ids: &'a str,
            t: u64,
        }

        let raw_json = self
            .client
            .get(format!("{}/song/detail", self.endpoint))
            .query(&Query { ids: id, t: timestamp() })
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!(id, "Song detail received");

        parse_song_detail(&raw_json)?.ok_or_else(|| MusicApiError::EmptyResponse(id.to_string()))
    }

    pub async fn song_url(&self, id: &str) -> Result<String, MusicApiError> {
        #[derive(Serialize)]
        struct Query<'a> {
            id: &'a str,
            t: u64,
        }

        let url = format!("{}/song/url", self.endpoint);
        let response = self
            .client
            .get(&url)
            .query(&Query { id, t: timestamp() })
            .send()
            .await
            .and_then(|response| response.error_for_status());

        let raw_json = match response {
            Ok(response) => response.text().await?,
            Err(error) => {
                error!(?error, url, id, "Get song url error");
                return Err(error.into());
            }
        };

        parse_song_url(&raw_json)?.ok_or_else(|| MusicApiError::EmptyResponse(id.to_string()))
    }

    /// Plain GET returning the body bytes, used for cover art.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, MusicApiError> {
        let bytes = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        Ok(bytes.to_vec())
    }
}
