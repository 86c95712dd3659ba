use crate::track::{InvokerId, SongDetail};
use async_trait::async_trait;
use std::fmt::Formatter;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Request timed out")]
    Timeout,
    #[error("No data returned for {0}")]
    NotFound(String),
    #[error("Unable to perform request: {0}")]
    Network(Box<dyn std::error::Error + Send + Sync>),
}

/// Remote metadata API. Base URL and forwarded headers belong to the
/// implementation.
#[async_trait]
pub trait MusicSource: Send + Sync {
    async fn song_detail(&self, id: &str) -> Result<SongDetail, LookupError>;
    async fn song_url(&self, id: &str) -> Result<String, LookupError>;
    async fn cover_image(&self, url: &str) -> Result<Vec<u8>, LookupError>;
}

/// Everything the host needs to start playing a resolved track.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayResource {
    pub locator: String,
    pub title: String,
    pub is_local_file: bool,
    /// Cover link of remote tracks, passed along as an extra attribute.
    pub cover_link: Option<String>,
    pub cover_image: Option<Vec<u8>>,
}

#[derive(Debug, thiserror::Error)]
pub struct PlaybackError(pub Box<dyn std::error::Error + Send + Sync>);

impl std::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait PlaybackSink: Send + Sync {
    async fn play(
        &self,
        invoker: Option<&InvokerId>,
        resource: PlayResource,
    ) -> Result<(), PlaybackError>;
}

#[derive(Debug, thiserror::Error)]
pub struct ChannelError(pub Box<dyn std::error::Error + Send + Sync>);

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait ChannelClient: Send + Sync {
    async fn send_message(&self, text: &str) -> Result<(), ChannelError>;
    async fn change_description(&self, text: &str) -> Result<(), ChannelError>;
    async fn set_avatar(&self, image_url: &str) -> Result<(), ChannelError>;
}
