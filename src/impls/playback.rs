use crate::services::{HostClient, PlayRequest};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use music_api::{MusicApiClient, MusicApiError, Song};
use playback_queue::{
    Author, ChannelClient, ChannelError, InvokerId, LookupError, MusicSource, PlayResource,
    PlaybackError, PlaybackSink, SongDetail,
};
use std::sync::Arc;

pub(crate) struct MusicApi(pub(crate) Arc<MusicApiClient>);

fn lookup_error(error: MusicApiError) -> LookupError {
    match error {
        error if error.is_timeout() => LookupError::Timeout,
        MusicApiError::EmptyResponse(id) => LookupError::NotFound(id),
        error => LookupError::Network(Box::new(error)),
    }
}

fn into_song_detail(song: Song) -> SongDetail {
    SongDetail {
        name: song.name,
        cover_url: song.album.pic_url.unwrap_or_default(),
        artists: song
            .artists
            .into_iter()
            .map(|artist| Author {
                name: artist.name,
                id: artist.id,
            })
            .collect(),
    }
}

#[async_trait]
impl MusicSource for MusicApi {
    async fn song_detail(&self, id: &str) -> Result<SongDetail, LookupError> {
        let song = self.0.song_detail(id).await.map_err(lookup_error)?;

        Ok(into_song_detail(song))
    }

    async fn song_url(&self, id: &str) -> Result<String, LookupError> {
        self.0.song_url(id).await.map_err(lookup_error)
    }

    async fn cover_image(&self, url: &str) -> Result<Vec<u8>, LookupError> {
        self.0.download(url).await.map_err(lookup_error)
    }
}

#[async_trait]
impl PlaybackSink for HostClient {
    async fn play(
        &self,
        invoker: Option<&InvokerId>,
        resource: PlayResource,
    ) -> Result<(), PlaybackError> {
        let request = PlayRequest {
            invoker: invoker.map(|invoker| &**invoker),
            locator: &resource.locator,
            title: &resource.title,
            local_file: resource.is_local_file,
            cover_link: resource.cover_link.as_deref(),
            cover_image: resource.cover_image.as_ref().map(|bytes| STANDARD.encode(bytes)),
        };

        HostClient::play(self, &request)
            .await
            .map_err(|error| PlaybackError(Box::new(error)))
    }
}

#[async_trait]
impl ChannelClient for HostClient {
    async fn send_message(&self, text: &str) -> Result<(), ChannelError> {
        HostClient::send_message(self, text)
            .await
            .map_err(|error| ChannelError(Box::new(error)))
    }

    async fn change_description(&self, text: &str) -> Result<(), ChannelError> {
        HostClient::change_description(self, text)
            .await
            .map_err(|error| ChannelError(Box::new(error)))
    }

    async fn set_avatar(&self, image_url: &str) -> Result<(), ChannelError> {
        HostClient::set_avatar(self, image_url)
            .await
            .map_err(|error| ChannelError(Box::new(error)))
    }
}
