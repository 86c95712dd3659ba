use crate::{Song, SongUrl};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct SongDetailResponse {
    #[serde(default)]
    songs: Vec<Song>,
}

#[derive(Deserialize)]
struct SongUrlResponse {
    #[serde(default)]
    data: Vec<SongUrl>,
}

pub(crate) fn parse_song_detail(raw_json: &str) -> Result<Option<Song>, ParseError> {
    let response: SongDetailResponse = serde_json::from_str(raw_json)?;

    Ok(response.songs.into_iter().next())
}

/// First playable url of the response, if the song is available at all.
pub(crate) fn parse_song_url(raw_json: &str) -> Result<Option<String>, ParseError> {
    let response: SongUrlResponse = serde_json::from_str(raw_json)?;

    Ok(response
        .data
        .into_iter()
        .next()
        .and_then(|entry| entry.url)
        .filter(|url| !url.is_empty()))
}
