use playback_queue::{PlaybackMode, PlaylistMeta, TrackDescriptor};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct TrackView {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) authors: String,
    pub(crate) full_name: String,
    pub(crate) detail_link: String,
    pub(crate) cover_link: String,
    pub(crate) is_local: bool,
    pub(crate) in_queue: bool,
}

impl From<&TrackDescriptor> for TrackView {
    fn from(track: &TrackDescriptor) -> Self {
        Self {
            id: track.id().to_string(),
            name: track.display_name().to_string(),
            authors: track.author_names(),
            full_name: track.full_name(),
            detail_link: track.detail_link().to_string(),
            cover_link: track.cover_link().to_string(),
            is_local: track.is_local(),
            in_queue: track.is_queue_member(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub(crate) struct QueueSnapshot {
    pub(crate) mode: PlaybackMode,
    pub(crate) mode_label: &'static str,
    pub(crate) play_count: usize,
    pub(crate) length: usize,
    pub(crate) playlist: Option<PlaylistMeta>,
    pub(crate) current: Option<TrackView>,
    pub(crate) upcoming: Vec<TrackView>,
    /// Chat-ready summary of the same state.
    pub(crate) overview: String,
}
