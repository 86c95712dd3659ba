use crate::track::{PlaylistMeta, TrackDescriptor, TrackId};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

pub const DEFAULT_PEEK_LIMIT: usize = 3;

#[derive(Eq, PartialEq, Clone, Copy, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    #[default]
    SequentialOnce,
    SequentialLoop,
    RandomOnce,
    RandomLoop,
}

impl PlaybackMode {
    pub fn is_random(self) -> bool {
        matches!(self, PlaybackMode::RandomOnce | PlaybackMode::RandomLoop)
    }

    pub fn is_looping(self) -> bool {
        matches!(self, PlaybackMode::SequentialLoop | PlaybackMode::RandomLoop)
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaybackMode::SequentialOnce => "Sequential",
            PlaybackMode::SequentialLoop => "Sequential loop",
            PlaybackMode::RandomOnce => "Random",
            PlaybackMode::RandomLoop => "Random loop",
        }
    }
}

/// Ordered track list plus the advancement policy of the current mode.
///
/// `play_count` counts advancements since the last (re)shuffle. Under
/// [`PlaybackMode::RandomLoop`] the queue is reshuffled as soon as it reaches
/// the queue length, after which it restarts at 1.
pub struct QueueEngine {
    tracks: VecDeque<TrackDescriptor>,
    mode: PlaybackMode,
    play_count: usize,
    playlist_meta: Option<PlaylistMeta>,
    rng: SmallRng,
}

impl QueueEngine {
    pub fn new(mode: PlaybackMode) -> Self {
        Self::with_rng(mode, rand::make_rng::<SmallRng>())
    }

    pub fn with_seed(mode: PlaybackMode, seed: u64) -> Self {
        Self::with_rng(mode, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(mode: PlaybackMode, rng: SmallRng) -> Self {
        Self {
            tracks: VecDeque::new(),
            mode,
            play_count: 0,
            playlist_meta: None,
            rng,
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PlaybackMode) {
        self.mode = mode;
    }

    pub fn playlist_meta(&self) -> Option<&PlaylistMeta> {
        self.playlist_meta.as_ref()
    }

    pub fn set_playlist_meta(&mut self, meta: Option<PlaylistMeta>) {
        self.playlist_meta = meta;
    }

    pub fn play_count(&self) -> usize {
        self.play_count
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackDescriptor> {
        self.tracks.iter()
    }

    /// Replaces the whole queue. Random modes shuffle the new list first.
    pub fn set_playlist(&mut self, meta: Option<PlaylistMeta>, tracks: Vec<TrackDescriptor>) {
        self.playlist_meta = meta;
        self.tracks = tracks
            .into_iter()
            .map(|mut track| {
                track.set_queue_member(true);
                track
            })
            .collect();
        self.play_count = 0;

        if self.mode.is_random() {
            self.shuffle();
        }

        debug!(len = self.tracks.len(), mode = ?self.mode, "Playlist replaced");
    }

    /// Inserts a track, dropping any existing entry with the same id first.
    pub fn add_track(&mut self, mut track: TrackDescriptor, insert_at_front: bool) {
        self.tracks.retain(|t| t.id() != track.id());
        track.set_queue_member(true);

        if insert_at_front {
            self.tracks.push_front(track);
        } else {
            self.tracks.push_back(track);
        }
    }

    pub fn remove(&mut self, id: &TrackId) -> Option<TrackDescriptor> {
        let position = self.tracks.iter().position(|t| t.id() == id)?;
        let mut track = self.tracks.remove(position)?;
        track.set_queue_member(false);

        Some(track)
    }

    /// Pops the head track. Returns `None` only when the queue is empty.
    pub fn advance(&mut self) -> Option<TrackDescriptor> {
        let track = self.tracks.pop_front()?;

        if self.mode.is_looping() {
            self.tracks.push_back(track.clone());
            self.play_count += 1;
        } else {
            self.play_count = 1;
        }

        if self.mode == PlaybackMode::RandomLoop && self.play_count >= self.tracks.len() {
            debug!(play_count = self.play_count, "Full pass played, reshuffling");
            self.shuffle();
            self.play_count = 1;
        }

        Some(track)
    }

    pub fn peek(&self, limit: usize) -> Vec<TrackDescriptor> {
        self.tracks.iter().take(limit).cloned().collect()
    }

    pub fn peek_default(&self) -> Vec<TrackDescriptor> {
        self.peek(DEFAULT_PEEK_LIMIT)
    }

    /// Copies metadata of `track` onto the queued entry with the same id.
    pub fn refresh(&mut self, track: &TrackDescriptor) {
        for entry in self.tracks.iter_mut().filter(|t| t.id() == track.id()) {
            let in_queue = entry.is_queue_member();
            *entry = track.clone();
            entry.set_queue_member(in_queue);
        }
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    fn shuffle(&mut self) {
        self.tracks.make_contiguous().shuffle(&mut self.rng);
    }
}
