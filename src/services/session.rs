use crate::types::{QueueSnapshot, TrackView};
use actix_rt::task::JoinError;
use async_lock::{Mutex, RwLock};
use playback_queue::{
    InvokerId, LibraryConfig, LocalIndex, PlaybackMode, PlaybackOrchestrator, PlaylistMeta,
    TrackDescriptor, TrackId,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub(crate) enum SessionError {
    #[error("Directory does not exist: {0}")]
    MissingDirectory(PathBuf),
    #[error("File is not in the local music index: {0}")]
    UnknownLocalFile(String),
    #[error(transparent)]
    Join(#[from] JoinError),
}

pub(crate) type SessionResult<T> = Result<T, SessionError>;

/// One playback session: the orchestrated queue plus the local library it
/// can pick files from. Playback triggers are serialized, so a track
/// finishing while a user skips cannot advance the queue twice.
pub(crate) struct Session {
    orchestrator: PlaybackOrchestrator,
    local_index: RwLock<LocalIndex>,
    library: LibraryConfig,
    play_lock: Mutex<()>,
}

impl Session {
    pub(crate) fn new(orchestrator: PlaybackOrchestrator, library: LibraryConfig) -> Self {
        Self {
            orchestrator,
            local_index: RwLock::new(LocalIndex::new()),
            library,
            play_lock: Mutex::new(()),
        }
    }

    pub(crate) async fn add_track(&self, id: TrackId, insert_at_front: bool) -> TrackView {
        let mut track = TrackDescriptor::new(id.to_string(), true);
        self.orchestrator.resolver().hydrate(&mut track).await;

        let view = TrackView::from(&track);
        self.orchestrator
            .queue()
            .await
            .add_track(track, insert_at_front);

        view
    }

    pub(crate) async fn set_playlist(
        &self,
        meta: Option<PlaylistMeta>,
        ids: Vec<TrackId>,
    ) -> usize {
        let tracks: Vec<_> = ids
            .iter()
            .map(|id| TrackDescriptor::new(id.to_string(), true))
            .collect();

        let mut queue = self.orchestrator.queue().await;
        queue.set_playlist(meta, tracks);

        info!(tracks = queue.len(), "Playlist loaded");

        queue.len()
    }

    pub(crate) async fn remove_track(&self, id: &TrackId) -> Option<TrackView> {
        self.orchestrator
            .queue()
            .await
            .remove(id)
            .map(|track| TrackView::from(&track))
    }

    /// Empties the queue. Mode and playlist meta stay as they are.
    pub(crate) async fn clear(&self) {
        self.orchestrator.queue().await.clear();
    }

    pub(crate) async fn set_mode(&self, mode: PlaybackMode) {
        self.orchestrator.queue().await.set_mode(mode);
        info!(?mode, "Playback mode changed");
    }

    pub(crate) async fn snapshot(&self) -> QueueSnapshot {
        let overview = self.orchestrator.queue_overview().await;
        let current = self
            .orchestrator
            .current_track()
            .await
            .map(|track| TrackView::from(&track));

        let queue = self.orchestrator.queue().await;
        let upcoming = queue.peek_default().iter().map(TrackView::from).collect();

        QueueSnapshot {
            mode: queue.mode(),
            mode_label: queue.mode().label(),
            play_count: queue.play_count(),
            length: queue.len(),
            playlist: queue.playlist_meta().cloned(),
            current,
            upcoming,
            overview,
        }
    }

    pub(crate) async fn play_next(&self, invoker: Option<InvokerId>) -> Option<TrackView> {
        let _guard = self.play_lock.lock().await;

        self.orchestrator.set_invoker(invoker).await;
        self.orchestrator
            .play_next()
            .await
            .map(|track| TrackView::from(&track))
    }

    /// Plays an indexed local file right away, outside of the queue.
    pub(crate) async fn play_local(
        &self,
        path: &str,
        invoker: Option<InvokerId>,
    ) -> SessionResult<Option<TrackView>> {
        if !self.is_indexed(Path::new(path)).await {
            return Err(SessionError::UnknownLocalFile(path.to_string()));
        }

        let _guard = self.play_lock.lock().await;

        self.orchestrator.set_invoker(invoker).await;

        Ok(self
            .orchestrator
            .play(TrackDescriptor::new(path, false))
            .await
            .map(|track| TrackView::from(&track)))
    }

    pub(crate) async fn search_local(&self, keyword: &str) -> Vec<TrackView> {
        self.local_index
            .read()
            .await
            .search(keyword, self.library.max_search_results)
            .iter()
            .map(TrackView::from)
            .collect()
    }

    /// Scans `root` (or the configured music path) off the async runtime
    /// and swaps the fresh index in. Returns the number of indexed files.
    pub(crate) async fn rebuild_local_index(&self, root: Option<PathBuf>) -> SessionResult<usize> {
        let root = root.unwrap_or_else(|| self.library.local_music_path.clone());

        if !root.is_dir() {
            return Err(SessionError::MissingDirectory(root));
        }

        let include_subdirectories = self.library.search_subdirectories;
        let index = actix_rt::task::spawn_blocking(move || {
            let mut index = LocalIndex::new();
            index.rebuild(&root, include_subdirectories);
            index
        })
        .await?;

        let files = index.len();
        *self.local_index.write().await = index;

        Ok(files)
    }

    async fn is_indexed(&self, path: &Path) -> bool {
        let stem = match path.file_stem() {
            Some(stem) => stem.to_string_lossy(),
            None => return false,
        };

        let indexed = self
            .local_index
            .read()
            .await
            .files_with_stem(&stem)
            .iter()
            .any(|file| file == path);

        debug!(?path, indexed, "Local file lookup");

        indexed
    }
}
