use crate::queue::QueueEngine;
use crate::resolver::{ResolveError, Resolver, StreamLocator};
use crate::track::{InvokerId, TrackDescriptor};
use crate::traits::{ChannelClient, LookupError, PlayResource, PlaybackError, PlaybackSink};
use async_lock::{Mutex, MutexGuard};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    CoverImage(#[from] LookupError),
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Drives one queue: advance, hydrate, resolve, hand off to the player,
/// then announce. A failing track is reported and skipped, so every call
/// either starts a track or drains the queue.
///
/// Only one `play_next`/`play` should run at a time per orchestrator.
/// Concurrent calls each advance the queue and race on the head track.
pub struct PlaybackOrchestrator {
    queue: Mutex<QueueEngine>,
    resolver: Resolver,
    player: Arc<dyn PlaybackSink>,
    channel: Arc<dyn ChannelClient>,
    invoker: Mutex<Option<InvokerId>>,
    current: Mutex<Option<TrackDescriptor>>,
}

impl PlaybackOrchestrator {
    pub fn new(
        queue: QueueEngine,
        resolver: Resolver,
        player: Arc<dyn PlaybackSink>,
        channel: Arc<dyn ChannelClient>,
    ) -> Self {
        Self {
            queue: Mutex::new(queue),
            resolver,
            player,
            channel,
            invoker: Mutex::new(None),
            current: Mutex::new(None),
        }
    }

    pub async fn queue(&self) -> MutexGuard<'_, QueueEngine> {
        self.queue.lock().await
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub async fn set_invoker(&self, invoker: Option<InvokerId>) {
        *self.invoker.lock().await = invoker;
    }

    pub async fn invoker(&self) -> Option<InvokerId> {
        self.invoker.lock().await.clone()
    }

    /// The track most recently taken for playback, whether or not it started.
    pub async fn current_track(&self) -> Option<TrackDescriptor> {
        self.current.lock().await.clone()
    }

    /// Plays the next queued track, skipping tracks that fail. Returns the
    /// track handed to the player, or `None` once the queue is empty.
    ///
    /// Loop modes put failed tracks back at the tail, so a looping queue in
    /// which every track fails keeps cycling until one succeeds or the queue
    /// is changed.
    pub async fn play_next(&self) -> Option<TrackDescriptor> {
        loop {
            let track = self.queue.lock().await.advance()?;
            let track_id = track.id().clone();

            match self.attempt(track).await {
                Some(track) => return Some(track),
                None => debug!(%track_id, "Track skipped, advancing"),
            }
        }
    }

    /// Plays `track` right away. Falls back to the queue if it fails.
    pub async fn play(&self, track: TrackDescriptor) -> Option<TrackDescriptor> {
        match self.attempt(track).await {
            Some(track) => Some(track),
            None => self.play_next().await,
        }
    }

    async fn attempt(&self, mut track: TrackDescriptor) -> Option<TrackDescriptor> {
        debug!(track_id = %track.id(), "Preparing track");

        *self.current.lock().await = Some(track.clone());

        self.resolver.hydrate(&mut track).await;
        *self.current.lock().await = Some(track.clone());
        self.queue.lock().await.refresh(&track);

        match self.resolve_and_dispatch(&track).await {
            Ok(()) => {
                info!(track_id = %track.id(), name = track.display_name(), "Now playing");
                self.announce(&track).await;
                Some(track)
            }
            Err(AttemptError::Resolve(error)) => {
                warn!(track_id = %track.id(), ?error, "Unable to resolve stream url");
                self.notify(&format!(
                    "Failed to get stream url [{}] error: {}",
                    track.display_name(),
                    error
                ))
                .await;
                None
            }
            Err(AttemptError::Dispatch(error)) => {
                error!(track_id = %track.id(), ?error, "Unable to start playback");
                self.notify(&format!("Failed to play [{}]", track.display_name()))
                    .await;
                None
            }
        }
    }

    async fn resolve_and_dispatch(&self, track: &TrackDescriptor) -> Result<(), AttemptError> {
        let locator = self.resolver.resolve_stream_url(track).await?;
        self.dispatch(track, locator).await?;

        Ok(())
    }

    async fn dispatch(
        &self,
        track: &TrackDescriptor,
        locator: StreamLocator,
    ) -> Result<(), DispatchError> {
        let cover_image = self.resolver.cover_image(track).await?;
        let resource = PlayResource {
            locator: locator.to_string(),
            title: track.full_name(),
            is_local_file: track.is_local(),
            cover_link: (!track.is_local()).then(|| track.cover_link().to_string()),
            cover_image,
        };
        let invoker = self.invoker.lock().await.clone();

        self.player.play(invoker.as_ref(), resource).await?;

        Ok(())
    }

    async fn announce(&self, track: &TrackDescriptor) {
        let position = if track.is_queue_member() {
            let queue = self.queue.lock().await;
            format!("[{}/{}] ", queue.play_count(), queue.len())
        } else {
            String::new()
        };

        self.notify(&format!(
            "► Now playing: {}{}",
            position,
            track.full_name_bbcode()
        ))
        .await;

        let description = format!("{}{}", position, track.full_name());
        if let Err(error) = self.channel.change_description(&description).await {
            error!(?error, "Unable to change description");
        }

        if !track.is_local() && !track.cover_link().is_empty() {
            if let Err(error) = self.channel.set_avatar(track.cover_link()).await {
                error!(?error, "Unable to set avatar");
            }
        }
    }

    async fn notify(&self, text: &str) {
        if let Err(error) = self.channel.send_message(text).await {
            error!(?error, "Unable to send channel message");
        }
    }

    /// Text summary of the session: current track, mode, playlist position
    /// and the next few tracks (hydrated on the way).
    pub async fn queue_overview(&self) -> String {
        let (upcoming, mode, playlist, play_count, len) = {
            let queue = self.queue.lock().await;
            (
                queue.peek_default(),
                queue.mode(),
                queue.playlist_meta().cloned(),
                queue.play_count(),
                queue.len(),
            )
        };

        let mut lines = vec![];

        match self.current_track().await {
            Some(track) => lines.push(format!("Now playing: {}", track.full_name_bbcode())),
            None => lines.push("Nothing is playing".to_string()),
        }
        lines.push(format!("Playback mode: {}", mode.label()));
        lines.push(match playlist {
            Some(meta) => format!(
                "Playlist [URL={}]{}[/URL] [{}/{}]",
                meta.page_link(),
                meta.name,
                play_count,
                len
            ),
            None => format!("Playlist [{}/{}]", play_count, len),
        });

        for (i, mut track) in upcoming.into_iter().enumerate() {
            self.resolver.hydrate(&mut track).await;
            self.queue.lock().await.refresh(&track);
            lines.push(format!("{}: {}", i + 1, track.full_name_bbcode()));
        }

        lines.join("\n")
    }
}
