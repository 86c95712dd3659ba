use crate::config::ResolverConfig;
use crate::track::TrackDescriptor;
use crate::traits::{LookupError, MusicSource};
use std::ops::Deref;
use std::sync::Arc;
use tracing::{debug, warn};

// StreamLocator
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct StreamLocator(pub(crate) String);

impl Deref for StreamLocator {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Display for StreamLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Failed after retries")]
    RetriesExhausted {
        attempts: usize,
        #[source]
        last: LookupError,
    },
}

/// Fills in track metadata and turns tracks into playable locators.
pub struct Resolver {
    source: Arc<dyn MusicSource>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(source: Arc<dyn MusicSource>, config: ResolverConfig) -> Self {
        Self { source, config }
    }

    /// Never fails: a failed lookup is written into the track name instead.
    pub async fn hydrate(&self, track: &mut TrackDescriptor) {
        if track.is_local() {
            track.hydrate_local();
            return;
        }

        if track.is_hydrated() {
            return;
        }

        match self.source.song_detail(track.id()).await {
            Ok(detail) => {
                track.apply_detail(detail);
                debug!(track_id = %track.id(), name = track.display_name(), "Track hydrated");
            }
            Err(error) => {
                warn!(track_id = %track.id(), ?error, "Unable to fetch track details");
                track.mark_hydration_failed(&error);
            }
        }
    }

    /// Local tracks resolve to their own path without any I/O. Remote
    /// lookups are retried with a fixed delay between attempts.
    pub async fn resolve_stream_url(
        &self,
        track: &TrackDescriptor,
    ) -> Result<StreamLocator, ResolveError> {
        if track.is_local() {
            return Ok(StreamLocator(track.id().to_string()));
        }

        let attempts = self.config.attempts.max(1);
        let mut last_error = LookupError::NotFound(track.id().to_string());

        for attempt in 1..=attempts {
            match self.source.song_url(track.id()).await {
                Ok(url) if !url.is_empty() => return Ok(StreamLocator(url)),
                Ok(_) => {
                    last_error = LookupError::NotFound(track.id().to_string());
                }
                Err(error) => {
                    last_error = error;
                }
            }

            debug!(
                track_id = %track.id(),
                attempt,
                attempts,
                error = %last_error,
                "Failed to get stream url"
            );

            if attempt < attempts {
                tokio::time::sleep(self.config.retry_delay).await;
            }
        }

        Err(ResolveError::RetriesExhausted {
            attempts,
            last: last_error,
        })
    }

    /// Cover art of a remote track. Local tracks and empty links yield `None`.
    pub async fn cover_image(
        &self,
        track: &TrackDescriptor,
    ) -> Result<Option<Vec<u8>>, LookupError> {
        if track.is_local() || track.cover_link().is_empty() {
            return Ok(None);
        }

        Ok(Some(self.source.cover_image(track.cover_link()).await?))
    }
}
