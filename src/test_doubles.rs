use crate::services::Session;
use async_trait::async_trait;
use playback_queue::{
    Author, ChannelClient, ChannelError, InvokerId, LibraryConfig, LookupError, MusicSource,
    PlayResource, PlaybackError, PlaybackMode, PlaybackOrchestrator, PlaybackSink, QueueEngine,
    Resolver, ResolverConfig, SongDetail,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub(crate) struct MusicSourceStub {
    details: HashMap<String, SongDetail>,
    urls: HashMap<String, String>,
}

impl MusicSourceStub {
    pub(crate) fn with_song(mut self, id: &str, name: &str) -> Self {
        self.details.insert(
            id.to_string(),
            SongDetail {
                name: name.to_string(),
                cover_url: format!("https://img.test/{}.jpg", id),
                artists: vec![Author {
                    name: "Robert Miles".to_string(),
                    id: Some(45236),
                }],
            },
        );
        self.urls
            .insert(id.to_string(), format!("https://cdn.test/{}.mp3", id));
        self
    }
}

#[async_trait]
impl MusicSource for MusicSourceStub {
    async fn song_detail(&self, id: &str) -> Result<SongDetail, LookupError> {
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }

    async fn song_url(&self, id: &str) -> Result<String, LookupError> {
        self.urls
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.to_string()))
    }

    async fn cover_image(&self, _url: &str) -> Result<Vec<u8>, LookupError> {
        Ok(vec![0xFF, 0xD8])
    }
}

#[derive(Default)]
pub(crate) struct RecordingSink {
    played: Mutex<Vec<(Option<InvokerId>, PlayResource)>>,
}

impl RecordingSink {
    pub(crate) fn played(&self) -> Vec<(Option<InvokerId>, PlayResource)> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackSink for RecordingSink {
    async fn play(
        &self,
        invoker: Option<&InvokerId>,
        resource: PlayResource,
    ) -> Result<(), PlaybackError> {
        self.played
            .lock()
            .unwrap()
            .push((invoker.cloned(), resource));
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingChannel {
    messages: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelClient for RecordingChannel {
    async fn send_message(&self, text: &str) -> Result<(), ChannelError> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn change_description(&self, _text: &str) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn set_avatar(&self, _image_url: &str) -> Result<(), ChannelError> {
        Ok(())
    }
}

pub(crate) struct SessionHarness {
    pub(crate) session: Arc<Session>,
    pub(crate) sink: Arc<RecordingSink>,
    pub(crate) channel: Arc<RecordingChannel>,
}

impl SessionHarness {
    pub(crate) fn new(source: MusicSourceStub, music_path: &Path) -> Self {
        let sink = Arc::new(RecordingSink::default());
        let channel = Arc::new(RecordingChannel::default());
        let resolver = Resolver::new(
            Arc::new(source),
            ResolverConfig {
                attempts: 1,
                retry_delay: Duration::ZERO,
            },
        );
        let orchestrator = PlaybackOrchestrator::new(
            QueueEngine::with_seed(PlaybackMode::SequentialOnce, 7),
            resolver,
            Arc::clone(&sink) as Arc<dyn PlaybackSink>,
            Arc::clone(&channel) as Arc<dyn ChannelClient>,
        );
        let library = LibraryConfig {
            search_subdirectories: true,
            max_search_results: 10,
            local_music_path: music_path.to_path_buf(),
        };

        Self {
            session: Arc::new(Session::new(orchestrator, library)),
            sink,
            channel,
        }
    }
}
