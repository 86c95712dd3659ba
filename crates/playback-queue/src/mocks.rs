use crate::track::{Author, InvokerId, SongDetail};
use crate::traits::{
    ChannelClient, ChannelError, LookupError, MusicSource, PlayResource, PlaybackError,
    PlaybackSink,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::sync::Mutex;
use std::time::Instant;

#[derive(Default)]
pub(crate) struct MusicSourceMock {
    details: HashMap<String, SongDetail>,
    urls: HashMap<String, String>,
    url_failures: Mutex<HashMap<String, usize>>,
    pub(crate) calls: Mutex<Vec<String>>,
    pub(crate) url_call_times: Mutex<Vec<Instant>>,
}

impl MusicSourceMock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_detail(mut self, id: &str, name: &str, cover: &str) -> Self {
        self.details.insert(
            id.into(),
            SongDetail {
                name: name.into(),
                cover_url: cover.into(),
                artists: vec![Author {
                    name: "Robert Miles".into(),
                    id: Some(45236),
                }],
            },
        );
        self
    }

    pub(crate) fn with_url(mut self, id: &str, url: &str) -> Self {
        self.urls.insert(id.into(), url.into());
        self
    }

    pub(crate) fn failing_url(self, id: &str, times: usize) -> Self {
        self.url_failures.lock().unwrap().insert(id.into(), times);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count_calls(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl MusicSource for MusicSourceMock {
    async fn song_detail(&self, id: &str) -> Result<SongDetail, LookupError> {
        self.calls.lock().unwrap().push(format!("detail:{}", id));

        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.into()))
    }

    async fn song_url(&self, id: &str) -> Result<String, LookupError> {
        self.calls.lock().unwrap().push(format!("url:{}", id));
        self.url_call_times.lock().unwrap().push(Instant::now());

        if let Some(remaining) = self.url_failures.lock().unwrap().get_mut(id) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(LookupError::Network(Box::new(Error::from(
                    ErrorKind::ConnectionReset,
                ))));
            }
        }

        self.urls
            .get(id)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(id.into()))
    }

    async fn cover_image(&self, url: &str) -> Result<Vec<u8>, LookupError> {
        self.calls.lock().unwrap().push(format!("cover:{}", url));

        Ok(vec![0xFF, 0xD8])
    }
}

#[derive(Default)]
pub(crate) struct PlaybackSinkMock {
    failing_locators: HashSet<String>,
    pub(crate) played: Mutex<Vec<(Option<InvokerId>, PlayResource)>>,
}

impl PlaybackSinkMock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(mut self, locator: &str) -> Self {
        self.failing_locators.insert(locator.into());
        self
    }

    pub(crate) fn played(&self) -> Vec<(Option<InvokerId>, PlayResource)> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaybackSink for PlaybackSinkMock {
    async fn play(
        &self,
        invoker: Option<&InvokerId>,
        resource: PlayResource,
    ) -> Result<(), PlaybackError> {
        if self.failing_locators.contains(&resource.locator) {
            return Err(PlaybackError(Box::new(Error::from(ErrorKind::BrokenPipe))));
        }

        self.played
            .lock()
            .unwrap()
            .push((invoker.cloned(), resource));

        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct ChannelClientMock {
    fail_everything: bool,
    pub(crate) messages: Mutex<Vec<String>>,
    pub(crate) descriptions: Mutex<Vec<String>>,
    pub(crate) avatars: Mutex<Vec<String>>,
}

impl ChannelClientMock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_everything: true,
            ..Self::default()
        }
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub(crate) fn descriptions(&self) -> Vec<String> {
        self.descriptions.lock().unwrap().clone()
    }

    pub(crate) fn avatars(&self) -> Vec<String> {
        self.avatars.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<(), ChannelError> {
        if self.fail_everything {
            Err(ChannelError(Box::new(Error::from(ErrorKind::NotConnected))))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChannelClient for ChannelClientMock {
    async fn send_message(&self, text: &str) -> Result<(), ChannelError> {
        self.messages.lock().unwrap().push(text.into());
        self.outcome()
    }

    async fn change_description(&self, text: &str) -> Result<(), ChannelError> {
        self.descriptions.lock().unwrap().push(text.into());
        self.outcome()
    }

    async fn set_avatar(&self, image_url: &str) -> Result<(), ChannelError> {
        self.avatars.lock().unwrap().push(image_url.into());
        self.outcome()
    }
}
