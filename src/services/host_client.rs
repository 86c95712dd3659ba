use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client of the host application that owns the audio player and the
/// channel the bot lives in.
pub(crate) struct HostClient {
    client: Client,
    endpoint: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum HostClientError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

pub(crate) type HostClientResult<T> = Result<T, HostClientError>;

#[derive(Debug, Serialize)]
pub(crate) struct PlayRequest<'a> {
    pub(crate) invoker: Option<&'a str>,
    pub(crate) locator: &'a str,
    pub(crate) title: &'a str,
    pub(crate) local_file: bool,
    pub(crate) cover_link: Option<&'a str>,
    /// Base64 encoded cover art.
    pub(crate) cover_image: Option<String>,
}

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct AvatarBody<'a> {
    image_url: &'a str,
}

impl HostClient {
    pub(crate) fn create(endpoint: &str) -> HostClientResult<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) async fn check_connection(&self) -> HostClientResult<()> {
        self.client
            .get(format!("{}/health", self.endpoint))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub(crate) async fn play(&self, request: &PlayRequest<'_>) -> HostClientResult<()> {
        debug!(locator = request.locator, "Sending play request to host");

        self.client
            .post(format!("{}/play", self.endpoint))
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub(crate) async fn send_message(&self, text: &str) -> HostClientResult<()> {
        self.client
            .post(format!("{}/channel/message", self.endpoint))
            .json(&TextBody { text })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub(crate) async fn change_description(&self, text: &str) -> HostClientResult<()> {
        self.client
            .put(format!("{}/channel/description", self.endpoint))
            .json(&TextBody { text })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    pub(crate) async fn set_avatar(&self, image_url: &str) -> HostClientResult<()> {
        self.client
            .put(format!("{}/avatar", self.endpoint))
            .json(&AvatarBody { image_url })
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
