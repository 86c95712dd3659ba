use playback_queue::{LibraryConfig, PlaybackMode};
use serde::Deserialize;
use std::path::PathBuf;

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30u64
}

fn default_local_music_path() -> String {
    "music".to_string()
}

fn default_search_subdirectories() -> bool {
    true
}

fn default_max_search_results() -> usize {
    10
}

#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_bind_address")]
    pub(crate) bind_address: String,
    #[serde(default = "default_shutdown_timeout")]
    pub(crate) shutdown_timeout: u64,
    pub(crate) music_api_endpoint: String,
    #[serde(default)]
    pub(crate) music_api_cookie: Option<String>,
    pub(crate) host_endpoint: String,
    #[serde(default = "default_local_music_path")]
    pub(crate) local_music_path: String,
    #[serde(default = "default_search_subdirectories")]
    pub(crate) search_subdirectories: bool,
    #[serde(default = "default_max_search_results")]
    pub(crate) max_search_results: usize,
    #[serde(default)]
    pub(crate) playback_mode: PlaybackMode,
}

impl Config {
    pub(crate) fn from_env() -> Self {
        match envy::from_env::<Self>() {
            Ok(config) => config,
            Err(error) => panic!("Missing environment variable: {:#?}", error),
        }
    }

    pub(crate) fn library_config(&self) -> LibraryConfig {
        LibraryConfig {
            search_subdirectories: self.search_subdirectories,
            max_search_results: self.max_search_results,
            local_music_path: PathBuf::from(&self.local_music_path),
        }
    }

    /// Headers forwarded with every music API request.
    pub(crate) fn music_api_headers(&self) -> Vec<(&str, &str)> {
        self.music_api_cookie
            .iter()
            .map(|cookie| ("Cookie", cookie.as_str()))
            .collect()
    }
}
