use std::path::PathBuf;
use std::time::Duration;

pub const AUDIO_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "m4a"];

#[derive(Clone, Debug, PartialEq)]
pub struct LibraryConfig {
    pub search_subdirectories: bool,
    pub max_search_results: usize,
    pub local_music_path: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            search_subdirectories: true,
            max_search_results: 10,
            local_music_path: PathBuf::from("music"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolverConfig {
    /// Total lookups per track, the first one included.
    pub attempts: usize,
    pub retry_delay: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}
