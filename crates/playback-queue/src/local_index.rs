use crate::config::{LibraryConfig, AUDIO_EXTENSIONS};
use crate::track::TrackDescriptor;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Searchable map from lower-cased file stem to the audio files carrying it.
///
/// Buckets keep scan order, both across keys and within one key. The map is
/// only ever replaced as a whole by [`LocalIndex::rebuild`].
#[derive(Debug, Default)]
pub struct LocalIndex {
    root: Option<PathBuf>,
    buckets: Vec<(String, Vec<PathBuf>)>,
    positions: HashMap<String, usize>,
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}

impl LocalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index built from the configured music directory.
    pub fn from_config(config: &LibraryConfig) -> Self {
        let mut index = Self::new();
        index.rebuild(&config.local_music_path, config.search_subdirectories);
        index
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, paths)| paths.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Points the index at a new directory using the configured recursion.
    pub fn set_root(&mut self, root: &Path, config: &LibraryConfig) -> usize {
        self.rebuild(root, config.search_subdirectories)
    }

    /// Rescans `root`. A missing directory leaves the index untouched.
    pub fn rebuild(&mut self, root: &Path, include_subdirectories: bool) -> usize {
        if root.as_os_str().is_empty() || !root.is_dir() {
            warn!(root = %root.display(), "Local music directory does not exist");
            return self.len();
        }

        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        let max_depth = if include_subdirectories { usize::MAX } else { 1 };

        let mut buckets: Vec<(String, Vec<PathBuf>)> = vec![];
        let mut positions: HashMap<String, usize> = HashMap::new();

        for entry in WalkDir::new(&root)
            .follow_links(true)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(Result::ok)
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_audio_file(path) {
                continue;
            }

            let key = match path.file_stem() {
                Some(stem) => stem.to_string_lossy().to_lowercase(),
                None => continue,
            };

            match positions.get(&key) {
                Some(&position) => buckets[position].1.push(path.to_path_buf()),
                None => {
                    positions.insert(key.clone(), buckets.len());
                    buckets.push((key, vec![path.to_path_buf()]));
                }
            }
        }

        self.buckets = buckets;
        self.positions = positions;
        self.root = Some(root);

        let files = self.len();
        info!(root = ?self.root, files, "Local music index rebuilt");

        files
    }

    /// Case-insensitive substring search over file stems.
    pub fn search(&self, keyword: &str, max_results: usize) -> Vec<TrackDescriptor> {
        if self.root.is_none() {
            return vec![];
        }

        let keyword = keyword.to_lowercase();
        let results: Vec<TrackDescriptor> = self
            .buckets
            .iter()
            .filter(|(key, _)| key.contains(&keyword))
            .flat_map(|(_, paths)| paths.iter())
            .take(max_results)
            .map(|path| TrackDescriptor::local_search_result(path))
            .collect();

        debug!(%keyword, found = results.len(), "Local music search");

        results
    }

    /// Files indexed under an exact lower-cased stem.
    pub fn files_with_stem(&self, stem: &str) -> &[PathBuf] {
        self.positions
            .get(&stem.to_lowercase())
            .map(|&position| self.buckets[position].1.as_slice())
            .unwrap_or_default()
    }
}
