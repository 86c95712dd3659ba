use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::path::Path;

pub(crate) const SONG_PAGE_URL: &str = "https://music.163.com/#/song?id=";
pub(crate) const ARTIST_PAGE_URL: &str = "https://music.163.com/#/artist?id=";
pub(crate) const PLAYLIST_PAGE_URL: &str = "https://music.163.com/#/playlist?id=";

const HYDRATION_FAILED_TEXT: &str = "Failed to fetch song name!";

// TrackId
#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct TrackId(pub(crate) String);

impl Deref for TrackId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(value: &str) -> Self {
        TrackId(value.to_string())
    }
}

impl From<String> for TrackId {
    fn from(value: String) -> Self {
        TrackId(value)
    }
}

impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// InvokerId
#[derive(Eq, PartialEq, Clone, Hash, Debug, Serialize, Deserialize)]
pub struct InvokerId(pub(crate) String);

impl Deref for InvokerId {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for InvokerId {
    fn from(value: &str) -> Self {
        InvokerId(value.to_string())
    }
}

impl From<String> for InvokerId {
    fn from(value: String) -> Self {
        InvokerId(value)
    }
}

impl std::fmt::Display for InvokerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub id: Option<u64>,
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct PlaylistMeta {
    pub id: String,
    pub name: String,
    pub cover: String,
}

impl PlaylistMeta {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cover: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cover: cover.into(),
        }
    }

    pub fn page_link(&self) -> String {
        format!("{}{}", PLAYLIST_PAGE_URL, self.id)
    }
}

/// Song metadata returned by a remote lookup.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SongDetail {
    pub name: String,
    pub cover_url: String,
    pub artists: Vec<Author>,
}

/// A queueable track: either a remote song identifier or a local file path.
///
/// `is_local` is decided once from the identifier and never changes.
/// Display metadata starts empty (apart from the stem of a local file) and
/// is filled in by hydration.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackDescriptor {
    id: TrackId,
    is_local: bool,
    name: String,
    detail_link: String,
    cover_link: String,
    authors: Vec<Author>,
    in_queue: bool,
}

fn is_local_path(id: &str) -> bool {
    let path = Path::new(id);

    path.is_absolute() || path.has_root() || path.components().count() > 1
}

fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl TrackDescriptor {
    pub fn new(id: impl Into<String>, in_queue: bool) -> Self {
        let id = id.into();
        let is_local = is_local_path(&id);
        let name = if is_local {
            file_stem(&id)
        } else {
            String::new()
        };

        Self {
            id: TrackId(id),
            is_local,
            name,
            detail_link: String::new(),
            cover_link: String::new(),
            authors: vec![],
            in_queue,
        }
    }

    /// Descriptor for a local search hit. Not a queue member.
    pub fn local_search_result(path: &Path) -> Self {
        let path = path.to_string_lossy().into_owned();
        let mut track = Self::new(path.clone(), false);
        track.name = file_stem(&path);
        track.detail_link = path;
        track
    }

    pub fn id(&self) -> &TrackId {
        &self.id
    }

    pub fn is_local(&self) -> bool {
        self.is_local
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn detail_link(&self) -> &str {
        &self.detail_link
    }

    pub fn cover_link(&self) -> &str {
        &self.cover_link
    }

    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    pub fn is_queue_member(&self) -> bool {
        self.in_queue
    }

    pub fn set_queue_member(&mut self, in_queue: bool) {
        self.in_queue = in_queue;
    }

    pub(crate) fn is_hydrated(&self) -> bool {
        !self.name.is_empty() && !self.cover_link.is_empty()
    }

    pub(crate) fn hydrate_local(&mut self) {
        if self.name.is_empty() {
            self.name = file_stem(&self.id);
        }
        if self.detail_link.is_empty() {
            self.detail_link = self.id.to_string();
        }
        // Local files never carry cover art.
        self.cover_link.clear();
    }

    pub(crate) fn apply_detail(&mut self, detail: SongDetail) {
        self.name = detail.name;
        self.cover_link = detail.cover_url;
        self.detail_link = format!("{}{}", SONG_PAGE_URL, self.id);
        self.authors.clear();

        for artist in detail.artists {
            if artist.name.is_empty() || self.authors.iter().any(|a| a.name == artist.name) {
                continue;
            }
            self.authors.push(artist);
        }
    }

    pub(crate) fn mark_hydration_failed(&mut self, error: &dyn std::fmt::Display) {
        self.name = format!("{}\n{}", HYDRATION_FAILED_TEXT, error);
    }

    /// Author names joined by ` / `, in lookup order.
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|author| author.name.as_str())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn full_name(&self) -> String {
        let authors = self.author_names();

        if authors.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, authors)
        }
    }

    pub fn author_names_bbcode(&self) -> String {
        self.authors
            .iter()
            .map(|author| match author.id {
                Some(id) => format!("[URL={}{}]{}[/URL]", ARTIST_PAGE_URL, id, author.name),
                None => author.name.clone(),
            })
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn full_name_bbcode(&self) -> String {
        let authors = self.author_names_bbcode();
        let title = if self.detail_link.is_empty() {
            self.name.clone()
        } else {
            format!("[URL={}]{}[/URL]", self.detail_link, self.name)
        };

        if authors.is_empty() {
            title
        } else {
            format!("{} - {}", title, authors)
        }
    }
}
