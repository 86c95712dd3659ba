mod client;
mod parser;

use serde::{Deserialize, Serialize};

pub use client::*;
pub use parser::ParseError;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Album {
    #[serde(default, rename = "picUrl")]
    pub pic_url: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    #[serde(default, rename = "ar")]
    pub artists: Vec<Artist>,
    #[serde(default, rename = "al")]
    pub album: Album,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SongUrl {
    #[serde(default)]
    pub url: Option<String>,
}
