pub mod plex;

use crate::error::CatalogError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use plex::PlexCatalog;

/// Opaque handle used to issue a delete call against the media server.
///
/// For Plex this is the item's rating key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetHandle(pub String);

impl std::fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One library section on the media server.
#[derive(Debug, Clone)]
pub struct SectionRef {
    pub key: String,
    pub title: String,
    pub kind: SectionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Movie,
    Show,
    Music,
    Other,
}

impl SectionKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "movie" => Self::Movie,
            "show" => Self::Show,
            "artist" => Self::Music,
            _ => Self::Other,
        }
    }
}

/// One backing file of an asset.
#[derive(Debug, Clone)]
pub struct MediaPart {
    pub file: String,
    pub size: u64,
}

/// One item as reported by the media server.
///
/// `view_count` is already the effective count (absent on the wire ⇒ 0).
#[derive(Debug, Clone)]
pub struct Asset {
    pub handle: AssetHandle,
    pub title: String,
    pub year: Option<i32>,
    pub view_count: u64,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub added_at: Option<DateTime<Utc>>,
    pub parts: Vec<MediaPart>,
}

impl Asset {
    pub fn total_size(&self) -> u64 {
        self.parts.iter().map(|p| p.size).sum()
    }
}

/// Read/delete access to the media server's library.
///
/// The engine only ever lists and deletes; no other write operation exists
/// behind this seam. `delete` is not assumed safe to call concurrently.
#[async_trait]
pub trait MediaCatalog: Send + Sync {
    /// Every library section, all media kinds.
    async fn sections(&self) -> Result<Vec<SectionRef>, CatalogError>;

    /// Leaf items of one section (episodes for show sections, tracks for
    /// music), each with its backing parts.
    async fn assets(&self, section: &SectionRef) -> Result<Vec<Asset>, CatalogError>;

    /// Irreversibly delete one item (and its files, if the server is
    /// configured to do so).
    async fn delete(&self, handle: &AssetHandle) -> Result<(), CatalogError>;
}
