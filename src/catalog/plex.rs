use super::{Asset, AssetHandle, MediaCatalog, MediaPart, SectionKind, SectionRef};
use crate::error::CatalogError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Plex Media Server client.
///
/// Talks the plain PMS HTTP API with `X-Plex-Token` auth and
/// `Accept: application/json`.
pub struct PlexCatalog {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl PlexCatalog {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, CatalogError> {
        let resp = self
            .client
            .get(self.url(path))
            .header("X-Plex-Token", &self.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MediaCatalog for PlexCatalog {
    async fn sections(&self) -> Result<Vec<SectionRef>, CatalogError> {
        let body: SectionsResponse = self.get_json("/library/sections").await?;
        Ok(body
            .container
            .directories
            .into_iter()
            .map(|d| SectionRef {
                key: d.key,
                title: d.title,
                kind: SectionKind::parse(&d.kind),
            })
            .collect())
    }

    async fn assets(&self, section: &SectionRef) -> Result<Vec<Asset>, CatalogError> {
        // Show and music sections report containers at the top level; ask
        // for the leaf type so parts carry file sizes.
        let path = match section.kind {
            SectionKind::Show => format!("/library/sections/{}/all?type=4", section.key),
            SectionKind::Music => format!("/library/sections/{}/all?type=10", section.key),
            _ => format!("/library/sections/{}/all", section.key),
        };

        let body: ItemsResponse = self.get_json(&path).await?;
        Ok(body
            .container
            .metadata
            .into_iter()
            .map(WireItem::into_asset)
            .collect())
    }

    async fn delete(&self, handle: &AssetHandle) -> Result<(), CatalogError> {
        let resp = self
            .client
            .delete(self.url(&format!("/library/metadata/{}", handle.0)))
            .header("X-Plex-Token", &self.token)
            .send()
            .await
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SectionsResponse {
    #[serde(rename = "MediaContainer")]
    container: SectionsContainer,
}

#[derive(Debug, Deserialize)]
struct SectionsContainer {
    #[serde(rename = "Directory", default)]
    directories: Vec<WireSection>,
}

#[derive(Debug, Deserialize)]
struct WireSection {
    key: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ItemsResponse {
    #[serde(rename = "MediaContainer")]
    container: ItemsContainer,
}

#[derive(Debug, Deserialize)]
struct ItemsContainer {
    #[serde(rename = "Metadata", default)]
    metadata: Vec<WireItem>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    #[serde(rename = "ratingKey")]
    rating_key: String,
    title: String,
    year: Option<i32>,
    #[serde(rename = "viewCount")]
    view_count: Option<u64>,
    #[serde(rename = "lastViewedAt")]
    last_viewed_at: Option<i64>,
    #[serde(rename = "addedAt")]
    added_at: Option<i64>,
    #[serde(rename = "Media", default)]
    media: Vec<WireMedia>,
}

#[derive(Debug, Deserialize)]
struct WireMedia {
    #[serde(rename = "Part", default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Deserialize)]
struct WirePart {
    file: Option<String>,
    size: Option<u64>,
}

impl WireItem {
    fn into_asset(self) -> Asset {
        let parts = self
            .media
            .into_iter()
            .flat_map(|m| m.parts)
            .filter_map(|p| {
                Some(MediaPart {
                    file: p.file?,
                    size: p.size?,
                })
            })
            .collect();

        Asset {
            handle: AssetHandle(self.rating_key),
            title: self.title,
            year: self.year,
            view_count: self.view_count.unwrap_or(0),
            last_viewed_at: self.last_viewed_at.and_then(epoch_to_utc),
            added_at: self.added_at.and_then(epoch_to_utc),
            parts,
        }
    }
}

fn epoch_to_utc(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sections_parses_directories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library/sections"))
            .and(header("X-Plex-Token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "MediaContainer": {
                    "Directory": [
                        {"key": "1", "title": "Movies", "type": "movie"},
                        {"key": "2", "title": "TV", "type": "show"}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let catalog = PlexCatalog::new(server.uri(), "tok");
        let sections = catalog.sections().await.unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Movies");
        assert_eq!(sections[0].kind, SectionKind::Movie);
        assert_eq!(sections[1].kind, SectionKind::Show);
    }

    #[tokio::test]
    async fn assets_sums_parts_and_defaults_view_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/library/sections/1/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "MediaContainer": {
                    "Metadata": [{
                        "ratingKey": "42",
                        "title": "Old Movie",
                        "year": 1997,
                        "addedAt": 1_600_000_000,
                        "Media": [
                            {"Part": [{"file": "/data/movies/a.mkv", "size": 100}]},
                            {"Part": [{"file": "/data/movies/a2.mkv", "size": 50}]}
                        ]
                    }]
                }
            })))
            .mount(&server)
            .await;

        let catalog = PlexCatalog::new(server.uri(), "tok");
        let section = SectionRef {
            key: "1".into(),
            title: "Movies".into(),
            kind: SectionKind::Movie,
        };
        let assets = catalog.assets(&section).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].view_count, 0);
        assert_eq!(assets[0].total_size(), 150);
        assert!(assets[0].last_viewed_at.is_none());
    }

    #[tokio::test]
    async fn delete_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/library/metadata/42"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let catalog = PlexCatalog::new(server.uri(), "tok");
        let err = catalog.delete(&AssetHandle("42".into())).await.unwrap_err();
        match err {
            CatalogError::Api { status, .. } => assert_eq!(status, 403),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        // Port 9 (discard) is almost certainly closed.
        let catalog = PlexCatalog::new("http://127.0.0.1:9", "tok");
        let err = catalog.sections().await.unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }
}
