use crate::catalog::{Asset, AssetHandle, MediaCatalog, SectionKind};
use crate::error::CatalogError;
use chrono::{DateTime, Duration, Utc};

/// Rule set determining which assets qualify as deletable.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    /// Keep anything watched more than this many times.
    pub max_view_count: u64,
    /// When set, keep anything watched within the last N days. Never-viewed
    /// assets always pass this clause.
    pub min_days_since_last_view: Option<u32>,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_view_count: 1,
            min_days_since_last_view: None,
        }
    }
}

impl RetentionPolicy {
    pub fn matches(
        &self,
        view_count: u64,
        last_viewed_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> bool {
        if view_count > self.max_view_count {
            return false;
        }

        match (self.min_days_since_last_view, last_viewed_at) {
            (Some(days), Some(last)) => now - last >= Duration::days(i64::from(days)),
            // No recency clause, or never viewed.
            _ => true,
        }
    }
}

/// Immutable snapshot of one deletable asset, taken at preview time.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub handle: AssetHandle,
    pub title: String,
    pub year: Option<i32>,
    pub view_count: u64,
    pub last_viewed_at: Option<DateTime<Utc>>,
    pub added_at: Option<DateTime<Utc>>,
    pub size_bytes: u64,
    pub paths: Vec<String>,
}

impl Candidate {
    fn from_asset(asset: Asset) -> Self {
        let size_bytes = asset.total_size();
        Self {
            handle: asset.handle,
            title: asset.title,
            year: asset.year,
            view_count: asset.view_count,
            last_viewed_at: asset.last_viewed_at,
            added_at: asset.added_at,
            size_bytes,
            paths: asset.parts.into_iter().map(|p| p.file).collect(),
        }
    }
}

/// Scan every movie section and return the deletion candidates, ordered
/// ascending by (view count, date added): least-engaged, longest-resident
/// content first.
///
/// Assets missing size metadata are skipped and logged, not fatal; an
/// unreachable catalog aborts the whole scan.
pub async fn scan_candidates(
    catalog: &dyn MediaCatalog,
    policy: &RetentionPolicy,
    now: DateTime<Utc>,
) -> Result<Vec<Candidate>, CatalogError> {
    let sections = catalog.sections().await?;
    let movie_sections: Vec<_> = sections
        .into_iter()
        .filter(|s| s.kind == SectionKind::Movie)
        .collect();

    if movie_sections.is_empty() {
        tracing::warn!("no movie sections found on the media server");
    }

    let mut candidates = Vec::new();
    for section in &movie_sections {
        tracing::info!(section = %section.title, "scanning library section");
        let assets = catalog.assets(section).await?;

        for asset in assets {
            if !policy.matches(asset.view_count, asset.last_viewed_at, now) {
                continue;
            }
            if asset.parts.is_empty() {
                tracing::debug!(title = %asset.title, "skipping asset without size metadata");
                continue;
            }
            candidates.push(Candidate::from_asset(asset));
        }
    }

    // None for added_at sorts last: unknown-age content is the least
    // attractive to remove under the longest-resident bias.
    candidates.sort_by_key(|c| (c.view_count, c.added_at.unwrap_or(DateTime::<Utc>::MAX_UTC)));

    tracing::info!(
        count = candidates.len(),
        max_views = policy.max_view_count,
        "candidate scan complete"
    );
    Ok(candidates)
}
