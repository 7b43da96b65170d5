//! Storage-usage breakdown across every library section.

use crate::catalog::MediaCatalog;
use crate::error::CatalogError;
use crate::utils::text::usage_bar;
use std::collections::BTreeMap;

const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Default, Clone)]
pub struct CategoryStats {
    pub bytes: u64,
    pub files: usize,
}

#[derive(Debug, Default)]
pub struct StorageStats {
    /// Path-derived category → size/count.
    pub categories: BTreeMap<String, CategoryStats>,
    pub total_bytes: u64,
    pub total_files: usize,
}

impl StorageStats {
    pub fn total_gb(&self) -> f64 {
        self.total_bytes as f64 / BYTES_PER_GIB
    }
}

/// Bucket a file path into a human category by its folder naming.
/// Stateless heuristic; unknown layouts fall back to the first path
/// component under the media root.
pub fn categorize_path(path: &str) -> String {
    let lower = path.to_lowercase();
    if lower.contains("movie") {
        "Movies".into()
    } else if lower.contains("tv") || lower.contains("show") || lower.contains("series") {
        "TV Shows".into()
    } else if lower.contains("music") || lower.contains("audio") {
        "Music".into()
    } else if lower.contains("training") || lower.contains("course") {
        "Training Videos".into()
    } else if lower.contains("software") || lower.contains("app") || lower.contains("program") {
        "Software".into()
    } else {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .filter(|s| !s.is_empty())
            .map_or_else(|| "Other".into(), ToString::to_string)
    }
}

/// Walk every section and sum backing-file sizes per category.
///
/// A section that fails to scan is logged and skipped; only a fully
/// unreachable catalog fails the analysis.
pub async fn analyze(catalog: &dyn MediaCatalog) -> Result<StorageStats, CatalogError> {
    let mut stats = StorageStats::default();

    for section in catalog.sections().await? {
        tracing::info!(section = %section.title, "scanning for storage usage");
        let assets = match catalog.assets(&section).await {
            Ok(assets) => assets,
            Err(e) => {
                tracing::error!(section = %section.title, error = %e, "section scan failed");
                continue;
            }
        };

        for asset in assets {
            for part in &asset.parts {
                let entry = stats.categories.entry(categorize_path(&part.file)).or_default();
                entry.bytes += part.size;
                entry.files += 1;
                stats.total_bytes += part.size;
                stats.total_files += 1;
            }
        }
    }

    Ok(stats)
}

fn category_emoji(category: &str) -> &'static str {
    if category.contains("Movie") {
        "🎬"
    } else if category.contains("TV") {
        "📺"
    } else if category.contains("Training") {
        "🎓"
    } else if category.contains("Music") {
        "🎵"
    } else if category.contains("Software") {
        "💿"
    } else {
        "📁"
    }
}

/// Render the usage report against the configured capacity.
pub fn format_report(stats: &StorageStats, capacity_gb: f64) -> String {
    let used_gb = stats.total_gb();
    let free_gb = (capacity_gb - used_gb).max(0.0);
    let used_pct = if capacity_gb > 0.0 {
        used_gb / capacity_gb * 100.0
    } else {
        0.0
    };

    let mut out = String::from("💾 MEDIA DISK USAGE\n\n");
    out.push_str(&format!("📂 Scanned: {} files\n\n", stats.total_files));
    out.push_str(&format!("Total media: {used_gb:.1} GB\n"));
    out.push_str(&format!("Capacity: {capacity_gb:.0} GB\n"));
    out.push_str(&format!("Available: {free_gb:.1} GB\n\n"));
    out.push_str(&format!("Media usage: {used_pct:.1}%\n"));
    out.push_str(&format!("{}\n\n", usage_bar(used_gb, capacity_gb, 20)));

    if used_pct > 90.0 {
        out.push_str("⚠️ WARNING: over 90% full!\n\n");
    } else if used_pct > 80.0 {
        out.push_str("⚠️ CAUTION: over 80% full\n\n");
    } else {
        out.push_str("✅ Healthy\n\n");
    }

    out.push_str("📊 BREAKDOWN BY TYPE\n");
    let mut sorted: Vec<_> = stats.categories.iter().collect();
    sorted.sort_by(|a, b| b.1.bytes.cmp(&a.1.bytes));

    for (category, data) in sorted {
        if data.bytes == 0 {
            continue;
        }
        let gb = data.bytes as f64 / BYTES_PER_GIB;
        let pct = if capacity_gb > 0.0 {
            gb / capacity_gb * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "{} {}\n   {}\n   {:.1} GB ({:.1}%) • {} files\n",
            category_emoji(category),
            category,
            usage_bar(gb, capacity_gb, 20),
            gb,
            pct,
            data.files,
        ));
    }

    out.push_str(&format!(
        "✨ Free space\n   {:.1} GB ({:.1}%)\n",
        free_gb,
        100.0 - used_pct
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Asset, AssetHandle, MediaPart, SectionKind, SectionRef};
    use async_trait::async_trait;

    #[test]
    fn categorize_known_folder_names() {
        assert_eq!(categorize_path("/data/Movies/a.mkv"), "Movies");
        assert_eq!(categorize_path("/data/TV Shows/b.mkv"), "TV Shows");
        assert_eq!(categorize_path("/data/old-series/c.mkv"), "TV Shows");
        assert_eq!(categorize_path("/data/Music/d.flac"), "Music");
        assert_eq!(categorize_path("/data/courses/e.mp4"), "Training Videos");
        assert_eq!(categorize_path("/data/software/f.iso"), "Software");
    }

    #[test]
    fn categorize_falls_back_to_first_component() {
        assert_eq!(categorize_path("/books/novel.epub"), "books");
        assert_eq!(categorize_path(""), "Other");
    }

    struct TwoSectionCatalog;

    #[async_trait]
    impl MediaCatalog for TwoSectionCatalog {
        async fn sections(&self) -> Result<Vec<SectionRef>, CatalogError> {
            Ok(vec![
                SectionRef {
                    key: "1".into(),
                    title: "Movies".into(),
                    kind: SectionKind::Movie,
                },
                SectionRef {
                    key: "2".into(),
                    title: "Broken".into(),
                    kind: SectionKind::Other,
                },
            ])
        }

        async fn assets(&self, section: &SectionRef) -> Result<Vec<Asset>, CatalogError> {
            if section.key == "2" {
                return Err(CatalogError::Api {
                    status: 500,
                    message: "broken section".into(),
                });
            }
            Ok(vec![Asset {
                handle: AssetHandle("1".into()),
                title: "A".into(),
                year: None,
                view_count: 0,
                last_viewed_at: None,
                added_at: None,
                parts: vec![
                    MediaPart {
                        file: "/data/Movies/a.mkv".into(),
                        size: 100,
                    },
                    MediaPart {
                        file: "/data/TV/a-extra.mkv".into(),
                        size: 50,
                    },
                ],
            }])
        }

        async fn delete(&self, _handle: &AssetHandle) -> Result<(), CatalogError> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn analyze_sums_by_category_and_survives_bad_sections() {
        let stats = analyze(&TwoSectionCatalog).await.unwrap();
        assert_eq!(stats.total_bytes, 150);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.categories["Movies"].bytes, 100);
        assert_eq!(stats.categories["TV Shows"].bytes, 50);
    }

    #[test]
    fn report_flags_capacity_pressure() {
        let mut stats = StorageStats::default();
        stats.total_bytes = (95.0 * BYTES_PER_GIB) as u64;
        stats.total_files = 10;
        stats
            .categories
            .insert("Movies".into(), CategoryStats { bytes: stats.total_bytes, files: 10 });

        let report = format_report(&stats, 100.0);
        assert!(report.contains("WARNING: over 90% full"));
        assert!(report.contains("🎬 Movies"));
    }
}
