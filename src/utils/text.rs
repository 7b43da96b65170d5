const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;

#[must_use]
pub fn truncate_with_ellipsis(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => {
            let truncated = &s[..idx];
            format!("{}...", truncated.trim_end())
        }
        None => s.to_string(),
    }
}

/// Canonical capacity rendering: two decimals, GB.
#[must_use]
pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GIB)
}

#[must_use]
pub fn format_mb(bytes: u64) -> String {
    format!("{:.0} MB", bytes as f64 / BYTES_PER_MIB)
}

/// Text progress bar, `filled` out of `capacity` over `width` cells.
#[must_use]
pub fn usage_bar(filled: f64, capacity: f64, width: usize) -> String {
    let ratio = if capacity > 0.0 {
        (filled / capacity).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled_cells = (ratio * width as f64) as usize;
    let mut bar = "█".repeat(filled_cells);
    bar.push_str(&"░".repeat(width - filled_cells));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
        assert_eq!(truncate_with_ellipsis("", 3), "");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello world", 5), "hello...");
        assert_eq!(truncate_with_ellipsis("a long title ", 6), "a long...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_with_ellipsis("🦀🦀🦀🦀", 2), "🦀🦀...");
    }

    #[test]
    fn gb_formatting_is_two_decimals() {
        assert_eq!(format_gb(0), "0.00 GB");
        assert_eq!(format_gb(1024 * 1024 * 1024), "1.00 GB");
        assert_eq!(format_gb(1_610_612_736), "1.50 GB");
    }

    #[test]
    fn usage_bar_is_fixed_width() {
        assert_eq!(usage_bar(0.0, 100.0, 10).chars().count(), 10);
        assert_eq!(usage_bar(50.0, 100.0, 10), "█████░░░░░");
        assert_eq!(usage_bar(200.0, 100.0, 4), "████");
        assert_eq!(usage_bar(5.0, 0.0, 4), "░░░░");
    }
}
