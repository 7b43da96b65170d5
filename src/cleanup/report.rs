//! Operator-facing message formatting.

use super::executor::DeletionSummary;
use super::gate::{CANCEL_TOKEN, CONFIRM_TOKEN};
use super::policy::Candidate;
use super::session::Session;
use crate::transport::chunker::ReportChunker;
use crate::utils::text::{format_gb, format_mb, truncate_with_ellipsis};

const TITLE_WIDTH: usize = 35;
const RULE: &str = "==============================";

fn last_viewed_label(candidate: &Candidate) -> String {
    candidate
        .last_viewed_at
        .map_or_else(|| "Never".to_string(), |t| t.format("%Y-%m-%d").to_string())
}

fn year_label(candidate: &Candidate) -> String {
    candidate
        .year
        .map_or_else(|| "N/A".to_string(), |y| y.to_string())
}

fn total_size(candidates: &[Candidate]) -> u64 {
    candidates.iter().map(|c| c.size_bytes).sum()
}

/// Preview report: header, one record per candidate, total footer.
/// Pre-chunked so no record straddles a transport message.
pub fn preview_messages(
    candidates: &[Candidate],
    days_filter: Option<u32>,
    max_bytes: usize,
) -> Vec<String> {
    let total = format_gb(total_size(candidates));

    let mut header = String::from("🎬 PLEX CLEANUP SUMMARY\n\n");
    if let Some(days) = days_filter {
        header.push_str(&format!("📅 Filter: not watched in last {days} days\n"));
    }
    header.push_str(&format!("🎥 Total movies: {}\n", candidates.len()));
    header.push_str(&format!("💾 Total size: {total}\n"));
    header.push_str(&format!("{RULE}\n\n"));

    let footer = format!("{RULE}\nTOTAL: {} movies, {total}", candidates.len());

    let mut chunker = ReportChunker::new(header, footer, max_bytes);
    for (idx, candidate) in candidates.iter().enumerate() {
        let record = format!(
            "{}. {} ({})\n   👁 Views: {} | 📦 {} | 📅 {}\n\n",
            idx + 1,
            truncate_with_ellipsis(&candidate.title, TITLE_WIDTH),
            year_label(candidate),
            candidate.view_count,
            format_mb(candidate.size_bytes),
            last_viewed_label(candidate),
        );
        chunker.push(&record);
    }
    chunker.finish()
}

pub fn preview_hint() -> &'static str {
    "💡 What would you like to do?\n\n\
     • /delete all — delete every listed movie\n\
     • /delete 1,5,10 — delete specific movies by number\n\
     • /select — pick movies interactively"
}

/// One page of the interactive selection view.
pub fn selection_page(session: &Session) -> String {
    let selection = &session.selection;
    let (start, end) = selection.page_bounds();

    let mut out = format!(
        "🎬 Select movies to delete\nPage {}/{} | Selected: {}/{}\n\n",
        selection.page() + 1,
        selection.total_pages(),
        selection.len(),
        selection.total(),
    );

    for idx in start..end {
        let candidate = &session.candidates[idx];
        let checkbox = if selection.contains(idx) { "✅" } else { "⬜" };
        out.push_str(&format!(
            "{checkbox} {}. {} ({})\n",
            idx + 1,
            truncate_with_ellipsis(&candidate.title, 30),
            format_gb(candidate.size_bytes),
        ));
    }

    out.push_str(
        "\n/toggle N — flip item N | /next /prev — page\n\
         /all /none — select or clear everything\n\
         /done — confirm selection | /cancel — abort",
    );
    out
}

/// The arming prompt: what is about to be deleted and the two accepted
/// replies.
pub fn confirmation_prompt(pending: &[Candidate]) -> String {
    let mut out = String::from("⚠️ DELETION CONFIRMATION REQUIRED\n\n");
    out.push_str(&format!(
        "🎥 {} movies\n💾 {}\n\n",
        pending.len(),
        format_gb(total_size(pending)),
    ));

    for candidate in pending.iter().take(5) {
        out.push_str(&format!(
            "• {} ({}) - {}\n",
            truncate_with_ellipsis(&candidate.title, 30),
            year_label(candidate),
            format_mb(candidate.size_bytes),
        ));
    }
    if pending.len() > 5 {
        out.push_str(&format!("... and {} more\n", pending.len() - 5));
    }

    out.push_str(&format!(
        "\nTo confirm, reply with: {CONFIRM_TOKEN}\nTo cancel, reply with: {CANCEL_TOKEN}"
    ));
    out
}

pub fn reprompt() -> String {
    format!("⚠️ Please reply with either:\n{CONFIRM_TOKEN} or {CANCEL_TOKEN}")
}

pub fn deletion_started(count: usize) -> String {
    format!("🗑 Starting deletion of {count} movies...\nThis may take a few minutes.")
}

pub fn progress_line(processed: usize, total: usize) -> String {
    format!("⏳ Progress: {processed}/{total} movies processed...")
}

/// Final batch summary.
pub fn summary_message(summary: &DeletionSummary) -> String {
    let mut out = String::from("✅ DELETION COMPLETED\n\n");
    out.push_str(&format!("✓ Successfully deleted: {} movies\n", summary.succeeded));
    out.push_str(&format!("💾 Space freed: {}\n", format_gb(summary.freed_bytes)));
    if summary.failed > 0 {
        out.push_str(&format!("❌ Failed: {} movies\n", summary.failed));
        for outcome in summary.outcomes.iter().filter(|o| !o.success) {
            out.push_str(&format!(
                "   • {}: {}\n",
                truncate_with_ellipsis(&outcome.title, 30),
                outcome.error.as_deref().unwrap_or("unknown error"),
            ));
        }
    }
    out
}

pub fn help_text() -> &'static str {
    "🎬 Plex Cleanup Bot\n\n\
     Control your Plex media cleanup remotely!\n\n\
     Available commands:\n\
     /preview - Show movies that would be deleted\n\
     /select - Pick movies page by page\n\
     /delete - Delete movies (numbers, ranges, or 'all')\n\
     /space - Analyze media storage\n\
     /status - Show current configuration\n\
     /cancel - Abort a pending deletion\n\
     /help - Show this help message"
}

pub fn status_text(server: &str, max_views: u64, days: Option<u32>) -> String {
    let days_label = days.map_or_else(|| "Disabled".to_string(), |d| format!("{d} days"));
    format!(
        "⚙️ Current configuration\n\n🖥 Server: {server}\n👁 Max views: {max_views}\n📅 Time filter: {days_label}"
    )
}
