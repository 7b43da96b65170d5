//! Report segmentation for size-limited transports.
//!
//! Two layers: [`ReportChunker`] assembles record-oriented reports without
//! ever splitting a record across two messages, and [`split_message`] is
//! the coarse fallback for arbitrary prose.

/// Marker that opens every follow-up chunk of a multi-chunk report.
pub const CONTINUED_MARKER: &str = "📋 CONTINUED...\n\n";

/// Builds transport-sized message bodies from a header, a stream of
/// records, and a footer.
///
/// A record is appended whole or not at all: if it would push the current
/// chunk past the byte budget, the chunk is closed and a new one opens
/// with [`CONTINUED_MARKER`]. The marker counts against the budget, so it
/// is dropped for a continuation chunk whose record leaves no room for
/// it. The footer lands on the final chunk when it fits, otherwise it
/// becomes its own trailing chunk.
pub struct ReportChunker {
    max_bytes: usize,
    footer: String,
    chunks: Vec<String>,
    current: String,
}

impl ReportChunker {
    pub fn new(header: impl Into<String>, footer: impl Into<String>, max_bytes: usize) -> Self {
        Self {
            max_bytes,
            footer: footer.into(),
            chunks: Vec::new(),
            current: header.into(),
        }
    }

    pub fn push(&mut self, record: &str) {
        if !self.current.is_empty() && self.current.len() + record.len() > self.max_bytes {
            self.chunks.push(std::mem::take(&mut self.current));
            if CONTINUED_MARKER.len() + record.len() <= self.max_bytes {
                self.current.push_str(CONTINUED_MARKER);
            }
        }
        self.current.push_str(record);
    }

    pub fn finish(mut self) -> Vec<String> {
        if self.footer.is_empty() {
            if !self.current.is_empty() {
                self.chunks.push(self.current);
            }
            return self.chunks;
        }

        if self.current.len() + self.footer.len() > self.max_bytes {
            if !self.current.is_empty() {
                self.chunks.push(self.current);
            }
            self.chunks.push(self.footer);
        } else {
            self.current.push_str(&self.footer);
            self.chunks.push(self.current);
        }
        self.chunks
    }
}

/// Split arbitrary text to fit `max_chars`, preferring paragraph breaks,
/// then line breaks, then a hard character split.
#[must_use]
pub fn split_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() || max_chars == 0 {
        return Vec::new();
    }
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for piece in split_pieces(text, max_chars) {
        let piece_len = piece.chars().count();
        if current_len + piece_len > max_chars && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(&piece);
        current_len += piece_len;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Break text into pieces no longer than `max_chars`, keeping delimiters
/// attached to the piece they close.
fn split_pieces(text: &str, max_chars: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    for paragraph in split_keep_delimiter(text, "\n\n") {
        if paragraph.chars().count() <= max_chars {
            pieces.push(paragraph);
            continue;
        }
        for line in split_keep_delimiter(&paragraph, "\n") {
            if line.chars().count() <= max_chars {
                pieces.push(line);
            } else {
                pieces.extend(hard_split(&line, max_chars));
            }
        }
    }
    pieces
}

fn split_keep_delimiter(text: &str, delimiter: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;
    while let Some(relative) = text[start..].find(delimiter) {
        let end = start + relative + delimiter.len();
        parts.push(text[start..end].to_string());
        start = end;
    }
    if start < text.len() {
        parts.push(text[start..].to_string());
    }
    parts
}

fn hard_split(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for ch in text.chars() {
        if current_len == max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push(ch);
        current_len += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
