use crate::error::SelectionError;
use std::collections::BTreeSet;

/// Items shown per selection page.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Prev,
    Next,
}

/// Per-session selection state: chosen candidate indices plus the
/// pagination cursor. Pure in-memory; every candidate-list replacement
/// resets it so selected indices always stay inside `[0, total)`.
#[derive(Debug, Default)]
pub struct Selection {
    selected: BTreeSet<usize>,
    page: usize,
    total: usize,
}

impl Selection {
    pub fn reset(&mut self, total: usize) {
        self.selected.clear();
        self.page = 0;
        self.total = total;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(PAGE_SIZE).max(1)
    }

    /// Index range of the current page, half-open.
    pub fn page_bounds(&self) -> (usize, usize) {
        let start = self.page * PAGE_SIZE;
        (start, (start + PAGE_SIZE).min(self.total))
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Ascending selected indices.
    pub fn indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Flip membership of one 0-based index. Returns the new membership.
    pub fn toggle(&mut self, index: usize) -> Result<bool, SelectionError> {
        if index >= self.total {
            return Err(SelectionError::IndexOutOfRange {
                index: index + 1,
                len: self.total,
            });
        }
        if self.selected.remove(&index) {
            Ok(false)
        } else {
            self.selected.insert(index);
            Ok(true)
        }
    }

    pub fn select_all(&mut self) {
        self.selected = (0..self.total).collect();
    }

    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection wholesale (textual expression path).
    pub fn set(&mut self, indices: BTreeSet<usize>) {
        debug_assert!(indices.iter().all(|&i| i < self.total));
        self.selected = indices;
    }

    /// Move the cursor one page, clamped; a no-op at either boundary.
    pub fn turn_page(&mut self, direction: PageDirection) {
        match direction {
            PageDirection::Prev => {
                self.page = self.page.saturating_sub(1);
            }
            PageDirection::Next => {
                if self.page + 1 < self.total_pages() {
                    self.page += 1;
                }
            }
        }
    }
}

/// Parse an operator selection expression into a deduplicated, ascending
/// set of 0-based indices.
///
/// Accepted forms: the literal `all` (case-insensitive), or a
/// comma-separated list of 1-based integers and inclusive ranges `a-b`,
/// e.g. `1,5,10` or `1-10,25,30-40`.
pub fn parse_selection_expression(
    expr: &str,
    total: usize,
) -> Result<BTreeSet<usize>, SelectionError> {
    let expr = expr.trim();
    if expr.eq_ignore_ascii_case("all") {
        return Ok((0..total).collect());
    }

    let mut indices = BTreeSet::new();
    for token in expr.split(',') {
        let token = token.trim();
        if let Some((start, end)) = token.split_once('-') {
            let start = parse_ordinal(start, total)?;
            let end = parse_ordinal(end, total)?;
            if start > end {
                return Err(SelectionError::InvalidSelection(format!(
                    "range start exceeds end: {token}"
                )));
            }
            indices.extend((start - 1)..end);
        } else {
            let n = parse_ordinal(token, total)?;
            indices.insert(n - 1);
        }
    }
    Ok(indices)
}

fn parse_ordinal(token: &str, total: usize) -> Result<usize, SelectionError> {
    let n: usize = token
        .trim()
        .parse()
        .map_err(|_| SelectionError::InvalidSelection(format!("not a number: {token:?}")))?;
    if n < 1 || n > total {
        return Err(SelectionError::InvalidSelection(format!(
            "number {n} out of range (1-{total})"
        )));
    }
    Ok(n)
}
