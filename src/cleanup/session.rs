use super::gate::ConfirmationGate;
use super::policy::Candidate;
use super::selection::Selection;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Per-channel workflow state: the most recent candidate list, the
/// selection over it, and the confirmation gate.
///
/// Lives in process memory only; a restart mid-confirmation defaults to
/// safety (nothing pending).
#[derive(Debug, Default)]
pub struct Session {
    pub candidates: Vec<Candidate>,
    pub selection: Selection,
    pub gate: ConfirmationGate,
}

impl Session {
    /// Install a fresh preview. Replaces the candidate list and resets
    /// selection, pagination, and any armed confirmation.
    pub fn set_candidates(&mut self, candidates: Vec<Candidate>) {
        self.selection.reset(candidates.len());
        self.gate.disarm();
        self.candidates = candidates;
    }

    /// Clear everything, unconditionally. Runs after a completed or
    /// cancelled deletion regardless of per-item failures.
    pub fn clear(&mut self) {
        self.candidates.clear();
        self.selection.reset(0);
        self.gate.disarm();
    }

    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Candidates at the currently selected indices, in index order.
    pub fn selected_candidates(&self) -> Vec<Candidate> {
        self.selection
            .indices()
            .into_iter()
            .filter_map(|i| self.candidates.get(i).cloned())
            .collect()
    }
}

/// Map from channel id to its single owned session.
///
/// Each entry carries its own async mutex; holding that lock for the full
/// handling of one command (including the deletion loop) is what
/// serializes all state transitions within a channel while leaving
/// distinct channels fully independent.
#[derive(Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, Arc<tokio::sync::Mutex<Session>>>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self, channel_id: &str) -> Arc<tokio::sync::Mutex<Session>> {
        let mut sessions = self.sessions.lock().expect("session registry poisoned");
        sessions
            .entry(channel_id.to_string())
            .or_default()
            .clone()
    }
}
