use super::policy::Candidate;
use crate::error::GateError;

/// Exact reply required to start a deletion batch. Case-sensitive.
pub const CONFIRM_TOKEN: &str = "CONFIRM DELETE";
/// Exact reply that discards the pending batch.
pub const CANCEL_TOKEN: &str = "CANCEL";

/// Two-phase commit guard in front of the deletion executor.
///
/// Arming freezes a snapshot of the selected candidates; later selection
/// mutations do not change what an armed gate will delete. While armed,
/// only the two exact tokens are accepted — anything else re-prompts.
#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<Vec<Candidate>>,
}

/// What the operator's reply means for an armed gate.
#[derive(Debug)]
pub enum GateDecision {
    /// Confirmation matched; the frozen snapshot is released for execution
    /// and the gate is back to idle.
    Proceed(Vec<Candidate>),
    /// Cancellation matched; snapshot discarded, gate idle.
    Cancelled,
    /// Ambiguous input; state unchanged, re-prompt the operator.
    Reprompt,
}

impl ConfirmationGate {
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&[Candidate]> {
        self.pending.as_deref()
    }

    /// Freeze a non-empty snapshot and start awaiting confirmation.
    pub fn arm(&mut self, snapshot: Vec<Candidate>) -> Result<(), GateError> {
        if snapshot.is_empty() {
            return Err(GateError::EmptySelection);
        }
        self.pending = Some(snapshot);
        Ok(())
    }

    /// Interpret one operator reply. Must only be called while armed.
    pub fn resolve(&mut self, input: &str) -> GateDecision {
        debug_assert!(self.is_armed());
        match input.trim() {
            CONFIRM_TOKEN => match self.pending.take() {
                Some(snapshot) => GateDecision::Proceed(snapshot),
                None => GateDecision::Reprompt,
            },
            CANCEL_TOKEN => {
                self.pending = None;
                GateDecision::Cancelled
            }
            _ => GateDecision::Reprompt,
        }
    }

    /// Drop any pending snapshot (cancel command, new preview, completed
    /// batch).
    pub fn disarm(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AssetHandle;

    fn candidate(key: &str) -> Candidate {
        Candidate {
            handle: AssetHandle(key.into()),
            title: key.to_uppercase(),
            year: None,
            view_count: 0,
            last_viewed_at: None,
            added_at: None,
            size_bytes: 10,
            paths: vec![],
        }
    }

    #[test]
    fn arming_empty_selection_is_rejected() {
        let mut gate = ConfirmationGate::default();
        assert!(matches!(gate.arm(vec![]), Err(GateError::EmptySelection)));
        assert!(!gate.is_armed());
    }

    #[test]
    fn confirm_releases_the_frozen_snapshot() {
        let mut gate = ConfirmationGate::default();
        gate.arm(vec![candidate("a"), candidate("b")]).unwrap();

        match gate.resolve("CONFIRM DELETE") {
            GateDecision::Proceed(snapshot) => assert_eq!(snapshot.len(), 2),
            other => panic!("expected proceed, got {other:?}"),
        }
        assert!(!gate.is_armed());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut gate = ConfirmationGate::default();
        gate.arm(vec![candidate("a")]).unwrap();

        assert!(matches!(gate.resolve("CANCEL"), GateDecision::Cancelled));
        assert!(!gate.is_armed());
    }

    #[test]
    fn ambiguous_input_reprompts_without_state_change() {
        let mut gate = ConfirmationGate::default();
        gate.arm(vec![candidate("a")]).unwrap();

        for input in ["confirm delete", "CONFIRM", "yes", "CONFIRM  DELETE"] {
            assert!(matches!(gate.resolve(input), GateDecision::Reprompt));
            assert!(gate.is_armed());
        }
    }

    #[test]
    fn confirmation_token_is_case_sensitive() {
        let mut gate = ConfirmationGate::default();
        gate.arm(vec![candidate("a")]).unwrap();
        assert!(matches!(gate.resolve("Confirm Delete"), GateDecision::Reprompt));
        assert!(gate.is_armed());
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let mut gate = ConfirmationGate::default();
        gate.arm(vec![candidate("a")]).unwrap();
        assert!(matches!(
            gate.resolve("  CONFIRM DELETE \n"),
            GateDecision::Proceed(_)
        ));
    }
}
