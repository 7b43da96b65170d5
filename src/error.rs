use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `mediasweep`.
///
/// Each subsystem defines its own error variant. Library callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum SweepError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Media catalog ────────────────────────────────────────────────────
    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    // ── Selection state ──────────────────────────────────────────────────
    #[error("selection: {0}")]
    Selection(#[from] SelectionError),

    // ── Confirmation gate ────────────────────────────────────────────────
    #[error("gate: {0}")]
    Gate(#[from] GateError),

    // ── Transport / Channel ──────────────────────────────────────────────
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    // ── Generic fallthrough (wraps anyhow for interop) ───────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Catalog errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The media server could not be reached at all. A preview that hits
    /// this aborts without touching session state.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("catalog request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode catalog response: {0}")]
    Decode(String),
}

// ─── Selection errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("index {index} out of range (1-{len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),
}

// ─── Confirmation gate errors ────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum GateError {
    #[error("nothing selected; select at least one item before confirming")]
    EmptySelection,
}

// ─── Transport errors ────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("channel {channel} connection failed: {message}")]
    Connection { channel: String, message: String },

    #[error("channel {channel} send failed: {message}")]
    Send { channel: String, message: String },
}

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, SweepError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_unavailable_displays_reason() {
        let err = SweepError::Catalog(CatalogError::Unavailable("connection refused".into()));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn index_out_of_range_displays_bounds() {
        let err = SweepError::Selection(SelectionError::IndexOutOfRange { index: 12, len: 5 });
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("1-5"));
    }

    #[test]
    fn empty_selection_displays_guidance() {
        let err = SweepError::Gate(GateError::EmptySelection);
        assert!(err.to_string().contains("select at least one"));
    }

    #[test]
    fn anyhow_interop() {
        let anyhow_err = anyhow::anyhow!("something went wrong");
        let sweep_err: SweepError = anyhow_err.into();
        assert!(sweep_err.to_string().contains("something went wrong"));
    }
}
