pub mod engine;
pub mod executor;
pub mod gate;
pub mod policy;
pub mod report;
pub mod selection;
pub mod session;

pub use engine::CleanupEngine;
pub use executor::{DeletionOutcome, DeletionSummary};
pub use gate::{CANCEL_TOKEN, CONFIRM_TOKEN, ConfirmationGate, GateDecision};
pub use policy::{Candidate, RetentionPolicy};
pub use selection::{PageDirection, Selection, parse_selection_expression};
pub use session::{Session, SessionManager};
