#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

pub mod catalog;
pub mod cleanup;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;
pub mod transport;
pub mod utils;

pub use catalog::{MediaCatalog, PlexCatalog};
pub use cleanup::{CleanupEngine, RetentionPolicy};
pub use commands::{Command, parse_command};
pub use config::Config;
pub use error::{Result, SweepError};
pub use transport::{Channel, TelegramChannel};
