//! htics command-line interface.
//!
//! Fetches the HackerTracker schedule for one conference from Firestore and
//! writes it out as an iCalendar document.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;

pub use cli::Cli;
pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use export::{export, write_calendar};
