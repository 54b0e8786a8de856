//! tally-core - UI-agnostic note model, settings, and export.

pub mod error;
pub mod export;
pub mod format;
pub mod history;
pub mod note;
pub mod notebook;
pub mod samples;
pub mod settings;

pub use error::{Result, TallyError};
pub use export::{ExportFormat, write_export};
pub use history::History;
pub use note::{Note, NoteId, calculation_count};
pub use notebook::Notebook;
pub use settings::Settings;

pub use tally_engine::engine::{CalculationResult, Calculator};
