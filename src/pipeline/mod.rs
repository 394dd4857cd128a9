pub mod batch;
pub mod consolidate;
pub mod validate;

pub use batch::{discover_ifc_files, process_directory, BatchOutcome, FileFailure, NullProgress, ProgressSink};
pub use consolidate::consolidate;
pub use validate::{validate, CellFlag, ValidationReport, REQUIRED_COLUMNS};
