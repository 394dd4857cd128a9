//! Error types for IFC Tabulator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing IFC files.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the IFC file from disk.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The STEP format is invalid or malformed.
    #[error("invalid STEP format: {message}")]
    InvalidStep { message: String },
}

/// Errors that can occur when writing a sink file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Failed to create the output file or its parent directory.
    #[error("failed to create '{path}': {source}")]
    FileCreate {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to write data to the file.
    #[error("failed to write data: {message}")]
    WriteError { message: String },

    /// Failed to serialize data to JSON.
    #[error("JSON serialization failed: {source}")]
    JsonSerialize {
        #[from]
        source: serde_json::Error,
    },

    /// Failed to write CSV data.
    #[error("CSV write failed: {source}")]
    CsvWrite {
        #[from]
        source: csv::Error,
    },

    /// Failed to write the xlsx workbook.
    #[error("xlsx write failed: {source}")]
    XlsxWrite {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },
}

/// Any failure while processing a single file of a batch. Recovered at the
/// batch level; the run continues with the next file.
#[derive(Debug, Error)]
pub enum FileProcessError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors that can occur during identifier validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    /// One or more required CCI columns are absent from the schema.
    /// Validation does not run partially.
    #[error("required columns not found in the sheet: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// Errors that can occur when loading the property filter list.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Failed to read the property list file.
    #[error("error reading properties file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
}
