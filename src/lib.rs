//! # IFC Tabulator
//!
//! Batch converter that flattens IFC element properties into tabular form.
//!
//! ## Features
//!
//! - Parse IFC files (IFC2x3 and IFC4 schemas)
//! - Flatten each element's property sets into one row per element
//! - Export one CSV per input file, mirroring the input directory tree
//! - Consolidate all per-file tables into one schema-unified table
//! - Validate CCI multi-level identifiers and highlight mismatches in xlsx
//!
//! ## Example
//!
//! ```no_run
//! use ifc_tabulator::parser::parse_ifc_elements;
//!
//! let elements = parse_ifc_elements("model.ifc").expect("Failed to parse");
//! println!("Elements: {}", elements.len());
//! ```

pub mod error;
pub mod export;
pub mod extract;
pub mod model;
pub mod parser;
pub mod pipeline;
