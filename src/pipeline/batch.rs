use crate::error::{ExportError, FileProcessError};
use crate::export::write_csv_table;
use crate::extract::{columns_for_rows, extract_row, PropertyFilter};
use crate::model::{Row, Table, CCI_COLUMNS, FIXED_COLUMNS};
use crate::parser::parse_ifc_elements;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Receiver for per-file liveness and failure events. The core does not
/// know how these are displayed.
pub trait ProgressSink {
    /// One file is about to be processed. `index` is 1-based.
    fn file_started(&mut self, index: usize, total: usize, name: &str);

    /// One file could not be processed; the batch continues.
    fn file_failed(&mut self, path: &Path, reason: &str);
}

/// A progress sink that discards every event.
#[derive(Debug, Default)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn file_started(&mut self, _index: usize, _total: usize, _name: &str) {}
    fn file_failed(&mut self, _path: &Path, _reason: &str) {}
}

#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of one batch run: the per-file tables in discovery order, the
/// property names observed across all of them, and the files that failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub tables: Vec<Table>,
    pub available_properties: BTreeSet<String>,
    pub failures: Vec<FileFailure>,
    pub total_files: usize,
}

/// Process every IFC file under `input_dir`, writing one CSV per file into
/// a mirrored directory tree under `output_dir`.
///
/// Discovery happens once up front, recursively by the `.ifc` suffix
/// (case-insensitive), sorted by path so runs are deterministic. A failing
/// file is reported through the sink and recorded in the outcome; it never
/// aborts the batch. Zero discovered files yield an empty outcome.
///
/// # Errors
///
/// Returns [`ExportError::FileCreate`] only when the output root itself
/// cannot be created.
pub fn process_directory(
    input_dir: &Path,
    output_dir: &Path,
    filter: &PropertyFilter,
    progress: &mut dyn ProgressSink,
) -> Result<BatchOutcome, ExportError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ExportError::FileCreate {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let files = discover_ifc_files(input_dir);
    let mut outcome = BatchOutcome {
        total_files: files.len(),
        ..BatchOutcome::default()
    };

    for (i, input_path) in files.iter().enumerate() {
        let name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        progress.file_started(i + 1, files.len(), &name);

        match process_file(input_path, input_dir, output_dir, filter) {
            Ok(table) => {
                for row in &table.rows {
                    collect_property_names(row, &mut outcome.available_properties);
                }
                outcome.tables.push(table);
            }
            Err(err) => {
                let reason = err.to_string();
                progress.file_failed(input_path, &reason);
                outcome.failures.push(FileFailure {
                    path: input_path.clone(),
                    reason,
                });
            }
        }
    }

    Ok(outcome)
}

/// All `.ifc` files under the root, fixed for the run. Sorted traversal so
/// file order (and therefore row order) is reproducible.
#[must_use]
pub fn discover_ifc_files(input_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(input_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ifc"))
        })
        .collect()
}

fn process_file(
    input_path: &Path,
    input_dir: &Path,
    output_dir: &Path,
    filter: &PropertyFilter,
) -> Result<Table, FileProcessError> {
    let elements = parse_ifc_elements(input_path)?;

    let rows: Vec<Row> = elements
        .iter()
        .map(|element| extract_row(element, filter))
        .collect();
    let columns = columns_for_rows(&rows, &CCI_COLUMNS);
    let table = Table::new(columns, rows);

    let output_path = mirrored_csv_path(input_path, input_dir, output_dir);
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::FileCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    write_csv_table(&table, &output_path)?;

    Ok(table)
}

/// Output path mirroring the input's position in the tree, with a `.csv`
/// extension.
fn mirrored_csv_path(input_path: &Path, input_dir: &Path, output_dir: &Path) -> PathBuf {
    let relative = input_path.strip_prefix(input_dir).unwrap_or(input_path);
    output_dir.join(relative).with_extension("csv")
}

fn collect_property_names(row: &Row, available: &mut BTreeSet<String>) {
    for name in row.keys() {
        if !FIXED_COLUMNS.contains(&name.as_str()) {
            available.insert(name.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WALL_FILE: &str = "\
ISO-10303-21;
HEADER;
FILE_SCHEMA(('IFC4'));
ENDSEC;
DATA;
#1=IFCWALL('wall-1',$,'Wall A',$,$,$,$,$);
#10=IFCPROPERTYSINGLEVALUE('Area',$,IFCREAL(12.5),$);
#11=IFCPROPERTYSET('ps-1',$,'Pset_WallCommon',$,(#10));
#12=IFCRELDEFINESBYPROPERTIES('rel-1',$,$,$,(#1),#11);
ENDSEC;
END-ISO-10303-21;
";

    struct Recording {
        started: Vec<(usize, usize, String)>,
        failed: Vec<String>,
    }

    impl ProgressSink for Recording {
        fn file_started(&mut self, index: usize, total: usize, name: &str) {
            self.started.push((index, total, name.to_string()));
        }
        fn file_failed(&mut self, path: &Path, _reason: &str) {
            self.failed.push(path.display().to_string());
        }
    }

    fn recording() -> Recording {
        Recording {
            started: Vec::new(),
            failed: Vec::new(),
        }
    }

    #[test]
    fn mirrors_directory_structure() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::create_dir(input.path().join("tower-a")).unwrap();
        std::fs::write(input.path().join("tower-a/model.ifc"), WALL_FILE).unwrap();

        let mut progress = recording();
        let outcome = process_directory(
            input.path(),
            output.path(),
            &PropertyFilter::retain_all(),
            &mut progress,
        )
        .unwrap();

        assert_eq!(outcome.total_files, 1);
        assert_eq!(outcome.tables.len(), 1);
        assert!(output.path().join("tower-a/model.csv").is_file());
        assert_eq!(progress.started, vec![(1, 1, "model.ifc".to_string())]);
    }

    #[test]
    fn reports_available_properties() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("model.ifc"), WALL_FILE).unwrap();

        let outcome = process_directory(
            input.path(),
            output.path(),
            &PropertyFilter::retain_all(),
            &mut NullProgress,
        )
        .unwrap();

        let props: Vec<&str> = outcome
            .available_properties
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(props, vec!["Area"]);
    }

    #[test]
    fn bad_file_is_skipped_and_batch_continues() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(input.path().join("a_broken.ifc"), "not a step file").unwrap();
        std::fs::write(input.path().join("b_good.ifc"), WALL_FILE).unwrap();

        let mut progress = recording();
        let outcome = process_directory(
            input.path(),
            output.path(),
            &PropertyFilter::retain_all(),
            &mut progress,
        )
        .unwrap();

        assert_eq!(outcome.total_files, 2);
        assert_eq!(outcome.tables.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].path.ends_with("a_broken.ifc"));
        assert_eq!(progress.failed.len(), 1);
    }

    #[test]
    fn empty_directory_yields_empty_outcome() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let outcome = process_directory(
            input.path(),
            output.path(),
            &PropertyFilter::retain_all(),
            &mut NullProgress,
        )
        .unwrap();

        assert_eq!(outcome.total_files, 0);
        assert!(outcome.tables.is_empty());
        assert!(outcome.failures.is_empty());
    }
}
