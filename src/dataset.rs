//! Line-oriented boundary dataset parsing.
//!
//! A dataset is newline-delimited JSON: one independent record per line,
//! never a single JSON array. Each record names a region and carries its
//! border as `[x, y]` coordinate pairs:
//!
//! ```text
//! {"state": "Square", "border": [[0.0, 0.0], [0.0, 4.0], [4.0, 4.0], [4.0, 0.0], [0.0, 0.0]]}
//! ```
//!
//! The loader is all-or-nothing: the first unreadable or malformed line
//! aborts the load, so a half-read dataset can never reach the index.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// One dataset record: a region name and its border ring.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionRecord {
    /// Region name, e.g. a U.S. state.
    pub state: String,
    /// Border ring as `[x, y]` pairs, expected closed and clockwise.
    pub border: Vec<[f64; 2]>,
}

/// Errors raised while reading a boundary dataset.
#[derive(Debug, Error)]
pub enum DataError {
    /// The dataset could not be opened or read.
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// A line is not a valid region record (missing field, non-numeric
    /// coordinate, not a JSON object).
    #[error("malformed record on line {line}: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse dataset records from a reader, one JSON record per line.
///
/// Records come back in input order. Line numbers in errors are 1-based.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<RegionRecord>, DataError> {
    let mut records = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let record = serde_json::from_str(&line).map_err(|source| DataError::Malformed {
            line: number + 1,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Read dataset records from a file.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<RegionRecord>, DataError> {
    let file = File::open(path)?;
    read_records(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_records_in_input_order() {
        let input = concat!(
            r#"{"state": "A", "border": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]}"#,
            "\n",
            r#"{"state": "B", "border": [[2.0, 2.0], [2.0, 3.0], [3.0, 3.0], [3.0, 2.0], [2.0, 2.0]]}"#,
            "\n",
        );

        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "A");
        assert_eq!(records[1].state, "B");
        assert_eq!(records[0].border[1], [0.0, 1.0]);
    }

    #[test]
    fn integer_coordinates_parse_as_floats() {
        let input = r#"{"state": "A", "border": [[0, 0], [0, 4], [4, 4], [4, 0], [0, 0]]}"#;

        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records[0].border[1], [0.0, 4.0]);
    }

    #[test]
    fn missing_border_field_is_malformed() {
        let input = r#"{"state": "NoBorder"}"#;

        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Malformed { line: 1, .. }));
    }

    #[test]
    fn error_reports_the_offending_line_and_drops_all_records() {
        let input = concat!(
            r#"{"state": "A", "border": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]}"#,
            "\n",
            r#"{"state": "B"}"#,
            "\n",
            r#"{"state": "C", "border": [[2.0, 2.0], [2.0, 3.0], [3.0, 3.0], [3.0, 2.0], [2.0, 2.0]]}"#,
            "\n",
        );

        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Malformed { line: 2, .. }));
    }

    #[test]
    fn non_numeric_coordinate_is_malformed() {
        let input = r#"{"state": "A", "border": [["x", 0.0]]}"#;

        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Malformed { line: 1, .. }));
    }

    #[test]
    fn coordinate_pairs_must_have_exactly_two_elements() {
        let short = r#"{"state": "A", "border": [[1.0]]}"#;
        assert!(read_records(short.as_bytes()).is_err());

        let long = r#"{"state": "A", "border": [[1.0, 2.0, 3.0]]}"#;
        assert!(read_records(long.as_bytes()).is_err());
    }

    #[test]
    fn blank_interior_line_is_malformed() {
        let input = concat!(
            r#"{"state": "A", "border": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]}"#,
            "\n",
            "\n",
            r#"{"state": "B", "border": [[2.0, 2.0], [2.0, 3.0], [3.0, 3.0], [3.0, 2.0], [2.0, 2.0]]}"#,
            "\n",
        );

        let err = read_records(input.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Malformed { line: 2, .. }));
    }

    #[test]
    fn trailing_newline_is_not_a_record() {
        let input = concat!(r#"{"state": "A", "border": []}"#, "\n");

        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn empty_input_yields_no_records() {
        let records = read_records("".as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let input = r#"{"state": "A", "border": [], "capital": "Atlanta"}"#;

        let records = read_records(input.as_bytes()).unwrap();
        assert_eq!(records[0].state, "A");
    }

    #[test]
    fn load_records_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"state": "A", "border": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]}}"#
        )
        .unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].state, "A");
    }

    #[test]
    fn load_records_surfaces_io_errors() {
        let err = load_records("/definitely/not/a/dataset.json").unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
