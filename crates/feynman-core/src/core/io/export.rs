use super::ExportError;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// One evaluated diagram, as written to the amplitude table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmplitudeRecord {
    pub branch: String,
    pub operations: String,
    pub re: f64,
    pub im: f64,
}

/// Writes records as CSV with the header `branch,operations,re,im`.
pub fn write_amplitudes<W: Write>(writer: W, records: &[AmplitudeRecord]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_amplitudes_csv(path: &Path, records: &[AmplitudeRecord]) -> Result<(), ExportError> {
    let path_str = path.to_string_lossy().to_string();
    let file = File::create(path).map_err(|e| ExportError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    write_amplitudes(file, records).map_err(|e| ExportError::Csv {
        path: path_str,
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn records() -> Vec<AmplitudeRecord> {
        vec![
            AmplitudeRecord {
                branch: "branch 1.".to_string(),
                operations: "(0, 1) (0, 1, 2)".to_string(),
                re: 0.0,
                im: -0.5,
            },
            AmplitudeRecord {
                branch: "branch 2.".to_string(),
                operations: "(0, 3) (0, 1, 2)".to_string(),
                re: 1.25,
                im: 0.0,
            },
        ]
    }

    #[test]
    fn writes_header_and_rows() {
        let mut buffer = Vec::new();
        write_amplitudes(&mut buffer, &records()).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "branch,operations,re,im");
        assert_eq!(lines[1], "branch 1.,\"(0, 1) (0, 1, 2)\",0.0,-0.5");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn write_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("amplitudes.csv");
        write_amplitudes_csv(&path, &records()).unwrap();
        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("amplitudes.csv");
        assert!(matches!(
            write_amplitudes_csv(&path, &records()),
            Err(ExportError::Io { .. })
        ));
    }
}
