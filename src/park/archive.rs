//! Flat CSV storage of visitor records, one `id,name,age,ticketType,visitDate`
//! line per visitor. No header and no quoting.

use crate::errors::{ArchiveError, LineError};
use crate::park::visitor::Visitor;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

#[derive(Debug)]
pub struct SkippedLine {
    pub line_no: usize,
    pub line: String,
    pub error: LineError,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub visitors: Vec<Visitor>,
    pub skipped: Vec<SkippedLine>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.visitors.len()
    }
}

fn io_error(path: &Path, cause: io::Error) -> ArchiveError {
    ArchiveError::Io {
        path: path.display().to_string(),
        cause,
    }
}

/// Writes into a temporary file beside `path` and moves it into place only
/// once every line is flushed, so a failed export never leaves a partial file.
pub fn write_visitors<'a, I>(path: &Path, visitors: I) -> Result<usize, ArchiveError>
where
    I: IntoIterator<Item = &'a Visitor>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let file = NamedTempFile::new_in(dir).map_err(|e| io_error(path, e))?;
    let mut writer = BufWriter::new(file);
    let mut written = 0;

    for visitor in visitors {
        writeln!(writer, "{}", visitor.to_csv_line()).map_err(|e| io_error(path, e))?;
        written += 1;
    }

    let file = writer.into_inner().map_err(|e| io_error(path, e.into_error()))?;
    file.persist(path).map_err(|e| io_error(path, e.error))?;

    Ok(written)
}

/// Reads the whole file before returning, so a failure halfway through yields
/// no visitors at all. Malformed lines are collected in `skipped`.
pub fn read_visitors(path: &Path) -> Result<ImportReport, ArchiveError> {
    if !path.exists() {
        return Err(ArchiveError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let mut report = ImportReport::default();

    for (index, bytes) in BufReader::new(file).split(b'\n').enumerate() {
        let bytes = bytes.map_err(|e| io_error(path, e))?;

        let line = match String::from_utf8(bytes) {
            Ok(line) => line,
            Err(error) => {
                report.skipped.push(SkippedLine {
                    line_no: index + 1,
                    line: String::from_utf8_lossy(error.as_bytes()).into_owned(),
                    error: LineError::Encoding,
                });
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match Visitor::from_csv_line(&line) {
            Ok(visitor) => report.visitors.push(visitor),
            Err(error) => report.skipped.push(SkippedLine {
                line_no: index + 1,
                line,
                error,
            }),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::park::person::Person;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn skips_bad_lines_and_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(
            &path,
            "V1,Ana,25,Single Day,2024-01-01\n\nV2,Bob,30,Single\nV3,Cid,notanumber,Single,2024-01-01\nV4,Dee,40,Annual,2024-02-02\n",
        )
        .unwrap();

        let report = read_visitors(&path).unwrap();

        assert_eq!(report.imported(), 2);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].line_no, 3);
        assert_eq!(report.skipped[0].error, LineError::FieldCount(4));
        assert_eq!(report.skipped[1].line_no, 4);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();

        match read_visitors(&dir.path().join("absent.csv")) {
            Err(ArchiveError::FileNotFound { .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn write_into_missing_directory_fails_cleanly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("history.csv");

        assert!(write_visitors(&path, &Vec::<Visitor>::new()).is_err());
    }

    #[test]
    fn undecodable_line_is_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let mut content = b"V1,Ana,25,Single Day,2024-01-01\n".to_vec();
        content.extend_from_slice(b"V2,\xff\xfe,30,Single,2024-01-01\n");
        content.extend_from_slice(b"V3,Cid,40,Annual,2024-02-02\r\n");
        fs::write(&path, content).unwrap();

        let report = read_visitors(&path).unwrap();

        let ids: Vec<_> = report.visitors.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["V1", "V3"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line_no, 2);
        assert_eq!(report.skipped[0].error, LineError::Encoding);
    }

    #[test]
    fn failed_write_leaves_no_stray_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::create_dir(&path).unwrap();

        let visitor = Visitor::new(Person::new("V1", "Ana", 25).unwrap(), "Single Day", "2024-01-01").unwrap();

        assert!(write_visitors(&path, vec![&visitor]).is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(path.is_dir());
    }

    #[test]
    fn rewrite_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        fs::write(&path, "stale\nstale\nstale\n").unwrap();

        let visitor = Visitor::new(Person::new("V1", "Ana", 25).unwrap(), "Single Day", "2024-01-01").unwrap();

        assert_eq!(write_visitors(&path, vec![&visitor]).unwrap(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "V1,Ana,25,Single Day,2024-01-01\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
