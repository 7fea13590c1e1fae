// src/storage/csv.rs

//! Append-only CSV sink.
//!
//! Opened once per run. The header row is written exactly once before any
//! data row; every data row is flushed as soon as it is written, so a
//! mid-run crash loses at most the page currently in flight. Rows are
//! never rewritten.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::Profile;

/// Durable, append-only CSV writer for admitted profiles.
pub struct CsvSink {
    writer: BufWriter<File>,
    path: PathBuf,
    rows: usize,
}

impl CsvSink {
    /// Create the output file (truncating any previous run) and write the
    /// header row.
    ///
    /// Any failure here is an export failure: the run cannot guarantee
    /// durability without an open sink.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AppError::export(format!("create {}: {e}", parent.display())))?;
            }
        }

        let file = File::create(&path)
            .map_err(|e| AppError::export(format!("create {}: {e}", path.display())))?;
        let mut sink = Self {
            writer: BufWriter::new(file),
            path,
            rows: 0,
        };
        sink.write_row(&Profile::FIELDS)?;
        log::info!("CSV export started: {}", sink.path.display());
        Ok(sink)
    }

    /// Append one admitted profile and flush it to disk.
    pub fn write(&mut self, profile: &Profile) -> Result<()> {
        self.write_row(&profile.to_row())?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far (header excluded).
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    /// Path of the export file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush and close the sink.
    pub fn finish(mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| AppError::export(format!("flush {}: {e}", self.path.display())))?;
        log::info!(
            "CSV export completed: {} rows in {}",
            self.rows,
            self.path.display()
        );
        Ok(())
    }

    fn write_row(&mut self, fields: &[&str]) -> Result<()> {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(',');
            }
            push_field(&mut line, field);
        }
        line.push('\n');

        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| AppError::export(format!("write {}: {e}", self.path.display())))
    }
}

impl Drop for CsvSink {
    fn drop(&mut self) {
        // Backstop for abnormal exits; finish() reports errors properly.
        let _ = self.writer.flush();
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn push_field(line: &mut String, field: &str) {
    if needs_quotes(field) {
        line.push('"');
        line.push_str(&field.replace('"', "\"\""));
        line.push('"');
    } else {
        line.push_str(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, email: &str) -> Profile {
        Profile {
            name: name.to_string(),
            email: email.to_string(),
            profile_link: "https://example.com/p".to_string(),
            role_type: "UGC".to_string(),
        }
    }

    #[test]
    fn test_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&profile("Jane", "jane@x.com")).unwrap();
        sink.write(&profile("Bob", "bob@x.com")).unwrap();
        assert_eq!(sink.rows_written(), 2);
        sink.finish().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "name,email,profile_link,role_type");
        assert_eq!(lines[1], "Jane,jane@x.com,https://example.com/p,UGC");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&profile("Smith, Jane \"JJ\"", "jane@x.com")).unwrap();
        sink.finish().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Smith, Jane \"\"JJ\"\"\",jane@x.com"));
    }

    #[test]
    fn test_create_fails_on_unwritable_target() {
        // Target is an existing directory; the sink must refuse to open
        // rather than lose rows later.
        let dir = tempfile::tempdir().unwrap();
        let result = CsvSink::create(dir.path());
        assert!(matches!(result, Err(AppError::Export(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_write_failure_is_an_export_error() {
        // /dev/full accepts the open but fails every flushed write, which
        // is exactly the mid-run disk-failure shape.
        let result = CsvSink::create("/dev/full");
        assert!(matches!(result, Err(AppError::Export(_))));
    }

    #[test]
    fn test_rows_are_durable_before_finish() {
        // Every write is flushed, so the file is complete even while the
        // sink is still open.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let mut sink = CsvSink::create(&path).unwrap();
        sink.write(&profile("Jane", "jane@x.com")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        drop(sink);
    }
}
