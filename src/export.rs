//! CSV exporter.
//!
//! Messages are ordered newest first and written to a file named after the
//! newest message's local time (`YYYYMMDD_HHMMSS.csv`). The CSV is written to
//! a sibling `.tmp` file and renamed into place, so an interrupted export never
//! leaves a truncated file under the final name.
//!
//! CHANGELOG:
//! - 04/02/2026 - Report the final path on failure, CSV errors kept distinct
//! - 03/02/2026 - Write through a temp file and rename
//! - 02/02/2026 - Initial implementation

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, Result};
use crate::format::{from_interchange, local_time};
use crate::message::Message;

/// Header row: phone, time, content.
pub const CSV_HEADER: [&str; 3] = ["전화번호", "시간", "내용"];

const FILENAME_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Outcome of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exported {
    Written { path: PathBuf, count: usize },
    /// Nothing to export; no file was written.
    Empty,
}

/// Stable sort by numeric `date`, newest first.
///
/// Fails on the first message whose `date` is missing or not an integer.
pub fn sort_newest_first(messages: Vec<Message>) -> Result<Vec<Message>> {
    let mut keyed = messages
        .into_iter()
        .map(|msg| msg.timestamp_millis().map(|ts| (ts, msg)))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(keyed.into_iter().map(|(_, msg)| msg).collect())
}

/// `YYYYMMDD_HHMMSS.csv` for the newest message, or `default_filename`.
///
/// `sorted` must already be newest first.
pub fn derive_filename(sorted: &[Message], default_filename: &str) -> Result<String> {
    match sorted.first() {
        Some(newest) => {
            let time = local_time(newest.timestamp_millis()?)?;
            Ok(format!("{}.csv", time.format(FILENAME_FORMAT)))
        }
        None => Ok(default_filename.to_string()),
    }
}

/// Export messages to CSV in `out_dir`.
pub fn export(messages: Vec<Message>, default_filename: &str, out_dir: &Path) -> Result<Exported> {
    if messages.is_empty() {
        tracing::debug!("no messages to export");
        return Ok(Exported::Empty);
    }

    let sorted = sort_newest_first(messages)?;
    let path = out_dir.join(derive_filename(&sorted, default_filename)?);
    write_csv(&path, &sorted)?;

    tracing::info!(path = %path.display(), count = sorted.len(), "exported messages");
    Ok(Exported::Written {
        path,
        count: sorted.len(),
    })
}

/// Export a message set given in interchange (JSON) form.
pub fn export_interchange(text: &str, default_filename: &str, out_dir: &Path) -> Result<Exported> {
    export(from_interchange(text)?, default_filename, out_dir)
}

/// Write the CSV atomically: temp file first, then rename over `path`.
///
/// Failures report `path`, never the temp file, which is removed.
pub fn write_csv(path: &Path, messages: &[Message]) -> Result<()> {
    let tmp_path = temp_path(path);

    if let Err(e) = write_rows(&tmp_path, path, messages) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        write_error(path, source)
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_error(path: &Path, source: io::Error) -> ExportError {
    ExportError::WriteError {
        path: path.to_path_buf(),
        source,
    }
}

/// Filesystem failures inside the CSV writer are still write errors.
fn csv_error(path: &Path, err: csv::Error) -> ExportError {
    if !err.is_io_error() {
        return ExportError::Csv(err);
    }
    let source = match err.into_kind() {
        csv::ErrorKind::Io(source) => source,
        other => io::Error::new(io::ErrorKind::Other, format!("{:?}", other)),
    };
    write_error(path, source)
}

fn write_rows(tmp_path: &Path, path: &Path, messages: &[Message]) -> Result<()> {
    let file = File::create(tmp_path).map_err(|e| write_error(path, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| csv_error(path, e))?;
    for msg in messages {
        writer
            .write_record([
                msg.display_address().as_str(),
                msg.date.as_deref().unwrap_or(""),
                msg.body.as_deref().unwrap_or(""),
            ])
            .map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| write_error(path, e))?;
    writer
        .into_inner()
        .map_err(|e| write_error(path, e.into_error()))?
        .sync_all()
        .map_err(|e| write_error(path, e))
}
