//! Size-rotated append-only log file.
//!
//! Used both as the `tracing-subscriber` fmt writer and by the OTLP span
//! exporter. When the file grows past the size limit it is renamed to
//! `<name>.<unix-nanos>` and a fresh file is started; only the newest backups
//! are kept.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing_subscriber::fmt::MakeWriter;

const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 3;

pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    file: Mutex<Option<File>>,
}

impl FileWriter {
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut bytes = Vec::with_capacity(line.len() + 1);
        bytes.extend_from_slice(line.as_bytes());
        bytes.push(b'\n');
        self.append(&bytes)
    }

    fn append(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::other(format!("log file mutex poisoned: {e}")))?;

        self.rotate_if_full(&mut file)?;

        if file.is_none() {
            *file = Some(OpenOptions::new().create(true).append(true).open(&self.file_path)?);
        }
        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::other("log file unavailable"))?;

        handle.write_all(bytes)?;
        handle.flush()
    }

    fn rotate_if_full(&self, file: &mut Option<File>) -> io::Result<()> {
        let full = fs::metadata(&self.file_path).is_ok_and(|metadata| metadata.len() > self.max_bytes);
        if !full {
            return Ok(());
        }

        *file = None;
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_nanos();
        fs::rename(&self.file_path, backup_path(&self.file_path, nanos))?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> io::Result<()> {
        let Some(parent) = self.file_path.parent() else {
            return Ok(());
        };
        let prefix = format!("{}.", file_name(&self.file_path));

        let mut backups: Vec<PathBuf> = fs::read_dir(parent)?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Backup names embed their creation time, so name order is age order.
        backups.sort();
        backups.reverse();

        for stale in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn backup_path(path: &Path, nanos: u128) -> PathBuf {
    path.with_file_name(format!("{}.{nanos:020}", file_name(path)))
}

impl io::Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().starts_with("moviedeck.log."))
            .count()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedeck.log");
        let writer = FileWriter::new(path.clone());

        writer.write_line("first").unwrap();
        writer.write_line("second").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn rotates_and_keeps_newest_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedeck.log");
        let writer = FileWriter::with_limits(path.clone(), 16, 2);

        for i in 0..6 {
            writer.write_line(&format!("line number {i:08}")).unwrap();
        }

        assert_eq!(backups(dir.path()), 2);
        assert_eq!(fs::read_to_string(path).unwrap(), "line number 00000005\n");
    }

    #[test]
    fn make_writer_feeds_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moviedeck.log");
        let writer = FileWriter::new(path.clone());

        writer.make_writer().write_all(b"from fmt layer\n").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "from fmt layer\n");
    }
}
