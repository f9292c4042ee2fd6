//! Size-based log file rotation.
//!
//! # Responsibilities
//! - Roll the active file once a write would push it past the size limit
//! - Name backups with a local-time stamp, newest-first sortable
//! - Gzip rotated backups when configured
//! - Prune backups beyond the retention count or older than the age limit
//!
//! # Design Decisions
//! - Rotation happens inline on the writing thread; the facility's sink
//!   mutex already serializes writers
//! - A single write larger than the size limit goes through untouched
//!   rather than failing

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use flate2::write::GzEncoder;
use flate2::Compression;

/// Applied when the configured maximum size is zero.
const DEFAULT_MAX_SIZE_MB: u64 = 100;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Local-time stamp embedded in backup file names,
/// e.g. `mesh-2026-08-24T10-30-00.123.log`.
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// An append-only writer over the active log file that rotates it in
/// place once it reaches the configured size.
pub struct RollingWriter {
    path: PathBuf,
    /// File name stem of the active file, without extension.
    stem: String,
    /// Extension of the active file including the dot, or empty.
    ext: String,
    max_bytes: u64,
    max_backups: usize,
    max_age_days: u32,
    compress: bool,
    file: File,
    written: u64,
}

impl RollingWriter {
    /// Open (or create) the active file at `path` for appending.
    ///
    /// `max_size_mb == 0` selects the 100 MB default; zero
    /// `max_backups` / `max_age_days` disable the respective pruning.
    pub fn open(
        path: &Path,
        max_size_mb: u64,
        max_backups: usize,
        max_age_days: u32,
        compress: bool,
    ) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let written = file.metadata()?.len();

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let (stem, ext) = match file_name.rfind('.') {
            Some(idx) if idx > 0 => (file_name[..idx].to_string(), file_name[idx..].to_string()),
            _ => (file_name, String::new()),
        };

        let max_size_mb = if max_size_mb == 0 {
            DEFAULT_MAX_SIZE_MB
        } else {
            max_size_mb
        };

        Ok(Self {
            path: path.to_path_buf(),
            stem,
            ext,
            max_bytes: max_size_mb * BYTES_PER_MB,
            max_backups,
            max_age_days,
            compress,
            file,
            written,
        })
    }

    fn backup_path(&self) -> PathBuf {
        let stamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        self.path
            .with_file_name(format!("{}-{}{}", self.stem, stamp, self.ext))
    }

    /// Move the active file aside and start a fresh one.
    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;

        let backup = self.backup_path();
        fs::rename(&self.path, &backup)?;
        if self.compress {
            compress_file(&backup)?;
        }

        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;

        self.prune()
    }

    /// Extract the timestamp from a backup file name, if it is one of
    /// ours.
    fn backup_timestamp(&self, name: &str) -> Option<NaiveDateTime> {
        let rest = name.strip_prefix(&self.stem)?.strip_prefix('-')?;
        let rest = rest.strip_suffix(".gz").unwrap_or(rest);
        let stamp = if self.ext.is_empty() {
            rest
        } else {
            rest.strip_suffix(&self.ext)?
        };
        NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT).ok()
    }

    /// Delete backups beyond the retention count and past the age limit.
    fn prune(&self) -> io::Result<()> {
        if self.max_backups == 0 && self.max_age_days == 0 {
            return Ok(());
        }

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut backups: Vec<(NaiveDateTime, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stamp) = self.backup_timestamp(name) {
                backups.push((stamp, entry.path()));
            }
        }
        // Newest first.
        backups.sort_by(|a, b| b.0.cmp(&a.0));

        let cutoff = (self.max_age_days > 0)
            .then(|| Local::now().naive_local() - chrono::Duration::days(self.max_age_days as i64));

        for (idx, (stamp, path)) in backups.iter().enumerate() {
            let over_count = self.max_backups > 0 && idx >= self.max_backups;
            let over_age = cutoff.is_some_and(|c| *stamp < c);
            if over_count || over_age {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

impl Write for RollingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.written > 0 && self.written + buf.len() as u64 > self.max_bytes {
            self.rotate()?;
        }
        let n = self.file.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Replace `path` with a gzipped `path.gz`.
fn compress_file(path: &Path) -> io::Result<()> {
    let mut source = File::open(path)?;
    let mut contents = Vec::new();
    source.read_to_end(&mut contents)?;

    let gz_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".gz");
        PathBuf::from(name)
    };
    let mut encoder = GzEncoder::new(File::create(&gz_path)?, Compression::default());
    encoder.write_all(&contents)?;
    encoder.finish()?;

    fs::remove_file(path)
}
