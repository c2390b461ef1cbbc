// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Storage tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// Pages and documents exactly as fetched.
    Raw,
    /// Parsed, validated tables.
    Stage,
    /// Downstream datasets. Nothing in this workspace writes here.
    Analytics,
}

impl Bucket {
    /// Every tier, in pipeline order.
    pub const ALL: [Self; 3] = [Self::Raw, Self::Stage, Self::Analytics];

    /// Directory name of the tier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::Stage => "stage",
            Self::Analytics => "analytics",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Timestamp suffix appended to a filename stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// `_YYYYMMDD`
    Date,
    /// `_YYYYMMDD_HHMMSS`
    DateTime,
}

impl Version {
    /// `chrono` format string of the suffix.
    #[must_use]
    pub const fn format(self) -> &'static str {
        match self {
            Self::Date => "%Y%m%d",
            Self::DateTime => "%Y%m%d_%H%M%S",
        }
    }

    /// Renders the suffix for `at`, without the leading underscore.
    #[must_use]
    pub fn suffix(self, at: NaiveDateTime) -> String {
        at.format(self.format()).to_string()
    }
}

/// Returns whether `name` matches a pattern where `*` stands for any run of
/// characters and everything else is literal.
#[must_use]
pub fn matches_pattern(name: &str, pattern: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    let Some((first, rest)) = parts.split_first() else {
        return name.is_empty();
    };
    let Some((last, middle)) = rest.split_last() else {
        return name == *first;
    };
    let Some(mut remaining) = name.strip_prefix(first) else {
        return false;
    };
    for part in middle {
        match remaining.find(part) {
            Some(index) => remaining = &remaining[index + part.len()..],
            None => return false,
        }
    }
    remaining.ends_with(last)
}

/// A data tree rooted at one directory, addressed as
/// `{root}/{bucket}/{domain}/{relative}/{filename}`.
///
/// Every write goes to a sibling `.tmp` file that is renamed over the target,
/// so a failed write leaves any previous file untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    root: PathBuf,
    domain: String,
    run_datetime: NaiveDateTime,
}

impl Storage {
    /// Opens a data tree, stamping versioned filenames with the current
    /// local time.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, domain: impl Into<String>) -> Self {
        Self::at(root, domain, Local::now().naive_local())
    }

    /// Opens a data tree with a fixed run time for versioned filenames.
    #[must_use]
    pub fn at(
        root: impl Into<PathBuf>,
        domain: impl Into<String>,
        run_datetime: NaiveDateTime,
    ) -> Self {
        Self {
            root: root.into(),
            domain: domain.into(),
            run_datetime,
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the data-source domain.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the time used for versioned filenames.
    #[must_use]
    pub const fn run_datetime(&self) -> NaiveDateTime {
        self.run_datetime
    }

    /// Directory of `relative` within a bucket.
    #[must_use]
    pub fn dir(&self, bucket: Bucket, relative: &str) -> PathBuf {
        let base: PathBuf = self.root.join(bucket.as_str()).join(&self.domain);
        if relative.is_empty() {
            base
        } else {
            base.join(relative)
        }
    }

    /// Builds the path of a file within a bucket.
    ///
    /// # Arguments
    ///
    /// * `bucket` - The storage tier
    /// * `relative` - Path within the domain, e.g. a tournament path
    /// * `filename` - The file name, including extension
    /// * `version` - Optional run timestamp to append to the stem
    #[must_use]
    pub fn build_path(
        &self,
        bucket: Bucket,
        relative: &str,
        filename: &str,
        version: Option<Version>,
    ) -> PathBuf {
        let dir: PathBuf = self.dir(bucket, relative);
        let Some(version) = version else {
            return dir.join(filename);
        };
        let suffix: String = version.suffix(self.run_datetime);
        match filename.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => {
                dir.join(format!("{stem}_{suffix}.{extension}"))
            }
            _ => dir.join(format!("{filename}_{suffix}")),
        }
    }

    /// Path relative to the root, for log lines.
    fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    fn write_atomic<F>(&self, path: &Path, write: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut BufWriter<File>) -> Result<(), PersistenceError>,
    {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::io(parent, &e))?;
        }

        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp: PathBuf = PathBuf::from(temp_name);

        let result: Result<(), PersistenceError> = File::create(&temp)
            .map_err(|e| PersistenceError::io(&temp, &e))
            .and_then(|file| {
                let mut writer: BufWriter<File> = BufWriter::new(file);
                write(&mut writer)?;
                writer.flush().map_err(|e| PersistenceError::io(&temp, &e))
            })
            .and_then(|()| fs::rename(&temp, path).map_err(|e| PersistenceError::io(path, &e)));

        if result.is_err()
            && temp.exists()
            && let Err(err) = fs::remove_file(&temp)
        {
            warn!(
                path = %self.display_path(&temp).display(),
                error = %err,
                "Failed to remove temporary file"
            );
        }
        result
    }

    /// Writes text verbatim, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if the file cannot be written.
    pub fn save_text(&self, path: &Path, content: &str) -> Result<PathBuf, PersistenceError> {
        self.write_atomic(path, |writer| {
            writer
                .write_all(content.as_bytes())
                .map_err(|e| PersistenceError::io(path, &e))
        })?;
        info!(path = %self.display_path(path).display(), "Saved text");
        Ok(path.to_path_buf())
    }

    /// Reads a text file.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the file does not exist.
    pub fn read_text(&self, path: &Path) -> Result<String, PersistenceError> {
        let content: String =
            fs::read_to_string(path).map_err(|e| PersistenceError::io(path, &e))?;
        debug!(path = %self.display_path(path).display(), "Read text");
        Ok(content)
    }

    /// Writes a value as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized or written.
    pub fn save_json<T: Serialize + ?Sized>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<PathBuf, PersistenceError> {
        let content: String = serde_json::to_string_pretty(value)?;
        self.write_atomic(path, |writer| {
            writer
                .write_all(content.as_bytes())
                .map_err(|e| PersistenceError::io(path, &e))
        })?;
        info!(path = %self.display_path(path).display(), "Saved JSON");
        Ok(path.to_path_buf())
    }

    /// Reads a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or does not decode as `T`.
    pub fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, PersistenceError> {
        let content: String = self.read_text(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Writes rows as a CSV table with a header row.
    ///
    /// An empty slice produces an empty file.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TableError` if a row cannot be serialized.
    pub fn save_table<T: Serialize>(
        &self,
        path: &Path,
        rows: &[T],
    ) -> Result<PathBuf, PersistenceError> {
        self.write_atomic(path, |writer| {
            let mut table = csv::Writer::from_writer(writer);
            for row in rows {
                table
                    .serialize(row)
                    .map_err(|e| PersistenceError::table(path, &e))?;
            }
            table.flush().map_err(|e| PersistenceError::io(path, &e))
        })?;
        info!(
            path = %self.display_path(path).display(),
            rows = rows.len(),
            "Saved table"
        );
        Ok(path.to_path_buf())
    }

    /// Reads a CSV table written by [`Storage::save_table`].
    ///
    /// Optional columns missing from the file read as `None`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` for a missing file, or
    /// `PersistenceError::TableError` if a row does not decode as `T`.
    pub fn read_table<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>, PersistenceError> {
        let file: File = File::open(path).map_err(|e| PersistenceError::io(path, &e))?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let rows: Vec<T> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .map_err(|e| PersistenceError::table(path, &e))?;
        debug!(
            path = %self.display_path(path).display(),
            rows = rows.len(),
            "Read table"
        );
        Ok(rows)
    }

    /// Lists the regular files in `dir` whose name matches `pattern`, sorted
    /// ascending by name. A missing directory lists as empty.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if the directory cannot be read.
    pub fn list_files(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, PersistenceError> {
        let mut files: Vec<PathBuf> = Vec::new();
        if dir.is_dir() {
            collect_files(dir, pattern, false, &mut files)?;
        }
        files.sort();
        debug!(
            dir = %self.display_path(dir).display(),
            pattern,
            count = files.len(),
            "Listed files"
        );
        Ok(files)
    }

    /// Like [`Storage::list_files`] but descends into subdirectories.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if a directory cannot be read.
    pub fn find_files(&self, dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, PersistenceError> {
        let mut files: Vec<PathBuf> = Vec::new();
        if dir.is_dir() {
            collect_files(dir, pattern, true, &mut files)?;
        }
        files.sort();
        debug!(
            dir = %self.display_path(dir).display(),
            pattern,
            count = files.len(),
            "Found files"
        );
        Ok(files)
    }

    /// File stems of [`Storage::list_files`].
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Io` if the directory cannot be read.
    pub fn list_stems(&self, dir: &Path, pattern: &str) -> Result<BTreeSet<String>, PersistenceError> {
        Ok(self
            .list_files(dir, pattern)?
            .iter()
            .filter_map(|path| path.file_stem().and_then(OsStr::to_str))
            .map(str::to_string)
            .collect())
    }
}

fn collect_files(
    dir: &Path,
    pattern: &str,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), PersistenceError> {
    for entry in fs::read_dir(dir).map_err(|e| PersistenceError::io(dir, &e))? {
        let path: PathBuf = entry.map_err(|e| PersistenceError::io(dir, &e))?.path();
        if path.is_dir() {
            if recursive {
                collect_files(&path, pattern, true, files)?;
            }
        } else if path.is_file()
            && path
                .file_name()
                .and_then(OsStr::to_str)
                .is_some_and(|name| matches_pattern(name, pattern))
        {
            files.push(path);
        }
    }
    Ok(())
}
