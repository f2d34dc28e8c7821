//! Discovery and ordering of DDL script files.
//!
//! Scripts follow the `001-users.sql` naming convention: the digits before
//! the first `-` give the order in which the files are applied.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// A DDL script file with the ordering key parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdlFile {
    /// The filename as it appears on disk.
    pub name: String,
    /// The ordering key parsed from the numeric prefix.
    pub number: u32,
}

impl DdlFile {
    /// Parse a filename of the form `<number>-<description>`.
    ///
    /// Fails if the name has no `-` or the prefix before the first `-` is
    /// not a base-10 integer.
    pub fn parse(name: &str) -> Result<Self> {
        let Some(idx) = name.find('-') else {
            return Err(Error::InvalidFilename(name.to_string()));
        };

        let number = name[..idx]
            .parse()
            .map_err(|_| Error::InvalidFilename(name.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            number,
        })
    }
}

impl fmt::Display for DdlFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.number)
    }
}

/// Read the DDL files in `dir`, sorted ascending by their numeric prefix.
///
/// Subdirectories are skipped; every remaining entry must parse, and the
/// first malformed name fails the whole listing. Files with equal numbers
/// keep lexical filename order: entries are pre-sorted by name and the
/// by-number sort is stable.
pub fn read_ddl_files(dir: &Path) -> Result<Vec<DdlFile>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::DirectoryRead {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut entries: Vec<_> = entries.filter_map(std::result::Result::ok).collect();
    entries.sort_by_key(fs::DirEntry::file_name);

    let mut files = Vec::new();
    for entry in entries {
        let is_dir = entry
            .file_type()
            .map_err(|source| Error::DirectoryRead {
                dir: dir.to_path_buf(),
                source,
            })?
            .is_dir();
        if is_dir {
            continue;
        }

        let file = DdlFile::parse(&entry.file_name().to_string_lossy())?;
        tracing::debug!(file = %file, "found DDL file");
        files.push(file);
    }

    if files.is_empty() {
        return Err(Error::EmptyDirectory(dir.to_path_buf()));
    }

    files.sort_by_key(|f| f.number);

    Ok(files)
}
