//! Argument assembly for the psql client.

use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::ddl::read_ddl_files;
use crate::dsn::PostgresDsn;
use crate::Result;

/// Query run before any script to prove the connection works.
pub const CONNECT_CHECK_QUERY: &str = "select current_database(), current_user, version()";

/// Whether to apply the `up/` or the `down/` scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// The script subdirectory for this direction.
    #[must_use]
    pub fn subdir(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

/// Build the psql argument list for the scripts in one direction.
///
/// The flags are:
/// - `-w` never prompt for a password, this runs unattended
/// - `-d` the connection URI
/// - `-c` the connection check query, executed before any script
/// - `-f <file>` once per DDL file, in numeric order
///
/// The fixed flags always precede the `-f` pairs.
pub fn psql_args(direction: Direction, config: &Config) -> Result<Vec<String>> {
    let dir = format!("{}/{}", config.migration_scripts_dir, direction.subdir());

    let ddl_files = read_ddl_files(Path::new(&dir))?;

    let uri = PostgresDsn::from(&config.database).connection_uri()?;

    let mut args = vec![
        "-w".to_string(),
        "-d".to_string(),
        uri,
        "-c".to_string(),
        CONNECT_CHECK_QUERY.to_string(),
    ];

    for file in &ddl_files {
        args.push("-f".to_string());
        args.push(format!("{dir}/{}", file.name));
    }

    tracing::info!(dir = %dir, files = ddl_files.len(), "assembled psql arguments");

    Ok(args)
}
