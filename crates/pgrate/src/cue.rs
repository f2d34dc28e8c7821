//! Paths and argument lists for the cue binary.
//!
//! Profiles are authored as CUE and exported to the JSON files the rest of
//! the tool reads. `cue vet` checks a profile against the schema, `cue fmt`
//! normalizes the sources, and `cue export` writes the JSON.

use std::path::PathBuf;

use crate::config::config_file_path;

/// Schema every profile is vetted against, relative to the project root.
pub const CUE_SCHEMA_PATH: &str = "./config/cue/schema.cue";

/// Input and output paths for running a profile through cue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CuePaths {
    /// CUE files fed to vet/fmt/export: the schema, then the profile.
    pub input: Vec<PathBuf>,
    /// JSON file written by export.
    pub output: PathBuf,
}

/// Resolve the cue input and output paths for a profile.
///
/// Paths are relative to the project root.
#[must_use]
pub fn cue_paths(profile: &str) -> CuePaths {
    CuePaths {
        input: vec![
            PathBuf::from(CUE_SCHEMA_PATH),
            PathBuf::from(format!("./config/cue/{profile}.cue")),
        ],
        output: config_file_path(profile),
    }
}

impl CuePaths {
    fn input_strings(&self) -> impl Iterator<Item = String> + '_ {
        self.input.iter().map(|p| p.display().to_string())
    }

    /// Arguments for `cue vet` over the schema and profile.
    #[must_use]
    pub fn vet_args(&self) -> Vec<String> {
        let mut args = vec!["vet".to_string()];
        args.extend(self.input_strings());
        args
    }

    /// Arguments for `cue fmt` over the schema and profile.
    #[must_use]
    pub fn fmt_args(&self) -> Vec<String> {
        let mut args = vec!["fmt".to_string()];
        args.extend(self.input_strings());
        args
    }

    /// Arguments for `cue export`, overwriting the profile's JSON output.
    #[must_use]
    pub fn export_args(&self) -> Vec<String> {
        let mut args = vec!["export".to_string()];
        args.extend(self.input_strings());
        args.extend([
            "--force".to_string(),
            "--out".to_string(),
            "json".to_string(),
            "--outfile".to_string(),
            self.output.display().to_string(),
        ]);
        args
    }
}
