/// Raw tool output inputs
///
/// Each database is passed on the command line as `DIR=PATH`, where `PATH`
/// holds whatever the external tool printed for that migration directory.
use log::{debug, warn};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    /// Migration directory name as shown in reports
    pub dir: String,
    /// File with the raw tool output
    pub path: PathBuf,
}

/// Parse `DIR=PATH`
pub fn parse_input_spec(s: &str) -> Result<InputSpec, String> {
    match s.split_once('=') {
        Some((dir, path)) if !dir.is_empty() && !path.is_empty() => {
            Ok(InputSpec { dir: dir.to_string(), path: PathBuf::from(path) })
        }
        _ => Err(format!("expected DIR=PATH, got '{}'", s)),
    }
}

/// Read the raw output for one database.
///
/// The error string is meant to be fed to a model's `from_error`, the same
/// way a failed tool invocation would be.
pub fn read_raw_output(spec: &InputSpec) -> Result<String, String> {
    debug!("Reading {} output from {:?}", spec.dir, spec.path);
    fs::read_to_string(&spec.path).map_err(|e| {
        warn!("Could not read output for {}: {}", spec.dir, e);
        format!("failed to read {}: {}", spec.path.display(), e)
    })
}

/// Directory names in command-line order
pub fn directory_names(specs: &[InputSpec]) -> Vec<String> {
    specs.iter().map(|s| s.dir.clone()).collect()
}
