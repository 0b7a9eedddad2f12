//! Writing units to disk, and `--check`.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use kiln_emit::Artifact;

use crate::DriverError;

/// A unit whose file on disk is not what this run generates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Drift {
    Missing(String),
    Changed(String),
}

impl Drift {
    pub fn path(&self) -> &str {
        match self {
            Drift::Missing(path) | Drift::Changed(path) => path,
        }
    }
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::Missing(path) => write!(f, "missing: {path}"),
            Drift::Changed(path) => write!(f, "out of date: {path}"),
        }
    }
}

/// Where `artifact` lives below `root`.
pub fn artifact_file(root: &Path, artifact: &Artifact) -> PathBuf {
    artifact
        .path
        .split('/')
        .fold(root.to_path_buf(), |dir, part| dir.join(part))
}

/// Write every unit below `root` and return how many files changed.
///
/// A file that already holds the generated text is not rewritten, so its
/// timestamp only moves when its content does.
pub fn write_artifacts(root: &Path, artifacts: &[Artifact]) -> Result<usize, DriverError> {
    let mut written = 0;
    for artifact in artifacts {
        let file = artifact_file(root, artifact);
        if fs::read_to_string(&file).is_ok_and(|existing| existing == artifact.text) {
            continue;
        }
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| DriverError::io(parent, e))?;
        }
        fs::write(&file, &artifact.text).map_err(|e| DriverError::io(&file, e))?;
        tracing::debug!(path = %artifact.path, "unit written");
        written += 1;
    }
    Ok(written)
}

/// Compare every unit with its file below `root`.
pub fn check_artifacts(root: &Path, artifacts: &[Artifact]) -> Result<Vec<Drift>, DriverError> {
    let mut drift = Vec::new();
    for artifact in artifacts {
        let file = artifact_file(root, artifact);
        match fs::read_to_string(&file) {
            Ok(existing) if existing == artifact.text => {}
            Ok(_) => drift.push(Drift::Changed(artifact.path.clone())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                drift.push(Drift::Missing(artifact.path.clone()));
            }
            Err(e) => return Err(DriverError::io(file, e)),
        }
    }
    Ok(drift)
}
