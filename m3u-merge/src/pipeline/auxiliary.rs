use std::{fs, path::Path};

use crate::errors::PipelineError;

/// Reads the extra entries to add to the merged playlist, trimmed.
pub fn load_auxiliary(path: impl AsRef<Path>) -> Result<String, PipelineError> {
    let path = path.as_ref();
    fs::read_to_string(path)
        .map(|x| x.trim().to_owned())
        .map_err(|error| PipelineError::MissingAuxiliaryFile {
            path: path.to_owned(),
            error,
        })
}
