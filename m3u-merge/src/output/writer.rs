use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

use playlist_rs::Playlist;

use crate::errors::PipelineError;

/// Writes every line of `playlist` followed by `\n`, creating the parent
/// directory first when it does not exist yet.
pub fn write_playlist(path: impl AsRef<Path>, playlist: &Playlist) -> Result<(), PipelineError> {
    let path = path.as_ref();
    let failure = |error: io::Error| PipelineError::WriteFailure {
        path: path.to_owned(),
        error,
    };

    if let Some(parent) = path.parent().filter(|x| !x.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(failure)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(failure)?);
    write!(writer, "{}", playlist).map_err(failure)?;
    writer.flush().map_err(failure)?;

    Ok(())
}
