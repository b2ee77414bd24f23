use std::{error::Error, fmt::Display, io, path::PathBuf};

use playlist_rs::PatternError;

/// Logs the error at `$level` and swallows it, for `.map_err(...).ok()` chains.
#[macro_export]
macro_rules! something_with_log {
    ($level:ident, $position:expr) => {
        |e| {
            log::$level!("{}: {}", $position, e);
        }
    };
}

#[macro_export]
macro_rules! warn_with_log {
    ($position:expr) => {{ $crate::something_with_log!(warn, $position) }};
}

#[macro_export]
macro_rules! error_with_log {
    ($position:expr) => {{ $crate::something_with_log!(error, $position) }};
}

#[derive(Debug)]
pub enum PipelineError {
    /// A single source could not be fetched
    FetchFailure { name: String, url: String },
    /// A source answered but nothing was left of it
    EmptySource { name: String, url: String },
    AllSourcesFailed,
    MissingAuxiliaryFile { path: PathBuf, error: io::Error },
    WriteFailure { path: PathBuf, error: io::Error },
    InvalidRules { name: String, error: PatternError },
}

impl PipelineError {
    /// Whether the run has to stop
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::FetchFailure { .. }
            | Self::EmptySource { .. }
            | Self::MissingAuxiliaryFile { .. } => false,
            Self::AllSourcesFailed | Self::WriteFailure { .. } | Self::InvalidRules { .. } => true,
        }
    }
}

impl Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchFailure { name, url } => {
                write!(f, "Source {} ({}) could not be fetched", name, url)
            }
            Self::EmptySource { name, url } => {
                write!(f, "Source {} ({}) has no content left", name, url)
            }
            Self::AllSourcesFailed => write!(f, "No content fetched from any source"),
            Self::MissingAuxiliaryFile { path, error } => {
                write!(f, "Auxiliary file {} unavailable: {}", path.display(), error)
            }
            Self::WriteFailure { path, error } => {
                write!(f, "Error writing to file {}: {}", path.display(), error)
            }
            Self::InvalidRules { name, error } => {
                write!(f, "Rules of source {} are invalid: {}", name, error)
            }
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingAuxiliaryFile { error, .. } | Self::WriteFailure { error, .. } => {
                Some(error)
            }
            Self::InvalidRules { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::PipelineError;

    #[test]
    fn test_fatal_kinds() {
        let missing = PipelineError::MissingAuxiliaryFile {
            path: "updata.txt".into(),
            error: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(!missing.is_fatal());
        assert!(missing.to_string().contains("updata.txt"));

        let failure = PipelineError::FetchFailure {
            name: "douyu".into(),
            url: "http://example.com/douyu.m3u".into(),
        };
        assert!(!failure.is_fatal());
        assert!(failure.to_string().contains("http://example.com/douyu.m3u"));

        let empty = PipelineError::EmptySource {
            name: "douyu".into(),
            url: "http://example.com/douyu.m3u".into(),
        };
        assert!(!empty.is_fatal());
        assert!(empty.to_string().contains("no content"));

        assert!(PipelineError::AllSourcesFailed.is_fatal());
        assert!(
            PipelineError::WriteFailure {
                path: "/out/iptv.m3u".into(),
                error: io::Error::from(io::ErrorKind::PermissionDenied),
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_macro_swallows_error() {
        let result: Result<u8, &str> = Err("boom");
        assert_eq!(result.map_err(crate::warn_with_log!("Testing")).ok(), None);
    }
}
