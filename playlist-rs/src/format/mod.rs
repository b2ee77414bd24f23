mod document;
mod playlist;
pub use document::*;
pub use playlist::*;

pub mod directives {
    pub const EXTM3U: &str = "#EXTM3U";
    pub const EXTINF: &str = "#EXTINF";
    pub const GROUP_TITLE: &str = "group-title";
}

/// Whether `line` is a playlist marker (`#EXTM3U`, with or without attributes)
pub fn is_marker(line: impl AsRef<str>) -> bool {
    line.as_ref().trim_start().starts_with(directives::EXTM3U)
}

/// Whether `line` is a media metadata record (`#EXTINF:...`)
pub fn is_metadata(line: impl AsRef<str>) -> bool {
    line.as_ref().trim_start().starts_with(directives::EXTINF)
}
