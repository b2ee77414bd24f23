//! # playlist-rs
//! Line-level rewriting, stripping and merging of m3u playlists.
//!
//! Nothing here parses a playlist into medias: every operation scans lines and
//! leaves anything it does not recognise byte-for-byte intact.
//!
//! # Example
//! ```rust
//! use playlist_rs::{RewriteRule, RuleSet, merge, transform};
//!
//! let rules = RuleSet::group_title(vec![RewriteRule::exact("一起看", "douyu")]);
//! let douyu = transform(
//!     "#EXTM3U\n#EXTINF:-1 group-title=\"一起看\",Ch1\nhttp://x/1",
//!     &rules,
//! );
//!
//! let mut playlist = merge([&douyu]);
//! playlist.append("#EXTINF:-1,Extra\nhttp://x/extra");
//! print!("{}", playlist);
//! ```

mod append;
mod builder;
pub mod format;
mod merge;
mod rewrite;
mod strip;
pub use format::{Playlist, SourceDocument};
pub use merge::*;
pub use rewrite::*;
pub use strip::*;
