use crate::format::{Playlist, SourceDocument, directives, is_marker};

/// Merges documents into one playlist. The first document is the primary one.
///
/// The result starts with the primary's own marker line (keeping its
/// attributes), or a bare `#EXTM3U` when the primary has none. Blank lines
/// and marker lines, each document's own header included, are dropped from
/// the bodies, so the marker only ever appears at the top.
pub fn merge<'a>(documents: impl IntoIterator<Item = &'a SourceDocument>) -> Playlist {
    let mut documents = documents.into_iter().peekable();

    let header = documents
        .peek()
        .and_then(|primary| primary.header.as_ref())
        .map(|x| x.to_string())
        .unwrap_or_else(|| directives::EXTM3U.to_owned());

    let mut lines = vec![header];
    for document in documents {
        lines.extend(
            document
                .lines
                .iter()
                .filter(|line| !line.trim().is_empty() && !is_marker(line))
                .cloned(),
        );
    }

    Playlist::new(lines)
}
