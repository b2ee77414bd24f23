use crate::format::Playlist;

impl Playlist {
    /// Appends `text` as one trailing line, after a blank separator when the
    /// playlist does not already end with one. Empty text is ignored.
    pub fn append(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if text.is_empty() {
            return;
        }

        if self.last_line().is_some_and(|x| !x.trim().is_empty()) {
            self.lines.push(String::new());
        }
        self.lines.push(text.to_owned());
    }

    /// Inserts `text` right after the first line equal to `marker`, ignoring
    /// surrounding whitespace. Returns `false`, leaving the playlist untouched,
    /// when no such line exists.
    pub fn insert_after(&mut self, marker: impl AsRef<str>, text: impl AsRef<str>) -> bool {
        let marker = marker.as_ref().trim();
        let Some(position) = self.lines.iter().position(|x| x.trim() == marker) else {
            return false;
        };

        let text = text.as_ref();
        if !text.is_empty() {
            self.lines.insert(position + 1, text.to_owned());
        }
        true
    }
}
