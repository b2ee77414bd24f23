/// The merged output document, written one line per record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Playlist {
    pub lines: Vec<String>,
}

impl Playlist {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last_line(&self) -> Option<&str> {
        self.lines.last().map(|x| x.as_str())
    }
}
