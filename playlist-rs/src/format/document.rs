use smol_str::SmolStr;

/// One fetched playlist after rewriting, before it is merged with the others.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceDocument {
    /// First non-empty line of the original text, trimmed, if it was a marker
    pub header: Option<SmolStr>,
    /// Every line of the text, in order
    pub lines: Vec<String>,
}

impl SourceDocument {
    pub fn new(header: Option<SmolStr>, lines: Vec<String>) -> Self {
        Self { header, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|x| x.trim().is_empty())
    }
}
