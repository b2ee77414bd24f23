use std::fmt::Display;

use crate::format::Playlist;

impl Display for Playlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines.iter() {
            writeln!(f, "{}", line)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::format::Playlist;

    #[test]
    fn test_every_line_terminated() {
        let playlist = Playlist::new(vec![
            "#EXTM3U".into(),
            "#EXTINF:-1,A".into(),
            "http://example.com/a".into(),
        ]);
        assert_eq!(
            playlist.to_string(),
            "#EXTM3U\n#EXTINF:-1,A\nhttp://example.com/a\n"
        );
    }

    #[test]
    fn test_embedded_newlines_written_verbatim() {
        let playlist = Playlist::new(vec!["#EXTM3U".into(), "a\nb".into()]);
        assert_eq!(playlist.to_string(), "#EXTM3U\na\nb\n");
    }

    #[test]
    fn test_empty_playlist() {
        assert_eq!(Playlist::default().to_string(), "");
    }
}
