use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use smol_str::SmolStr;

use crate::format::{SourceDocument, directives, is_marker, is_metadata};

pub use regex::Error as PatternError;

lazy_static! {
    static ref GROUP_TITLE_REGEX: Regex =
        attribute_regex(directives::GROUP_TITLE).expect("Regular expression error");
}

/// Matches `key="value"` when the key starts the line or follows whitespace,
/// so `group-title` does not match inside `tvg-group-title`.
fn attribute_regex(key: &str) -> Result<Regex, PatternError> {
    Regex::new(&format!(r#"(?:^|\s){}="([^"]*)""#, regex::escape(key)))
}

/// Rewrites an attribute value to `to`.
/// `from` is compared literally against the whole value; `None` matches any value.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRule {
    pub from: Option<SmolStr>,
    pub to: SmolStr,
}

impl RewriteRule {
    pub fn exact(from: impl Into<SmolStr>, to: impl Into<SmolStr>) -> Self {
        Self {
            from: Some(from.into()),
            to: to.into(),
        }
    }

    pub fn any(to: impl Into<SmolStr>) -> Self {
        Self {
            from: None,
            to: to.into(),
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        match &self.from {
            Some(from) => from == value,
            None => true,
        }
    }
}

/// Ordered rules bound to the attribute they rewrite.
#[derive(Debug, Clone)]
pub struct RuleSet {
    key: SmolStr,
    pattern: Regex,
    rules: Vec<RewriteRule>,
}

impl RuleSet {
    pub fn new(key: impl Into<SmolStr>, rules: Vec<RewriteRule>) -> Result<Self, PatternError> {
        let key = key.into();
        let pattern = attribute_regex(&key)?;
        Ok(Self {
            key,
            pattern,
            rules,
        })
    }

    /// Rules for the `group-title` attribute
    pub fn group_title(rules: Vec<RewriteRule>) -> Self {
        Self {
            key: directives::GROUP_TITLE.into(),
            pattern: GROUP_TITLE_REGEX.clone(),
            rules,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Runs `value` through every rule in order. Each matching rule replaces
    /// the current value, so a later rule sees what an earlier one produced.
    fn resolve<'a>(&'a self, value: &'a str) -> Option<&'a str> {
        let mut current = value;
        for rule in self.rules.iter() {
            if rule.matches(current) {
                current = rule.to.as_str();
            }
        }

        (current != value).then_some(current)
    }

    /// Rewrites the attribute values of a metadata line.
    /// Every byte outside the attribute values is kept as is.
    pub fn rewrite_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.rules.is_empty() || !is_metadata(line) {
            return Cow::Borrowed(line);
        }

        let mut result = String::new();
        let mut last = 0;
        for captures in self.pattern.captures_iter(line) {
            let Some(value) = captures.get(1) else {
                continue;
            };
            let Some(new_value) = self.resolve(value.as_str()) else {
                continue;
            };

            result.push_str(&line[last..value.start()]);
            result.push_str(new_value);
            last = value.end();
        }

        if last == 0 {
            return Cow::Borrowed(line);
        }

        result.push_str(&line[last..]);
        Cow::Owned(result)
    }
}

/// Splits `text` into lines and rewrites every metadata line with `rules`.
pub fn transform(text: impl AsRef<str>, rules: &RuleSet) -> SourceDocument {
    let mut header = None;
    let mut seen_content = false;
    let mut lines = Vec::new();

    for line in text.as_ref().lines() {
        let trimmed = line.trim();
        if !seen_content && !trimmed.is_empty() {
            seen_content = true;
            if is_marker(trimmed) {
                header = Some(SmolStr::new(trimmed));
            }
        }

        lines.push(rules.rewrite_line(line).into_owned());
    }

    SourceDocument::new(header, lines)
}

#[cfg(test)]
mod tests {
    use crate::{RewriteRule, RuleSet, transform};

    fn douyu_rules() -> RuleSet {
        RuleSet::group_title(vec![
            RewriteRule::exact("一起看", "douyu"),
            RewriteRule::exact("原创IP", "douyu"),
        ])
    }

    #[test]
    fn test_rewrite_exact_value() {
        let document = transform(
            "#EXTM3U\n#EXTINF:-1 group-title=\"一起看\",Ch1\nhttp://x/1",
            &douyu_rules(),
        );

        assert_eq!(document.header.as_deref(), Some("#EXTM3U"));
        assert_eq!(
            document.lines,
            vec!["#EXTM3U", "#EXTINF:-1 group-title=\"douyu\",Ch1", "http://x/1"]
        );
    }

    #[test]
    fn test_only_value_changes() {
        let line = "#EXTINF:-1  tvg-id=\"7\" group-title=\"原创IP\"  tvg-logo=\"l.png\",原创IP 频道 ";
        let rewritten = douyu_rules().rewrite_line(line);
        assert_eq!(
            rewritten,
            "#EXTINF:-1  tvg-id=\"7\" group-title=\"douyu\"  tvg-logo=\"l.png\",原创IP 频道 "
        );
    }

    #[test]
    fn test_unmatched_values_untouched() {
        let line = "#EXTINF:-1 group-title=\"体育\",Ch2";
        assert_eq!(douyu_rules().rewrite_line(line), line);
    }

    #[test]
    fn test_catch_all() {
        let rules = RuleSet::group_title(vec![RewriteRule::any("huya")]);
        assert_eq!(
            rules.rewrite_line("#EXTINF:-1 group-title=\"whatever\",A"),
            "#EXTINF:-1 group-title=\"huya\",A"
        );
        assert_eq!(
            rules.rewrite_line("#EXTINF:-1 group-title=\"\",A"),
            "#EXTINF:-1 group-title=\"huya\",A"
        );
    }

    #[test]
    fn test_literal_matching() {
        let rules = RuleSet::group_title(vec![RewriteRule::exact("a.*(b)", "x")]);
        assert_eq!(
            rules.rewrite_line("#EXTINF:-1 group-title=\"a.*(b)\",A"),
            "#EXTINF:-1 group-title=\"x\",A"
        );
        assert_eq!(
            rules.rewrite_line("#EXTINF:-1 group-title=\"aZZ(b)\",A"),
            "#EXTINF:-1 group-title=\"aZZ(b)\",A"
        );
    }

    #[test]
    fn test_rules_applied_in_order() {
        let rules = RuleSet::group_title(vec![
            RewriteRule::exact("a", "b"),
            RewriteRule::exact("b", "c"),
            RewriteRule::exact("a", "z"),
        ]);
        assert_eq!(
            rules.rewrite_line("#EXTINF:-1 group-title=\"a\",A"),
            "#EXTINF:-1 group-title=\"c\",A"
        );

        let rules = RuleSet::group_title(vec![
            RewriteRule::any("first"),
            RewriteRule::any("last"),
        ]);
        assert_eq!(
            rules.rewrite_line("#EXTINF:-1 group-title=\"a\",A"),
            "#EXTINF:-1 group-title=\"last\",A"
        );
    }

    #[test]
    fn test_non_metadata_lines_untouched() {
        let rules = RuleSet::group_title(vec![RewriteRule::any("x")]);
        for line in [
            "http://example.com/?group-title=\"a\"",
            "#EXTGRP group-title=\"a\"",
            "",
        ] {
            assert_eq!(rules.rewrite_line(line), line);
        }
    }

    #[test]
    fn test_metadata_without_attribute() {
        let rules = RuleSet::group_title(vec![RewriteRule::any("x")]);
        let line = "#EXTINF:-1 tvg-group-title=\"a\",A";
        assert_eq!(rules.rewrite_line(line), line);
        assert_eq!(rules.rewrite_line("#EXTINF:-1,A"), "#EXTINF:-1,A");
    }

    #[test]
    fn test_custom_key() {
        let rules = RuleSet::new("tvg-logo", vec![RewriteRule::any("logo.png")]).unwrap();
        assert_eq!(rules.key(), "tvg-logo");
        assert_eq!(
            rules.rewrite_line("#EXTINF:-1 group-title=\"a\" tvg-logo=\"old.png\",A"),
            "#EXTINF:-1 group-title=\"a\" tvg-logo=\"logo.png\",A"
        );
    }

    #[test]
    fn test_idempotent() {
        let text = "#EXTM3U\n#EXTINF:-1 group-title=\"一起看\",A\nhttp://a\n#EXTINF:-1 group-title=\"原创IP\",B\nhttp://b";
        for rules in [douyu_rules(), RuleSet::group_title(vec![RewriteRule::any("douyu")])] {
            let once = transform(text, &rules);
            let twice = transform(once.lines.join("\n"), &rules);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_header_detection() {
        let rules = douyu_rules();

        let document = transform("\n  #EXTM3U x-tvg-url=\"e.xml\"  \r\n#EXTINF:-1,A\r\nhttp://a", &rules);
        assert_eq!(document.header.as_deref(), Some("#EXTM3U x-tvg-url=\"e.xml\""));
        assert_eq!(document.lines.len(), 4);
        assert_eq!(document.lines[2], "#EXTINF:-1,A");

        let document = transform("#EXTINF:-1,A\nhttp://a\n#EXTM3U", &rules);
        assert_eq!(document.header, None);
    }
}
