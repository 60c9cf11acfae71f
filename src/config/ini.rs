//! Raw INI parsing for profile files.
//!
//! Produces ordered sections of ordered key/value pairs with values left
//! uninterpolated; [`super::interpolation`] resolves `${...}` references
//! afterwards.
use std::collections::HashSet;

use crate::error::ProfileError;

/// A parsed `[section]` with its entries in declaration order.
///
/// # Examples
///
/// ```
/// use dotdeploy::config::ini::RawSection;
///
/// let section = RawSection {
///     name: "shell".to_string(),
///     entries: vec![("bashrc".to_string(), "~/.bashrc".to_string())],
/// };
/// assert_eq!(section.get("bashrc"), Some("~/.bashrc"));
/// assert_eq!(section.get("zshrc"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSection {
    /// Section header with surrounding whitespace removed.
    pub name: String,
    /// Key-value entries within this section.
    pub entries: Vec<(String, String)>,
}

impl RawSection {
    /// Create an empty section.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Return the value stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace `key`, keeping the original position on replace.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }
}

/// An ordered collection of raw sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    /// Sections in declaration order.
    pub sections: Vec<RawSection>,
}

impl RawDocument {
    /// Look up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&RawSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Append an empty section named `name` unless one already exists.
    pub fn ensure_section(&mut self, name: &str) {
        if !self.has_section(name) {
            self.sections.push(RawSection::new(name));
        }
    }

    /// Set `section.key`, creating the section at the end if absent.
    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) {
        if let Some(existing) = self.sections.iter_mut().find(|s| s.name == section) {
            existing.set(key, value);
            return;
        }
        let mut created = RawSection::new(section);
        created.set(key, value);
        self.sections.push(created);
    }

    /// Return the raw value for `section.key`, if both exist.
    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Returns `true` if a section named `name` exists.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Merge `other` into this document.
    ///
    /// Sections already present receive the other document's entries (later
    /// values win); new sections are appended in order.
    pub fn merge(&mut self, other: Self) {
        for section in other.sections {
            self.ensure_section(&section.name);
            for (key, value) in section.entries {
                self.set(&section.name, key, value);
            }
        }
    }
}

/// Parse profile text into a [`RawDocument`].
///
/// Format:
/// ```ini
/// # comment
/// ; comment
/// [section]
/// key = value
/// other: value
///     continued on the next line
/// ```
///
/// # Examples
///
/// ```
/// use dotdeploy::config::ini::parse_document;
///
/// let doc = parse_document("[shell]\nbashrc = ~/.bashrc\n").unwrap();
/// assert_eq!(doc.get("shell", "bashrc"), Some("~/.bashrc"));
/// ```
///
/// # Errors
///
/// Returns [`ProfileError::Parse`] if:
/// - An entry appears outside of a section header
/// - A line has no `=` or `:` delimiter, or an empty key
/// - A section header is malformed or empty
/// - A section or a key within a section is declared twice
pub fn parse_document(content: &str) -> Result<RawDocument, ProfileError> {
    let mut doc = RawDocument::default();
    let mut seen_sections: HashSet<String> = HashSet::new();
    let mut seen_keys: HashSet<String> = HashSet::new();
    let mut current: Option<RawSection> = None;
    // Whether the previous significant line was an entry that may continue.
    let mut in_value = false;

    for (line_num, line) in content.lines().enumerate() {
        let line_no = line_num + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            in_value = false;
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indented = line.starts_with([' ', '\t']);
        if indented
            && in_value
            && let Some((_, value)) = current.as_mut().and_then(|s| s.entries.last_mut())
        {
            value.push('\n');
            value.push_str(trimmed);
            continue;
        }

        if trimmed.starts_with('[') {
            let name = parse_section_header(trimmed).ok_or_else(|| {
                ProfileError::parse(&format!("invalid section header at line {line_no}: {trimmed}"))
            })?;
            if !seen_sections.insert(name.clone()) {
                return Err(ProfileError::parse(&format!(
                    "duplicate section [{name}] at line {line_no}"
                )));
            }
            if let Some(section) = current.take() {
                doc.sections.push(section);
            }
            seen_keys.clear();
            current = Some(RawSection::new(name));
            in_value = false;
            continue;
        }

        let Some(section) = current.as_mut() else {
            return Err(ProfileError::parse(&format!(
                "entry outside of section at line {line_no}: {trimmed}"
            )));
        };

        let (key, value) = parse_kv_line(trimmed).ok_or_else(|| {
            ProfileError::parse(&format!("invalid key-value pair at line {line_no}: {trimmed}"))
        })?;
        if !seen_keys.insert(key.clone()) {
            return Err(ProfileError::parse(&format!(
                "duplicate key '{key}' in section [{}] at line {line_no}",
                section.name
            )));
        }
        section.entries.push((key, value));
        in_value = true;
    }

    if let Some(section) = current {
        doc.sections.push(section);
    }

    Ok(doc)
}

/// Parse a `[header]` line preserving original case.
fn parse_section_header(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    let trimmed = inner.trim();
    if trimmed.is_empty() || trimmed.contains(['[', ']']) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Parse a `key = value` or `key: value` line, splitting on whichever
/// delimiter comes first.
fn parse_kv_line(line: &str) -> Option<(String, String)> {
    let idx = line.find(['=', ':'])?;
    let (key, rest) = line.split_at(idx);
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let value = rest.get(1..).unwrap_or_default().trim();
    Some((key.to_string(), value.to_string()))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn parse_sections_in_order() {
        let doc = parse_document("[b]\nx = 1\n[a]\ny = 2\n").unwrap();
        let names: Vec<&str> = doc.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn parse_entries_in_order() {
        let doc = parse_document("[shell]\nzshrc = ~/.zshrc\nbashrc = ~/.bashrc\n").unwrap();
        let keys: Vec<&str> = doc.sections[0]
            .entries
            .iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["zshrc", "bashrc"]);
    }

    #[test]
    fn parse_colon_delimiter() {
        let doc = parse_document("[s]\nkey: value\n").unwrap();
        assert_eq!(doc.get("s", "key"), Some("value"));
    }

    #[test]
    fn first_delimiter_wins() {
        let doc = parse_document("[s]\nkey = C:\\path\n").unwrap();
        assert_eq!(doc.get("s", "key"), Some("C:\\path"));
    }

    #[test]
    fn empty_value_allowed() {
        let doc = parse_document("[settings]\ngroups_directory =\n").unwrap();
        assert_eq!(doc.get("settings", "groups_directory"), Some(""));
    }

    #[test]
    fn preserves_key_case() {
        let doc = parse_document("[x11]\nXresources = ~/.Xresources\n").unwrap();
        assert_eq!(doc.get("x11", "Xresources"), Some("~/.Xresources"));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let doc = parse_document("# top\n\n[s]\n; note\nk = v\n\n# end\n").unwrap();
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].entries.len(), 1);
    }

    #[test]
    fn continuation_lines_join_with_newline() {
        let doc = parse_document("[s]\nk = first\n    second\n").unwrap();
        assert_eq!(doc.get("s", "k"), Some("first\nsecond"));
    }

    #[test]
    fn entry_outside_section_is_error() {
        let err = parse_document("k = v\n").unwrap_err();
        assert!(err.to_string().contains("outside of section at line 1"));
    }

    #[test]
    fn missing_delimiter_is_error() {
        let err = parse_document("[s]\njust-a-word\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn empty_header_is_error() {
        assert!(parse_document("[ ]\n").is_err());
    }

    #[test]
    fn duplicate_section_is_error() {
        let err = parse_document("[s]\n[s]\n").unwrap_err();
        assert!(err.to_string().contains("duplicate section [s]"));
    }

    #[test]
    fn duplicate_key_is_error() {
        let err = parse_document("[s]\nk = 1\nk = 2\n").unwrap_err();
        assert!(err.to_string().contains("duplicate key 'k'"));
    }

    #[test]
    fn same_key_in_different_sections_is_fine() {
        let doc = parse_document("[a]\nk = 1\n[b]\nk = 2\n").unwrap();
        assert_eq!(doc.get("a", "k"), Some("1"));
        assert_eq!(doc.get("b", "k"), Some("2"));
    }

    #[test]
    fn merge_appends_and_overrides() {
        let mut base = RawDocument::default();
        base.set("global", "home", "/home/a");
        let parsed = parse_document("[global]\nhome = /custom\nextra = 1\n[shell]\nx = y\n").unwrap();
        base.merge(parsed);
        assert_eq!(base.get("global", "home"), Some("/custom"));
        assert_eq!(base.get("global", "extra"), Some("1"));
        assert_eq!(base.sections[0].name, "global");
        assert_eq!(base.sections[1].name, "shell");
    }
}
