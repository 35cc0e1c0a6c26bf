use std::collections::BTreeMap;

/// Flat key/value view of a Spring Boot configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

/// A malformed line in a `.properties` document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up the first of several keys that is set, in order
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(key))
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Overlay `other` on top of these properties; its values win
    pub fn merge(&mut self, other: Properties) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a document in the Java `.properties` format.
    ///
    /// Supports `#`/`!` comments, `=`, `:` or whitespace separators,
    /// backslash line continuations and the usual escapes including
    /// `\uXXXX`. Later duplicates of a key replace earlier ones.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let mut props = Properties::new();
        let mut lines = content.lines().enumerate();

        while let Some((idx, line)) = lines.next() {
            let trimmed = line.trim_start_matches(is_blank);
            if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                    None => break,
                }
            }

            let (key, value) = split_key_value(&logical);
            let to_error = |message: String| ParseError {
                line: idx + 1,
                message,
            };
            props.insert(
                unescape(key).map_err(to_error)?,
                unescape(value).map_err(to_error)?,
            );
        }

        Ok(props)
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// An odd number of trailing backslashes continues the line
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                value_start = i + 1;
                break;
            }
            _ => {}
        }
    }

    let mut value = line[value_start..].trim_start_matches(is_blank);
    if !has_separator {
        if let Some(rest) = value.strip_prefix(['=', ':']) {
            value = rest.trim_start_matches(is_blank);
        }
    }

    (&line[..key_end], value)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .ok_or_else(|| format!("Malformed \\uxxxx encoding: \\u{}", hex))?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators() {
        let props = Properties::parse("a=1\nb: 2\nc 3\nd = 4\ne\t:\t5\nf\n").unwrap();
        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("4"));
        assert_eq!(props.get("e"), Some("5"));
        assert_eq!(props.get("f"), Some(""));
        assert_eq!(props.len(), 6);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let props = Properties::parse("# comment\n! also comment\n\n   \nserver.port=8081\n").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("server.port"), Some("8081"));
    }

    #[test]
    fn test_line_continuation() {
        let props = Properties::parse("fruits = apple, \\\n         banana\nnext=1\n").unwrap();
        assert_eq!(props.get("fruits"), Some("apple, banana"));
        assert_eq!(props.get("next"), Some("1"));

        // An escaped backslash does not continue the line
        let props = Properties::parse("path=c:\\\\\nother=2\n").unwrap();
        assert_eq!(props.get("path"), Some("c:\\"));
        assert_eq!(props.get("other"), Some("2"));
    }

    #[test]
    fn test_escapes() {
        let props = Properties::parse("key\\ with\\:colon=tab\\there\ngreeting=caf\\u00e9\n").unwrap();
        assert_eq!(props.get("key with:colon"), Some("tab\there"));
        assert_eq!(props.get("greeting"), Some("café"));
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = Properties::parse("ok=1\nbad=\\u12g4\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert!(err.message.contains("Malformed"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let props = Properties::parse("a=1\na=2\n").unwrap();
        assert_eq!(props.get("a"), Some("2"));
    }

    #[test]
    fn test_merge_and_get_any() {
        let mut base: Properties = [("server.port".to_string(), "8080".to_string())]
            .into_iter()
            .collect();
        let mut overlay = Properties::new();
        overlay.insert("server.port", "9090");
        overlay.insert("management.port", "9091");
        base.merge(overlay);

        assert_eq!(base.get("server.port"), Some("9090"));
        assert_eq!(
            base.get_any(&["management.server.port", "management.port"]),
            Some("9091")
        );
        assert_eq!(base.get_any(&["missing"]), None);
    }
}
