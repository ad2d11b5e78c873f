//! Template engine
//!
//! Text assets may carry `%NAME%` markers, where `NAME` is 1 to 32 ASCII
//! letters, digits or underscores. A marker whose name resolves is replaced by
//! the resolved value; any other marker is copied through untouched, percent
//! signs included. A `%` that does not open a well-formed marker is plain text.
//!
//! A well-formed marker owns both of its delimiters whether or not it
//! resolves, so scanning resumes after the closing `%`. `%X%DEVICE_NAME%` is
//! therefore `%X%` followed by plain text, while `5%%DEVICE_NAME%` renders the
//! device name after `5%` because `%%` is not a marker.

use std::collections::HashMap;

use crate::device::{ConfigurationRecord, CONFIG_VERSION};

/// Marker delimiter
pub const DELIMITER: u8 = b'%';

/// Longest recognised token name
pub const MAX_TOKEN_LEN: usize = 32;

/// Token vocabulary known to the UI bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Version,
    DeviceName,
    /// Supply current reading; declared by the UI, no resolver wired
    CurrentIn,
    /// Fan-side current reading; declared by the UI, no resolver wired
    CurrentOut,
}

impl Token {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Version => "VERSION",
            Self::DeviceName => "DEVICE_NAME",
            Self::CurrentIn => "CURRENT_IN",
            Self::CurrentOut => "CURRENT_OUT",
        }
    }
}

/// Computes a token's value from the device identity
pub type Resolver = fn(&ConfigurationRecord) -> String;

/// Token name to resolver map, built once and queried per marker
#[derive(Clone, Default)]
pub struct TokenTable {
    resolvers: HashMap<&'static str, Resolver>,
}

impl TokenTable {
    /// Table with the resolvers the firmware provides: version and device name
    pub fn standard() -> Self {
        let mut table = Self::default();
        table.register(Token::Version, |_| CONFIG_VERSION.to_string());
        table.register(Token::DeviceName, |record| record.device_name.to_string());
        table
    }

    pub fn register(&mut self, token: Token, resolver: Resolver) {
        self.resolvers.insert(token.name(), resolver);
    }

    pub fn is_wired(&self, token: Token) -> bool {
        self.resolvers.contains_key(token.name())
    }

    pub fn resolve(&self, name: &str, record: &ConfigurationRecord) -> Option<String> {
        self.resolvers.get(name).map(|resolver| resolver(record))
    }

    /// Render `content` against the current identity
    pub fn render(&self, content: &str, record: &ConfigurationRecord) -> String {
        render(content, |name| self.resolve(name, record))
    }
}

/// Replace every resolvable marker in `content`.
///
/// `resolve_token` is called once per marker occurrence; returning `None`
/// leaves that marker as it was.
pub fn render<F>(content: &str, mut resolve_token: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let bytes = content.as_bytes();
    let mut out = String::with_capacity(content.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != DELIMITER {
            i += 1;
            continue;
        }

        let Some(close) = marker_end(bytes, i) else {
            i += 1;
            continue;
        };

        // Delimiters and name bytes are ASCII, so these are char boundaries
        if let Some(value) = resolve_token(&content[i + 1..close]) {
            out.push_str(&content[copied..i]);
            out.push_str(&value);
            copied = close + 1;
        }
        i = close + 1;
    }

    out.push_str(&content[copied..]);
    out
}

/// Index of the closing delimiter of a marker opening at `start`
fn marker_end(bytes: &[u8], start: usize) -> Option<usize> {
    let name_start = start + 1;
    let limit = bytes.len().min(name_start + MAX_TOKEN_LEN + 1);

    for (j, &b) in bytes.iter().enumerate().take(limit).skip(name_start) {
        if b == DELIMITER {
            return (j > name_start).then_some(j);
        }
        if !(b.is_ascii_alphanumeric() || b == b'_') {
            return None;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceName;

    fn record(name: &str) -> ConfigurationRecord {
        ConfigurationRecord::with_name(DeviceName::new(name).unwrap())
    }

    #[test]
    fn test_substitutes_every_occurrence() {
        let table = TokenTable::standard();
        let out = table.render(
            "<title>%DEVICE_NAME%</title><h1>%DEVICE_NAME%</h1>",
            &record("bench-left"),
        );
        assert_eq!(out, "<title>bench-left</title><h1>bench-left</h1>");
    }

    #[test]
    fn test_version_token() {
        let out = TokenTable::standard().render("v=%VERSION%", &record("psu"));
        assert_eq!(out, "v=V1");
    }

    #[test]
    fn test_unknown_marker_passes_through() {
        let table = TokenTable::standard();
        let input = "%NOT_A_TOKEN% and %DEVICE_NAME%";
        assert_eq!(table.render(input, &record("psu")), "%NOT_A_TOKEN% and psu");
    }

    #[test]
    fn test_unwired_current_tokens_pass_through() {
        let table = TokenTable::standard();
        assert!(!table.is_wired(Token::CurrentIn));
        assert!(!table.is_wired(Token::CurrentOut));

        let input = r#"{"in":"%CURRENT_IN%","out":"%CURRENT_OUT%"}"#;
        assert_eq!(table.render(input, &record("psu")), input);
    }

    #[test]
    fn test_stray_percent_signs() {
        let table = TokenTable::standard();
        let input = "width:100%;height:50% %DEVICE_NAME% 100%%";
        assert_eq!(
            table.render(input, &record("psu")),
            "width:100%;height:50% psu 100%%"
        );
        assert_eq!(table.render("%", &record("psu")), "%");
        assert_eq!(table.render("%%", &record("psu")), "%%");
        assert_eq!(table.render("%DEVICE_NAME", &record("psu")), "%DEVICE_NAME");
    }

    #[test]
    fn test_name_length_limit() {
        let long = format!("%{}%", "A".repeat(MAX_TOKEN_LEN + 1));
        let out = render(&long, |_| Some("x".to_string()));
        assert_eq!(out, long);

        let max = format!("%{}%", "A".repeat(MAX_TOKEN_LEN));
        assert_eq!(render(&max, |_| Some("x".to_string())), "x");
    }

    #[test]
    fn test_resolver_called_per_occurrence() {
        let mut calls = 0;
        let out = render("%A%-%A%-%B%", |name| {
            calls += 1;
            (name == "A").then(|| calls.to_string())
        });
        assert_eq!(out, "1-2-%B%");
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let out = TokenTable::standard().render("Lüfter ⚡ %DEVICE_NAME% – ok", &record("psu"));
        assert_eq!(out, "Lüfter ⚡ psu – ok");
    }

    #[test]
    fn test_unresolved_marker_keeps_closing_delimiter() {
        let table = TokenTable::standard();
        let psu = record("psu");
        assert_eq!(table.render("%X%DEVICE_NAME%", &psu), "%X%DEVICE_NAME%");
        assert_eq!(table.render("5%%DEVICE_NAME%", &psu), "5%psu");
        assert_eq!(table.render("%X% %DEVICE_NAME%", &psu), "%X% psu");
    }

    #[test]
    fn test_standard_table_wiring() {
        let table = TokenTable::standard();
        assert!(table.is_wired(Token::Version));
        assert!(table.is_wired(Token::DeviceName));
        assert_eq!(table.resolve("DEVICE_NAME", &record("psu")).as_deref(), Some("psu"));
        assert_eq!(table.resolve("device_name", &record("psu")), None);
    }
}
