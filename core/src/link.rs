//! `Link` header parsing (RFC 5988 web linking).
//!
//! A header value is a comma-separated list of `<uri>; name=value` entries.
//! Values may be tokens or quoted strings with backslash escapes; commas and
//! semicolons inside `<...>` or quotes do not split. Entries without a
//! `<uri>` are skipped.

use tracing::debug;

/// One entry of a `Link` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    target: String,
    params: Vec<(String, String)>,
}

impl Link {
    /// The target URI exactly as written between `<` and `>`.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// First value of the parameter `name` (names are case-insensitive).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Relation types of the `rel` parameter, lowercased. `rel="next last"`
    /// yields both.
    pub fn relations(&self) -> impl Iterator<Item = String> + '_ {
        self.param("rel")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_ascii_lowercase)
    }
}

/// Parse every entry of a single `Link` header value.
pub fn parse_link_header(value: &str) -> Vec<Link> {
    let mut cursor = Cursor::new(value);
    let mut links = Vec::new();

    loop {
        cursor.skip_while(|c| c.is_whitespace() || c == ',');
        match cursor.peek() {
            None => break,
            Some('<') => {
                cursor.bump();
            }
            Some(_) => {
                let skipped = cursor.skip_entry();
                debug!(entry = %skipped.trim(), "skipping link entry without target");
                continue;
            }
        }

        let Some(target) = cursor.take_until('>') else {
            debug!("unterminated link target");
            break;
        };
        let params = cursor.params();
        links.push(Link {
            target: target.trim().to_string(),
            params,
        });
    }

    links
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_while(&mut self, f: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&f) {
            self.bump();
        }
    }

    /// Consume up to and including `end`, returning the text before it.
    fn take_until(&mut self, end: char) -> Option<&'a str> {
        let rest = &self.input[self.pos..];
        let idx = rest.find(end)?;
        self.pos += idx + end.len_utf8();
        Some(&rest[..idx])
    }

    /// Consume the remainder of a malformed entry, up to the next
    /// top-level comma.
    fn skip_entry(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            match c {
                ',' => break,
                '"' => {
                    self.quoted();
                }
                '<' => {
                    self.bump();
                    self.take_until('>');
                }
                _ => {
                    self.bump();
                }
            }
        }
        &self.input[start..self.pos]
    }

    /// Parameters following a target, stopping before the entry's comma.
    fn params(&mut self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        loop {
            self.skip_while(char::is_whitespace);
            match self.peek() {
                Some(';') => {
                    self.bump();
                }
                _ => return params,
            }
            self.skip_while(char::is_whitespace);

            let name = self.token();
            self.skip_while(char::is_whitespace);
            let value = if self.peek() == Some('=') {
                self.bump();
                self.skip_while(char::is_whitespace);
                if self.peek() == Some('"') {
                    self.quoted()
                } else {
                    self.token().to_string()
                }
            } else {
                String::new()
            };

            if !name.is_empty() {
                params.push((name.to_ascii_lowercase(), value));
            }
        }
    }

    fn token(&mut self) -> &'a str {
        let start = self.pos;
        self.skip_while(|c| !(c.is_whitespace() || matches!(c, ';' | ',' | '=' | '"')));
        &self.input[start..self.pos]
    }

    /// A quoted string starting at the opening quote, unescaped.
    fn quoted(&mut self) -> String {
        let mut value = String::new();
        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '"' => break,
                '\\' => {
                    if let Some(escaped) = self.bump() {
                        value.push(escaped);
                    }
                }
                _ => value.push(c),
            }
        }
        value
    }
}
