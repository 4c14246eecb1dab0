// src/core/html.rs
// Forward-only tag-stream scanner.
// Yields start tags, end tags, text runs and entity references in document order.
// Nothing is validated: unbalanced or stray tags come through as-is.

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT: &[&str] = &["script", "style"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name ...>`, name lowercased.
    StartTag(String),
    /// `</name>`, name lowercased. Also follows the start tag of `<name/>`.
    EndTag(String),
    /// Literal text between markup.
    Text(&'a str),
    /// `&name;` or `&#NN;`, without the `&` and `;`.
    EntityRef(&'a str),
}

enum Markup<'a> {
    Tag(Token<'a>),
    Skipped,
    Literal,
}

pub struct Tokens<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    pending_end: Option<String>,
    raw_text: Option<String>,
}

impl<'a> Tokens<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), pending_end: None, raw_text: None }
    }

    /// Index just past the next unquoted '>' at or after `from`.
    #[inline]
    fn skip_tag(&self, from: usize) -> Option<usize> {
        let mut j = from;
        let mut in_s = false; // '
        let mut in_d = false; // "
        while j < self.n {
            match self.b[j] {
                b'\'' if !in_d => in_s = !in_s,
                b'"'  if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => return Some(j + 1),
                _ => {}
            }
            j += 1;
        }
        None
    }

    /// Index just past the next '>' (no quote handling), or end of input.
    #[inline]
    fn skip_to_gt(&self, from: usize) -> usize {
        self.b.get(from..)
            .and_then(|rest| rest.iter().position(|&c| c == b'>'))
            .map_or(self.n, |off| from + off + 1)
    }

    #[inline]
    fn name_end(&self, from: usize) -> usize {
        let mut j = from;
        while j < self.n {
            match self.b[j] {
                c if c.is_ascii_alphanumeric() => j += 1,
                b'-' | b'_' | b':' | b'.' => j += 1,
                _ => break,
            }
        }
        j
    }

    /// Called when the current byte is '<'.
    fn markup(&mut self) -> Markup<'a> {
        let start = self.i;
        match self.b.get(start + 1) {
            Some(b'!') => {
                if self.b[start..].starts_with(b"<!--") {
                    self.i = self.s[start + 4..].find("-->").map_or(self.n, |p| start + 4 + p + 3);
                } else {
                    self.i = self.skip_to_gt(start + 2);
                }
                Markup::Skipped
            }
            Some(b'?') => {
                self.i = self.skip_to_gt(start + 2);
                Markup::Skipped
            }
            Some(b'/') => {
                let name_start = start + 2;
                let name_end = self.name_end(name_start);
                if name_end == name_start || !self.b[name_start].is_ascii_alphabetic() {
                    // "</>" or "</ junk>": swallowed, no token
                    self.i = self.skip_to_gt(name_start);
                    return Markup::Skipped;
                }
                let name = self.s[name_start..name_end].to_ascii_lowercase();
                self.i = self.skip_to_gt(name_end);
                Markup::Tag(Token::EndTag(name))
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let name_start = start + 1;
                let name_end = self.name_end(name_start);
                let Some(close) = self.skip_tag(name_end) else {
                    return Markup::Literal;
                };
                let name = self.s[name_start..name_end].to_ascii_lowercase();
                let self_closing = close >= name_end + 2 && self.b[close - 2] == b'/';
                self.i = close;
                if self_closing {
                    self.pending_end = Some(name.clone());
                } else if RAW_TEXT.contains(&name.as_str()) {
                    self.raw_text = Some(name.clone());
                }
                Markup::Tag(Token::StartTag(name))
            }
            _ => Markup::Literal,
        }
    }

    /// Text run from the current byte up to the next '<' or '&'.
    /// Always consumes at least the current byte.
    fn text(&mut self) -> Token<'a> {
        let start = self.i;
        let mut j = start + 1;
        while j < self.n && !matches!(self.b[j], b'<' | b'&') {
            j += 1;
        }
        self.i = j;
        Token::Text(&self.s[start..j])
    }

    /// Called when the current byte is '&'. Falls back to text when no reference follows.
    fn reference(&mut self) -> Token<'a> {
        let body = self.i + 1;
        let end = match self.b.get(body) {
            Some(b'#') => {
                let (digits, hex) = match self.b.get(body + 1) {
                    Some(b'x' | b'X') => (body + 2, true),
                    _ => (body + 1, false),
                };
                let mut j = digits;
                while j < self.n && (if hex { self.b[j].is_ascii_hexdigit() } else { self.b[j].is_ascii_digit() }) {
                    j += 1;
                }
                if j == digits { return self.text(); }
                j
            }
            Some(c) if c.is_ascii_alphabetic() => {
                let mut j = body + 1;
                while j < self.n && self.b[j].is_ascii_alphanumeric() { j += 1; }
                j
            }
            _ => return self.text(),
        };
        let name = &self.s[body..end];
        self.i = if self.b.get(end) == Some(&b';') { end + 1 } else { end };
        Token::EntityRef(name)
    }

    /// Raw content of a `<script>`/`<style>` element, up to its close tag.
    fn raw_text_run(&mut self, name: &str) -> Option<Token<'a>> {
        let start = self.i;
        let close = join!("</", name);
        let end = self.s[start..]
            .to_ascii_lowercase()
            .find(&close)
            .map_or(self.n, |p| start + p);
        self.i = end;
        (end > start).then(|| Token::Text(&self.s[start..end]))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.pending_end.take() {
            return Some(Token::EndTag(name));
        }
        if let Some(name) = self.raw_text.take() {
            if let Some(tok) = self.raw_text_run(&name) {
                return Some(tok);
            }
        }
        while self.i < self.n {
            match self.b[self.i] {
                b'<' => match self.markup() {
                    Markup::Tag(tok) => return Some(tok),
                    Markup::Skipped => continue,
                    Markup::Literal => return Some(self.text()),
                },
                b'&' => return Some(self.reference()),
                _ => return Some(self.text()),
            }
        }
        None
    }
}
