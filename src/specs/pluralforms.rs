// src/specs/pluralforms.rs
//! Scraping *spec* for the l10n plural forms table.
//!
//! Purpose:
//! - Walk the page's token stream and recover `(code, name, rule)` triples from
//!   three consecutive `<td>` cells.
//! - Hand every completed triple to `rules::RuleTable`.
//!
//! The table has no class names to key off. A row is recognised purely by the
//! shape of its first cell: 2–5 letters or underscores (`fr`, `ach`, `pt_BR`).
//! Anything else resets the row in progress, which is how header rows and
//! navigation cells fall out.
//!
//! Text inside tags nested in a cell (links, `<code>`, ...) is not collected.

use std::error::Error;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::entities;
use crate::core::html::{Token, Tokens};
use crate::rules::RuleTable;

lazy_static! {
    static ref LANG_CODE: Regex = Regex::new(r"^[a-zA-Z_]{2,5}$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawRecord {
    pub code: String,
    pub name: String,
    pub rule_text: String,
}

/// Cell-level state for one parse pass.
#[derive(Debug, Default)]
pub struct Extractor {
    in_cell: bool,
    /// Start tags opened inside the current cell and not yet closed.
    depth: usize,
    buf: String,
    fields: Vec<String>,
}

impl Extractor {
    pub fn new() -> Self { Self::default() }

    /// Feed one token. Yields a record when the third cell of a row closes.
    /// Errors only on an entity reference inside a cell that isn't in the entity table.
    pub fn step(&mut self, token: Token<'_>) -> Result<Option<RawRecord>, Box<dyn Error>> {
        match token {
            Token::StartTag(name) => {
                if self.in_cell {
                    self.depth += 1;
                } else {
                    self.in_cell = name == "td";
                }
            }
            Token::Text(text) => {
                if self.in_cell && self.depth == 0 {
                    self.buf.push_str(text);
                }
            }
            Token::EntityRef(name) => {
                if self.in_cell {
                    let ch = entities::resolve(name)
                        .ok_or_else(|| format!("Unknown HTML entity &{name}; inside table cell"))?;
                    if self.depth == 0 {
                        self.buf.push(ch);
                    }
                }
            }
            Token::EndTag(name) => {
                if self.depth > 0 {
                    self.depth -= 1;
                } else if self.in_cell && name == "td" {
                    return Ok(self.close_cell());
                }
            }
        }
        Ok(None)
    }

    fn close_cell(&mut self) -> Option<RawRecord> {
        self.in_cell = false;
        let data = std::mem::take(&mut self.buf);
        let data = data.trim();

        match self.fields.len() {
            0 if LANG_CODE.is_match(data) => self.fields.push(s!(data)),
            0 => {
                if !data.is_empty() {
                    logd!("Extract: skipped cell {:?}", data);
                }
            }
            1 => self.fields.push(s!(data)),
            _ => {
                let mut fields = std::mem::take(&mut self.fields).into_iter();
                let code = fields.next().unwrap_or_default();
                let name = fields.next().unwrap_or_default();
                return Some(RawRecord { code, name, rule_text: s!(data) });
            }
        }
        None
    }
}

/// All records on the page, in document order, before normalization.
pub fn records(doc: &str) -> Result<Vec<RawRecord>, Box<dyn Error>> {
    let mut ex = Extractor::new();
    let mut out = Vec::new();
    for token in Tokens::new(doc) {
        if let Some(rec) = ex.step(token)? {
            out.push(rec);
        }
    }
    Ok(out)
}

/// Parse the page into grouped, normalized rules.
pub fn extract(doc: &str) -> Result<RuleTable, Box<dyn Error>> {
    let mut table = RuleTable::new();
    let mut ex = Extractor::new();
    let (mut seen, mut kept) = (0usize, 0usize);

    for token in Tokens::new(doc) {
        if let Some(rec) = ex.step(token)? {
            seen += 1;
            if table.insert(rec) { kept += 1; }
        }
    }
    logf!("Extract: {seen} records, {kept} kept, {} rule groups", table.len());
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> String {
        let mut s = s!("<tr>");
        for c in cells {
            s.push_str(&format!("<td>{c}</td>"));
        }
        s.push_str("</tr>");
        s
    }

    #[test]
    fn three_cells_make_a_record() {
        let doc = row(&["fr", "French", "nplurals=2; plural=(n > 1);"]);
        assert_eq!(records(&doc).unwrap(), vec![RawRecord {
            code: s!("fr"),
            name: s!("French"),
            rule_text: s!("nplurals=2; plural=(n > 1);"),
        }]);
    }

    #[test]
    fn header_cell_does_not_start_a_record() {
        let doc = join!(
            &row(&["Language", "Name", "Plural-Forms header"]),
            &row(&["ja", "Japanese", "nplurals=1; plural=0;"])
        );
        let recs = records(&doc).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].code, "ja");
    }

    #[test]
    fn code_shape_allows_underscore_and_mixed_case() {
        let doc = join!(
            &row(&["pt_BR", "Brazilian Portuguese", "nplurals=2; plural=(n > 1);"]),
            &row(&["x", "too short", "nplurals=1; plural=0;"]),
            &row(&["abcdef", "too long", "nplurals=1; plural=0;"])
        );
        let codes: Vec<String> = records(&doc).unwrap().into_iter().map(|r| r.code).collect();
        assert_eq!(codes, vec!["pt_BR"]);
    }

    #[test]
    fn nested_markup_text_is_ignored_and_balanced() {
        let doc = row(&["<a href=\"#\">link</a>de", "German", "nplurals=2; plural=(n != 1);"]);
        let recs = records(&doc).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].code, "de");
    }

    #[test]
    fn entities_are_resolved_inside_cells() {
        let doc = row(&["nb", "Norwegian Bokm&aring;l", "nplurals=2;&nbsp;plural=(n != 1);"]);
        let recs = records(&doc).unwrap();
        assert_eq!(recs[0].name, "Norwegian Bokm\u{e5}l");
        assert_eq!(recs[0].rule_text, "nplurals=2;\u{a0}plural=(n != 1);");
    }

    #[test]
    fn unknown_entity_outside_cells_is_never_looked_up() {
        let doc = join!("<p>&bogus;</p>", &row(&["ja", "Japanese", "nplurals=1; plural=0;"]));
        assert_eq!(records(&doc).unwrap().len(), 1);
    }

    #[test]
    fn unknown_entity_inside_a_cell_is_an_error() {
        let doc = row(&["ja", "Japanese &bogus;", "nplurals=1; plural=0;"]);
        let err = records(&doc).unwrap_err();
        assert!(err.to_string().contains("&bogus;"));
    }

    #[test]
    fn stepping_tokens_one_at_a_time() {
        let mut ex = Extractor::new();
        let toks = [
            Token::StartTag(s!("td")), Token::Text(" ja "), Token::EndTag(s!("td")),
            Token::StartTag(s!("td")), Token::Text("Japanese"), Token::EndTag(s!("td")),
            Token::StartTag(s!("td")), Token::Text("nplurals=1; plural=0;"),
        ];
        for t in toks {
            assert_eq!(ex.step(t).unwrap(), None);
        }
        let rec = ex.step(Token::EndTag(s!("td"))).unwrap().unwrap();
        assert_eq!(rec.code, "ja");
        // a stray close does nothing once the row is consumed
        assert_eq!(ex.step(Token::EndTag(s!("td"))).unwrap(), None);
    }

    #[test]
    fn extract_groups_and_drops_fallback() {
        let doc = join!(
            &row(&["en", "English", "nplurals=2; plural=(n != 1);"]),
            &row(&["ja", "Japanese", "nplurals=1; plural=0;"])
        );
        let table = extract(&doc).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("0").unwrap()[0].code, "ja");
        assert!(table.get(crate::rules::FALLBACK_RULE).is_none());
    }
}
