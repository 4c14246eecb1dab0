// src/rules.rs
//! Plural rule normalization and grouping.
//!
//! Rule cells on the l10n table look like `nplurals=2; plural=(n > 1);`.
//! `normalize` turns the `plural=` part into a JS expression that always yields
//! an index (`... ? 1 : 0` when the source only gives a test), and `RuleTable`
//! groups languages that end up with byte-identical expressions.
//!
//! The rewriting is textual on purpose: the table only ever uses a bare
//! comparison or a full C-style expression, so a handful of substitutions cover it.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::specs::pluralforms::RawRecord;

/// The default branch of the generated switch. Never emitted as a named case.
pub const FALLBACK_RULE: &str = "n!=1 ? 1 : 0";

lazy_static! {
    // nplurals=2; plural=(n != 1);
    static ref RULE_CELL: Regex = Regex::new(r"^ *nplurals *=* *(\d+); *plural *=(.*);").unwrap();

    // (n > 1)  /  n>1  /  n != 1
    static ref BARE_COMPARISON: Regex = Regex::new(r"^\(?n *([<>!=]{1,2}) *(\d+)\)?$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub nplurals: u32,
    pub expr: String,
}

/// Parse a rule cell into a plural count and a normalized JS expression.
/// `None` when the cell isn't a plural rule, or when it is the fallback rule.
pub fn normalize(rule_text: &str) -> Option<Rule> {
    let caps = RULE_CELL.captures(rule_text)?;
    let nplurals: u32 = caps[1].parse().ok()?;

    let expr = caps[2].replace(';', "");
    let expr = expr.trim();

    let expr = BARE_COMPARISON.replace(expr, "n${1}${2} ? 1 : 0");
    let mut expr = expr.replace("and", "&&").replace("or", "||");

    if !expr.contains('?') && expr != "0" {
        expr.push_str(" ? 1 : 0");
    }
    if expr == FALLBACK_RULE {
        return None;
    }
    Some(Rule { nplurals, expr })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub code: String,
    pub name: String,
    pub nplurals: u32,
}

/// Normalized expression → languages using it.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    groups: HashMap<String, Vec<Entry>>,
}

impl RuleTable {
    pub fn new() -> Self { Self::default() }

    /// Normalize and file a record. Returns false when the record was dropped.
    pub fn insert(&mut self, record: RawRecord) -> bool {
        let Some(rule) = normalize(&record.rule_text) else {
            logd!("Rules: dropped {} ({}): {:?}", record.code, record.name, record.rule_text);
            return false;
        };
        logd!("Rules: {} -> {}", record.code, rule.expr);
        self.groups.entry(rule.expr).or_default().push(Entry {
            code: record.code,
            name: record.name,
            nplurals: rule.nplurals,
        });
        true
    }

    pub fn len(&self) -> usize { self.groups.len() }

    pub fn is_empty(&self) -> bool { self.groups.is_empty() }

    pub fn get(&self, expr: &str) -> Option<&[Entry]> {
        self.groups.get(expr).map(Vec::as_slice)
    }

    /// Groups in output order.
    ///
    /// Entries are sorted by code (stable, so duplicate codes keep insertion order).
    /// Groups are ordered by the string `nplurals-of-first-entry + expr`, i.e. plural
    /// count compared as text, then expression.
    pub fn sorted(&self) -> Vec<(&str, Vec<&Entry>)> {
        let mut out: Vec<(String, &str, Vec<&Entry>)> = self.groups
            .iter()
            .map(|(expr, entries)| {
                let mut entries: Vec<&Entry> = entries.iter().collect();
                entries.sort_by(|a, b| a.code.cmp(&b.code));
                let count = entries.first().map(|e| e.nplurals.to_string()).unwrap_or_default();
                (join!(count, expr), expr.as_str(), entries)
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
        out.into_iter().map(|(_, expr, entries)| (expr, entries)).collect()
    }
}
