// src/emit.rs
//! Output side: the generated angular-gettext factory, or a flat table dump.
//!
//! The JS layout is fixed. Regenerating against an unchanged table must give a
//! byte-identical file, so indentation and comment spacing below are exact.

use std::io::{self, Write};

use crate::config::options::EmitOptions;
use crate::csv::{self, Delim};
use crate::rules::RuleTable;
use crate::specs::pluralforms::RawRecord;

const FALLBACK_JS: &str = "n != 1 ? 1 : 0";

/// Write the `gettextPlurals` factory for `table`.
pub fn write_js<W: Write>(mut w: W, table: &RuleTable, opts: &EmitOptions) -> io::Result<()> {
    writeln!(w, "// Do not edit this file, it is autogenerated using {}!", opts.generator)?;
    writeln!(w, "angular.module(\"{}\").factory(\"{}\", function () {{", opts.module, opts.factory)?;
    writeln!(w, "    return function (langCode, n) {{")?;
    writeln!(w, "        if (langCode.indexOf(\"_\") !== -1) {{")?;
    writeln!(w, "            langCode = langCode.split(\"_\")[0];")?;
    writeln!(w, "        }};")?;
    writeln!(w, "        switch (langCode) {{")?;

    for (expr, entries) in table.sorted() {
        let mut forms = 0;
        for e in &entries {
            forms = e.nplurals;
            let space = if e.code.len() == 3 { " " } else { "  " };
            writeln!(w, "            case \"{}\":{}// {}", e.code, space, e.name)?;
        }
        if forms == 1 {
            writeln!(w, "                // {} form", forms)?;
        } else {
            writeln!(w, "                // {} forms", forms)?;
        }
        writeln!(w, "                return {};", expr)?;
    }

    writeln!(w, "            default: // Everything else")?;
    writeln!(w, "                return {};", FALLBACK_JS)?;
    writeln!(w, "        }}")?;
    writeln!(w, "    }}")?;
    writeln!(w, "}});")
}

/// Render the factory into memory.
pub fn render_js(table: &RuleTable, opts: &EmitOptions) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_js(&mut buf, table, opts);
    String::from_utf8_lossy(&buf).into_owned()
}

/// One row per language, in the same order as the generated switch.
pub fn write_table<W: Write>(mut w: W, table: &RuleTable, delim: Delim, headers: bool) -> io::Result<()> {
    if headers {
        csv::write_row(&mut w, &["Code", "Name", "Forms", "Rule"], delim)?;
    }
    for (expr, entries) in table.sorted() {
        for e in entries {
            let forms = e.nplurals.to_string();
            csv::write_row(&mut w, &[e.code.as_str(), e.name.as_str(), forms.as_str(), expr], delim)?;
        }
    }
    Ok(())
}

pub fn render_table(table: &RuleTable, delim: Delim, headers: bool) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let _ = write_table(&mut buf, table, delim, headers);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Raw records as scraped, before any normalization.
pub fn write_records<W: Write>(mut w: W, records: &[RawRecord], delim: Delim, headers: bool) -> io::Result<()> {
    if headers {
        csv::write_row(&mut w, &["Code", "Name", "Rule text"], delim)?;
    }
    for r in records {
        csv::write_row(&mut w, &[&r.code, &r.name, &r.rule_text], delim)?;
    }
    Ok(())
}
