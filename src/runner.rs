// src/runner.rs
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{
    config::options::{Options, OutputKind, Source},
    core::net,
    emit,
    specs::pluralforms,
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Rule groups (JS/table) or raw records (records dump).
    pub items: usize,
    /// None when written to stdout.
    pub written: Option<PathBuf>,
}

/// Read the page from the network or from a saved copy.
pub fn load_source(source: &Source) -> Result<String, Box<dyn Error>> {
    match source {
        Source::Url(url) => net::http_get(url),
        Source::File(path) => fs::read_to_string(path)
            .map_err(|e| format!("Reading {}: {}", path.display(), e).into()),
    }
}

/// Document text → output text. Pure; no I/O.
pub fn generate(doc: &str, output: &OutputKind) -> Result<(String, usize), Box<dyn Error>> {
    match output {
        OutputKind::Js(opts) => {
            let table = pluralforms::extract(doc)?;
            Ok((emit::render_js(&table, opts), table.len()))
        }
        OutputKind::Table { delim, headers } => {
            let table = pluralforms::extract(doc)?;
            Ok((emit::render_table(&table, *delim, *headers), table.len()))
        }
        OutputKind::Records { delim, headers } => {
            let records = pluralforms::records(doc)?;
            let mut buf: Vec<u8> = Vec::new();
            emit::write_records(&mut buf, &records, *delim, *headers)?;
            Ok((String::from_utf8_lossy(&buf).into_owned(), records.len()))
        }
    }
}

/// Fetch → parse → emit. Output is rendered fully before the sink is opened,
/// so a failure anywhere leaves no partial file behind.
pub fn run(opts: &Options) -> Result<RunSummary, Box<dyn Error>> {
    if let Some(log) = &opts.log {
        crate::log::init(log)?;
    }
    logf!("Run: source {:?}", opts.source);

    let doc = load_source(&opts.source)?;
    let (text, items) = generate(&doc, &opts.output)?;

    match &opts.out {
        Some(path) => {
            write_file(path, &text)?;
            logf!("Run: wrote {} ({} items)", path.display(), items);
            Ok(RunSummary { items, written: Some(path.clone()) })
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())?;
            out.flush()?;
            Ok(RunSummary { items, written: None })
        }
    }
}

fn write_file(path: &Path, text: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)?;
    Ok(())
}
