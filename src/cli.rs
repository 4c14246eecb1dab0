// src/cli.rs
use std::error::Error;
use std::path::PathBuf;

use crate::config::options::{EmitOptions, Options, OutputKind, Source};
use crate::csv::Delim;
use crate::runner::{self, RunSummary};

pub const HELP: &str = include_str!("cli_help.txt");

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Dump { Js, Table, Records }

/// Parse process args and run. Help goes to stderr.
pub fn run() -> Result<Option<RunSummary>, Box<dyn Error>> {
    match parse_args(std::env::args().skip(1))? {
        Command::Help => {
            eprintln!("{HELP}");
            Ok(None)
        }
        Command::Run(opts) => {
            let summary = runner::run(&opts).inspect_err(|e| loge!("{e}"))?;
            if let Some(path) = &summary.written {
                eprintln!("Wrote {} ({} entries)", path.display(), summary.items);
            }
            Ok(Some(summary))
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Command, Box<dyn Error>> {
    let mut opts = Options::default();
    let mut emit = EmitOptions::default();
    let mut dump = Dump::Js;
    let mut delim = Delim::Csv;
    let mut headers = false;
    let (mut url, mut input) = (None, None);

    let mut args = args.into_iter();
    while let Some(a) = args.next() {
        match a.as_str()
        {
            "--url" => url = Some(args.next().ok_or("Missing value for --url")?),
            "-i" | "--input" => input = Some(PathBuf::from(args.next().ok_or("Missing input file")?)),
            "-o" | "--out" => opts.out = Some(PathBuf::from(args.next().ok_or("Missing output path")?)),
            "--module" => emit.module = non_empty(args.next(), "--module")?,
            "--factory" => emit.factory = non_empty(args.next(), "--factory")?,
            "--table" => dump = Dump::Table,
            "--records" => dump = Dump::Records,
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                delim = Delim::parse(&v).ok_or_else(|| format!("Unknown format: {}", v))?;}
            "--headers" => headers = true,
            "--log" => opts.log = Some(PathBuf::from(args.next().ok_or("Missing log file")?)),
            "-h" | "--help" => return Ok(Command::Help),
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    opts.source = match (url, input) {
        (Some(_), Some(_)) => return Err("Use either --url or --input, not both".into()),
        (Some(u), None) => Source::Url(u),
        (None, Some(p)) => Source::File(p),
        (None, None) => Source::default(),
    };
    opts.output = match dump {
        Dump::Js => OutputKind::Js(emit),
        Dump::Table => OutputKind::Table { delim, headers },
        Dump::Records => OutputKind::Records { delim, headers },
    };
    Ok(Command::Run(opts))
}

fn non_empty(v: Option<String>, flag: &str) -> Result<String, Box<dyn Error>> {
    let v = v.ok_or_else(|| format!("Missing value for {}", flag))?;
    let v = v.trim();
    if v.is_empty() {
        return Err(format!("Empty value for {}", flag).into());
    }
    Ok(s!(v))
}
