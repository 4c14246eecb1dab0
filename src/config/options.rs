// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::csv::Delim;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub source: Source,
    /// None → stdout
    pub out: Option<PathBuf>,
    pub output: OutputKind,
    /// None → logging off
    pub log: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: Source::default(),
            out: None,
            output: OutputKind::Js(EmitOptions::default()),
            log: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl Default for Source {
    fn default() -> Self { Source::Url(s!(DEFAULT_URL)) }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputKind {
    /// The angular-gettext plural factory.
    Js(EmitOptions),
    /// One row per language: code, name, nplurals, expression.
    Table { delim: Delim, headers: bool },
    /// Scraped cells before normalization: code, name, rule text.
    Records { delim: Delim, headers: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    pub generator: String,
    pub module: String,
    pub factory: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            generator: s!(GENERATOR),
            module: s!(ANGULAR_MODULE),
            factory: s!(FACTORY_NAME),
        }
    }
}
