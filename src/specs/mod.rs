// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific extraction. A spec knows *where the ground truth lives in the
//! HTML* of one page and how to pull it out of the token stream; it does not
//! fetch, cache or format anything.
//!
//! ## Typical call chain
//! ```text
//! cli → runner::run → runner::load_source (core::net / file)
//!                   → specs::pluralforms::extract → rules::RuleTable
//!                   → emit::write_js
//! ```
//!
//! ## Conventions
//! - Work on `core::html::Tokens`, never on regexes over the whole document.
//! - Silent on rows that don't fit; a debug log line at most.
//! - Testable offline against saved pages (`tests/fixtures`).
pub mod pluralforms;
