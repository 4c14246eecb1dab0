// src/config/consts.rs

// Net config
pub const DEFAULT_URL: &str = "http://translate.sourceforge.net/wiki/l10n/pluralforms";
pub const USER_AGENT: &str = "genplurals/0.3";
pub const NET_TIMEOUT_SECS: u64 = 15;
pub const MAX_REDIRECTS: usize = 5;

// Generated code
pub const GENERATOR: &str = "genplurals.py"; // keeps regenerated files diff-free
pub const ANGULAR_MODULE: &str = "gettext";
pub const FACTORY_NAME: &str = "gettextPlurals";
