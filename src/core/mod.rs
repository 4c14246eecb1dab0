// src/core/mod.rs

pub mod entities;
pub mod html;
pub mod net;

pub use html::{Token, Tokens};
