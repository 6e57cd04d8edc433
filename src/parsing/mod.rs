//! Shared transcript grammar utilities.
//!
//! Low-level pieces used by the [`parsers`](crate::parsers) and the
//! [`classify`](crate::classify) module: date grammars, timestamp parsing and
//! line recognition.

pub mod whatsapp;

pub use whatsapp::{
    DateFormat, LineGrammar, LineMatch, detect_whatsapp_format, parse_whatsapp_timestamp,
    strip_direction_marks,
};
