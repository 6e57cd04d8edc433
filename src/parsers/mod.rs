//! Transcript parsers.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait.
//!
//! # Available Parsers
//!
//! - [`WhatsAppParser`] - Parses WhatsApp TXT exports

mod whatsapp;

pub use whatsapp::WhatsAppParser;
