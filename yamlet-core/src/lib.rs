//! YAML 1.1 scanner, parser and emitter.
//!
//! Text goes through the [`Scanner`] into [`Token`]s, the [`Parser`] turns those into
//! [`Event`]s and the [`Emitter`] writes events back out as YAML.
//!
//! ```
//! use yamlet_core::{Emitter, Parser};
//!
//! let mut out = String::new();
//! let mut emitter = Emitter::new(&mut out);
//! for ev in Parser::new_from_str("{a: [1, 2]}") {
//!     emitter.emit(ev.unwrap().0).unwrap();
//! }
//! assert_eq!(out, "{a: [1, 2]}\n");
//! ```
#![no_std]
extern crate alloc;

mod emitter;
mod events;
mod tokenizer;

pub use emitter::{
    EmitResult, Emitter, EmitterSettings, DEFAULT_MAX_SIMPLE_KEY_LENGTH, MAX_BEST_INDENT,
    MIN_BEST_INDENT,
};
pub use events::{CollectionStyle, Event, EventKind, EventReader, Parser};
pub use tokenizer::{
    as_hex, is_alpha, is_printable, LookAheadBuffer, Scanner, Source, Token, Utf16Chars,
    DEFAULT_CAPACITY, MIN_CAPACITY,
};
pub use yamlet_common::{
    ChompIndicator, Marker, ScalarType, Span, TagDirective, TagDirectiveCollection, TokenType,
    Version, YamlError, YamlResult, DEFAULT_TAG_DIRECTIVES,
};
