pub(crate) mod char_utils;
mod scanner;
mod source;

pub use char_utils::{as_hex, is_alpha, is_printable};
pub use scanner::{Scanner, Token};
pub use source::{LookAheadBuffer, Source, Utf16Chars, DEFAULT_CAPACITY, MIN_CAPACITY};
