mod tags;

pub use tags::{TagDirective, TagDirectiveCollection, DEFAULT_TAG_DIRECTIVES};

use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Hash)]
pub enum ScalarType {
    /// No preference, the emitter is free to pick whatever style fits the value.
    #[default]
    Any,
    /// Unquoted string type like:
    /// ```yaml
    ///   multiline
    ///   string
    /// ```
    Plain,
    /// Folded string type like:
    /// ```yaml
    ///   >
    ///     folded
    ///     string
    /// ```
    Folded,
    /// Literal string type like:
    /// ```yaml
    ///   |
    ///     literal
    ///     string
    /// ```
    Literal,
    /// Single quote string which permits any symbol inside
    /// E.g. :
    /// ```yaml
    /// ' This is a quoted string
    ///    with ''quoted'' string within.'
    /// ```
    SingleQuote,
    /// Double quote string with backslash escapes
    /// E.g. :
    /// ```yaml
    /// "This is a quoted string
    ///    with \"double quoted\" string within."
    /// ```
    DoubleQuote,
}

impl Display for ScalarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarType::Any | ScalarType::Plain => write!(f, ":"),
            ScalarType::Folded => write!(f, ">"),
            ScalarType::Literal => write!(f, "|"),
            ScalarType::SingleQuote => write!(f, "'"),
            ScalarType::DoubleQuote => write!(f, "\""),
        }
    }
}

/// `%YAML major.minor` version pair.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const V1_1: Version = Version { major: 1, minor: 1 };

    pub fn new(major: u32, minor: u32) -> Self {
        Version { major, minor }
    }

    /// Only YAML 1.1 documents are accepted by the parser and emitter.
    pub fn is_supported(&self) -> bool {
        *self == Version::V1_1
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum TokenType {
    StreamStart,
    StreamEnd,
    VersionDirective {
        major: u32,
        minor: u32,
    },
    TagDirective {
        handle: String,
        prefix: String,
    },
    DocumentStart,
    DocumentEnd,
    BlockSequenceStart,
    BlockMappingStart,
    BlockEnd,
    BlockEntry,
    FlowEntry,
    Key,
    Value,
    FlowSequenceStart,
    FlowSequenceEnd,
    FlowMappingStart,
    FlowMappingEnd,
    Alias(String),
    Anchor(String),
    Tag {
        handle: String,
        suffix: String,
    },
    Scalar {
        scalar_type: ScalarType,
        value: String,
    },
    Comment {
        value: String,
        inline: bool,
    },
}

impl TokenType {
    /// Short human readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::StreamStart => "stream start",
            TokenType::StreamEnd => "stream end",
            TokenType::VersionDirective { .. } => "%YAML directive",
            TokenType::TagDirective { .. } => "%TAG directive",
            TokenType::DocumentStart => "document start",
            TokenType::DocumentEnd => "document end",
            TokenType::BlockSequenceStart => "block sequence start",
            TokenType::BlockMappingStart => "block mapping start",
            TokenType::BlockEnd => "block end",
            TokenType::BlockEntry => "block entry",
            TokenType::FlowEntry => "flow entry",
            TokenType::Key => "key",
            TokenType::Value => "value",
            TokenType::FlowSequenceStart => "flow sequence start",
            TokenType::FlowSequenceEnd => "flow sequence end",
            TokenType::FlowMappingStart => "flow mapping start",
            TokenType::FlowMappingEnd => "flow mapping end",
            TokenType::Alias(_) => "alias",
            TokenType::Anchor(_) => "anchor",
            TokenType::Tag { .. } => "tag",
            TokenType::Scalar { .. } => "scalar",
            TokenType::Comment { .. } => "comment",
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ChompIndicator {
    /// `-` final line break and any trailing empty lines are excluded from the scalar’s content
    Strip,
    ///  ` ` final line break character is preserved in the scalar’s content
    Clip,
    /// `+` final line break and any trailing empty lines are considered to be part of the scalar’s content
    Keep,
}

#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Marker {
    /// Index in characters of the input.
    pub index: usize,
    /// Line of mark. Zero indexed.
    pub line: usize,
    /// Column of mark. Zero indexed.
    pub col: usize,
}

impl Marker {
    pub fn new(index: usize, line: usize, col: usize) -> Self {
        Marker { index, line, col }
    }
}

impl Display for Marker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.col + 1)
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Eq, Default, Hash)]
pub struct Span {
    pub start: Marker,
    pub end: Marker,
}

impl Span {
    pub fn new(start: Marker, end: Marker) -> Self {
        Span { start, end }
    }

    pub fn empty(mark: Marker) -> Self {
        Span {
            start: mark,
            end: mark,
        }
    }
}

/// A specialized `Result` type where the error is hard-wired to [`YamlError`].
pub type YamlResult<T> = Result<T, YamlError>;
pub type ScanResult = Result<(), YamlError>;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum YamlError {
    /// Malformed input found by the scanner or the parser.
    #[error("{info} ({})", .span.start)]
    Syntax { span: Span, info: String },
    /// Well-formed tokens that break YAML rules, like duplicate directives.
    #[error("{info} ({})", .span.start)]
    Semantic { span: Span, info: String },
    /// Events were pushed into the emitter in an order it cannot write.
    #[error("emitter error: {0}")]
    Emitter(String),
    #[error("value out of range: {0}")]
    OutOfRange(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unexpected end of stream")]
    UnexpectedEof,
    #[error("failed to write output")]
    Fmt(#[from] core::fmt::Error),
}

impl YamlError {
    pub fn new_str(marker: Marker, info: &str) -> Self {
        YamlError::Syntax {
            span: Span::empty(marker),
            info: info.to_string(),
        }
    }

    pub fn syntax(span: Span, info: impl Into<String>) -> Self {
        YamlError::Syntax {
            span,
            info: info.into(),
        }
    }

    pub fn semantic(span: Span, info: impl Into<String>) -> Self {
        YamlError::Semantic {
            span,
            info: info.into(),
        }
    }

    pub fn emitter(info: impl Into<String>) -> Self {
        YamlError::Emitter(info.into())
    }

    /// Location of the offending input, if the error came from reading.
    pub fn span(&self) -> Option<Span> {
        match self {
            YamlError::Syntax { span, .. } | YamlError::Semantic { span, .. } => Some(*span),
            _ => None,
        }
    }
}
