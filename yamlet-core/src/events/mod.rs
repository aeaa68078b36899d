mod parser;
mod reader;

pub use parser::Parser;
pub use reader::EventReader;

use alloc::string::String;
use core::fmt::{Display, Formatter};
use yamlet_common::{ScalarType, TagDirectiveCollection, Version};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum CollectionStyle {
    /// Let the emitter decide.
    #[default]
    Any,
    Block,
    Flow,
}

/// Structural event produced by the [`Parser`] and consumed by the [`Emitter`](crate::Emitter).
///
/// Every `*Start` event is eventually followed by its matching `*End`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    StreamStart,
    StreamEnd,
    DocumentStart {
        version: Option<Version>,
        /// Directives declared by the document, defaults excluded.
        tags: TagDirectiveCollection,
        implicit: bool,
    },
    DocumentEnd {
        implicit: bool,
    },
    Alias(String),
    Scalar {
        anchor: Option<String>,
        tag: Option<String>,
        value: String,
        style: ScalarType,
        /// The tag may be omitted when the scalar is written plain.
        plain_implicit: bool,
        /// The tag may be omitted when the scalar is written in any non plain style.
        quoted_implicit: bool,
    },
    SequenceStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        style: CollectionStyle,
    },
    SequenceEnd,
    MappingStart {
        anchor: Option<String>,
        tag: Option<String>,
        implicit: bool,
        style: CollectionStyle,
    },
    MappingEnd,
    Comment {
        value: String,
        inline: bool,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum EventKind {
    StreamStart,
    StreamEnd,
    DocumentStart,
    DocumentEnd,
    Alias,
    Scalar,
    SequenceStart,
    SequenceEnd,
    MappingStart,
    MappingEnd,
    Comment,
}

impl EventKind {
    /// `+1` for events opening a nested structure, `-1` for the ones closing it.
    pub fn nesting_increase(self) -> i32 {
        match self {
            EventKind::StreamStart
            | EventKind::DocumentStart
            | EventKind::SequenceStart
            | EventKind::MappingStart => 1,
            EventKind::StreamEnd
            | EventKind::DocumentEnd
            | EventKind::SequenceEnd
            | EventKind::MappingEnd => -1,
            EventKind::Alias | EventKind::Scalar | EventKind::Comment => 0,
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            EventKind::StreamStart => "stream start",
            EventKind::StreamEnd => "stream end",
            EventKind::DocumentStart => "document start",
            EventKind::DocumentEnd => "document end",
            EventKind::Alias => "alias",
            EventKind::Scalar => "scalar",
            EventKind::SequenceStart => "sequence start",
            EventKind::SequenceEnd => "sequence end",
            EventKind::MappingStart => "mapping start",
            EventKind::MappingEnd => "mapping end",
            EventKind::Comment => "comment",
        };
        f.write_str(name)
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::StreamStart => EventKind::StreamStart,
            Event::StreamEnd => EventKind::StreamEnd,
            Event::DocumentStart { .. } => EventKind::DocumentStart,
            Event::DocumentEnd { .. } => EventKind::DocumentEnd,
            Event::Alias(_) => EventKind::Alias,
            Event::Scalar { .. } => EventKind::Scalar,
            Event::SequenceStart { .. } => EventKind::SequenceStart,
            Event::SequenceEnd => EventKind::SequenceEnd,
            Event::MappingStart { .. } => EventKind::MappingStart,
            Event::MappingEnd => EventKind::MappingEnd,
            Event::Comment { .. } => EventKind::Comment,
        }
    }

    pub fn nesting_increase(&self) -> i32 {
        self.kind().nesting_increase()
    }

    /// Implicit document start without directives.
    pub fn document_start() -> Self {
        Event::DocumentStart {
            version: None,
            tags: TagDirectiveCollection::new(),
            implicit: true,
        }
    }

    pub fn document_end() -> Self {
        Event::DocumentEnd { implicit: true }
    }

    /// Untagged scalar, the emitter picks the style.
    pub fn scalar(value: impl Into<String>) -> Self {
        Event::Scalar {
            anchor: None,
            tag: None,
            value: value.into(),
            style: ScalarType::Any,
            plain_implicit: true,
            quoted_implicit: true,
        }
    }

    /// Untagged scalar with a requested style.
    pub fn scalar_with_style(value: impl Into<String>, style: ScalarType) -> Self {
        Event::Scalar {
            anchor: None,
            tag: None,
            value: value.into(),
            style,
            plain_implicit: true,
            quoted_implicit: true,
        }
    }

    pub fn sequence_start(style: CollectionStyle) -> Self {
        Event::SequenceStart {
            anchor: None,
            tag: None,
            implicit: true,
            style,
        }
    }

    pub fn mapping_start(style: CollectionStyle) -> Self {
        Event::MappingStart {
            anchor: None,
            tag: None,
            implicit: true,
            style,
        }
    }
}
