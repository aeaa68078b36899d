use alloc::format;
use alloc::string::String;
use yamlet_common::{YamlError, YamlResult};

pub const MIN_BEST_INDENT: usize = 2;
pub const MAX_BEST_INDENT: usize = 9;
pub const DEFAULT_MAX_SIMPLE_KEY_LENGTH: usize = 1024;

/// Layout options for the [`Emitter`](crate::Emitter).
///
/// ```
/// use yamlet_core::EmitterSettings;
///
/// let settings = EmitterSettings::default().with_best_indent(4).with_best_width(80);
/// assert!(settings.validate().is_ok());
/// assert!(EmitterSettings::default().with_best_indent(12).validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitterSettings {
    /// Spaces per indentation level.
    pub best_indent: usize,
    /// Preferred column to wrap scalars at.
    pub best_width: usize,
    /// Write every node with explicit tags and double quoted scalars.
    pub canonical: bool,
    /// Keys longer than this are written as explicit `? key` entries.
    pub max_simple_key_length: usize,
    /// Drop `&anchor` properties from the output.
    pub skip_anchor_name: bool,
    /// Indent block sequences nested in a mapping value instead of aligning them with the key.
    pub indent_sequences: bool,
    pub line_break: String,
    /// When `false`, non ASCII characters are written as escapes.
    pub unicode: bool,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        EmitterSettings {
            best_indent: MIN_BEST_INDENT,
            best_width: usize::MAX,
            canonical: false,
            max_simple_key_length: DEFAULT_MAX_SIMPLE_KEY_LENGTH,
            skip_anchor_name: false,
            indent_sequences: false,
            line_break: "\n".into(),
            unicode: true,
        }
    }
}

impl EmitterSettings {
    #[must_use]
    pub fn with_best_indent(mut self, best_indent: usize) -> Self {
        self.best_indent = best_indent;
        self
    }

    #[must_use]
    pub fn with_best_width(mut self, best_width: usize) -> Self {
        self.best_width = best_width;
        self
    }

    #[must_use]
    pub fn with_canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    #[must_use]
    pub fn with_max_simple_key_length(mut self, max_simple_key_length: usize) -> Self {
        self.max_simple_key_length = max_simple_key_length;
        self
    }

    #[must_use]
    pub fn with_skip_anchor_name(mut self, skip_anchor_name: bool) -> Self {
        self.skip_anchor_name = skip_anchor_name;
        self
    }

    #[must_use]
    pub fn with_indent_sequences(mut self, indent_sequences: bool) -> Self {
        self.indent_sequences = indent_sequences;
        self
    }

    #[must_use]
    pub fn with_line_break(mut self, line_break: impl Into<String>) -> Self {
        self.line_break = line_break.into();
        self
    }

    #[must_use]
    pub fn with_unicode(mut self, unicode: bool) -> Self {
        self.unicode = unicode;
        self
    }

    pub fn validate(&self) -> YamlResult<()> {
        if !(MIN_BEST_INDENT..=MAX_BEST_INDENT).contains(&self.best_indent) {
            return Err(YamlError::InvalidArgument(format!(
                "best indent must be between {MIN_BEST_INDENT} and {MAX_BEST_INDENT}, got {}",
                self.best_indent
            )));
        }
        if self.best_width <= self.best_indent * 2 {
            return Err(YamlError::InvalidArgument(format!(
                "best width must be greater than twice the indent ({}), got {}",
                self.best_indent * 2,
                self.best_width
            )));
        }
        if !matches!(self.line_break.as_str(), "\n" | "\r\n" | "\r") {
            return Err(YamlError::InvalidArgument(format!(
                "unsupported line break {:?}",
                self.line_break
            )));
        }
        Ok(())
    }
}
