mod analysis;
mod settings;

pub use settings::{EmitterSettings, DEFAULT_MAX_SIMPLE_KEY_LENGTH, MAX_BEST_INDENT, MIN_BEST_INDENT};

use crate::events::{CollectionStyle, Event, EventKind};
use crate::tokenizer::char_utils::{is_blank, is_blank_or_break, is_break};
use crate::tokenizer::is_printable;
use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use analysis::{
    analyze_anchor, analyze_scalar, analyze_tag, analyze_tag_directive, block_scalar_hints,
    is_tag_char, ScalarAnalysis, TagAnalysis,
};
use core::{fmt, mem};
use log::{debug, trace};
use yamlet_common::{ScalarType, TagDirective, TagDirectiveCollection, YamlError, YamlResult};

/// A convenience alias for emitter functions that may fail without returning a value.
pub type EmitResult = YamlResult<()>;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum EmitterState {
    StreamStart,
    FirstDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    FlowSequenceFirstItem,
    FlowSequenceItem,
    FlowMappingFirstKey,
    FlowMappingKey,
    FlowMappingSimpleValue,
    FlowMappingValue,
    BlockSequenceFirstItem,
    BlockSequenceItem,
    BlockMappingFirstKey,
    BlockMappingKey,
    BlockMappingSimpleValue,
    BlockMappingValue,
    End,
}

struct AnchorData {
    name: String,
    alias: bool,
}

/// Writes [`Event`]s as YAML text.
///
/// Events are pushed one at a time with [`Emitter::emit`]. Up to three events are held back
/// before anything is written, so empty collections and empty documents can be recognized.
///
/// ```
/// use yamlet_core::{CollectionStyle, Emitter, Event};
///
/// let mut out = String::new();
/// let mut emitter = Emitter::new(&mut out);
/// for ev in [
///     Event::StreamStart,
///     Event::document_start(),
///     Event::mapping_start(CollectionStyle::Any),
///     Event::scalar("key"),
///     Event::scalar("value"),
///     Event::MappingEnd,
///     Event::document_end(),
///     Event::StreamEnd,
/// ] {
///     emitter.emit(ev).unwrap();
/// }
/// assert_eq!(out, "key: value\n");
/// ```
pub struct Emitter<'a> {
    writer: &'a mut dyn fmt::Write,
    settings: EmitterSettings,

    state: EmitterState,
    states: Vec<EmitterState>,
    events: VecDeque<Event>,
    indents: Vec<isize>,
    indent: isize,
    tag_directives: TagDirectiveCollection,
    flow_level: usize,

    mapping_context: bool,
    simple_key_context: bool,

    line: usize,
    column: usize,
    whitespace: bool,
    indentation: bool,
    open_ended: bool,

    anchor: Option<AnchorData>,
    tag: Option<TagAnalysis>,
    scalar: Option<ScalarAnalysis>,
    deferred_comments: Vec<(String, bool)>,
    error: Option<YamlError>,
}

impl<'a> Emitter<'a> {
    /// Create a new emitter serializing into `writer` with default settings.
    pub fn new(writer: &'a mut dyn fmt::Write) -> Self {
        Self::build(writer, EmitterSettings::default())
    }

    /// Fails with [`YamlError::InvalidArgument`] when `settings` are out of bounds.
    pub fn with_settings(writer: &'a mut dyn fmt::Write, settings: EmitterSettings) -> YamlResult<Self> {
        settings.validate()?;
        Ok(Self::build(writer, settings))
    }

    fn build(writer: &'a mut dyn fmt::Write, settings: EmitterSettings) -> Self {
        Emitter {
            writer,
            settings,
            state: EmitterState::StreamStart,
            states: Vec::new(),
            events: VecDeque::with_capacity(4),
            indents: Vec::new(),
            indent: -1,
            tag_directives: TagDirectiveCollection::new(),
            flow_level: 0,
            mapping_context: false,
            simple_key_context: false,
            line: 0,
            column: 0,
            whitespace: true,
            indentation: true,
            open_ended: false,
            anchor: None,
            tag: None,
            scalar: None,
            deferred_comments: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &EmitterSettings {
        &self.settings
    }

    /// Number of line breaks written so far.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Accepts the next event.
    ///
    /// Events arriving in an order the YAML grammar does not allow fail with
    /// [`YamlError::Emitter`]. After the first error every call returns that same error.
    pub fn emit(&mut self, event: Event) -> EmitResult {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        let result = self.enqueue(event);
        if let Err(err) = &result {
            self.error = Some(err.clone());
        }
        result
    }

    fn enqueue(&mut self, event: Event) -> EmitResult {
        self.events.push_back(event);
        while !self.need_more_events() {
            let Some(event) = self.events.pop_front() else {
                break;
            };
            self.analyze_event(&event)?;
            self.state_machine(event)?;
        }
        Ok(())
    }

    fn need_more_events(&self) -> bool {
        let Some(head) = self.events.front() else {
            return true;
        };

        let accumulate = match head.kind() {
            EventKind::DocumentStart => 1,
            EventKind::SequenceStart => 2,
            EventKind::MappingStart => 3,
            _ => return false,
        };

        let pending = self
            .events
            .iter()
            .skip(1)
            .filter(|ev| ev.kind() != EventKind::Comment)
            .count();
        if pending >= accumulate {
            return false;
        }

        let mut level = 0;
        for ev in &self.events {
            level += ev.nesting_increase();
            if level == 0 {
                return false;
            }
        }
        true
    }

    /// First queued event that is not a comment.
    fn next_structural(&self) -> Option<&Event> {
        self.events.iter().find(|ev| ev.kind() != EventKind::Comment)
    }

    fn analyze_event(&mut self, event: &Event) -> EmitResult {
        self.anchor = None;
        self.tag = None;
        self.scalar = None;

        match event {
            Event::Alias(name) => {
                analyze_anchor(name, true)?;
                self.anchor = Some(AnchorData {
                    name: name.clone(),
                    alias: true,
                });
            }
            Event::Scalar {
                anchor,
                tag,
                value,
                plain_implicit,
                quoted_implicit,
                ..
            } => {
                self.record_anchor(anchor.as_deref())?;
                if let Some(tag) = tag {
                    if self.settings.canonical
                        || (!plain_implicit && !quoted_implicit)
                        || tag == "!"
                    {
                        self.tag = Some(analyze_tag(tag, &self.tag_directives)?);
                    }
                }
                self.scalar = Some(analyze_scalar(value, self.settings.unicode));
            }
            Event::SequenceStart {
                anchor,
                tag,
                implicit,
                ..
            }
            | Event::MappingStart {
                anchor,
                tag,
                implicit,
                ..
            } => {
                self.record_anchor(anchor.as_deref())?;
                if let Some(tag) = tag {
                    if self.settings.canonical || !implicit {
                        self.tag = Some(analyze_tag(tag, &self.tag_directives)?);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn record_anchor(&mut self, anchor: Option<&str>) -> EmitResult {
        if let Some(name) = anchor {
            analyze_anchor(name, false)?;
            self.anchor = Some(AnchorData {
                name: name.to_string(),
                alias: false,
            });
        }
        Ok(())
    }

    fn state_machine(&mut self, event: Event) -> EmitResult {
        trace!("emitter {:?} <- {}", self.state, event.kind());
        if self.state == EmitterState::End {
            return Err(YamlError::emitter("expected nothing after STREAM-END"));
        }
        if let Event::Comment { value, inline } = event {
            return self.emit_comment(value, inline);
        }

        match self.state {
            EmitterState::StreamStart => self.emit_stream_start(&event),
            EmitterState::FirstDocumentStart => self.emit_document_start(event, true),
            EmitterState::DocumentStart => self.emit_document_start(event, false),
            EmitterState::DocumentContent => self.emit_document_content(event),
            EmitterState::DocumentEnd => self.emit_document_end(&event),
            EmitterState::FlowSequenceFirstItem => self.emit_flow_sequence_item(event, true),
            EmitterState::FlowSequenceItem => self.emit_flow_sequence_item(event, false),
            EmitterState::FlowMappingFirstKey => self.emit_flow_mapping_key(event, true),
            EmitterState::FlowMappingKey => self.emit_flow_mapping_key(event, false),
            EmitterState::FlowMappingSimpleValue => self.emit_flow_mapping_value(event, true),
            EmitterState::FlowMappingValue => self.emit_flow_mapping_value(event, false),
            EmitterState::BlockSequenceFirstItem => self.emit_block_sequence_item(event, true),
            EmitterState::BlockSequenceItem => self.emit_block_sequence_item(event, false),
            EmitterState::BlockMappingFirstKey => self.emit_block_mapping_key(event, true),
            EmitterState::BlockMappingKey => self.emit_block_mapping_key(event, false),
            EmitterState::BlockMappingSimpleValue => self.emit_block_mapping_value(event, true),
            EmitterState::BlockMappingValue => self.emit_block_mapping_value(event, false),
            EmitterState::End => Err(YamlError::emitter("expected nothing after STREAM-END")),
        }
    }

    fn emit_comment(&mut self, value: String, inline: bool) -> EmitResult {
        if self.flow_level > 0
            || matches!(
                self.state,
                EmitterState::FlowMappingFirstKey | EmitterState::FlowSequenceFirstItem
            )
        {
            return Ok(());
        }
        // A comment here would end up between a key and its value.
        if matches!(
            self.state,
            EmitterState::DocumentContent
                | EmitterState::BlockMappingSimpleValue
                | EmitterState::BlockMappingValue
        ) {
            self.deferred_comments.push((value, inline));
            return Ok(());
        }
        let nested = self.state == EmitterState::BlockMappingFirstKey;
        self.write_comment(&value, inline, nested)
    }

    fn flush_deferred_comments(&mut self) -> EmitResult {
        for (value, inline) in mem::take(&mut self.deferred_comments) {
            self.write_comment(&value, inline, false)?;
        }
        Ok(())
    }

    fn emit_stream_start(&mut self, event: &Event) -> EmitResult {
        if *event != Event::StreamStart {
            return Err(YamlError::emitter(format!(
                "expected STREAM-START, got {}",
                event.kind()
            )));
        }
        self.indent = -1;
        self.line = 0;
        self.column = 0;
        self.whitespace = true;
        self.indentation = true;
        self.state = EmitterState::FirstDocumentStart;
        Ok(())
    }

    fn emit_document_start(&mut self, event: Event, first: bool) -> EmitResult {
        let (version, tags, implicit) = match event {
            Event::DocumentStart {
                version,
                tags,
                implicit,
            } => (version, tags, implicit),
            Event::StreamEnd => {
                self.state = EmitterState::End;
                return Ok(());
            }
            ev => {
                return Err(YamlError::emitter(format!(
                    "expected DOCUMENT-START or STREAM-END, got {}",
                    ev.kind()
                )))
            }
        };

        let mut implicit = implicit && first && !self.settings.canonical;

        if let Some(version) = version {
            if !version.is_supported() {
                return Err(YamlError::emitter(format!(
                    "incompatible %YAML directive, version {version} is not supported"
                )));
            }
        }

        self.tag_directives.clear();
        for directive in &tags {
            analyze_tag_directive(directive)?;
            if self.tag_directives.add(directive.clone()).is_err() {
                return Err(YamlError::emitter(format!(
                    "duplicate %TAG directive {}",
                    directive.handle
                )));
            }
        }
        for directive in TagDirective::defaults() {
            self.tag_directives.add_default(directive);
        }

        if (version.is_some() || !tags.is_empty()) && self.open_ended {
            debug!("closing open ended document before directives");
            self.write_indicator("...", true, false, false)?;
            self.write_indent()?;
        }
        self.open_ended = false;

        if let Some(version) = version {
            implicit = false;
            self.write_indicator("%YAML", true, false, false)?;
            self.write_indicator(&version.to_string(), true, false, false)?;
            self.write_indent()?;
        }

        if !tags.is_empty() {
            implicit = false;
            for directive in &tags {
                self.write_indicator("%TAG", true, false, false)?;
                self.write_tag_handle(&directive.handle)?;
                self.write_tag_content(&directive.prefix, true, true)?;
                self.write_indent()?;
            }
        }

        if self.check_empty_document() {
            implicit = false;
        }

        if !implicit {
            self.write_indent()?;
            self.write_indicator("---", true, false, false)?;
            if self.settings.canonical {
                self.write_indent()?;
            }
        }

        debug!("document start, implicit: {implicit}");
        self.state = EmitterState::DocumentContent;
        Ok(())
    }

    fn emit_document_content(&mut self, event: Event) -> EmitResult {
        self.states.push(EmitterState::DocumentEnd);
        self.emit_node(event, false, false)
    }

    fn emit_document_end(&mut self, event: &Event) -> EmitResult {
        let Event::DocumentEnd { implicit } = *event else {
            return Err(YamlError::emitter(format!(
                "expected DOCUMENT-END, got {}",
                event.kind()
            )));
        };

        self.flush_deferred_comments()?;
        self.write_indent()?;
        if implicit {
            self.open_ended = true;
        } else {
            self.write_indicator("...", true, false, false)?;
            self.write_indent()?;
            self.open_ended = false;
        }
        self.tag_directives.clear();
        self.state = EmitterState::DocumentStart;
        Ok(())
    }

    fn emit_flow_sequence_item(&mut self, event: Event, first: bool) -> EmitResult {
        if first {
            self.write_indicator("[", true, true, false)?;
            self.increase_indent(true, false);
            self.flow_level += 1;
        }

        if event == Event::SequenceEnd {
            self.flow_level = self.flow_level.saturating_sub(1);
            self.pop_indent();
            if self.settings.canonical && !first {
                self.write_indicator(",", false, false, false)?;
                self.write_indent()?;
            }
            self.write_indicator("]", false, false, false)?;
            self.state = self.pop_state()?;
            return Ok(());
        }

        if !first {
            self.write_indicator(",", false, false, false)?;
        }
        if self.settings.canonical || self.column > self.settings.best_width {
            self.write_indent()?;
        }
        self.states.push(EmitterState::FlowSequenceItem);
        self.emit_node(event, false, false)
    }

    fn emit_flow_mapping_key(&mut self, event: Event, first: bool) -> EmitResult {
        if first {
            self.write_indicator("{", true, true, false)?;
            self.increase_indent(true, false);
            self.flow_level += 1;
        }

        if event == Event::MappingEnd {
            self.flow_level = self.flow_level.saturating_sub(1);
            self.pop_indent();
            if self.settings.canonical && !first {
                self.write_indicator(",", false, false, false)?;
                self.write_indent()?;
            }
            self.write_indicator("}", false, false, false)?;
            self.state = self.pop_state()?;
            return Ok(());
        }

        if !first {
            self.write_indicator(",", false, false, false)?;
        }
        if self.settings.canonical || self.column > self.settings.best_width {
            self.write_indent()?;
        }

        if !self.settings.canonical && self.check_simple_key(&event) {
            self.states.push(EmitterState::FlowMappingSimpleValue);
            self.emit_node(event, true, true)
        } else {
            self.write_indicator("?", true, false, false)?;
            self.states.push(EmitterState::FlowMappingValue);
            self.emit_node(event, true, false)
        }
    }

    fn emit_flow_mapping_value(&mut self, event: Event, simple: bool) -> EmitResult {
        if simple {
            self.write_indicator(":", false, false, false)?;
        } else {
            if self.settings.canonical || self.column > self.settings.best_width {
                self.write_indent()?;
            }
            self.write_indicator(":", true, false, false)?;
        }
        self.states.push(EmitterState::FlowMappingKey);
        self.emit_node(event, true, false)
    }

    fn emit_block_sequence_item(&mut self, event: Event, first: bool) -> EmitResult {
        if first {
            self.increase_indent(false, self.mapping_context && !self.indentation);
        }
        self.flush_deferred_comments()?;

        if event == Event::SequenceEnd {
            self.pop_indent();
            self.state = self.pop_state()?;
            return Ok(());
        }

        self.write_indent()?;
        self.write_indicator("-", true, false, true)?;
        self.states.push(EmitterState::BlockSequenceItem);
        self.emit_node(event, false, false)
    }

    fn emit_block_mapping_key(&mut self, event: Event, first: bool) -> EmitResult {
        if first {
            self.increase_indent(false, false);
        }
        self.flush_deferred_comments()?;

        if event == Event::MappingEnd {
            self.pop_indent();
            self.state = self.pop_state()?;
            return Ok(());
        }

        self.write_indent()?;
        if self.check_simple_key(&event) {
            self.states.push(EmitterState::BlockMappingSimpleValue);
            self.emit_node(event, true, true)
        } else {
            self.write_indicator("?", true, false, true)?;
            self.states.push(EmitterState::BlockMappingValue);
            self.emit_node(event, true, false)
        }
    }

    fn emit_block_mapping_value(&mut self, event: Event, simple: bool) -> EmitResult {
        if simple {
            self.write_indicator(":", false, false, false)?;
        } else {
            self.write_indent()?;
            self.write_indicator(":", true, false, true)?;
        }
        self.states.push(EmitterState::BlockMappingKey);
        self.emit_node(event, true, false)
    }

    fn emit_node(&mut self, event: Event, mapping: bool, simple_key: bool) -> EmitResult {
        self.mapping_context = mapping;
        self.simple_key_context = simple_key;

        match event {
            Event::Alias(_) => self.emit_alias(),
            Event::Scalar {
                value,
                style,
                plain_implicit,
                quoted_implicit,
                ..
            } => self.emit_scalar(&value, style, plain_implicit, quoted_implicit),
            Event::SequenceStart { style, .. } => self.emit_sequence_start(style),
            Event::MappingStart { style, .. } => self.emit_mapping_start(style),
            ev => Err(YamlError::emitter(format!(
                "expected SCALAR, SEQUENCE-START, MAPPING-START, or ALIAS, got {}",
                ev.kind()
            ))),
        }
    }

    fn emit_alias(&mut self) -> EmitResult {
        self.process_anchor()?;
        // `*a:` would read back as an alias named `a:`
        if self.simple_key_context {
            self.write_char(' ')?;
        }
        self.state = self.pop_state()?;
        Ok(())
    }

    fn emit_scalar(
        &mut self,
        value: &str,
        style: ScalarType,
        plain_implicit: bool,
        quoted_implicit: bool,
    ) -> EmitResult {
        let style = self.select_scalar_style(value, style, plain_implicit, quoted_implicit)?;
        self.process_anchor()?;
        self.process_tag()?;
        self.increase_indent(true, false);
        self.process_scalar(value, style)?;
        self.pop_indent();
        self.state = self.pop_state()?;
        Ok(())
    }

    fn emit_sequence_start(&mut self, style: CollectionStyle) -> EmitResult {
        self.process_anchor()?;
        self.process_tag()?;
        self.state = if self.flow_level > 0
            || self.settings.canonical
            || style == CollectionStyle::Flow
            || self.check_empty_sequence()
        {
            EmitterState::FlowSequenceFirstItem
        } else {
            EmitterState::BlockSequenceFirstItem
        };
        Ok(())
    }

    fn emit_mapping_start(&mut self, style: CollectionStyle) -> EmitResult {
        self.process_anchor()?;
        self.process_tag()?;
        self.state = if self.flow_level > 0
            || self.settings.canonical
            || style == CollectionStyle::Flow
            || self.check_empty_mapping()
        {
            EmitterState::FlowMappingFirstKey
        } else {
            EmitterState::BlockMappingFirstKey
        };
        Ok(())
    }

    fn check_empty_document(&self) -> bool {
        matches!(self.next_structural(), Some(Event::Scalar { value, .. }) if value.is_empty())
    }

    fn check_empty_sequence(&self) -> bool {
        matches!(self.next_structural(), Some(Event::SequenceEnd))
    }

    fn check_empty_mapping(&self) -> bool {
        matches!(self.next_structural(), Some(Event::MappingEnd))
    }

    /// Whether `event`, the key about to be written, fits on one line before a `:`.
    fn check_simple_key(&self, event: &Event) -> bool {
        let anchor_len = self.anchor.as_ref().map_or(0, |anchor| anchor.name.len());
        let tag_len = self.tag.as_ref().map_or(0, TagAnalysis::len);

        let length = match event {
            Event::Alias(_) => anchor_len,
            Event::Scalar { value, style, .. } => {
                // an empty plain key is only readable after `?`
                if value.is_empty() && *style == ScalarType::Plain {
                    return false;
                }
                if self.scalar.is_some_and(|scalar| scalar.multiline) {
                    return false;
                }
                anchor_len + tag_len + value.len()
            }
            Event::SequenceStart { .. } => {
                if !self.check_empty_sequence() {
                    return false;
                }
                anchor_len + tag_len
            }
            Event::MappingStart { .. } => {
                if !self.check_empty_mapping() {
                    return false;
                }
                anchor_len + tag_len
            }
            _ => return false,
        };
        length <= self.settings.max_simple_key_length
    }

    fn select_scalar_style(
        &mut self,
        value: &str,
        requested: ScalarType,
        plain_implicit: bool,
        quoted_implicit: bool,
    ) -> YamlResult<ScalarType> {
        let analysis = self
            .scalar
            .ok_or_else(|| YamlError::emitter("scalar was not analyzed"))?;
        let no_tag = self.tag.is_none();
        if no_tag && !plain_implicit && !quoted_implicit {
            return Err(YamlError::emitter(
                "neither tag nor implicit flags are specified",
            ));
        }

        let mut style = match requested {
            ScalarType::Any if analysis.multiline => ScalarType::Literal,
            ScalarType::Any => ScalarType::Plain,
            style => style,
        };

        if self.settings.canonical {
            style = ScalarType::DoubleQuote;
        }
        if self.simple_key_context && analysis.multiline {
            style = ScalarType::DoubleQuote;
        }

        if style == ScalarType::Plain {
            let plain_allowed = if value.is_empty() {
                // flow mapping entries may leave out a plain key or value, sequence items may not
                !self.simple_key_context
                    && (self.flow_level == 0
                        || (self.mapping_context && requested == ScalarType::Plain))
            } else if self.flow_level > 0 {
                analysis.flow_plain_allowed
            } else {
                analysis.block_plain_allowed
            };
            if !plain_allowed || (no_tag && !plain_implicit) {
                style = ScalarType::SingleQuote;
            }
        }
        if style == ScalarType::SingleQuote && !analysis.single_quoted_allowed {
            style = ScalarType::DoubleQuote;
        }
        if matches!(style, ScalarType::Literal | ScalarType::Folded)
            && (!analysis.block_allowed || self.flow_level > 0 || self.simple_key_context)
        {
            style = ScalarType::DoubleQuote;
        }

        if no_tag && !quoted_implicit && style != ScalarType::Plain {
            self.tag = Some(TagAnalysis {
                handle: Some("!".into()),
                suffix: None,
            });
        }

        if style != requested {
            debug!("scalar style {requested:?} written as {style:?}");
        }
        Ok(style)
    }

    fn process_anchor(&mut self) -> EmitResult {
        let Some(anchor) = self.anchor.take() else {
            return Ok(());
        };
        if anchor.alias {
            self.write_indicator("*", true, false, false)?;
        } else if self.settings.skip_anchor_name {
            return Ok(());
        } else {
            self.write_indicator("&", true, false, false)?;
        }
        self.write_anchor(&anchor.name)
    }

    fn process_tag(&mut self) -> EmitResult {
        let Some(tag) = self.tag.take() else {
            return Ok(());
        };
        match (tag.handle, tag.suffix) {
            (Some(handle), suffix) => {
                self.write_tag_handle(&handle)?;
                if let Some(suffix) = suffix {
                    self.write_tag_content(&suffix, false, false)?;
                }
            }
            (None, Some(suffix)) => {
                self.write_indicator("!<", true, false, false)?;
                self.write_tag_content(&suffix, false, true)?;
                self.write_indicator(">", false, false, false)?;
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn process_scalar(&mut self, value: &str, style: ScalarType) -> EmitResult {
        let allow_breaks = !self.simple_key_context;
        match style {
            ScalarType::Any | ScalarType::Plain => self.write_plain(value, allow_breaks),
            ScalarType::SingleQuote => self.write_single_quoted(value, allow_breaks),
            ScalarType::DoubleQuote => self.write_double_quoted(value, allow_breaks),
            ScalarType::Literal => self.write_literal(value),
            ScalarType::Folded => self.write_folded(value),
        }
    }

    fn increase_indent(&mut self, flow: bool, indentless: bool) {
        self.indents.push(self.indent);
        if self.indent < 0 {
            self.indent = if flow { self.best_indent() } else { 0 };
        } else if !indentless || self.settings.indent_sequences {
            self.indent += self.best_indent();
        }
    }

    fn pop_indent(&mut self) {
        self.indent = self.indents.pop().unwrap_or(-1);
    }

    fn pop_state(&mut self) -> YamlResult<EmitterState> {
        self.states
            .pop()
            .ok_or_else(|| YamlError::emitter("unbalanced collection end"))
    }

    fn best_indent(&self) -> isize {
        isize::try_from(self.settings.best_indent).unwrap_or(2)
    }

    fn write_str(&mut self, value: &str) -> EmitResult {
        self.writer.write_str(value)?;
        self.column += value.chars().count();
        Ok(())
    }

    fn write_char(&mut self, ch: char) -> EmitResult {
        self.writer.write_char(ch)?;
        self.column += 1;
        Ok(())
    }

    fn write_break(&mut self) -> EmitResult {
        self.writer.write_str(&self.settings.line_break)?;
        self.column = 0;
        self.line += 1;
        Ok(())
    }

    /// Line separators survive as-is, every other break becomes the configured line break.
    fn write_break_char(&mut self, ch: char) -> EmitResult {
        if matches!(ch, '\u{2028}' | '\u{2029}') {
            self.writer.write_char(ch)?;
            self.column = 0;
            self.line += 1;
            Ok(())
        } else {
            self.write_break()
        }
    }

    fn write_indicator(
        &mut self,
        indicator: &str,
        need_whitespace: bool,
        is_whitespace: bool,
        is_indentation: bool,
    ) -> EmitResult {
        if need_whitespace && !self.whitespace {
            self.write_char(' ')?;
        }
        self.write_str(indicator)?;
        self.whitespace = is_whitespace;
        self.indentation &= is_indentation;
        Ok(())
    }

    fn write_indent(&mut self) -> EmitResult {
        let indent = usize::try_from(self.indent).unwrap_or(0);
        if !self.indentation || self.column > indent || (self.column == indent && !self.whitespace) {
            self.write_break()?;
        }
        while self.column < indent {
            self.write_char(' ')?;
        }
        self.whitespace = true;
        self.indentation = true;
        Ok(())
    }

    fn write_anchor(&mut self, name: &str) -> EmitResult {
        self.write_str(name)?;
        self.whitespace = false;
        self.indentation = false;
        Ok(())
    }

    fn write_tag_handle(&mut self, handle: &str) -> EmitResult {
        if !self.whitespace {
            self.write_char(' ')?;
        }
        self.write_str(handle)?;
        self.whitespace = false;
        self.indentation = false;
        Ok(())
    }

    fn write_tag_content(&mut self, value: &str, need_whitespace: bool, allow_flow_chars: bool) -> EmitResult {
        if need_whitespace && !self.whitespace {
            self.write_char(' ')?;
        }
        let mut buf = [0u8; 4];
        for ch in value.chars() {
            if is_tag_char(ch, allow_flow_chars) {
                self.write_char(ch)?;
            } else {
                let encoded = urlencoding::encode(ch.encode_utf8(&mut buf));
                self.write_str(&encoded)?;
            }
        }
        self.whitespace = false;
        self.indentation = false;
        Ok(())
    }

    fn write_comment(&mut self, value: &str, inline: bool, nested: bool) -> EmitResult {
        if inline {
            self.write_str(if self.column > 0 { " #" } else { "#" })?;
            for line in comment_lines(value) {
                self.write_char(' ')?;
                self.write_str(line)?;
            }
            self.write_break()?;
        } else {
            if nested {
                self.increase_indent(false, false);
            }
            for line in comment_lines(value) {
                self.write_indent()?;
                self.write_char('#')?;
                if !line.is_empty() {
                    self.write_char(' ')?;
                    self.write_str(line)?;
                }
                self.write_break()?;
            }
            if nested {
                self.pop_indent();
            }
        }
        self.whitespace = true;
        self.indentation = true;
        Ok(())
    }

    /// A break in place of the space before `rest` once the line is past `best_width`.
    fn can_wrap_before(&self, rest: &str) -> bool {
        self.column > self.settings.best_width && !rest.is_empty()
    }

    fn write_plain(&mut self, value: &str, allow_breaks: bool) -> EmitResult {
        // `key:` reads the same as `key: ` without the trailing space
        if !self.whitespace && (!value.is_empty() || self.flow_level > 0) {
            self.write_char(' ')?;
        }

        let mut spaces = false;
        for (i, ch) in value.char_indices() {
            if ch == ' '
                && allow_breaks
                && !spaces
                && !value[i + 1..].starts_with(is_blank)
                && self.can_wrap_before(&value[i + 1..])
            {
                self.write_indent()?;
            } else {
                self.write_char(ch)?;
            }
            spaces = is_blank(ch);
        }

        self.whitespace = value.is_empty() && self.flow_level > 0;
        self.indentation = false;
        Ok(())
    }

    fn write_single_quoted(&mut self, value: &str, allow_breaks: bool) -> EmitResult {
        self.write_indicator("'", true, false, false)?;

        // a leading space counts as blank so the first character is never a break point
        let mut spaces = true;
        for (i, ch) in value.char_indices() {
            if ch == ' '
                && allow_breaks
                && !spaces
                && !value[i + 1..].starts_with(is_blank)
                && self.can_wrap_before(&value[i + 1..])
            {
                self.write_indent()?;
            } else {
                if ch == '\'' {
                    self.write_char('\'')?;
                }
                self.write_char(ch)?;
            }
            spaces = is_blank(ch);
        }

        self.write_indicator("'", false, false, false)?;
        self.whitespace = false;
        self.indentation = false;
        Ok(())
    }

    fn write_double_quoted(&mut self, value: &str, allow_breaks: bool) -> EmitResult {
        self.write_indicator("\"", true, false, false)?;

        let mut spaces = true;
        for (i, ch) in value.char_indices() {
            let rest = &value[i + ch.len_utf8()..];
            if !is_printable(ch)
                || (!self.settings.unicode && !ch.is_ascii())
                || is_break(ch)
                || ch == '"'
                || ch == '\\'
            {
                self.write_escape(ch)?;
                spaces = false;
            } else if ch == ' '
                && allow_breaks
                && !spaces
                && self.can_wrap_before(rest)
            {
                self.write_indent()?;
                // leading blanks of a continuation line are folded away
                if rest.starts_with(is_blank) {
                    self.write_char('\\')?;
                }
                spaces = true;
            } else {
                self.write_char(ch)?;
                spaces = is_blank(ch);
            }
        }

        self.write_indicator("\"", false, false, false)?;
        self.whitespace = false;
        self.indentation = false;
        Ok(())
    }

    fn write_escape(&mut self, ch: char) -> EmitResult {
        let short = match ch {
            '\0' => '0',
            '\x07' => 'a',
            '\x08' => 'b',
            '\t' => 't',
            '\n' => 'n',
            '\x0B' => 'v',
            '\x0C' => 'f',
            '\r' => 'r',
            '\x1B' => 'e',
            '"' => '"',
            '\\' => '\\',
            '\u{85}' => 'N',
            '\u{A0}' => '_',
            '\u{2028}' => 'L',
            '\u{2029}' => 'P',
            _ => {
                let code = u32::from(ch);
                let escaped = if code <= 0xFF {
                    format!("\\x{code:02X}")
                } else if code <= 0xFFFF {
                    format!("\\u{code:04X}")
                } else {
                    format!("\\U{code:08X}")
                };
                return self.write_str(&escaped);
            }
        };
        self.write_char('\\')?;
        self.write_char(short)
    }

    fn write_block_scalar_hints(&mut self, value: &str) -> EmitResult {
        let hints = block_scalar_hints(value);
        if hints.indent {
            let indent_hint = self.settings.best_indent.to_string();
            self.write_indicator(&indent_hint, false, false, false)?;
        }
        if let Some(chomp) = hints.chomp {
            let mut buf = [0u8; 4];
            self.write_indicator(chomp.encode_utf8(&mut buf), false, false, false)?;
        }
        Ok(())
    }

    fn write_literal(&mut self, value: &str) -> EmitResult {
        self.write_indicator("|", true, false, false)?;
        self.write_block_scalar_hints(value)?;
        self.write_break()?;
        self.indentation = true;
        self.whitespace = true;

        let mut breaks = true;
        for ch in value.chars() {
            if is_break(ch) {
                self.write_break_char(ch)?;
                self.indentation = true;
                breaks = true;
            } else {
                if breaks {
                    self.write_indent()?;
                }
                self.write_char(ch)?;
                self.indentation = false;
                breaks = false;
            }
        }
        Ok(())
    }

    fn write_folded(&mut self, value: &str) -> EmitResult {
        self.write_indicator(">", true, false, false)?;
        self.write_block_scalar_hints(value)?;
        self.write_break()?;
        self.indentation = true;
        self.whitespace = true;

        let mut breaks = true;
        let mut leading_spaces = true;
        for (i, ch) in value.char_indices() {
            if is_break(ch) {
                if !breaks && !leading_spaces && ch == '\n' {
                    // a single break between text lines would fold into a space
                    let next_text = value[i..].chars().find(|&c| !is_break(c));
                    if next_text.is_some_and(|c| !is_blank(c)) {
                        self.write_break()?;
                    }
                }
                self.write_break_char(ch)?;
                self.indentation = true;
                breaks = true;
            } else {
                if breaks {
                    self.write_indent()?;
                    leading_spaces = is_blank(ch);
                }
                let rest = &value[i + ch.len_utf8()..];
                // lines starting with a blank are kept verbatim, only the others fold
                if !breaks
                    && !leading_spaces
                    && ch == ' '
                    && !rest.starts_with(is_blank_or_break)
                    && self.can_wrap_before(rest)
                {
                    self.write_indent()?;
                } else {
                    self.write_char(ch)?;
                }
                self.indentation = false;
                breaks = false;
            }
        }
        Ok(())
    }
}

/// Splits a comment on `\r\n`, `\r` and `\n`.
fn comment_lines(value: &str) -> Vec<&str> {
    let bytes = value.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    while let Some(pos) = memchr::memchr2(b'\r', b'\n', &bytes[start..]) {
        let end = start + pos;
        lines.push(&value[start..end]);
        start = if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
            end + 2
        } else {
            end + 1
        };
    }
    lines.push(&value[start..]);
    lines
}
