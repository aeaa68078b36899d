use crate::events::{CollectionStyle, Event};
use crate::tokenizer::{LookAheadBuffer, Scanner, Source, Token};
use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::mem;
use core::str::Chars;
use log::{debug, trace};
use yamlet_common::{
    Marker, ScalarType, Span, TagDirective, TagDirectiveCollection, TokenType, Version,
    YamlError, YamlResult,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum ParserState {
    StreamStart,
    ImplicitDocumentStart,
    DocumentStart,
    DocumentContent,
    DocumentEnd,
    BlockNode,
    BlockSequenceFirstEntry,
    BlockSequenceEntry,
    IndentlessSequenceEntry,
    BlockMappingFirstKey,
    BlockMappingKey,
    BlockMappingValue,
    FlowSequenceFirstEntry,
    FlowSequenceEntry,
    FlowSequenceEntryMappingKey,
    FlowSequenceEntryMappingValue,
    FlowSequenceEntryMappingEnd,
    FlowMappingFirstKey,
    FlowMappingKey,
    FlowMappingValue,
    FlowMappingEmptyValue,
    End,
}

enum Directive {
    Version(Version),
    Tag(TagDirective),
}

/// Turns the token stream of a [`Scanner`] into [`Event`]s.
///
/// Pull based: every call to [`Parser::move_next`] (or [`Iterator::next`]) runs the state
/// machine until exactly one event is ready. Comment tokens, when the scanner reports them,
/// surface as [`Event::Comment`] ahead of the event they precede.
///
/// The first error is sticky, every later call returns it again.
pub struct Parser<S> {
    scanner: Scanner<S>,
    state: ParserState,
    states: Vec<ParserState>,
    marks: Vec<Marker>,
    tag_directives: TagDirectiveCollection,
    pending: VecDeque<(Event, Span)>,
    current: Option<(Event, Span)>,
    error: Option<YamlError>,
}

impl<'a> Parser<LookAheadBuffer<Chars<'a>>> {
    pub fn new_from_str(input: &'a str) -> Self {
        Parser::from_scanner(Scanner::from_str_input(input))
    }

    pub fn new_from_str_with_comments(input: &'a str) -> Self {
        Parser::from_scanner(Scanner::with_comments(LookAheadBuffer::new_str(input)))
    }
}

impl<S: Source> Parser<S> {
    /// Parser over `src` that drops comments.
    pub fn new(src: S) -> Self {
        Parser::from_scanner(Scanner::new(src))
    }

    /// Parser over `src` that reports comments as events.
    pub fn with_comments(src: S) -> Self {
        Parser::from_scanner(Scanner::with_comments(src))
    }

    pub fn from_scanner(scanner: Scanner<S>) -> Self {
        Parser {
            scanner,
            state: ParserState::StreamStart,
            states: Vec::with_capacity(16),
            marks: Vec::with_capacity(16),
            tag_directives: TagDirectiveCollection::new(),
            pending: VecDeque::new(),
            current: None,
            error: None,
        }
    }

    /// The event made current by the last successful [`Parser::move_next`].
    pub fn current(&self) -> Option<&Event> {
        self.current.as_ref().map(|(ev, _)| ev)
    }

    pub fn current_span(&self) -> Option<Span> {
        self.current.as_ref().map(|(_, span)| *span)
    }

    pub(crate) fn take_current(&mut self) -> Option<(Event, Span)> {
        self.current.take()
    }

    /// Advances to the next event.
    ///
    /// Returns `Ok(false)` once `StreamEnd` has been passed.
    pub fn move_next(&mut self) -> YamlResult<bool> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.pending.is_empty() {
            if self.state == ParserState::End {
                self.current = None;
                return Ok(false);
            }
            match self.state_machine() {
                Ok(event) => self.pending.push_back(event),
                Err(err) => {
                    debug!("parser stopped: {err}");
                    self.current = None;
                    self.error = Some(err.clone());
                    return Err(err);
                }
            }
        }
        self.current = self.pending.pop_front();
        Ok(self.current.is_some())
    }

    fn peek_token(&mut self) -> YamlResult<&mut Token> {
        loop {
            if !self.scanner.move_next_without_consuming()? {
                return Err(YamlError::new_str(
                    self.scanner.current_position(),
                    "unexpected end of token stream",
                ));
            }
            let is_comment = matches!(
                self.scanner.current(),
                Some(Token {
                    token_type: TokenType::Comment { .. },
                    ..
                })
            );
            if !is_comment {
                break;
            }
            if let Some(Token {
                span,
                token_type: TokenType::Comment { value, inline },
            }) = self.scanner.consume_current()
            {
                self.pending
                    .push_back((Event::Comment { value, inline }, span));
            }
        }
        self.scanner.current_mut().ok_or(YamlError::UnexpectedEof)
    }

    fn skip_token(&mut self) {
        self.scanner.consume_current();
    }

    fn pop_state(&mut self) {
        self.state = self.states.pop().unwrap_or(ParserState::End);
    }

    fn pop_mark(&mut self, fallback: Marker) -> Marker {
        self.marks.pop().unwrap_or(fallback)
    }

    fn state_machine(&mut self) -> YamlResult<(Event, Span)> {
        trace!("parser state {:?}", self.state);
        match self.state {
            ParserState::StreamStart => self.parse_stream_start(),
            ParserState::ImplicitDocumentStart => self.parse_document_start(true),
            ParserState::DocumentStart => self.parse_document_start(false),
            ParserState::DocumentContent => self.parse_document_content(),
            ParserState::DocumentEnd => self.parse_document_end(),
            ParserState::BlockNode => self.parse_node(true, false),
            ParserState::BlockSequenceFirstEntry => self.parse_block_sequence_entry(true),
            ParserState::BlockSequenceEntry => self.parse_block_sequence_entry(false),
            ParserState::IndentlessSequenceEntry => self.parse_indentless_sequence_entry(),
            ParserState::BlockMappingFirstKey => self.parse_block_mapping_key(true),
            ParserState::BlockMappingKey => self.parse_block_mapping_key(false),
            ParserState::BlockMappingValue => self.parse_block_mapping_value(),
            ParserState::FlowSequenceFirstEntry => self.parse_flow_sequence_entry(true),
            ParserState::FlowSequenceEntry => self.parse_flow_sequence_entry(false),
            ParserState::FlowSequenceEntryMappingKey => {
                self.parse_flow_sequence_entry_mapping_key()
            }
            ParserState::FlowSequenceEntryMappingValue => {
                self.parse_flow_sequence_entry_mapping_value()
            }
            ParserState::FlowSequenceEntryMappingEnd => {
                self.parse_flow_sequence_entry_mapping_end()
            }
            ParserState::FlowMappingFirstKey => self.parse_flow_mapping_key(true),
            ParserState::FlowMappingKey => self.parse_flow_mapping_key(false),
            ParserState::FlowMappingValue => self.parse_flow_mapping_value(false),
            ParserState::FlowMappingEmptyValue => self.parse_flow_mapping_value(true),
            ParserState::End => Err(YamlError::UnexpectedEof),
        }
    }

    fn parse_stream_start(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let span = token.span;
        if token.token_type != TokenType::StreamStart {
            return Err(YamlError::syntax(span, "did not find expected <stream-start>"));
        }
        self.state = ParserState::ImplicitDocumentStart;
        self.skip_token();
        Ok((Event::StreamStart, span))
    }

    fn parse_document_start(&mut self, implicit: bool) -> YamlResult<(Event, Span)> {
        let mut token = self.peek_token()?;
        if !implicit {
            while token.token_type == TokenType::DocumentEnd {
                self.skip_token();
                token = self.peek_token()?;
            }
        }

        let span = token.span;
        let bare_document = implicit
            && !matches!(
                token.token_type,
                TokenType::VersionDirective { .. }
                    | TokenType::TagDirective { .. }
                    | TokenType::DocumentStart
                    | TokenType::StreamEnd
            );

        if bare_document {
            self.process_directives()?;
            self.states.push(ParserState::DocumentEnd);
            self.state = ParserState::BlockNode;
            let event = Event::DocumentStart {
                version: None,
                tags: TagDirectiveCollection::new(),
                implicit: true,
            };
            return Ok((event, Span::empty(span.start)));
        }

        if token.token_type == TokenType::StreamEnd {
            self.state = ParserState::End;
            self.skip_token();
            return Ok((Event::StreamEnd, span));
        }

        let start = span.start;
        let (version, tags) = self.process_directives()?;
        let token = self.peek_token()?;
        let span = token.span;
        if token.token_type != TokenType::DocumentStart {
            return Err(YamlError::syntax(span, "did not find expected <document start>"));
        }
        self.states.push(ParserState::DocumentEnd);
        self.state = ParserState::DocumentContent;
        self.skip_token();
        let event = Event::DocumentStart {
            version,
            tags,
            implicit: false,
        };
        Ok((event, Span::new(start, span.end)))
    }

    /// Reads `%YAML` and `%TAG` directives.
    ///
    /// Returns the explicitly declared ones, the active set also receives the defaults.
    fn process_directives(&mut self) -> YamlResult<(Option<Version>, TagDirectiveCollection)> {
        let mut version = None;
        let mut tags = TagDirectiveCollection::new();

        loop {
            let token = self.peek_token()?;
            let span = token.span;
            let directive = match &mut token.token_type {
                TokenType::VersionDirective { major, minor } => {
                    Directive::Version(Version::new(*major, *minor))
                }
                TokenType::TagDirective { handle, prefix } => {
                    Directive::Tag(TagDirective::new(mem::take(handle), mem::take(prefix)))
                }
                _ => break,
            };
            self.skip_token();

            match directive {
                Directive::Version(ver) => {
                    if version.is_some() {
                        return Err(YamlError::semantic(span, "found duplicate %YAML directive"));
                    }
                    if !ver.is_supported() {
                        return Err(YamlError::semantic(
                            span,
                            format!("found incompatible YAML document, version {ver} is not supported"),
                        ));
                    }
                    version = Some(ver);
                }
                Directive::Tag(tag) => {
                    if tags.contains(&tag.handle) {
                        return Err(YamlError::semantic(span, "found duplicate %TAG directive"));
                    }
                    tags.add(tag)?;
                }
            }
        }

        let mut active = tags.clone();
        for directive in TagDirective::defaults() {
            active.add_default(directive);
        }
        self.tag_directives = active;
        Ok((version, tags))
    }

    fn parse_document_content(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        if matches!(
            token.token_type,
            TokenType::VersionDirective { .. }
                | TokenType::TagDirective { .. }
                | TokenType::DocumentStart
                | TokenType::DocumentEnd
                | TokenType::StreamEnd
        ) {
            let mark = token.span.start;
            self.pop_state();
            return Ok(empty_scalar(mark));
        }
        self.parse_node(true, false)
    }

    fn parse_document_end(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let start = token.span.start;
        let mut end = start;
        let mut implicit = true;

        match token.token_type {
            TokenType::DocumentEnd => {
                end = token.span.end;
                implicit = false;
                self.skip_token();
            }
            TokenType::DocumentStart
            | TokenType::StreamEnd
            | TokenType::VersionDirective { .. }
            | TokenType::TagDirective { .. } => {}
            _ => {
                let span = token.span;
                return Err(YamlError::syntax(span, "did not find expected <document end>"));
            }
        }

        self.tag_directives.clear();
        self.state = ParserState::DocumentStart;
        Ok((Event::DocumentEnd { implicit }, Span::new(start, end)))
    }

    fn parse_node(&mut self, block: bool, indentless_sequence: bool) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let start = token.span.start;
        if let TokenType::Alias(name) = &mut token.token_type {
            let name = mem::take(name);
            let span = token.span;
            self.pop_state();
            self.skip_token();
            return Ok((Event::Alias(name), span));
        }

        let mut end = start;
        let mut anchor: Option<String> = None;
        let mut tag_parts: Option<(String, String, Span)> = None;

        loop {
            let token = self.peek_token()?;
            let span = token.span;
            match &mut token.token_type {
                TokenType::Anchor(name) => {
                    if anchor.is_some() {
                        return Err(YamlError::semantic(
                            span,
                            "while parsing a node, found more than one anchor",
                        ));
                    }
                    anchor = Some(mem::take(name));
                }
                TokenType::Tag { handle, suffix } => {
                    if tag_parts.is_some() {
                        return Err(YamlError::semantic(
                            span,
                            "while parsing a node, found more than one tag",
                        ));
                    }
                    tag_parts = Some((mem::take(handle), mem::take(suffix), span));
                }
                _ => break,
            }
            end = span.end;
            self.skip_token();
        }

        let tag = match tag_parts {
            None => None,
            Some((handle, suffix, _)) if handle.is_empty() => Some(suffix),
            Some((handle, suffix, span)) => match self.tag_directives.find(&handle) {
                Some(directive) => Some(format!("{}{}", directive.prefix, suffix)),
                None => {
                    return Err(YamlError::semantic(
                        span,
                        format!("while parsing a node, found undefined tag handle {handle}"),
                    ))
                }
            },
        };
        let implicit = tag.as_ref().map_or(true, String::is_empty);

        let token = self.peek_token()?;
        let token_span = token.span;

        if indentless_sequence && token.token_type == TokenType::BlockEntry {
            self.state = ParserState::IndentlessSequenceEntry;
            let event = Event::SequenceStart {
                anchor,
                tag,
                implicit,
                style: CollectionStyle::Block,
            };
            return Ok((event, Span::new(start, token_span.end)));
        }

        match &mut token.token_type {
            TokenType::Scalar { scalar_type, value } => {
                let style = *scalar_type;
                let value = mem::take(value);
                let plain_implicit =
                    (style == ScalarType::Plain && tag.is_none()) || tag.as_deref() == Some("!");
                let quoted_implicit = tag.is_none() && !plain_implicit;
                self.pop_state();
                self.skip_token();
                let event = Event::Scalar {
                    anchor,
                    tag,
                    value,
                    style,
                    plain_implicit,
                    quoted_implicit,
                };
                Ok((event, Span::new(start, token_span.end)))
            }
            TokenType::FlowSequenceStart => {
                self.state = ParserState::FlowSequenceFirstEntry;
                let event = Event::SequenceStart {
                    anchor,
                    tag,
                    implicit,
                    style: CollectionStyle::Flow,
                };
                Ok((event, Span::new(start, token_span.end)))
            }
            TokenType::FlowMappingStart => {
                self.state = ParserState::FlowMappingFirstKey;
                let event = Event::MappingStart {
                    anchor,
                    tag,
                    implicit,
                    style: CollectionStyle::Flow,
                };
                Ok((event, Span::new(start, token_span.end)))
            }
            TokenType::BlockSequenceStart if block => {
                self.state = ParserState::BlockSequenceFirstEntry;
                let event = Event::SequenceStart {
                    anchor,
                    tag,
                    implicit,
                    style: CollectionStyle::Block,
                };
                Ok((event, Span::new(start, token_span.end)))
            }
            TokenType::BlockMappingStart if block => {
                self.state = ParserState::BlockMappingFirstKey;
                let event = Event::MappingStart {
                    anchor,
                    tag,
                    implicit,
                    style: CollectionStyle::Block,
                };
                Ok((event, Span::new(start, token_span.end)))
            }
            _ if anchor.is_some() || tag.is_some() => {
                self.pop_state();
                let event = Event::Scalar {
                    anchor,
                    tag,
                    value: String::new(),
                    style: ScalarType::Plain,
                    plain_implicit: implicit,
                    quoted_implicit: false,
                };
                Ok((event, Span::new(start, end)))
            }
            _ => {
                let info = if block {
                    "while parsing a block node, did not find expected node content"
                } else {
                    "while parsing a flow node, did not find expected node content"
                };
                Err(YamlError::syntax(Span::new(start, token_span.start), info))
            }
        }
    }

    fn parse_block_sequence_entry(&mut self, first: bool) -> YamlResult<(Event, Span)> {
        if first {
            let token = self.peek_token()?;
            let mark = token.span.start;
            self.marks.push(mark);
            self.skip_token();
        }

        let token = self.peek_token()?;
        let span = token.span;
        match token.token_type {
            TokenType::BlockEntry => {
                let mark = span.end;
                self.skip_token();
                let token = self.peek_token()?;
                if matches!(token.token_type, TokenType::BlockEntry | TokenType::BlockEnd) {
                    self.state = ParserState::BlockSequenceEntry;
                    Ok(empty_scalar(mark))
                } else {
                    self.states.push(ParserState::BlockSequenceEntry);
                    self.parse_node(true, false)
                }
            }
            TokenType::BlockEnd => {
                self.pop_state();
                self.marks.pop();
                self.skip_token();
                Ok((Event::SequenceEnd, span))
            }
            _ => {
                let mark = self.pop_mark(span.start);
                Err(YamlError::syntax(
                    Span::new(mark, span.start),
                    "while parsing a block collection, did not find expected '-' indicator",
                ))
            }
        }
    }

    fn parse_indentless_sequence_entry(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let span = token.span;
        if token.token_type != TokenType::BlockEntry {
            self.pop_state();
            return Ok((Event::SequenceEnd, Span::empty(span.start)));
        }

        let mark = span.end;
        self.skip_token();
        let token = self.peek_token()?;
        if matches!(
            token.token_type,
            TokenType::BlockEntry | TokenType::Key | TokenType::Value | TokenType::BlockEnd
        ) {
            self.state = ParserState::IndentlessSequenceEntry;
            Ok(empty_scalar(mark))
        } else {
            self.states.push(ParserState::IndentlessSequenceEntry);
            self.parse_node(true, false)
        }
    }

    fn parse_block_mapping_key(&mut self, first: bool) -> YamlResult<(Event, Span)> {
        if first {
            let token = self.peek_token()?;
            let mark = token.span.start;
            self.marks.push(mark);
            self.skip_token();
        }

        let token = self.peek_token()?;
        let span = token.span;
        match token.token_type {
            TokenType::Key => {
                let mark = span.end;
                self.skip_token();
                let token = self.peek_token()?;
                if matches!(
                    token.token_type,
                    TokenType::Key | TokenType::Value | TokenType::BlockEnd
                ) {
                    self.state = ParserState::BlockMappingValue;
                    Ok(empty_scalar(mark))
                } else {
                    self.states.push(ParserState::BlockMappingValue);
                    self.parse_node(true, true)
                }
            }
            TokenType::BlockEnd => {
                self.pop_state();
                self.marks.pop();
                self.skip_token();
                Ok((Event::MappingEnd, span))
            }
            _ => {
                let mark = self.pop_mark(span.start);
                Err(YamlError::syntax(
                    Span::new(mark, span.start),
                    "while parsing a block mapping, did not find expected key",
                ))
            }
        }
    }

    fn parse_block_mapping_value(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let span = token.span;
        if token.token_type != TokenType::Value {
            self.state = ParserState::BlockMappingKey;
            return Ok(empty_scalar(span.start));
        }

        let mark = span.end;
        self.skip_token();
        let token = self.peek_token()?;
        if matches!(
            token.token_type,
            TokenType::Key | TokenType::Value | TokenType::BlockEnd
        ) {
            self.state = ParserState::BlockMappingKey;
            Ok(empty_scalar(mark))
        } else {
            self.states.push(ParserState::BlockMappingKey);
            self.parse_node(true, true)
        }
    }

    fn parse_flow_sequence_entry(&mut self, first: bool) -> YamlResult<(Event, Span)> {
        if first {
            let token = self.peek_token()?;
            let mark = token.span.start;
            self.marks.push(mark);
            self.skip_token();
        }

        let mut token = self.peek_token()?;
        if token.token_type != TokenType::FlowSequenceEnd {
            if !first {
                if token.token_type == TokenType::FlowEntry {
                    self.skip_token();
                    token = self.peek_token()?;
                } else {
                    let span = token.span;
                    let mark = self.pop_mark(span.start);
                    return Err(YamlError::syntax(
                        Span::new(mark, span.start),
                        "while parsing a flow sequence, did not find expected ',' or ']'",
                    ));
                }
            }

            if token.token_type == TokenType::Key {
                let span = token.span;
                self.state = ParserState::FlowSequenceEntryMappingKey;
                self.skip_token();
                let event = Event::MappingStart {
                    anchor: None,
                    tag: None,
                    implicit: true,
                    style: CollectionStyle::Flow,
                };
                return Ok((event, span));
            } else if token.token_type != TokenType::FlowSequenceEnd {
                self.states.push(ParserState::FlowSequenceEntry);
                return self.parse_node(false, false);
            }
        }

        let span = token.span;
        self.pop_state();
        self.marks.pop();
        self.skip_token();
        Ok((Event::SequenceEnd, span))
    }

    fn parse_flow_sequence_entry_mapping_key(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        if matches!(
            token.token_type,
            TokenType::Value | TokenType::FlowEntry | TokenType::FlowSequenceEnd
        ) {
            let mark = token.span.start;
            self.state = ParserState::FlowSequenceEntryMappingValue;
            Ok(empty_scalar(mark))
        } else {
            self.states.push(ParserState::FlowSequenceEntryMappingValue);
            self.parse_node(false, false)
        }
    }

    fn parse_flow_sequence_entry_mapping_value(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let span = token.span;
        if token.token_type == TokenType::Value {
            self.skip_token();
            let token = self.peek_token()?;
            if !matches!(
                token.token_type,
                TokenType::FlowEntry | TokenType::FlowSequenceEnd
            ) {
                self.states.push(ParserState::FlowSequenceEntryMappingEnd);
                return self.parse_node(false, false);
            }
            let mark = token.span.start;
            self.state = ParserState::FlowSequenceEntryMappingEnd;
            return Ok(empty_scalar(mark));
        }
        self.state = ParserState::FlowSequenceEntryMappingEnd;
        Ok(empty_scalar(span.start))
    }

    fn parse_flow_sequence_entry_mapping_end(&mut self) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let mark = token.span.start;
        self.state = ParserState::FlowSequenceEntry;
        Ok((Event::MappingEnd, Span::empty(mark)))
    }

    fn parse_flow_mapping_key(&mut self, first: bool) -> YamlResult<(Event, Span)> {
        if first {
            let token = self.peek_token()?;
            let mark = token.span.start;
            self.marks.push(mark);
            self.skip_token();
        }

        let mut token = self.peek_token()?;
        if token.token_type != TokenType::FlowMappingEnd {
            if !first {
                if token.token_type == TokenType::FlowEntry {
                    self.skip_token();
                    token = self.peek_token()?;
                } else {
                    let span = token.span;
                    let mark = self.pop_mark(span.start);
                    return Err(YamlError::syntax(
                        Span::new(mark, span.start),
                        "while parsing a flow mapping, did not find expected ',' or '}'",
                    ));
                }
            }

            if token.token_type == TokenType::Key {
                self.skip_token();
                let token = self.peek_token()?;
                if matches!(
                    token.token_type,
                    TokenType::Value | TokenType::FlowEntry | TokenType::FlowMappingEnd
                ) {
                    let mark = token.span.start;
                    self.state = ParserState::FlowMappingValue;
                    return Ok(empty_scalar(mark));
                }
                self.states.push(ParserState::FlowMappingValue);
                return self.parse_node(false, false);
            } else if token.token_type != TokenType::FlowMappingEnd {
                self.states.push(ParserState::FlowMappingEmptyValue);
                return self.parse_node(false, false);
            }
        }

        let span = token.span;
        self.pop_state();
        self.marks.pop();
        self.skip_token();
        Ok((Event::MappingEnd, span))
    }

    fn parse_flow_mapping_value(&mut self, empty: bool) -> YamlResult<(Event, Span)> {
        let token = self.peek_token()?;
        let span = token.span;
        if empty {
            self.state = ParserState::FlowMappingKey;
            return Ok(empty_scalar(span.start));
        }

        if token.token_type == TokenType::Value {
            self.skip_token();
            let token = self.peek_token()?;
            if !matches!(
                token.token_type,
                TokenType::FlowEntry | TokenType::FlowMappingEnd
            ) {
                self.states.push(ParserState::FlowMappingKey);
                return self.parse_node(false, false);
            }
            let mark = token.span.start;
            self.state = ParserState::FlowMappingKey;
            return Ok(empty_scalar(mark));
        }
        self.state = ParserState::FlowMappingKey;
        Ok(empty_scalar(span.start))
    }
}

fn empty_scalar(mark: Marker) -> (Event, Span) {
    let event = Event::Scalar {
        anchor: None,
        tag: None,
        value: String::new(),
        style: ScalarType::Plain,
        plain_implicit: true,
        quoted_implicit: false,
    };
    (event, Span::empty(mark))
}

impl<S: Source> Iterator for Parser<S> {
    type Item = YamlResult<(Event, Span)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }
        match self.move_next() {
            Ok(true) => self.take_current().map(Ok),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}
