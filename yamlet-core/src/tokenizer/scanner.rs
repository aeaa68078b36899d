use crate::tokenizer::char_utils::*;
use crate::tokenizer::source::{LookAheadBuffer, Source};
use alloc::collections::VecDeque;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::Chars;
use log::{trace, warn};
use yamlet_common::TokenType::{
    BlockEnd, BlockEntry, FlowEntry, FlowMappingEnd, FlowMappingStart, FlowSequenceEnd,
    FlowSequenceStart, Key, StreamEnd, StreamStart, Value,
};
use yamlet_common::{
    ChompIndicator, Marker, ScalarType, ScanResult, Span, TokenType, YamlError, YamlResult,
};

/// Simple keys longer than this can no longer be completed by a `:`.
const MAX_SIMPLE_KEY_LENGTH: usize = 1024;
/// Longest accepted number in a `%YAML` directive.
const MAX_VERSION_DIGITS: usize = 9;

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub span: Span,
    pub token_type: TokenType,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SimpleKey {
    possible: bool,
    required: bool,
    token_number: usize,
    mark: Marker,
}

impl SimpleKey {
    fn new(mark: Marker) -> SimpleKey {
        SimpleKey {
            possible: false,
            required: false,
            token_number: 0,
            mark,
        }
    }
}

/// Turns characters into [`Token`]s, one at a time.
///
/// Block structure is not explicit in YAML, so the scanner keeps a stack of indentation
/// columns and synthesizes `BlockSequenceStart`, `BlockMappingStart` and `BlockEnd` tokens
/// when the column grows or shrinks. Mapping keys without a `?` are only recognized once the
/// `:` is found, at which point a `Key` token is inserted back into the queue.
pub struct Scanner<S> {
    src: S,
    mark: Marker,
    tokens: VecDeque<Token>,
    error: Option<YamlError>,

    simple_keys: Vec<SimpleKey>,
    indents: Vec<isize>,
    indent: isize,
    flow_level: usize,
    tokens_parsed: usize,

    token_available: bool,
    simple_key_allowed: bool,
    stream_start_produced: bool,
    stream_end_fetched: bool,
    stream_end_produced: bool,
    skip_comments: bool,
    /// End of the last token queued, and whether it was `StreamStart`.
    last_token_end: Option<(Marker, bool)>,
}

impl<'a> Scanner<LookAheadBuffer<Chars<'a>>> {
    pub fn from_str_input(input: &'a str) -> Self {
        Scanner::new(LookAheadBuffer::new_str(input))
    }
}

impl<S: Source> Scanner<S> {
    /// Creates a scanner that skips comments.
    pub fn new(src: S) -> Scanner<S> {
        Scanner {
            src,
            mark: Marker::default(),
            tokens: VecDeque::new(),
            error: None,
            simple_keys: Vec::new(),
            indents: Vec::new(),
            indent: -1,
            flow_level: 0,
            tokens_parsed: 0,
            token_available: false,
            simple_key_allowed: false,
            stream_start_produced: false,
            stream_end_fetched: false,
            stream_end_produced: false,
            skip_comments: true,
            last_token_end: None,
        }
    }

    /// Creates a scanner that reports comments as [`TokenType::Comment`].
    pub fn with_comments(src: S) -> Scanner<S> {
        let mut scanner = Scanner::new(src);
        scanner.skip_comments = false;
        scanner
    }

    pub fn skip_comments(&self) -> bool {
        self.skip_comments
    }

    /// Position of the cursor in the input.
    pub fn current_position(&self) -> Marker {
        self.mark
    }

    /// Token at the head of the queue, if [`Scanner::move_next_without_consuming`] made one
    /// available.
    pub fn current(&self) -> Option<&Token> {
        if self.token_available {
            self.tokens.front()
        } else {
            None
        }
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut Token> {
        if self.token_available {
            self.tokens.front_mut()
        } else {
            None
        }
    }

    /// Consumes the current token, if any, and makes the next one current.
    ///
    /// Returns `false` once the `StreamEnd` token has been consumed.
    pub fn move_next(&mut self) -> YamlResult<bool> {
        if self.token_available {
            self.consume_current();
        }
        self.move_next_without_consuming()
    }

    /// Makes the next token current without counting it as parsed.
    ///
    /// Calling it again before [`Scanner::consume_current`] returns the same token.
    pub fn move_next_without_consuming(&mut self) -> YamlResult<bool> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if !self.token_available {
            if self.stream_end_produced {
                return Ok(false);
            }
            if let Err(err) = self.fetch_more_tokens() {
                self.error = Some(err.clone());
                return Err(err);
            }
        }
        Ok(!self.tokens.is_empty())
    }

    /// Removes the current token from the queue and returns it.
    pub fn consume_current(&mut self) -> Option<Token> {
        if !self.token_available {
            return None;
        }
        let tok = self.tokens.pop_front()?;
        self.token_available = false;
        self.tokens_parsed += 1;
        if tok.token_type == StreamEnd {
            self.stream_end_produced = true;
        }
        Some(tok)
    }

    fn push_token(&mut self, token: Token) {
        trace!("queued {} at {}", token.token_type.name(), token.span.start);
        self.last_token_end = Some((token.span.end, token.token_type == StreamStart));
        self.tokens.push_back(token);
    }

    fn insert_token(&mut self, pos: usize, token: Token) {
        let pos = pos.min(self.tokens.len());
        self.tokens.insert(pos, token);
    }

    fn fetch_more_tokens(&mut self) -> ScanResult {
        let mut need_more;
        loop {
            if self.tokens.is_empty() {
                need_more = true;
            } else {
                need_more = false;
                self.stale_simple_keys()?;
                for sk in &self.simple_keys {
                    if sk.possible && sk.token_number == self.tokens_parsed {
                        need_more = true;
                        break;
                    }
                }
            }

            if !need_more || self.stream_end_fetched {
                break;
            }
            self.fetch_next_token()?;
        }
        self.token_available = !self.tokens.is_empty();
        Ok(())
    }

    fn fetch_next_token(&mut self) -> ScanResult {
        if !self.stream_start_produced {
            self.fetch_stream_start();
            return Ok(());
        }

        self.skip_to_next_token()?;
        self.stale_simple_keys()?;
        self.unroll_indent(self.mark.col as isize);

        if self.src.end_of_input() {
            return self.fetch_stream_end();
        }

        if self.mark.col == 0 {
            if self.src.next_is('%') {
                return self.fetch_directive();
            } else if self.src.next_is_three('-') && is_blank_or_breakz(self.src.peek_nth(3)) {
                return self.fetch_document_indicator(TokenType::DocumentStart);
            } else if self.src.next_is_three('.') && is_blank_or_breakz(self.src.peek_nth(3)) {
                return self.fetch_document_indicator(TokenType::DocumentEnd);
            }
        }

        self.fetch_main_loop()
    }

    fn fetch_main_loop(&mut self) -> ScanResult {
        let in_flow = self.flow_level > 0;
        match self.src.peek_two() {
            ['[', _] => self.fetch_flow_collection_start(FlowSequenceStart),
            ['{', _] => self.fetch_flow_collection_start(FlowMappingStart),
            [']', _] => self.fetch_flow_collection_end(FlowSequenceEnd),
            ['}', _] => self.fetch_flow_collection_end(FlowMappingEnd),
            [',', _] => self.fetch_flow_entry(),
            ['-', x] if is_blank_or_breakz(x) => self.fetch_block_entry(),
            ['?', x] if in_flow || is_blank_or_breakz(x) => self.fetch_key(),
            [':', x] if in_flow || is_blank_or_breakz(x) => self.fetch_value(),
            ['*', _] => self.fetch_anchor(true),
            ['&', _] => self.fetch_anchor(false),
            ['!', _] => self.fetch_tag(),
            ['|', _] if !in_flow => self.fetch_block_scalar(true),
            ['>', _] if !in_flow => self.fetch_block_scalar(false),
            ['\'', _] => self.fetch_flow_scalar(true),
            ['"', _] => self.fetch_flow_scalar(false),
            ['-', x] if !is_blank(x) => self.fetch_plain_scalar(),
            ['?' | ':', x] if !in_flow && !is_blank_or_breakz(x) => self.fetch_plain_scalar(),
            [c, _]
                if !is_blank_or_breakz(c)
                    && is_printable(c)
                    && !"-?:,[]{}#&*!|>'\"%@`".contains(c) =>
            {
                self.fetch_plain_scalar()
            }
            [c, _] => {
                let info = if c == '\0' {
                    "while scanning for the next token, found unexpected null character".to_string()
                } else {
                    format!(
                        "while scanning for the next token, found character {c:?} that cannot start any token"
                    )
                };
                Err(YamlError::new_str(self.mark, &info))
            }
        }
    }

    fn fetch_stream_start(&mut self) {
        let mark = self.mark;
        self.indent = -1;
        self.stream_start_produced = true;
        self.simple_key_allowed = true;
        self.simple_keys.push(SimpleKey::new(Marker::default()));
        self.push_token(Token {
            span: Span::empty(mark),
            token_type: StreamStart,
        });
    }

    fn fetch_stream_end(&mut self) -> ScanResult {
        // force new line
        if self.mark.col != 0 {
            self.mark.col = 0;
            self.mark.line += 1;
        }

        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.simple_key_allowed = false;
        self.stream_end_fetched = true;

        self.push_token(Token {
            span: Span::empty(self.mark),
            token_type: StreamEnd,
        });
        Ok(())
    }

    fn fetch_directive(&mut self) -> ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.simple_key_allowed = false;

        if let Some(tok) = self.scan_directive()? {
            self.push_token(tok);
        }
        Ok(())
    }

    fn fetch_document_indicator(&mut self, token_type: TokenType) -> ScanResult {
        self.unroll_indent(-1);
        self.remove_simple_key()?;
        self.simple_key_allowed = false;

        let mark = self.mark;
        self.skip_n(3)?;
        self.push_token(Token {
            span: Span::new(mark, self.mark),
            token_type,
        });
        Ok(())
    }

    fn fetch_flow_collection_start(&mut self, token_type: TokenType) -> ScanResult {
        // '[' and '{' may start a simple key.
        self.save_simple_key()?;
        self.increase_flow_level();
        self.simple_key_allowed = true;

        let start_mark = self.mark;
        self.skip()?;
        self.push_token(Token {
            span: Span::new(start_mark, self.mark),
            token_type,
        });
        Ok(())
    }

    fn fetch_flow_collection_end(&mut self, token_type: TokenType) -> ScanResult {
        self.remove_simple_key()?;
        self.decrease_flow_level();
        self.simple_key_allowed = false;

        let start_mark = self.mark;
        self.skip()?;
        self.push_token(Token {
            span: Span::new(start_mark, self.mark),
            token_type,
        });
        Ok(())
    }

    fn fetch_flow_entry(&mut self) -> ScanResult {
        self.remove_simple_key()?;
        self.simple_key_allowed = true;

        let start_mark = self.mark;
        self.skip()?;
        self.push_token(Token {
            span: Span::new(start_mark, self.mark),
            token_type: FlowEntry,
        });
        Ok(())
    }

    fn fetch_block_entry(&mut self) -> ScanResult {
        if self.flow_level == 0 {
            if !self.simple_key_allowed {
                return Err(YamlError::new_str(
                    self.mark,
                    "block sequence entries are not allowed in this context",
                ));
            }
            let mark = self.mark;
            self.roll_indent(mark.col, None, TokenType::BlockSequenceStart, mark);
        }

        self.remove_simple_key()?;
        self.simple_key_allowed = true;

        let start_mark = self.mark;
        self.skip()?;
        self.push_token(Token {
            span: Span::new(start_mark, self.mark),
            token_type: BlockEntry,
        });
        Ok(())
    }

    fn fetch_key(&mut self) -> ScanResult {
        let start_mark = self.mark;
        if self.flow_level == 0 {
            if !self.simple_key_allowed {
                return Err(YamlError::new_str(
                    self.mark,
                    "mapping keys are not allowed in this context",
                ));
            }
            self.roll_indent(start_mark.col, None, TokenType::BlockMappingStart, start_mark);
        }

        self.remove_simple_key()?;
        self.simple_key_allowed = self.flow_level == 0;

        self.skip()?;
        self.push_token(Token {
            span: Span::new(start_mark, self.mark),
            token_type: Key,
        });
        Ok(())
    }

    fn fetch_value(&mut self) -> ScanResult {
        let start_mark = self.mark;
        let sk = self
            .simple_keys
            .last()
            .cloned()
            .unwrap_or_else(|| SimpleKey::new(start_mark));

        if sk.possible {
            let pos = sk.token_number.saturating_sub(self.tokens_parsed);
            self.insert_token(
                pos,
                Token {
                    span: Span::empty(sk.mark),
                    token_type: Key,
                },
            );
            self.roll_indent(
                sk.mark.col,
                Some(sk.token_number),
                TokenType::BlockMappingStart,
                sk.mark,
            );
            if let Some(last) = self.simple_keys.last_mut() {
                last.possible = false;
            }
            self.simple_key_allowed = false;
        } else {
            if self.flow_level == 0 {
                if !self.simple_key_allowed {
                    return Err(YamlError::new_str(
                        start_mark,
                        "mapping values are not allowed in this context",
                    ));
                }
                self.roll_indent(start_mark.col, None, TokenType::BlockMappingStart, start_mark);
            }
            self.simple_key_allowed = self.flow_level == 0;
        }

        self.skip()?;
        self.push_token(Token {
            span: Span::new(start_mark, self.mark),
            token_type: Value,
        });
        Ok(())
    }

    fn fetch_anchor(&mut self, alias: bool) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_anchor(alias)?;
        self.push_token(tok);
        Ok(())
    }

    fn fetch_tag(&mut self) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_tag()?;
        self.push_token(tok);
        Ok(())
    }

    fn fetch_block_scalar(&mut self, literal: bool) -> ScanResult {
        // A simple key may follow a block scalar.
        self.remove_simple_key()?;
        self.simple_key_allowed = true;

        let tok = self.scan_block_scalar(literal)?;
        self.push_token(tok);
        Ok(())
    }

    fn fetch_flow_scalar(&mut self, single: bool) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_flow_scalar(single)?;
        self.push_token(tok);
        Ok(())
    }

    fn fetch_plain_scalar(&mut self) -> ScanResult {
        self.save_simple_key()?;
        self.simple_key_allowed = false;

        let tok = self.scan_plain_scalar()?;
        self.push_token(tok);
        Ok(())
    }

    #[inline]
    fn skip(&mut self) -> ScanResult {
        self.src.skip(1)?;
        self.mark.index += 1;
        self.mark.col += 1;
        Ok(())
    }

    fn skip_n(&mut self, n: usize) -> ScanResult {
        for _ in 0..n {
            self.skip()?;
        }
        Ok(())
    }

    /// Skips a line break, treating `\r\n` as one.
    fn skip_line(&mut self) -> ScanResult {
        match self.src.peek_two() {
            ['\r', '\n'] => {
                self.src.skip(2)?;
                self.mark.index += 2;
            }
            [c, _] if is_break(c) => {
                self.src.skip(1)?;
                self.mark.index += 1;
            }
            _ => return Ok(()),
        }
        self.mark.col = 0;
        self.mark.line += 1;
        Ok(())
    }

    /// Consumes a line break and appends its normalized form to `out`.
    fn read_line(&mut self, out: &mut String) -> ScanResult {
        match self.src.peek() {
            '\r' | '\n' | '\u{85}' => out.push('\n'),
            c @ ('\u{2028}' | '\u{2029}') => out.push(c),
            _ => return Ok(()),
        }
        self.skip_line()
    }

    /// Consumes the current character and appends it to `out`.
    #[inline]
    fn read_char(&mut self, out: &mut String) -> ScanResult {
        out.push(self.src.peek());
        self.skip()
    }

    fn skip_to_next_token(&mut self) -> ScanResult {
        loop {
            if self.mark.index == 0 && self.src.next_is('\u{FEFF}') {
                self.skip()?;
            }

            // Tabs are fine in flow context and after an indicator, not as indentation.
            loop {
                let c = self.src.peek();
                if c == ' ' || (c == '\t' && (self.flow_level > 0 || !self.simple_key_allowed)) {
                    self.skip()?;
                } else {
                    break;
                }
            }

            self.scan_comment()?;

            if self.src.next_is_break() {
                self.skip_line()?;
                if self.flow_level == 0 {
                    self.simple_key_allowed = true;
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Consumes a comment running to the end of line, queueing a token unless comments are
    /// skipped.
    fn scan_comment(&mut self) -> ScanResult {
        if !self.src.next_is('#') {
            return Ok(());
        }
        let start = self.mark;
        self.skip()?;
        while self.src.next_is(' ') {
            self.skip()?;
        }

        let mut text = String::new();
        while !self.src.next_is_breakz() {
            self.read_char(&mut text)?;
        }

        if !self.skip_comments {
            let inline = match self.last_token_end {
                Some((end, is_stream_start)) => {
                    !is_stream_start && end.line == start.line && end.col != 0
                }
                None => false,
            };
            self.push_token(Token {
                span: Span::new(start, self.mark),
                token_type: TokenType::Comment {
                    value: text,
                    inline,
                },
            });
        }
        Ok(())
    }

    fn stale_simple_keys(&mut self) -> ScanResult {
        for sk in &mut self.simple_keys {
            if sk.possible
                && (sk.mark.line < self.mark.line
                    || sk.mark.index + MAX_SIMPLE_KEY_LENGTH < self.mark.index)
            {
                if sk.required {
                    return Err(YamlError::syntax(
                        Span::new(sk.mark, self.mark),
                        "while scanning a simple key, could not find expected ':'",
                    ));
                }
                sk.possible = false;
            }
        }
        Ok(())
    }

    fn save_simple_key(&mut self) -> ScanResult {
        let required = self.flow_level == 0 && self.indent == self.mark.col as isize;
        if self.simple_key_allowed {
            let sk = SimpleKey {
                possible: true,
                required,
                token_number: self.tokens_parsed + self.tokens.len(),
                mark: self.mark,
            };
            self.remove_simple_key()?;
            if let Some(last) = self.simple_keys.last_mut() {
                *last = sk;
            }
        }
        Ok(())
    }

    fn remove_simple_key(&mut self) -> ScanResult {
        let mark = self.mark;
        if let Some(last) = self.simple_keys.last_mut() {
            if last.possible && last.required {
                return Err(YamlError::syntax(
                    Span::new(last.mark, mark),
                    "while scanning a simple key, could not find expected ':'",
                ));
            }
            last.possible = false;
        }
        Ok(())
    }

    fn increase_flow_level(&mut self) {
        self.simple_keys.push(SimpleKey::new(Marker::default()));
        self.flow_level += 1;
    }

    fn decrease_flow_level(&mut self) {
        if self.flow_level > 0 {
            self.flow_level -= 1;
            self.simple_keys.pop();
        }
    }

    /// Pushes a new indentation level when `col` is deeper than the current one, queueing
    /// the collection start token either at the back or at position `number`.
    fn roll_indent(&mut self, col: usize, number: Option<usize>, token_type: TokenType, mark: Marker) {
        if self.flow_level > 0 {
            return;
        }
        let col = col as isize;
        if self.indent < col {
            self.indents.push(self.indent);
            self.indent = col;
            let tok = Token {
                span: Span::empty(mark),
                token_type,
            };
            match number {
                Some(n) => self.insert_token(n.saturating_sub(self.tokens_parsed), tok),
                None => self.push_token(tok),
            }
        }
    }

    /// Closes every block collection indented deeper than `col`.
    fn unroll_indent(&mut self, col: isize) {
        if self.flow_level > 0 {
            return;
        }
        while self.indent > col {
            self.push_token(Token {
                span: Span::empty(self.mark),
                token_type: BlockEnd,
            });
            self.indent = self.indents.pop().unwrap_or(-1);
        }
    }

    fn scan_directive(&mut self) -> YamlResult<Option<Token>> {
        let start_mark = self.mark;
        self.skip()?;

        let name = self.scan_directive_name()?;
        let tok = match name.as_str() {
            "YAML" => {
                let (major, minor) = self.scan_version_directive_value()?;
                Some(Token {
                    span: Span::new(start_mark, self.mark),
                    token_type: TokenType::VersionDirective { major, minor },
                })
            }
            "TAG" => {
                let (handle, prefix) = self.scan_tag_directive_value()?;
                Some(Token {
                    span: Span::new(start_mark, self.mark),
                    token_type: TokenType::TagDirective { handle, prefix },
                })
            }
            _ => {
                warn!("skipping unknown directive %{name} at {start_mark}");
                while !self.src.next_is_breakz() && !self.src.next_is('#') {
                    self.skip()?;
                }
                None
            }
        };

        while self.src.next_is_blank() {
            self.skip()?;
        }
        self.scan_comment()?;

        if !self.src.next_is_breakz() {
            return Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                "while scanning a directive, did not find expected comment or line break",
            ));
        }
        self.skip_line()?;
        Ok(tok)
    }

    fn scan_directive_name(&mut self) -> YamlResult<String> {
        let start_mark = self.mark;
        let mut name = String::new();
        while self.src.next_is_alpha() {
            self.read_char(&mut name)?;
        }

        if name.is_empty() {
            return Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                "while scanning a directive, could not find expected directive name",
            ));
        }
        if !self.src.next_is_blank_or_breakz() {
            return Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                "while scanning a directive, found unexpected non-alphabetical character",
            ));
        }
        Ok(name)
    }

    fn scan_version_directive_value(&mut self) -> YamlResult<(u32, u32)> {
        while self.src.next_is_blank() {
            self.skip()?;
        }

        let major = self.scan_version_directive_number()?;
        if !self.src.next_is('.') {
            return Err(YamlError::new_str(
                self.mark,
                "while scanning a %YAML directive, did not find expected digit or '.' character",
            ));
        }
        self.skip()?;
        let minor = self.scan_version_directive_number()?;
        Ok((major, minor))
    }

    fn scan_version_directive_number(&mut self) -> YamlResult<u32> {
        let start_mark = self.mark;
        let mut val = 0u32;
        let mut length = 0usize;
        while let Some(digit) = self.src.peek().to_digit(10) {
            if length >= MAX_VERSION_DIGITS {
                return Err(YamlError::syntax(
                    Span::new(start_mark, self.mark),
                    "while scanning a %YAML directive, found extremely long version number",
                ));
            }
            length += 1;
            val = val * 10 + digit;
            self.skip()?;
        }

        if length == 0 {
            return Err(YamlError::new_str(
                self.mark,
                "while scanning a %YAML directive, did not find expected version number",
            ));
        }
        Ok(val)
    }

    fn scan_tag_directive_value(&mut self) -> YamlResult<(String, String)> {
        while self.src.next_is_blank() {
            self.skip()?;
        }

        let handle = self.scan_tag_handle(true)?;
        if !self.src.next_is_blank() {
            return Err(YamlError::new_str(
                self.mark,
                "while scanning a %TAG directive, did not find expected whitespace",
            ));
        }
        while self.src.next_is_blank() {
            self.skip()?;
        }

        let prefix = self.scan_tag_uri(true, true, None)?;
        if !self.src.next_is_blank_or_breakz() {
            return Err(YamlError::new_str(
                self.mark,
                "while scanning a %TAG directive, did not find expected whitespace or line break",
            ));
        }
        Ok((handle, prefix))
    }

    fn scan_anchor(&mut self, alias: bool) -> YamlResult<Token> {
        let start_mark = self.mark;
        self.skip()?;

        let mut name = String::new();
        loop {
            let [c, next] = self.src.peek_two();
            if is_blank_or_breakz(c) || is_flow(c) || (c == ':' && is_blank_or_breakz(next)) {
                break;
            }
            self.read_char(&mut name)?;
        }

        let c = self.src.peek();
        if name.is_empty() || !(is_blank_or_breakz(c) || "?:,]}%@`".contains(c)) {
            let ctx = if alias {
                "while scanning an alias"
            } else {
                "while scanning an anchor"
            };
            return Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                format!("{ctx}, did not find expected alphabetic or numeric character"),
            ));
        }

        let token_type = if alias {
            TokenType::Alias(name)
        } else {
            TokenType::Anchor(name)
        };
        Ok(Token {
            span: Span::new(start_mark, self.mark),
            token_type,
        })
    }

    fn scan_tag(&mut self) -> YamlResult<Token> {
        let start_mark = self.mark;
        let handle;
        let suffix;

        if self.src.peek_nth(1) == '<' {
            // verbatim `!<uri>`
            self.skip_n(2)?;
            handle = String::new();
            suffix = self.scan_tag_uri(true, false, None)?;
            if !self.src.next_is('>') {
                return Err(YamlError::syntax(
                    Span::new(start_mark, self.mark),
                    "while scanning a tag, did not find the expected '>'",
                ));
            }
            self.skip()?;
        } else {
            let first = self.scan_tag_handle(false)?;
            if first.len() > 1 && first.starts_with('!') && first.ends_with('!') {
                handle = first;
                suffix = self.scan_tag_uri(false, false, None)?;
            } else {
                // `!foo` is the `!` handle followed by a suffix, a lone `!` is the
                // non-specific tag.
                let rest = self.scan_tag_uri(false, false, Some(&first))?;
                if rest.is_empty() {
                    handle = String::new();
                    suffix = "!".to_string();
                } else {
                    handle = "!".to_string();
                    suffix = rest;
                }
            }
        }

        let c = self.src.peek();
        if !is_blank_or_breakz(c) && !(self.flow_level > 0 && is_flow(c)) {
            return Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                "while scanning a tag, did not find expected whitespace or line break",
            ));
        }

        Ok(Token {
            span: Span::new(start_mark, self.mark),
            token_type: TokenType::Tag { handle, suffix },
        })
    }

    fn scan_tag_handle(&mut self, directive: bool) -> YamlResult<String> {
        let ctx = if directive {
            "while scanning a tag directive"
        } else {
            "while scanning a tag"
        };
        if !self.src.next_is('!') {
            return Err(YamlError::new_str(
                self.mark,
                &format!("{ctx}, did not find expected '!'"),
            ));
        }

        let mut string = String::new();
        self.read_char(&mut string)?;
        while self.src.next_is_alpha() {
            self.read_char(&mut string)?;
        }

        if self.src.next_is('!') {
            self.read_char(&mut string)?;
        } else if directive && string != "!" {
            // `%TAG !foo tag:...` is not a valid handle
            return Err(YamlError::new_str(
                self.mark,
                &format!("{ctx}, did not find expected '!'"),
            ));
        }
        Ok(string)
    }

    /// Scans a tag URI, decoding `%XX` escapes. `head` is a handle already consumed that
    /// turned out to be part of the suffix.
    fn scan_tag_uri(
        &mut self,
        allow_flow_chars: bool,
        directive: bool,
        head: Option<&str>,
    ) -> YamlResult<String> {
        let mut string = String::new();
        if let Some(head) = head {
            string.push_str(head.get(1..).unwrap_or_default());
        }

        loop {
            let c = self.src.peek();
            if c == '%' {
                self.scan_uri_escapes(directive, &mut string)?;
            } else if is_uri_char(c) || (allow_flow_chars && matches!(c, ',' | '[' | ']')) {
                self.read_char(&mut string)?;
            } else {
                break;
            }
        }

        if string.is_empty() && head.is_none() {
            let ctx = if directive {
                "while parsing a %TAG directive"
            } else {
                "while parsing a tag"
            };
            return Err(YamlError::new_str(
                self.mark,
                &format!("{ctx}, did not find expected tag URI"),
            ));
        }
        Ok(string)
    }

    /// Decodes a run of `%XX` octets as UTF-8.
    fn scan_uri_escapes(&mut self, directive: bool, out: &mut String) -> ScanResult {
        let start_mark = self.mark;
        let ctx = if directive {
            "while parsing a %TAG directive"
        } else {
            "while parsing a tag"
        };

        let mut raw = String::new();
        while self.src.next_is('%') {
            let [hi, lo] = [self.src.peek_nth(1), self.src.peek_nth(2)];
            if !is_hex(hi) || !is_hex(lo) {
                return Err(YamlError::new_str(
                    self.mark,
                    &format!("{ctx}, did not find URI escaped octet"),
                ));
            }
            for _ in 0..3 {
                self.read_char(&mut raw)?;
            }
        }

        let bytes = urlencoding::decode_binary(raw.as_bytes());
        match core::str::from_utf8(&bytes) {
            Ok(decoded) => {
                out.push_str(decoded);
                Ok(())
            }
            Err(_) => Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                format!("{ctx}, found an invalid UTF-8 sequence in URI escapes"),
            )),
        }
    }

    fn scan_block_scalar(&mut self, literal: bool) -> YamlResult<Token> {
        let start_mark = self.mark;
        self.skip()?;

        let mut chomping = ChompIndicator::Clip;
        let mut increment = 0usize;

        let c = self.src.peek();
        if c == '+' || c == '-' {
            chomping = if c == '+' {
                ChompIndicator::Keep
            } else {
                ChompIndicator::Strip
            };
            self.skip()?;
            if is_digit(self.src.peek()) {
                increment = self.scan_indentation_indicator(start_mark)?;
            }
        } else if is_digit(c) {
            increment = self.scan_indentation_indicator(start_mark)?;
            match self.src.peek() {
                '+' => {
                    chomping = ChompIndicator::Keep;
                    self.skip()?;
                }
                '-' => {
                    chomping = ChompIndicator::Strip;
                    self.skip()?;
                }
                _ => {}
            }
        }

        let mut saw_blank = false;
        while self.src.next_is_blank() {
            self.skip()?;
            saw_blank = true;
        }
        if self.src.next_is('#') {
            if !saw_blank {
                return Err(YamlError::new_str(
                    self.mark,
                    "while scanning a block scalar, found a comment without whitespace after the indicator",
                ));
            }
            self.scan_comment()?;
        }

        if !self.src.next_is_breakz() {
            return Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                "while scanning a block scalar, did not find expected comment or line break",
            ));
        }
        self.skip_line()?;

        let mut end_mark = self.mark;
        let mut indent = if increment > 0 {
            if self.indent >= 0 {
                self.indent as usize + increment
            } else {
                increment
            }
        } else {
            0
        };

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();

        self.scan_block_scalar_breaks(&mut indent, &mut trailing_breaks, start_mark, &mut end_mark)?;

        let mut leading_blank = false;
        while self.mark.col == indent && !self.src.next_is('\0') {
            let trailing_blank = self.src.next_is_blank();
            if !literal && leading_break.starts_with('\n') && !leading_blank && !trailing_blank {
                // folded: a single break between same-indented lines becomes a space
                if trailing_breaks.is_empty() {
                    string.push(' ');
                }
                leading_break.clear();
            } else {
                string.push_str(&leading_break);
                leading_break.clear();
            }
            string.push_str(&trailing_breaks);
            trailing_breaks.clear();

            leading_blank = self.src.next_is_blank();
            while !self.src.next_is_breakz() {
                self.read_char(&mut string)?;
            }
            end_mark = self.mark;
            if self.src.next_is('\0') {
                break;
            }

            self.read_line(&mut leading_break)?;
            self.scan_block_scalar_breaks(
                &mut indent,
                &mut trailing_breaks,
                start_mark,
                &mut end_mark,
            )?;
        }

        if chomping != ChompIndicator::Strip {
            string.push_str(&leading_break);
        }
        if chomping == ChompIndicator::Keep {
            string.push_str(&trailing_breaks);
        }

        let scalar_type = if literal {
            ScalarType::Literal
        } else {
            ScalarType::Folded
        };
        Ok(Token {
            span: Span::new(start_mark, end_mark),
            token_type: TokenType::Scalar {
                scalar_type,
                value: string,
            },
        })
    }

    fn scan_indentation_indicator(&mut self, start_mark: Marker) -> YamlResult<usize> {
        let c = self.src.peek();
        if c == '0' {
            return Err(YamlError::syntax(
                Span::new(start_mark, self.mark),
                "while scanning a block scalar, found an indentation indicator equal to 0",
            ));
        }
        self.skip()?;
        Ok(c.to_digit(10).unwrap_or(1) as usize)
    }

    /// Consumes empty lines and indentation before block scalar content. Auto-detects the
    /// content indentation when `indent` is still `0`.
    fn scan_block_scalar_breaks(
        &mut self,
        indent: &mut usize,
        breaks: &mut String,
        start_mark: Marker,
        end_mark: &mut Marker,
    ) -> ScanResult {
        let mut max_indent = 0;
        *end_mark = self.mark;

        loop {
            while (*indent == 0 || self.mark.col < *indent) && self.src.next_is(' ') {
                self.skip()?;
            }
            if self.mark.col > max_indent {
                max_indent = self.mark.col;
            }

            if (*indent == 0 || self.mark.col < *indent) && self.src.next_is('\t') {
                return Err(YamlError::syntax(
                    Span::new(start_mark, self.mark),
                    "while scanning a block scalar, found a tab character where an indentation space is expected",
                ));
            }

            if !self.src.next_is_break() {
                break;
            }
            self.read_line(breaks)?;
            *end_mark = self.mark;
        }

        if *indent == 0 {
            let min = (self.indent + 1).max(1) as usize;
            *indent = max_indent.max(min);
        }
        Ok(())
    }

    fn scan_flow_scalar(&mut self, single: bool) -> YamlResult<Token> {
        let start_mark = self.mark;
        self.skip()?;

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();

        loop {
            if self.mark.col == 0 && self.src.next_is_document_indicator() {
                return Err(YamlError::syntax(
                    Span::new(start_mark, self.mark),
                    "while scanning a quoted scalar, found unexpected document indicator",
                ));
            }
            if self.src.next_is('\0') {
                return Err(YamlError::syntax(
                    Span::new(start_mark, self.mark),
                    "while scanning a quoted scalar, found unexpected end of stream",
                ));
            }

            let mut leading_blanks = false;
            while !self.src.next_is_blank_or_breakz() {
                match self.src.peek_two() {
                    ['\'', '\''] if single => {
                        string.push('\'');
                        self.skip_n(2)?;
                    }
                    ['\'', _] if single => break,
                    ['"', _] if !single => break,
                    ['\\', x] if !single && is_break(x) => {
                        // escaped line break, no folding space
                        self.skip()?;
                        self.skip_line()?;
                        leading_blanks = true;
                        break;
                    }
                    ['\\', _] if !single => {
                        self.scan_escape_sequence(start_mark, &mut string)?;
                    }
                    _ => self.read_char(&mut string)?,
                }
            }

            if self.src.next_is(if single { '\'' } else { '"' }) {
                break;
            }

            while self.src.next_is_blank_or_break() {
                if self.src.next_is_blank() {
                    if leading_blanks {
                        self.skip()?;
                    } else {
                        self.read_char(&mut whitespaces)?;
                    }
                } else if leading_blanks {
                    self.read_line(&mut trailing_breaks)?;
                } else {
                    whitespaces.clear();
                    self.read_line(&mut leading_break)?;
                    leading_blanks = true;
                }
            }

            if leading_blanks {
                if leading_break.starts_with('\n') {
                    if trailing_breaks.is_empty() {
                        string.push(' ');
                    } else {
                        string.push_str(&trailing_breaks);
                    }
                } else {
                    string.push_str(&leading_break);
                    string.push_str(&trailing_breaks);
                }
                leading_break.clear();
                trailing_breaks.clear();
            } else {
                string.push_str(&whitespaces);
                whitespaces.clear();
            }
        }

        self.skip()?;
        let scalar_type = if single {
            ScalarType::SingleQuote
        } else {
            ScalarType::DoubleQuote
        };
        Ok(Token {
            span: Span::new(start_mark, self.mark),
            token_type: TokenType::Scalar {
                scalar_type,
                value: string,
            },
        })
    }

    fn scan_escape_sequence(&mut self, start_mark: Marker, string: &mut String) -> ScanResult {
        let code_length = match self.src.peek_nth(1) {
            '0' => {
                string.push('\0');
                0
            }
            'a' => {
                string.push('\x07');
                0
            }
            'b' => {
                string.push('\x08');
                0
            }
            't' | '\t' => {
                string.push('\t');
                0
            }
            'n' => {
                string.push('\n');
                0
            }
            'v' => {
                string.push('\x0B');
                0
            }
            'f' => {
                string.push('\x0C');
                0
            }
            'r' => {
                string.push('\r');
                0
            }
            'e' => {
                string.push('\x1B');
                0
            }
            ' ' => {
                string.push(' ');
                0
            }
            '"' => {
                string.push('"');
                0
            }
            '/' => {
                string.push('/');
                0
            }
            '\\' => {
                string.push('\\');
                0
            }
            'N' => {
                string.push('\u{85}');
                0
            }
            '_' => {
                string.push('\u{A0}');
                0
            }
            'L' => {
                string.push('\u{2028}');
                0
            }
            'P' => {
                string.push('\u{2029}');
                0
            }
            'x' => 2,
            'u' => 4,
            'U' => 8,
            c => {
                return Err(YamlError::syntax(
                    Span::new(start_mark, self.mark),
                    format!("while parsing a quoted scalar, found unknown escape character {c:?}"),
                ))
            }
        };
        self.skip_n(2)?;

        if code_length > 0 {
            let mut value = self.scan_hex_code(code_length, start_mark)?;
            if code_length == 4 && (0xD800..=0xDBFF).contains(&value) {
                // `😀` style surrogate pair
                if self.src.peek_two() != ['\\', 'u'] {
                    return Err(YamlError::syntax(
                        Span::new(start_mark, self.mark),
                        "while parsing a quoted scalar, found a high surrogate without its low surrogate",
                    ));
                }
                self.skip_n(2)?;
                let low = self.scan_hex_code(4, start_mark)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(YamlError::syntax(
                        Span::new(start_mark, self.mark),
                        "while parsing a quoted scalar, found an invalid low surrogate",
                    ));
                }
                value = 0x10000 + ((value - 0xD800) << 10) + (low - 0xDC00);
            }

            match char::from_u32(value) {
                Some(chr) => string.push(chr),
                None => {
                    return Err(YamlError::syntax(
                        Span::new(start_mark, self.mark),
                        "while parsing a quoted scalar, found invalid Unicode character escape code",
                    ))
                }
            }
        }
        Ok(())
    }

    fn scan_hex_code(&mut self, length: usize, start_mark: Marker) -> YamlResult<u32> {
        let mut value = 0u32;
        for i in 0..length {
            let c = self.src.peek_nth(i);
            if !is_hex(c) {
                return Err(YamlError::syntax(
                    Span::new(start_mark, self.mark),
                    "while parsing a quoted scalar, did not find expected hexadecimal number",
                ));
            }
            value = (value << 4) + as_hex(c);
        }
        self.skip_n(length)?;
        Ok(value)
    }

    fn scan_plain_scalar(&mut self) -> YamlResult<Token> {
        let start_mark = self.mark;
        let mut end_mark = self.mark;
        let indent = self.indent + 1;

        let mut string = String::new();
        let mut leading_break = String::new();
        let mut trailing_breaks = String::new();
        let mut whitespaces = String::new();
        let mut leading_blanks = false;

        loop {
            if self.mark.col == 0 && self.src.next_is_document_indicator() {
                break;
            }
            if self.src.next_is('#') {
                break;
            }

            while !self.src.next_is_blank_or_breakz() {
                let [c, next] = self.src.peek_two();
                if c == ':'
                    && (is_blank_or_breakz(next) || (self.flow_level > 0 && is_flow(next)))
                {
                    break;
                }
                if self.flow_level > 0 && is_flow(c) {
                    break;
                }

                if leading_blanks || !whitespaces.is_empty() {
                    if leading_blanks {
                        if leading_break.starts_with('\n') {
                            if trailing_breaks.is_empty() {
                                string.push(' ');
                            } else {
                                string.push_str(&trailing_breaks);
                            }
                        } else {
                            string.push_str(&leading_break);
                            string.push_str(&trailing_breaks);
                        }
                        leading_break.clear();
                        trailing_breaks.clear();
                        leading_blanks = false;
                    } else {
                        string.push_str(&whitespaces);
                        whitespaces.clear();
                    }
                }

                self.read_char(&mut string)?;
                end_mark = self.mark;
            }

            if !self.src.next_is_blank_or_break() {
                break;
            }

            while self.src.next_is_blank_or_break() {
                if self.src.next_is_blank() {
                    if leading_blanks
                        && (self.mark.col as isize) < indent
                        && self.src.next_is('\t')
                    {
                        return Err(YamlError::syntax(
                            Span::new(start_mark, self.mark),
                            "while scanning a plain scalar, found a tab character that violates indentation",
                        ));
                    }
                    if leading_blanks {
                        self.skip()?;
                    } else {
                        self.read_char(&mut whitespaces)?;
                    }
                } else if leading_blanks {
                    self.read_line(&mut trailing_breaks)?;
                } else {
                    whitespaces.clear();
                    self.read_line(&mut leading_break)?;
                    leading_blanks = true;
                }
            }

            if self.flow_level == 0 && (self.mark.col as isize) < indent {
                break;
            }
        }

        if leading_blanks {
            self.simple_key_allowed = true;
        }

        Ok(Token {
            span: Span::new(start_mark, end_mark),
            token_type: TokenType::Scalar {
                scalar_type: ScalarType::Plain,
                value: string,
            },
        })
    }
}

impl<S: Source> Iterator for Scanner<S> {
    type Item = YamlResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() || self.stream_end_produced {
            return None;
        }
        match self.move_next_without_consuming() {
            Ok(true) => self.consume_current().map(Ok),
            Ok(false) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn scan_types(input: &str) -> Vec<TokenType> {
        Scanner::from_str_input(input)
            .map(|tok| tok.map(|x| x.token_type))
            .collect::<YamlResult<Vec<_>>>()
            .unwrap()
    }

    fn plain(value: &str) -> TokenType {
        TokenType::Scalar {
            scalar_type: ScalarType::Plain,
            value: value.to_string(),
        }
    }

    #[test]
    fn test_simple_mapping() {
        assert_eq!(
            scan_types("key: value"),
            vec![
                StreamStart,
                TokenType::BlockMappingStart,
                Key,
                plain("key"),
                Value,
                plain("value"),
                BlockEnd,
                StreamEnd,
            ]
        );
    }

    #[test]
    fn test_block_sequence() {
        assert_eq!(
            scan_types("- a\n- b"),
            vec![
                StreamStart,
                TokenType::BlockSequenceStart,
                BlockEntry,
                plain("a"),
                BlockEntry,
                plain("b"),
                BlockEnd,
                StreamEnd,
            ]
        );
    }

    #[test]
    fn test_flow_mapping_in_sequence() {
        assert_eq!(
            scan_types("[a: b, c]"),
            vec![
                StreamStart,
                FlowSequenceStart,
                Key,
                plain("a"),
                Value,
                plain("b"),
                FlowEntry,
                plain("c"),
                FlowSequenceEnd,
                StreamEnd,
            ]
        );
    }

    #[test]
    fn test_colon_inside_flow_plain() {
        assert_eq!(
            scan_types("[a:b]"),
            vec![StreamStart, FlowSequenceStart, plain("a:b"), FlowSequenceEnd, StreamEnd]
        );
    }

    #[test]
    fn test_indentation_closes_collection() {
        let types = scan_types("a:\n  b: 1\nc: 2");
        assert_eq!(
            types,
            vec![
                StreamStart,
                TokenType::BlockMappingStart,
                Key,
                plain("a"),
                Value,
                TokenType::BlockMappingStart,
                Key,
                plain("b"),
                Value,
                plain("1"),
                BlockEnd,
                Key,
                plain("c"),
                Value,
                plain("2"),
                BlockEnd,
                StreamEnd,
            ]
        );
    }

    #[test]
    fn test_directives() {
        let types = scan_types("%YAML 1.1\n%TAG !e! tag:example.com,2000:\n%FOO bar\n---\n");
        assert_eq!(
            types,
            vec![
                StreamStart,
                TokenType::VersionDirective { major: 1, minor: 1 },
                TokenType::TagDirective {
                    handle: "!e!".to_string(),
                    prefix: "tag:example.com,2000:".to_string()
                },
                TokenType::DocumentStart,
                StreamEnd,
            ]
        );
    }

    #[test]
    fn test_tags() {
        let types = scan_types("- !!str a\n- !local b\n- ! c\n- !<tag:x%21> d\n- !e!%C3%A9 f");
        let tags: Vec<_> = types
            .into_iter()
            .filter_map(|x| match x {
                TokenType::Tag { handle, suffix } => Some((handle, suffix)),
                _ => None,
            })
            .collect();
        assert_eq!(
            tags,
            vec![
                ("!!".to_string(), "str".to_string()),
                ("!".to_string(), "local".to_string()),
                ("".to_string(), "!".to_string()),
                ("".to_string(), "tag:x!".to_string()),
                ("!e!".to_string(), "é".to_string()),
            ]
        );
    }

    #[test]
    fn test_anchor_alias() {
        let types = scan_types("- &a x\n- *a");
        assert!(types.contains(&TokenType::Anchor("a".to_string())));
        assert!(types.contains(&TokenType::Alias("a".to_string())));
    }

    #[test]
    fn test_double_quoted_escapes() {
        let types = scan_types(r#""a\tb\x41\u00e9\U0001F600\ud83d\ude00\N\_""#);
        assert_eq!(
            types[1],
            TokenType::Scalar {
                scalar_type: ScalarType::DoubleQuote,
                value: "a\tbAé😀😀\u{85}\u{A0}".to_string(),
            }
        );
    }

    #[test]
    fn test_quoted_folding() {
        let types = scan_types("'it''s\n  folded\n\n  twice'");
        assert_eq!(
            types[1],
            TokenType::Scalar {
                scalar_type: ScalarType::SingleQuote,
                value: "it's folded\ntwice".to_string(),
            }
        );
        let types = scan_types("\"no \\\n  space\"");
        assert_eq!(
            types[1],
            TokenType::Scalar {
                scalar_type: ScalarType::DoubleQuote,
                value: "no space".to_string(),
            }
        );
    }

    #[test]
    fn test_block_scalars() {
        let literal = scan_types("|\n  a\n   b\n\n");
        assert_eq!(
            literal[1],
            TokenType::Scalar {
                scalar_type: ScalarType::Literal,
                value: "a\n b\n".to_string(),
            }
        );
        let folded = scan_types(">-\n  a\n  b\n\n  c\n    d\n  e\n\n");
        assert_eq!(
            folded[1],
            TokenType::Scalar {
                scalar_type: ScalarType::Folded,
                value: "a b\nc\n  d\ne".to_string(),
            }
        );
        let keep = scan_types("|+\n  a\n\n");
        assert_eq!(
            keep[1],
            TokenType::Scalar {
                scalar_type: ScalarType::Literal,
                value: "a\n\n".to_string(),
            }
        );
        let indented = scan_types("|2\n   a\n  b\n");
        assert_eq!(
            indented[1],
            TokenType::Scalar {
                scalar_type: ScalarType::Literal,
                value: " a\nb\n".to_string(),
            }
        );
    }

    #[test]
    fn test_comments() {
        let src = LookAheadBuffer::new_str("# head\nkey: value # tail\n");
        let types: Vec<_> = Scanner::with_comments(src)
            .map(|x| x.unwrap().token_type)
            .collect();
        assert_eq!(
            types[1],
            TokenType::Comment {
                value: "head".to_string(),
                inline: false
            }
        );
        assert!(types.contains(&TokenType::Comment {
            value: "tail".to_string(),
            inline: true
        }));
        let skipped = scan_types("# head\nkey: value # tail\n");
        assert!(!skipped
            .iter()
            .any(|x| matches!(x, TokenType::Comment { .. })));
    }

    #[test]
    fn test_errors_are_sticky() {
        let mut scanner = Scanner::from_str_input("\"unterminated");
        let mut saw_error = false;
        for tok in scanner.by_ref() {
            if let Err(err) = tok {
                assert!(matches!(err, YamlError::Syntax { .. }));
                saw_error = true;
            }
        }
        assert!(saw_error);
        assert!(scanner.next().is_none());
        assert!(scanner.move_next().is_err());
    }

    #[test]
    fn test_invalid_escape() {
        let res: YamlResult<Vec<_>> = Scanner::from_str_input(r#""\q""#).collect();
        assert!(res.is_err());
    }

    #[test]
    fn test_pull_interface() {
        let mut scanner = Scanner::from_str_input("a");
        assert!(scanner.move_next_without_consuming().unwrap());
        assert_eq!(scanner.current().map(|x| &x.token_type), Some(&StreamStart));
        // not consumed, same token again
        assert!(scanner.move_next_without_consuming().unwrap());
        assert_eq!(scanner.current().map(|x| &x.token_type), Some(&StreamStart));
        assert!(scanner.move_next().unwrap());
        assert_eq!(scanner.current().map(|x| &x.token_type), Some(&plain("a")));
        assert!(scanner.move_next().unwrap());
        assert_eq!(scanner.current().map(|x| &x.token_type), Some(&StreamEnd));
        assert!(!scanner.move_next().unwrap());
        assert!(scanner.current().is_none());
    }

    #[test]
    fn test_marks() {
        let tokens: Vec<_> = Scanner::from_str_input("a:\n  bc: d")
            .map(|x| x.unwrap())
            .collect();
        let bc = tokens
            .iter()
            .find(|x| x.token_type == plain("bc"))
            .unwrap();
        assert_eq!(bc.span.start, Marker::new(5, 1, 2));
        assert_eq!(bc.span.end, Marker::new(7, 1, 4));
    }
}
