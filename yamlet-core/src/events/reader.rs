use crate::events::{Event, EventKind, Parser};
use crate::tokenizer::Source;
use alloc::format;
use yamlet_common::{Span, YamlError, YamlResult};

/// Cursor over a [`Parser`] with typed expectations, for code that walks a known structure.
///
/// The reader is always positioned on an event that has not been consumed yet.
pub struct EventReader<S> {
    parser: Parser<S>,
}

impl<S: Source> EventReader<S> {
    /// Wraps `parser` and positions it on its first event.
    pub fn new(mut parser: Parser<S>) -> YamlResult<Self> {
        if parser.current().is_none() {
            parser.move_next()?;
        }
        Ok(EventReader { parser })
    }

    pub fn current(&self) -> Option<&Event> {
        self.parser.current()
    }

    pub fn current_span(&self) -> Option<Span> {
        self.parser.current_span()
    }

    /// `true` if the current event is of `kind`. Consumes nothing.
    pub fn accept(&self, kind: EventKind) -> bool {
        self.current().is_some_and(|ev| ev.kind() == kind)
    }

    /// Checks that the current event is of `kind` without consuming it.
    pub fn require(&self, kind: EventKind) -> YamlResult<&Event> {
        match self.parser.current() {
            Some(ev) if ev.kind() == kind => Ok(ev),
            Some(ev) => Err(self.mismatch(kind, ev.kind())),
            None => Err(YamlError::UnexpectedEof),
        }
    }

    /// Consumes the current event if it is of `kind`, fails otherwise.
    pub fn expect(&mut self, kind: EventKind) -> YamlResult<(Event, Span)> {
        self.require(kind)?;
        self.consume()
    }

    /// Consumes the current event if it is of `kind`.
    pub fn try_consume(&mut self, kind: EventKind) -> YamlResult<Option<(Event, Span)>> {
        if self.accept(kind) {
            self.consume().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Consumes the current event together with everything nested in it.
    ///
    /// On a scalar or alias this consumes one event, on a `*Start` event it consumes up to
    /// and including the matching `*End`.
    pub fn skip(&mut self) -> YamlResult<()> {
        let mut depth = 0;
        loop {
            let ev = self.parser.current().ok_or(YamlError::UnexpectedEof)?;
            depth += ev.nesting_increase();
            self.parser.move_next()?;
            if depth <= 0 {
                return Ok(());
            }
        }
    }

    /// Same as [`EventReader::skip`], kept for callers walking a structure they are not
    /// interested in.
    pub fn skip_this_and_nested_events(&mut self) -> YamlResult<()> {
        self.skip()
    }

    /// Inside a mapping, skips entries until a scalar key accepted by `predicate` is found.
    ///
    /// On success the key is consumed and the reader sits on its value. Returns `false`,
    /// positioned on `MappingEnd`, when no key matched. Comments between entries are
    /// passed over.
    pub fn find_mapping_entry<F>(&mut self, predicate: F) -> YamlResult<bool>
    where
        F: Fn(&str) -> bool,
    {
        loop {
            self.skip_comments()?;
            match self.parser.current() {
                Some(Event::MappingEnd) => return Ok(false),
                Some(Event::Scalar { value, .. }) if predicate(value) => {
                    self.parser.move_next()?;
                    self.skip_comments()?;
                    return Ok(true);
                }
                Some(_) => {
                    self.skip()?;
                    self.skip_comments()?;
                    self.skip()?;
                }
                None => return Err(YamlError::UnexpectedEof),
            }
        }
    }

    fn skip_comments(&mut self) -> YamlResult<()> {
        while self.accept(EventKind::Comment) {
            self.parser.move_next()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> Parser<S> {
        self.parser
    }

    fn consume(&mut self) -> YamlResult<(Event, Span)> {
        let current = self.parser.take_current().ok_or(YamlError::UnexpectedEof)?;
        self.parser.move_next()?;
        Ok(current)
    }

    fn mismatch(&self, expected: EventKind, found: EventKind) -> YamlError {
        let span = self.parser.current_span().unwrap_or_default();
        YamlError::syntax(span, format!("expected {expected}, found {found}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};

    fn reader(input: &str) -> EventReader<crate::LookAheadBuffer<core::str::Chars<'_>>> {
        EventReader::new(Parser::new_from_str(input)).unwrap()
    }

    fn scalar_value(ev: (Event, Span)) -> String {
        match ev.0 {
            Event::Scalar { value, .. } => value,
            ev => panic!("expected scalar, got {ev:?}"),
        }
    }

    #[test]
    fn test_expect_sequence() {
        let mut rd = reader("[a, b]");
        rd.expect(EventKind::StreamStart).unwrap();
        rd.expect(EventKind::DocumentStart).unwrap();
        rd.expect(EventKind::SequenceStart).unwrap();
        assert_eq!(scalar_value(rd.expect(EventKind::Scalar).unwrap()), "a");
        assert_eq!(scalar_value(rd.expect(EventKind::Scalar).unwrap()), "b");
        assert!(rd.accept(EventKind::SequenceEnd));
        assert!(rd.try_consume(EventKind::MappingEnd).unwrap().is_none());
        assert!(rd.try_consume(EventKind::SequenceEnd).unwrap().is_some());
        rd.expect(EventKind::DocumentEnd).unwrap();
        rd.expect(EventKind::StreamEnd).unwrap();
        assert!(rd.current().is_none());
    }

    #[test]
    fn test_expect_mismatch() {
        let mut rd = reader("x: y");
        rd.expect(EventKind::StreamStart).unwrap();
        rd.expect(EventKind::DocumentStart).unwrap();
        let err = rd.expect(EventKind::SequenceStart).unwrap_err();
        assert_eq!(
            err.to_string(),
            "expected sequence start, found mapping start (line 1, column 1)"
        );
        assert!(rd.require(EventKind::MappingStart).is_ok());
    }

    #[test]
    fn test_skip_nested() {
        let mut rd = reader("- {a: [1, 2], b: c}\n- last");
        rd.expect(EventKind::StreamStart).unwrap();
        rd.expect(EventKind::DocumentStart).unwrap();
        rd.expect(EventKind::SequenceStart).unwrap();
        rd.skip_this_and_nested_events().unwrap();
        assert_eq!(scalar_value(rd.expect(EventKind::Scalar).unwrap()), "last");
    }

    #[test]
    fn test_find_mapping_entry() {
        let mut rd = reader("a: [1, 2]\nb: {x: y}\nc: found\nd: e");
        rd.expect(EventKind::StreamStart).unwrap();
        rd.expect(EventKind::DocumentStart).unwrap();
        rd.expect(EventKind::MappingStart).unwrap();
        assert!(rd.find_mapping_entry(|key| key == "c").unwrap());
        assert_eq!(scalar_value(rd.expect(EventKind::Scalar).unwrap()), "found");
        assert!(!rd.find_mapping_entry(|key| key == "zzz").unwrap());
        assert!(rd.accept(EventKind::MappingEnd));
    }

    #[test]
    fn test_find_mapping_entry_with_comments() {
        let parser = Parser::new_from_str_with_comments("a: 1 # c\nb: 2");
        let mut rd = EventReader::new(parser).unwrap();
        rd.expect(EventKind::StreamStart).unwrap();
        rd.expect(EventKind::DocumentStart).unwrap();
        rd.expect(EventKind::MappingStart).unwrap();
        assert!(rd.find_mapping_entry(|key| key == "b").unwrap());
        assert_eq!(scalar_value(rd.expect(EventKind::Scalar).unwrap()), "2");

        let parser = Parser::new_from_str_with_comments("a: # c\n  1\nb: 2 # d\nc: 3");
        let mut rd = EventReader::new(parser).unwrap();
        rd.expect(EventKind::StreamStart).unwrap();
        rd.expect(EventKind::DocumentStart).unwrap();
        rd.expect(EventKind::MappingStart).unwrap();
        assert!(rd.find_mapping_entry(|key| key == "c").unwrap());
        assert_eq!(scalar_value(rd.expect(EventKind::Scalar).unwrap()), "3");
        assert!(!rd.find_mapping_entry(|key| key == "2").unwrap());
        assert!(rd.accept(EventKind::MappingEnd));
    }
}
