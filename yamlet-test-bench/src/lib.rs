pub mod consts;

use std::fmt::Write;
use yamlet_core::{Emitter, EmitterSettings, Event, Parser, Source, YamlResult};

///
/// Assert that for given input, the parser generates expected set of events
///
/// # Panics
///
///    Function panics if there is a difference between expected events string and one generated
///    from the input.
pub fn assert_eq_event(input: &str, events: &str) {
    let mut line = String::new();
    let mut parser = Parser::new_from_str(input);

    write_str_from_event(&mut line, &mut parser, false);
    let expected_err = events.ends_with("ERR");
    let actual_err = line.ends_with("ERR");
    assert_eq!(actual_err, expected_err, "Error mismatch in case: {input}");
    assert_eq!(line, events, "Error in case: {input}");
}

/// Same as [`assert_eq_event`] but comments are reported as `=COM` lines.
///
/// # Panics
///
///    Function panics if the events generated from the input differ from the expected ones.
pub fn assert_eq_event_with_comments(input: &str, events: &str) {
    let mut line = String::new();
    let mut parser = Parser::new_from_str_with_comments(input);

    write_str_from_event(&mut line, &mut parser, false);
    assert_eq!(line, events, "Error in case: {input}");
}

/// Writes every event of `parser` in test suite notation, one per line.
///
/// Parsing stops at the first error, which is written as `ERR`.
pub fn write_str_from_event<T: Source>(
    line: &mut String,
    parser: &mut Parser<T>,
    emit_stream_token: bool,
) {
    for res in parser.by_ref() {
        match res {
            Ok((ev, _)) => {
                if !emit_stream_token && matches!(ev, Event::StreamStart | Event::StreamEnd) {
                    continue;
                }
                line.push('\n');
                write_event(line, &ev);
            }
            Err(_) => {
                line.push_str("\nERR");
                break;
            }
        }
    }
}

/// Writes a single event in test suite notation, without a line break.
pub fn write_event(line: &mut String, ev: &Event) {
    let _ = match ev {
        Event::StreamStart => write!(line, "+STR"),
        Event::StreamEnd => write!(line, "-STR"),
        Event::DocumentStart { .. } => write!(line, "+DOC"),
        Event::DocumentEnd { .. } => write!(line, "-DOC"),
        Event::Alias(anchor) => write!(line, "=ALI *{anchor}"),
        Event::Scalar {
            anchor,
            tag,
            value,
            style,
            ..
        } => {
            line.push_str("=VAL");
            write_properties(line, anchor.as_deref(), tag.as_deref());
            write!(line, " {style}{}", escape_value(value))
        }
        Event::SequenceStart { anchor, tag, .. } => {
            line.push_str("+SEQ");
            write_properties(line, anchor.as_deref(), tag.as_deref());
            Ok(())
        }
        Event::SequenceEnd => write!(line, "-SEQ"),
        Event::MappingStart { anchor, tag, .. } => {
            line.push_str("+MAP");
            write_properties(line, anchor.as_deref(), tag.as_deref());
            Ok(())
        }
        Event::MappingEnd => write!(line, "-MAP"),
        Event::Comment { value, inline } => {
            let kind = if *inline { "=ICOM" } else { "=COM" };
            write!(line, "{kind} #{}", escape_value(value))
        }
    };
}

fn write_properties(line: &mut String, anchor: Option<&str>, tag: Option<&str>) {
    if let Some(anchor) = anchor {
        line.push_str(" &");
        line.push_str(anchor);
    }
    if let Some(tag) = tag {
        line.push_str(" <");
        line.push_str(tag);
        line.push('>');
    }
}

/// Escapes `\`, line breaks, tabs and backspaces the way test suite event files do.
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            _ => out.push(ch),
        }
    }
    out
}

/// Collects the events of `input`, dropping spans.
pub fn parse_events(input: &str) -> YamlResult<Vec<Event>> {
    Parser::new_from_str(input).map(|res| res.map(|(ev, _)| ev)).collect()
}

/// Collects the events of `input` including comments.
pub fn parse_events_with_comments(input: &str) -> YamlResult<Vec<Event>> {
    Parser::new_from_str_with_comments(input)
        .map(|res| res.map(|(ev, _)| ev))
        .collect()
}

pub fn emit_events<I>(events: I) -> YamlResult<String>
where
    I: IntoIterator<Item = Event>,
{
    emit_events_with_settings(events, EmitterSettings::default())
}

pub fn emit_events_with_settings<I>(events: I, settings: EmitterSettings) -> YamlResult<String>
where
    I: IntoIterator<Item = Event>,
{
    let mut out = String::new();
    let mut emitter = Emitter::with_settings(&mut out, settings)?;
    for ev in events {
        emitter.emit(ev)?;
    }
    Ok(out)
}

/// Parses `input` and writes it back out with default settings.
pub fn reemit(input: &str) -> YamlResult<String> {
    emit_events(parse_events(input)?)
}

/// Parses `input` with comments and writes it back out with default settings.
pub fn reemit_with_comments(input: &str) -> YamlResult<String> {
    emit_events(parse_events_with_comments(input)?)
}

/// Drops the explicit flag of document end markers, which an emit and parse cycle may change.
pub fn normalize(events: &[Event]) -> Vec<Event> {
    events
        .iter()
        .map(|ev| match ev {
            Event::DocumentEnd { .. } => Event::document_end(),
            ev => ev.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yamlet_core::CollectionStyle;

    #[test]
    fn test_escape_value() {
        let text = "a\\b\nc\td\re\x08";
        assert_eq!(escape_value(text), "a\\\\b\\nc\\td\\re\\b");
        assert_eq!(escape_value("plain"), "plain");
    }

    #[test]
    fn test_write_properties() {
        let mut line = String::new();
        write_event(
            &mut line,
            &Event::SequenceStart {
                anchor: Some("a".into()),
                tag: Some("tag:yaml.org,2002:seq".into()),
                implicit: false,
                style: CollectionStyle::Flow,
            },
        );
        assert_eq!(line, "+SEQ &a <tag:yaml.org,2002:seq>");
    }
}
