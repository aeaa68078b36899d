use yamlet_core::{Event, EventKind, EventReader, Parser, Version, YamlError};
use yamlet_test_bench::consts::*;
use yamlet_test_bench::{assert_eq_event, assert_eq_event_with_comments, parse_events};

#[test]
fn docs_explicit() {
    assert_eq_event(DOC_EXPLICIT_INPUT, DOC_EXPLICIT_EVENTS);
    assert_eq_event(DOC_MULTI_INPUT, DOC_MULTI_EVENTS);
    assert_eq_event(DOC_EMPTY_INPUT, DOC_EMPTY_EVENTS);
}

#[test]
fn docs_empty_stream() {
    assert_eq_event("", "");
    assert_eq_event("# only a comment\n", "");
    assert_eq_event_with_comments("# only a comment\n", "\n=COM #only a comment");
}

#[test]
fn docs_directives() {
    assert_eq_event(DOC_DIRECTIVES_INPUT, DOC_DIRECTIVES_EVENTS);
    let evs = parse_events(DOC_DIRECTIVES_INPUT).unwrap();
    match &evs[1] {
        Event::DocumentStart {
            version,
            tags,
            implicit,
        } => {
            assert_eq!(*version, Some(Version::new(1, 1)));
            assert_eq!(tags.len(), 1);
            assert!(!implicit);
        }
        ev => panic!("expected document start, got {ev:?}"),
    }
}

#[test]
fn docs_err() {
    assert_eq_event(DOC_BARE_AFTER_END_INPUT, DOC_BARE_AFTER_END_EVENTS);
    assert_eq_event(DOC_DUPLICATE_VERSION_INPUT, DOC_DIRECTIVE_ERR_EVENTS);
    assert_eq_event(DOC_UNSUPPORTED_VERSION_INPUT, DOC_DIRECTIVE_ERR_EVENTS);
    assert_eq_event(DOC_UNDEFINED_HANDLE_INPUT, DOC_UNDEFINED_HANDLE_EVENTS);
}

#[test]
fn docs_version_check() {
    let err = Parser::new_from_str("%YAML 1.2\n--- a\n")
        .find_map(Result::err)
        .unwrap();
    assert!(matches!(err, YamlError::Semantic { .. }));
    assert!(err.to_string().contains("1.2"));

    assert!(parse_events("%YAML 1.1\n--- a\n").is_ok());
}

#[test]
fn docs_tag_directive_scope() {
    let input = "%TAG !e! tag:e:\n--- !e!a x\n--- !e!b y\n";
    assert_eq_event(input, "\n+DOC\n=VAL <tag:e:a> :x\n-DOC\n+DOC\nERR");

    let redeclared = "%TAG !e! tag:e:\n--- !e!a x\n...\n%TAG !e! tag:f:\n--- !e!b y\n";
    assert_eq_event(
        redeclared,
        "\n+DOC\n=VAL <tag:e:a> :x\n-DOC\n+DOC\n=VAL <tag:f:b> :y\n-DOC",
    );
}

#[test]
fn docs_properties() {
    assert_eq_event(NODE_PROPERTIES_INPUT, NODE_PROPERTIES_EVENTS);
    assert_eq_event(ANCHORED_KEYS_INPUT, ANCHORED_KEYS_EVENTS);
    assert_eq_event(TAGGED_EMPTY_INPUT, TAGGED_EMPTY_EVENTS);
}

#[test]
fn docs_comments() {
    assert_eq_event_with_comments(COMMENTS_INPUT, COMMENTS_EVENTS);
    assert_eq_event(
        COMMENTS_INPUT,
        "\n+DOC\n+MAP\n=VAL :a\n=VAL :b\n-MAP\n-DOC",
    );
}

#[test]
fn docs_block_sequence_events() {
    let evs = parse_events("- a\n- b").unwrap();
    let kinds: Vec<EventKind> = evs.iter().map(Event::kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::StreamStart,
            EventKind::DocumentStart,
            EventKind::SequenceStart,
            EventKind::Scalar,
            EventKind::Scalar,
            EventKind::SequenceEnd,
            EventKind::DocumentEnd,
            EventKind::StreamEnd,
        ]
    );
    assert_eq!(evs[1], Event::document_start());
    assert_eq!(evs[6], Event::document_end());
}

#[test]
fn docs_reader_walks_documents() {
    let mut reader = EventReader::new(Parser::new_from_str(DOC_MULTI_INPUT)).unwrap();
    reader.expect(EventKind::StreamStart).unwrap();
    let mut values = Vec::new();
    while reader.try_consume(EventKind::DocumentStart).unwrap().is_some() {
        reader.expect(EventKind::MappingStart).unwrap();
        while !reader.accept(EventKind::MappingEnd) {
            reader.skip().unwrap();
            if let Some(Event::Scalar { value, .. }) = reader.current() {
                values.push(value.clone());
            }
            reader.skip().unwrap();
        }
        reader.expect(EventKind::MappingEnd).unwrap();
        reader.expect(EventKind::DocumentEnd).unwrap();
    }
    reader.expect(EventKind::StreamEnd).unwrap();
    assert_eq!(values, vec!["1", "2"]);
}
