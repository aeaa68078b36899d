use proptest::prelude::*;
use yamlet_core::{CollectionStyle, EmitterSettings, Event, ScalarType};
use yamlet_test_bench::{
    emit_events, emit_events_with_settings, normalize, parse_events, parse_events_with_comments,
};

#[derive(Clone, Debug)]
enum Node {
    Scalar(String, ScalarType),
    Seq(CollectionStyle, Vec<Node>),
    Map(CollectionStyle, Vec<(String, Node)>),
}

fn word() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,5}"
}

fn scalar_value() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::collection::vec(word(), 1..4).prop_map(|words| words.join(" ")),
        1 => prop::collection::vec(word(), 2..4).prop_map(|lines| lines.join("\n")),
        1 => Just(String::new()),
        1 => prop::sample::select(vec![
            "a: b", "- x", "#c", "it's", "say \"hi\"", "true", "~", "[x]", "{y}", "@at", "a\tb",
        ])
        .prop_map(String::from),
    ]
}

fn scalar_style() -> impl Strategy<Value = ScalarType> {
    prop::sample::select(vec![
        ScalarType::Any,
        ScalarType::Plain,
        ScalarType::SingleQuote,
        ScalarType::DoubleQuote,
        ScalarType::Literal,
        ScalarType::Folded,
    ])
}

fn collection_style() -> impl Strategy<Value = CollectionStyle> {
    prop::sample::select(vec![
        CollectionStyle::Any,
        CollectionStyle::Block,
        CollectionStyle::Flow,
    ])
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = (scalar_value(), scalar_style()).prop_map(|(value, style)| Node::Scalar(value, style));
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (collection_style(), prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(style, items)| Node::Seq(style, items)),
            (collection_style(), prop::collection::vec((word(), inner), 0..4))
                .prop_map(|(style, entries)| Node::Map(style, entries)),
        ]
    })
}

/// Same shapes as [`node`], but every scalar is a single plain word.
fn plain_node() -> impl Strategy<Value = Node> {
    let leaf = word().prop_map(|value| Node::Scalar(value, ScalarType::Any));
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (collection_style(), prop::collection::vec(inner.clone(), 1..4))
                .prop_map(|(style, items)| Node::Seq(style, items)),
            (collection_style(), prop::collection::vec((word(), inner), 1..4))
                .prop_map(|(style, entries)| Node::Map(style, entries)),
        ]
    })
}

/// Short values built from whitespace and every indicator character.
fn tricky_value() -> impl Strategy<Value = String> {
    let chars = vec![
        ' ', ' ', '\t', '\n', 'a', 'b', 'c', '#', ':', ',', '-', '?', '[', ']', '{', '}', '\'',
        '"', '\\', '!', '&', '*', '|', '>', '%', '@', '`',
    ];
    prop::collection::vec(prop::sample::select(chars), 0..12)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Where a scalar sits relative to its siblings.
#[derive(Clone, Copy, Debug)]
enum Place {
    Root,
    BlockItem,
    FlowItem,
    BlockValue,
    FlowValue,
    BlockKey,
    FlowKey,
}

fn place() -> impl Strategy<Value = Place> {
    prop::sample::select(vec![
        Place::Root,
        Place::BlockItem,
        Place::FlowItem,
        Place::BlockValue,
        Place::FlowValue,
        Place::BlockKey,
        Place::FlowKey,
    ])
}

fn placed(place: Place, scalar: Event) -> Vec<Event> {
    let sibling = || Event::scalar("z");
    let mut events = vec![Event::StreamStart, Event::document_start()];
    match place {
        Place::Root => events.push(scalar),
        Place::BlockItem | Place::FlowItem => {
            let style = match place {
                Place::BlockItem => CollectionStyle::Block,
                _ => CollectionStyle::Flow,
            };
            events.extend([Event::sequence_start(style), scalar, sibling(), Event::SequenceEnd]);
        }
        Place::BlockValue | Place::FlowValue | Place::BlockKey | Place::FlowKey => {
            let style = match place {
                Place::BlockValue | Place::BlockKey => CollectionStyle::Block,
                _ => CollectionStyle::Flow,
            };
            events.push(Event::mapping_start(style));
            match place {
                Place::BlockValue | Place::FlowValue => events.extend([Event::scalar("k"), scalar]),
                _ => events.extend([scalar, Event::scalar("v")]),
            }
            events.extend([sibling(), Event::scalar("y"), Event::MappingEnd]);
        }
    }
    events.push(Event::document_end());
    events.push(Event::StreamEnd);
    events
}

fn push_events(node: &Node, out: &mut Vec<Event>) {
    match node {
        Node::Scalar(value, style) => out.push(Event::scalar_with_style(value.clone(), *style)),
        Node::Seq(style, items) => {
            out.push(Event::sequence_start(*style));
            for item in items {
                push_events(item, out);
            }
            out.push(Event::SequenceEnd);
        }
        Node::Map(style, entries) => {
            out.push(Event::mapping_start(*style));
            for (key, value) in entries {
                out.push(Event::scalar(key.clone()));
                push_events(value, out);
            }
            out.push(Event::MappingEnd);
        }
    }
}

fn stream(docs: &[Node]) -> Vec<Event> {
    let mut events = vec![Event::StreamStart];
    for doc in docs {
        events.push(Event::document_start());
        push_events(doc, &mut events);
        events.push(Event::document_end());
    }
    events.push(Event::StreamEnd);
    events
}

fn scalar_values(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .filter_map(|ev| match ev {
            Event::Scalar { value, .. } => Some(value.clone()),
            _ => None,
        })
        .collect()
}

fn structural(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .filter(|ev| !matches!(ev, Event::Comment { .. }))
        .collect()
}

/// Puts a full line comment before every `every`-th line and an inline one after the others.
fn sprinkle_comments(text: &str, every: usize) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for (i, line) in text.lines().enumerate() {
        if i % every == 0 {
            out.push_str("# full line\n");
            out.push_str(line);
        } else {
            out.push_str(line);
            out.push_str(" # inline");
        }
        out.push('\n');
    }
    out
}

proptest! {
    #[test]
    fn emit_parse_cycle_is_stable(docs in prop::collection::vec(node(), 1..3)) {
        let text = emit_events(stream(&docs)).unwrap();
        let first = parse_events(&text).unwrap();
        let second = parse_events(&emit_events(first.clone()).unwrap()).unwrap();
        prop_assert_eq!(normalize(&first), normalize(&second));
    }

    #[test]
    fn scalar_values_survive_emit(docs in prop::collection::vec(node(), 1..3)) {
        let events = stream(&docs);
        let text = emit_events(events.clone()).unwrap();
        let parsed = parse_events(&text).unwrap();
        prop_assert_eq!(scalar_values(&events), scalar_values(&parsed));

        for ev in &parsed {
            if let Event::Scalar { value, style, .. } = ev {
                if value.contains('\n') {
                    prop_assert!(!matches!(style, ScalarType::Plain | ScalarType::SingleQuote));
                }
            }
        }
    }

    #[test]
    fn comments_do_not_change_structure(doc in plain_node(), every in 1usize..4) {
        let text = emit_events(stream(&[doc])).unwrap();
        let commented = sprinkle_comments(&text, every);
        let with_comments = parse_events_with_comments(&commented).unwrap();
        let without_comments = parse_events(&commented).unwrap();
        let has_comment = with_comments.iter().any(|ev| matches!(ev, Event::Comment { .. }));
        prop_assert!(has_comment);
        prop_assert_eq!(structural(with_comments), without_comments);
    }

    #[test]
    fn tricky_scalars_survive_any_place_and_width(
        value in tricky_value(),
        style in scalar_style(),
        place in place(),
        best_indent in 2usize..5,
        extra_width in 0usize..20,
    ) {
        let settings = EmitterSettings::default()
            .with_best_indent(best_indent)
            .with_best_width(2 * best_indent + 1 + extra_width);
        let events = placed(place, Event::scalar_with_style(value, style));
        let text = emit_events_with_settings(events.clone(), settings.clone()).unwrap();
        let parsed = parse_events(&text)
            .map_err(|err| TestCaseError::fail(format!("{err} while reading {text:?}")))?;
        prop_assert_eq!(scalar_values(&events), scalar_values(&parsed), "{:?}", text);

        let again = emit_events_with_settings(parsed.clone(), settings).unwrap();
        let reparsed = parse_events(&again)
            .map_err(|err| TestCaseError::fail(format!("{err} while reading {again:?}")))?;
        prop_assert_eq!(normalize(&parsed), normalize(&reparsed), "{:?}", again);
    }
}
