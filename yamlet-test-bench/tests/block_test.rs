use yamlet_test_bench::assert_eq_event;
use yamlet_test_bench::consts::*;

#[test]
fn block_seq() {
    assert_eq_event(BLOCK_SEQ1_INPUT, BLOCK_SEQ_EVENTS);
    assert_eq_event(BLOCK_SEQ2_INPUT, BLOCK_SEQ_EVENTS);
    assert_eq_event(BLOCK_SEQ_PLAIN_INPUT, BLOCK_SEQ_PLAIN_EVENTS);
    assert_eq_event(BLOCK_SEQ_EMPTY_INPUT, BLOCK_SEQ_EMPTY_EVENTS);
}

#[test]
fn block_seq_nested() {
    assert_eq_event(BLOCK_NESTED_SEQ_INPUT, BLOCK_NESTED_SEQ_EVENTS);
}

#[test]
fn block_seq_err() {
    assert_eq_event(BLOCK_SEQ_DEDENT_INPUT, BLOCK_SEQ_DEDENT_EVENTS);
    assert_eq_event(BLOCK_SEQ_THEN_KEY_INPUT, BLOCK_SEQ_THEN_KEY_EVENTS);
}

#[test]
fn block_map() {
    assert_eq_event(BLOCK_MAP_INPUT, BLOCK_MAP_EVENTS);
    assert_eq_event(BLOCK_MAP_INDENTLESS_INPUT, BLOCK_MAP_INDENTLESS_EVENTS);
    assert_eq_event(BLOCK_MAP_EMPTY_INPUT, BLOCK_MAP_EMPTY_EVENTS);
    assert_eq_event(BLOCK_MAP_COMPLEX_KEY_INPUT, BLOCK_MAP_COMPLEX_KEY_EVENTS);
}

#[test]
fn block_map_err() {
    assert_eq_event(BLOCK_MAP_SEQ_DEDENT_INPUT, BLOCK_MAP_SEQ_DEDENT_EVENTS);
}

#[test]
fn block_plain_scalar() {
    assert_eq_event(BLOCK_PLAIN_MULTI_INPUT, BLOCK_PLAIN_MULTI_EVENTS);
    assert_eq_event(BLOCK_PLAIN_CHARS_INPUT, BLOCK_PLAIN_CHARS_EVENTS);
}

#[test]
fn block_literal() {
    assert_eq_event(LITERAL_INPUT, LITERAL_EVENTS);
    assert_eq_event(INDENT_INDICATOR_INPUT, INDENT_INDICATOR_EVENTS);
}

#[test]
fn block_fold() {
    assert_eq_event(FOLDED_INPUT, FOLDED_EVENTS);
}

#[test]
fn block_chomp() {
    assert_eq_event(CHOMP_INPUT, CHOMP_EVENTS);
}
