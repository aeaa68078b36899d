pub const BLOCK_SEQ1_INPUT: &str = r"
- x
- y
";
pub const BLOCK_SEQ2_INPUT: &str = r"
    - x
    - y
";
pub const BLOCK_SEQ_EVENTS: &str = r"
+DOC
+SEQ
=VAL :x
=VAL :y
-SEQ
-DOC";

pub const BLOCK_SEQ_PLAIN_INPUT: &str = r"
  - x
   - y
";
pub const BLOCK_SEQ_PLAIN_EVENTS: &str = r"
+DOC
+SEQ
=VAL :x - y
-SEQ
-DOC";

pub const BLOCK_SEQ_EMPTY_INPUT: &str = r"
-
- x
-
";
pub const BLOCK_SEQ_EMPTY_EVENTS: &str = r"
+DOC
+SEQ
=VAL :
=VAL :x
=VAL :
-SEQ
-DOC";

pub const BLOCK_NESTED_SEQ_INPUT: &str = r"
- - a
  - b
- c
";
pub const BLOCK_NESTED_SEQ_EVENTS: &str = r"
+DOC
+SEQ
+SEQ
=VAL :a
=VAL :b
-SEQ
=VAL :c
-SEQ
-DOC";

pub const BLOCK_SEQ_DEDENT_INPUT: &str = r"
  - x
 - y
";
pub const BLOCK_SEQ_DEDENT_EVENTS: &str = r"
+DOC
+SEQ
=VAL :x
-SEQ
ERR";

pub const BLOCK_SEQ_THEN_KEY_INPUT: &str = r"
- a
b: c
";
pub const BLOCK_SEQ_THEN_KEY_EVENTS: &str = r"
+DOC
+SEQ
=VAL :a
ERR";

pub const BLOCK_MAP_INPUT: &str = r"
a: 1
b:
  c: 2
";
pub const BLOCK_MAP_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :1
=VAL :b
+MAP
=VAL :c
=VAL :2
-MAP
-MAP
-DOC";

pub const BLOCK_MAP_INDENTLESS_INPUT: &str = r"
key:
- a
- b
next: c
";
pub const BLOCK_MAP_INDENTLESS_EVENTS: &str = r"
+DOC
+MAP
=VAL :key
+SEQ
=VAL :a
=VAL :b
-SEQ
=VAL :next
=VAL :c
-MAP
-DOC";

pub const BLOCK_MAP_EMPTY_INPUT: &str = r"
a:
b:
";
pub const BLOCK_MAP_EMPTY_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :
=VAL :b
=VAL :
-MAP
-DOC";

pub const BLOCK_MAP_COMPLEX_KEY_INPUT: &str = r"
? a
: b
? c
";
pub const BLOCK_MAP_COMPLEX_KEY_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :b
=VAL :c
=VAL :
-MAP
-DOC";

pub const BLOCK_MAP_SEQ_DEDENT_INPUT: &str = r"
a:
  - b
 - c
";
pub const BLOCK_MAP_SEQ_DEDENT_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
+SEQ
=VAL :b
-SEQ
ERR";

pub const BLOCK_PLAIN_MULTI_INPUT: &str = r"
key: first
  second

  third
";
pub const BLOCK_PLAIN_MULTI_EVENTS: &str = r"
+DOC
+MAP
=VAL :key
=VAL :first second\nthird
-MAP
-DOC";

pub const BLOCK_PLAIN_CHARS_INPUT: &str = r"
url: http://x.y/z#frag
pair: a:b
neg: -1
";
pub const BLOCK_PLAIN_CHARS_EVENTS: &str = r"
+DOC
+MAP
=VAL :url
=VAL :http://x.y/z#frag
=VAL :pair
=VAL :a:b
=VAL :neg
=VAL :-1
-MAP
-DOC";

pub const LITERAL_INPUT: &str = r"
- |
  line1
  line2
- next
";
pub const LITERAL_EVENTS: &str = r"
+DOC
+SEQ
=VAL |line1\nline2\n
=VAL :next
-SEQ
-DOC";

pub const FOLDED_INPUT: &str = r"
>
  a
  b

  c
";
pub const FOLDED_EVENTS: &str = r"
+DOC
=VAL >a b\nc\n
-DOC";

pub const CHOMP_INPUT: &str = r"
strip: |-
  a

clip: |
  b

keep: |+
  c

";
pub const CHOMP_EVENTS: &str = r"
+DOC
+MAP
=VAL :strip
=VAL |a
=VAL :clip
=VAL |b\n
=VAL :keep
=VAL |c\n\n
-MAP
-DOC";

pub const INDENT_INDICATOR_INPUT: &str = r"
- |2
   x
  y
";
pub const INDENT_INDICATOR_EVENTS: &str = r"
+DOC
+SEQ
=VAL | x\ny\n
-SEQ
-DOC";

pub const FLOW_SEQ_INPUT: &str = r"[a, b, c]";
pub const FLOW_SEQ_MULTILINE_INPUT: &str = r"
[a,
  b,
  c,
]
";
pub const FLOW_SEQ_EVENTS: &str = r"
+DOC
+SEQ
=VAL :a
=VAL :b
=VAL :c
-SEQ
-DOC";

pub const FLOW_NESTED_INPUT: &str = r"{a: [b, c], d: {e: f}}";
pub const FLOW_NESTED_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
+SEQ
=VAL :b
=VAL :c
-SEQ
=VAL :d
+MAP
=VAL :e
=VAL :f
-MAP
-MAP
-DOC";

pub const FLOW_MAP_EMPTY_VALUES_INPUT: &str = r"{a, b: }";
pub const FLOW_MAP_EMPTY_VALUES_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :
=VAL :b
=VAL :
-MAP
-DOC";

pub const FLOW_SEQ_PAIR_INPUT: &str = r"[a: b, c]";
pub const FLOW_SEQ_PAIR_EVENTS: &str = r"
+DOC
+SEQ
+MAP
=VAL :a
=VAL :b
-MAP
=VAL :c
-SEQ
-DOC";

pub const FLOW_IN_BLOCK_INPUT: &str = r"
key: [1, 2]
other: {x: y}
";
pub const FLOW_IN_BLOCK_EVENTS: &str = r"
+DOC
+MAP
=VAL :key
+SEQ
=VAL :1
=VAL :2
-SEQ
=VAL :other
+MAP
=VAL :x
=VAL :y
-MAP
-MAP
-DOC";

pub const FLOW_UNCLOSED_SEQ_INPUT: &str = r"[a, b";
pub const FLOW_UNCLOSED_SEQ_EVENTS: &str = r"
+DOC
+SEQ
=VAL :a
=VAL :b
ERR";

pub const FLOW_UNCLOSED_MAP_INPUT: &str = r"{a: b";
pub const FLOW_UNCLOSED_MAP_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :b
ERR";

pub const FLOW_DOUBLE_COMMA_INPUT: &str = r"[a, , b]";
pub const FLOW_DOUBLE_COMMA_EVENTS: &str = r"
+DOC
+SEQ
=VAL :a
ERR";

pub const SQUOTE_INPUT: &str = r"'it''s'";
pub const SQUOTE_EVENTS: &str = r"
+DOC
=VAL 'it's
-DOC";

pub const SQUOTE_MULTI_INPUT: &str = r"
- 'a
  b'
- 'c

  d'
";
pub const SQUOTE_MULTI_EVENTS: &str = r"
+DOC
+SEQ
=VAL 'a b
=VAL 'c\nd
-SEQ
-DOC";

pub const DQUOTE_ESCAPE_INPUT: &str = r#""a\tbé\\""#;
pub const DQUOTE_ESCAPE_EVENTS: &str = r#"
+DOC
=VAL "a\tbé\\
-DOC"#;

pub const DQUOTE_SURROGATE_INPUT: &str = r#""\uD83D\uDE00 \x41\U0001F600""#;
pub const DQUOTE_SURROGATE_EVENTS: &str = r#"
+DOC
=VAL "😀 A😀
-DOC"#;

pub const DQUOTE_LINE_ESCAPE_INPUT: &str = r#"
- "c\
  d"
- "e
  f"
"#;
pub const DQUOTE_LINE_ESCAPE_EVENTS: &str = r#"
+DOC
+SEQ
=VAL "cd
=VAL "e f
-SEQ
-DOC"#;

pub const DQUOTE_BAD_ESCAPE_INPUT: &str = r#""\q""#;
pub const DQUOTE_BAD_ESCAPE_EVENTS: &str = r"
ERR";

pub const DQUOTE_LONE_SURROGATE_INPUT: &str = r#""\uD83D x""#;
pub const DQUOTE_LONE_SURROGATE_EVENTS: &str = r"
ERR";

pub const SQUOTE_UNCLOSED_INPUT: &str = r"key: 'abc";
pub const SQUOTE_UNCLOSED_EVENTS: &str = r"
+DOC
+MAP
=VAL :key
ERR";

pub const DOC_EXPLICIT_INPUT: &str = r"
--- a
...
--- b
";
pub const DOC_EXPLICIT_EVENTS: &str = r"
+DOC
=VAL :a
-DOC
+DOC
=VAL :b
-DOC";

pub const DOC_MULTI_INPUT: &str = r"
a: 1
---
b: 2
";
pub const DOC_MULTI_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL :1
-MAP
-DOC
+DOC
+MAP
=VAL :b
=VAL :2
-MAP
-DOC";

pub const DOC_EMPTY_INPUT: &str = r"
---
...
";
pub const DOC_EMPTY_EVENTS: &str = r"
+DOC
=VAL :
-DOC";

pub const DOC_DIRECTIVES_INPUT: &str = r"
%YAML 1.1
%TAG !e! tag:example.com,2000:
--- !e!foo bar
";
pub const DOC_DIRECTIVES_EVENTS: &str = r"
+DOC
=VAL <tag:example.com,2000:foo> :bar
-DOC";

pub const DOC_BARE_AFTER_END_INPUT: &str = r"
a
...
b
";
pub const DOC_BARE_AFTER_END_EVENTS: &str = r"
+DOC
=VAL :a
-DOC
ERR";

pub const DOC_DUPLICATE_VERSION_INPUT: &str = r"
%YAML 1.1
%YAML 1.1
---
";
pub const DOC_UNSUPPORTED_VERSION_INPUT: &str = r"
%YAML 2.0
--- a
";
pub const DOC_DIRECTIVE_ERR_EVENTS: &str = r"
ERR";

pub const DOC_UNDEFINED_HANDLE_INPUT: &str = r"!x!foo bar";
pub const DOC_UNDEFINED_HANDLE_EVENTS: &str = r"
+DOC
ERR";

pub const NODE_PROPERTIES_INPUT: &str = r"&a [*a, !!str b, !local c, !<tag:x> d, ! e]";
pub const NODE_PROPERTIES_EVENTS: &str = r"
+DOC
+SEQ &a
=ALI *a
=VAL <tag:yaml.org,2002:str> :b
=VAL <!local> :c
=VAL <tag:x> :d
=VAL <!> :e
-SEQ
-DOC";

pub const ANCHORED_KEYS_INPUT: &str = r"
&m
&k key: &v value
";
pub const ANCHORED_KEYS_EVENTS: &str = r"
+DOC
+MAP &m
=VAL &k :key
=VAL &v :value
-MAP
-DOC";

pub const TAGGED_EMPTY_INPUT: &str = r"
a: !!null
b: !!seq
- x
";
pub const TAGGED_EMPTY_EVENTS: &str = r"
+DOC
+MAP
=VAL :a
=VAL <tag:yaml.org,2002:null> :
=VAL :b
+SEQ <tag:yaml.org,2002:seq>
=VAL :x
-SEQ
-MAP
-DOC";

pub const COMMENTS_INPUT: &str = r"
# top
a: b # side
";
pub const COMMENTS_EVENTS: &str = r"
=COM #top
+DOC
+MAP
=VAL :a
=VAL :b
=ICOM #side
-MAP
-DOC";
