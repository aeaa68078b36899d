use crate::tokenizer::char_utils::{is_blank, is_blank_or_break, is_break, is_flow};
use crate::tokenizer::{is_alpha, is_printable};
use alloc::string::String;
use yamlet_common::{TagDirective, TagDirectiveCollection, YamlError, YamlResult};

/// Styles a scalar value can be written in, as far as its content is concerned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct ScalarAnalysis {
    pub multiline: bool,
    pub flow_plain_allowed: bool,
    pub block_plain_allowed: bool,
    pub single_quoted_allowed: bool,
    pub block_allowed: bool,
}

/// Scans `value` once and records which styles can represent it.
///
/// With `unicode` unset every non ASCII character counts as special, leaving only the
/// double quoted style.
pub(crate) fn analyze_scalar(value: &str, unicode: bool) -> ScalarAnalysis {
    if value.is_empty() {
        return ScalarAnalysis {
            multiline: false,
            flow_plain_allowed: false,
            block_plain_allowed: true,
            single_quoted_allowed: true,
            block_allowed: false,
        };
    }

    let mut block_indicators = value.starts_with("---") || value.starts_with("...");
    let mut flow_indicators = block_indicators;
    let mut line_breaks = false;
    let mut special_characters = false;

    let mut leading_space = false;
    let mut leading_break = false;
    let mut trailing_space = false;
    let mut trailing_break = false;
    let mut break_space = false;
    let mut space_break = false;
    let mut previous_space = false;
    let mut previous_break = false;

    let mut preceded_by_whitespace = true;
    let mut first = true;
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        let next = chars.peek().copied();
        let followed_by_whitespace = next.map_or(true, is_blank_or_break);
        let last = next.is_none();

        if first {
            if "#,[]{}&*!|>'\"%@`".contains(ch) {
                flow_indicators = true;
                block_indicators = true;
            }
            if ch == '?' || ch == ':' {
                flow_indicators = true;
                if followed_by_whitespace {
                    block_indicators = true;
                }
            }
            if ch == '-' && followed_by_whitespace {
                flow_indicators = true;
                block_indicators = true;
            }
        } else {
            if ",?[]{}".contains(ch) {
                flow_indicators = true;
            }
            if ch == ':' {
                flow_indicators = true;
                if followed_by_whitespace {
                    block_indicators = true;
                }
            }
            if ch == '#' && preceded_by_whitespace {
                flow_indicators = true;
                block_indicators = true;
            }
        }

        // `\r` and NEL are normalized by block scalars, only escapes keep them.
        if !is_printable(ch) || (!unicode && !ch.is_ascii()) || ch == '\r' || ch == '\u{85}' {
            special_characters = true;
        }

        if is_blank(ch) {
            leading_space |= first;
            trailing_space |= last;
            break_space |= previous_break;
            previous_space = true;
            previous_break = false;
        } else if is_break(ch) {
            line_breaks = true;
            leading_break |= first;
            trailing_break |= last;
            space_break |= previous_space;
            previous_space = false;
            previous_break = true;
        } else {
            previous_space = false;
            previous_break = false;
        }

        preceded_by_whitespace = is_blank_or_break(ch);
        first = false;
    }

    let mut analysis = ScalarAnalysis {
        multiline: line_breaks,
        flow_plain_allowed: true,
        block_plain_allowed: true,
        single_quoted_allowed: true,
        block_allowed: true,
    };

    if leading_space || leading_break || trailing_space || trailing_break {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
    }
    if trailing_space {
        analysis.block_allowed = false;
    }
    if break_space {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
    }
    if space_break || special_characters {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
        analysis.block_allowed = false;
    }
    // Line folding of quoted scalars does not survive every reader, breaks stay escaped.
    if line_breaks {
        analysis.flow_plain_allowed = false;
        analysis.block_plain_allowed = false;
        analysis.single_quoted_allowed = false;
    }
    if flow_indicators {
        analysis.flow_plain_allowed = false;
    }
    if block_indicators {
        analysis.block_plain_allowed = false;
    }
    analysis
}

/// How a tag gets written: `handle` + `suffix`, or verbatim `!<suffix>` without a handle.
#[derive(Clone, PartialEq, Eq, Debug)]
pub(crate) struct TagAnalysis {
    pub handle: Option<String>,
    pub suffix: Option<String>,
}

impl TagAnalysis {
    pub fn len(&self) -> usize {
        self.handle.as_ref().map_or(0, String::len) + self.suffix.as_ref().map_or(0, String::len)
    }
}

/// Shortens `tag` with the directive that has the longest matching prefix.
pub(crate) fn analyze_tag(tag: &str, directives: &TagDirectiveCollection) -> YamlResult<TagAnalysis> {
    if tag.is_empty() {
        return Err(YamlError::emitter("tag value must not be empty"));
    }
    if tag == "!" {
        return Ok(TagAnalysis {
            handle: Some(tag.into()),
            suffix: None,
        });
    }

    let directive = directives
        .iter()
        .filter(|d| d.prefix.len() < tag.len() && tag.starts_with(d.prefix.as_str()))
        .max_by_key(|d| d.prefix.len());

    Ok(match directive {
        Some(d) => TagAnalysis {
            handle: Some(d.handle.clone()),
            suffix: Some(tag[d.prefix.len()..].into()),
        },
        None => TagAnalysis {
            handle: None,
            suffix: Some(tag.into()),
        },
    })
}

pub(crate) fn analyze_tag_directive(directive: &TagDirective) -> YamlResult<()> {
    let handle = directive.handle.as_str();
    if handle.is_empty() {
        return Err(YamlError::emitter("tag handle must not be empty"));
    }
    if !handle.starts_with('!') {
        return Err(YamlError::emitter("tag handle must start with '!'"));
    }
    if !handle.ends_with('!') {
        return Err(YamlError::emitter("tag handle must end with '!'"));
    }
    if handle.len() > 2 && !handle[1..handle.len() - 1].chars().all(is_alpha) {
        return Err(YamlError::emitter(
            "tag handle must contain alphanumerical characters only",
        ));
    }
    if directive.prefix.is_empty() {
        return Err(YamlError::emitter("tag prefix must not be empty"));
    }
    Ok(())
}

pub(crate) fn analyze_anchor(name: &str, alias: bool) -> YamlResult<()> {
    if name.is_empty() {
        return Err(YamlError::emitter(if alias {
            "alias value must not be empty"
        } else {
            "anchor value must not be empty"
        }));
    }
    if !name
        .chars()
        .all(|c| is_printable(c) && !is_blank_or_break(c) && !is_flow(c))
    {
        return Err(YamlError::emitter(if alias {
            "alias value must contain printable non-space characters only"
        } else {
            "anchor value must contain printable non-space characters only"
        }));
    }
    Ok(())
}

/// Characters written as-is in tags, everything else is percent encoded.
///
/// `,` `[` `]` only survive in verbatim tags and `%TAG` prefixes.
pub(crate) fn is_tag_char(c: char, allow_flow_chars: bool) -> bool {
    is_alpha(c)
        || ";/?:@&=+$.!~*'()".contains(c)
        || (allow_flow_chars && matches!(c, ',' | '[' | ']'))
}

/// Block scalar header hints: explicit indentation and chomping.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct BlockHints {
    pub indent: bool,
    pub chomp: Option<char>,
}

/// `-` when the value has no final break, `+` when more than one break would be lost by
/// clipping, nothing when exactly one trailing break is kept.
pub(crate) fn block_scalar_hints(value: &str) -> BlockHints {
    let indent = value
        .chars()
        .next()
        .is_some_and(is_blank_or_break);

    let mut rev = value.chars().rev();
    let chomp = match rev.next() {
        None => Some('-'),
        Some(last) if !is_break(last) => Some('-'),
        Some(_) => match rev.next() {
            None => Some('+'),
            Some(prev) if is_break(prev) => Some('+'),
            Some(_) => None,
        },
    };
    BlockHints { indent, chomp }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_word() {
        let a = analyze_scalar("hello", true);
        assert!(a.flow_plain_allowed && a.block_plain_allowed);
        assert!(a.single_quoted_allowed && a.block_allowed);
        assert!(!a.multiline);
    }

    #[test]
    fn test_empty() {
        let a = analyze_scalar("", true);
        assert!(!a.flow_plain_allowed);
        assert!(a.block_plain_allowed);
        assert!(!a.block_allowed);
    }

    #[test]
    fn test_indicators() {
        assert!(!analyze_scalar("- a", true).block_plain_allowed);
        assert!(analyze_scalar("-a", true).block_plain_allowed);
        assert!(!analyze_scalar("a: b", true).block_plain_allowed);
        assert!(analyze_scalar("a:b", true).block_plain_allowed);
        assert!(!analyze_scalar("a:b", true).flow_plain_allowed);
        assert!(!analyze_scalar("a #b", true).block_plain_allowed);
        assert!(analyze_scalar("a#b", true).block_plain_allowed);
        assert!(!analyze_scalar("[x]", true).block_plain_allowed);
        assert!(!analyze_scalar("--- x", true).block_plain_allowed);
        assert!(!analyze_scalar("'q", true).block_plain_allowed);
    }

    #[test]
    fn test_spaces() {
        let a = analyze_scalar(" lead", true);
        assert!(!a.block_plain_allowed && a.single_quoted_allowed && a.block_allowed);
        let a = analyze_scalar("trail ", true);
        assert!(!a.block_plain_allowed && !a.block_allowed);
    }

    #[test]
    fn test_multiline() {
        let a = analyze_scalar("hello\nworld", true);
        assert!(a.multiline);
        assert!(!a.block_plain_allowed && !a.flow_plain_allowed);
        assert!(!a.single_quoted_allowed);
        assert!(a.block_allowed);

        let a = analyze_scalar("a \nb", true);
        assert!(!a.block_allowed);
    }

    #[test]
    fn test_special() {
        let a = analyze_scalar("bell\x07", true);
        assert!(!a.single_quoted_allowed && !a.block_allowed && !a.block_plain_allowed);
        assert!(analyze_scalar("é", true).block_plain_allowed);
        assert!(!analyze_scalar("é", false).block_plain_allowed);
    }

    #[test]
    fn test_tags() {
        let col = TagDirectiveCollection::with_defaults();
        let t = analyze_tag("tag:yaml.org,2002:str", &col).unwrap();
        assert_eq!(t.handle.as_deref(), Some("!!"));
        assert_eq!(t.suffix.as_deref(), Some("str"));
        let t = analyze_tag("!local", &col).unwrap();
        assert_eq!(t.handle.as_deref(), Some("!"));
        assert_eq!(t.suffix.as_deref(), Some("local"));
        let t = analyze_tag("tag:example.com,2000:x", &col).unwrap();
        assert_eq!(t.handle, None);
        assert_eq!(t.len(), "tag:example.com,2000:x".len());
        assert!(analyze_tag("", &col).is_err());
    }

    #[test]
    fn test_tag_directive_validation() {
        assert!(analyze_tag_directive(&TagDirective::new("!e!", "tag:e:")).is_ok());
        assert!(analyze_tag_directive(&TagDirective::new("e!", "tag:e:")).is_err());
        assert!(analyze_tag_directive(&TagDirective::new("!e", "tag:e:")).is_err());
        assert!(analyze_tag_directive(&TagDirective::new("!e e!", "tag:e:")).is_err());
        assert!(analyze_tag_directive(&TagDirective::new("!e!", "")).is_err());
    }

    #[test]
    fn test_carriage_return_needs_escape() {
        let a = analyze_scalar("a\r\nb", true);
        assert!(!a.block_allowed && !a.single_quoted_allowed);
    }

    #[test]
    fn test_tag_chars() {
        assert!(is_tag_char('-', false));
        assert!(!is_tag_char(',', false));
        assert!(is_tag_char(',', true));
        assert!(!is_tag_char('#', true));
    }

    #[test]
    fn test_anchor() {
        assert!(analyze_anchor("a1", false).is_ok());
        assert!(analyze_anchor("", true).is_err());
        assert!(analyze_anchor("a b", false).is_err());
        assert!(analyze_anchor("a,b", false).is_err());
    }

    #[test]
    fn test_hints() {
        assert_eq!(block_scalar_hints("a"), BlockHints { indent: false, chomp: Some('-') });
        assert_eq!(block_scalar_hints("a\n"), BlockHints { indent: false, chomp: None });
        assert_eq!(block_scalar_hints("a\n\n"), BlockHints { indent: false, chomp: Some('+') });
        assert_eq!(block_scalar_hints("\n"), BlockHints { indent: true, chomp: Some('+') });
        assert_eq!(block_scalar_hints(" a\n"), BlockHints { indent: true, chomp: None });
        assert_eq!(block_scalar_hints("\t b"), BlockHints { indent: true, chomp: Some('-') });
    }
}
