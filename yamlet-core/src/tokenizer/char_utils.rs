#[cfg_attr(not(feature = "no-inline"), inline)]
pub(crate) fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

#[cfg_attr(not(feature = "no-inline"), inline)]
pub(crate) fn is_break(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\u{85}' | '\u{2028}' | '\u{2029}')
}

#[cfg_attr(not(feature = "no-inline"), inline)]
pub(crate) fn is_breakz(c: char) -> bool {
    c == '\0' || is_break(c)
}

#[cfg_attr(not(feature = "no-inline"), inline)]
pub(crate) fn is_blank_or_break(c: char) -> bool {
    is_blank(c) || is_break(c)
}

#[cfg_attr(not(feature = "no-inline"), inline)]
pub(crate) fn is_blank_or_breakz(c: char) -> bool {
    c == '\0' || is_blank(c) || is_break(c)
}

#[cfg_attr(not(feature = "no-inline"), inline)]
pub(crate) fn is_flow(c: char) -> bool {
    matches!(c, ',' | '[' | ']' | '{' | '}')
}

/// Letters, digits, `_` and `-`. Used for anchors, tag handles and directive names.
#[inline]
#[must_use]
pub fn is_alpha(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='z' | 'A'..='Z' | '_' | '-')
}

#[inline]
#[must_use]
pub(crate) fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
#[must_use]
pub(crate) fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// Check whether the character is a valid URI character, flow indicators excluded.
#[inline]
#[must_use]
pub(crate) fn is_uri_char(c: char) -> bool {
    is_alpha(c) || ";/?:@&=+$.!~*'()%".contains(c)
}

#[inline]
#[must_use]
pub fn as_hex(c: char) -> u32 {
    c.to_digit(16).unwrap_or(0)
}

/// `true` for characters YAML allows unescaped in a stream.
#[must_use]
pub fn is_printable(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r' | '\u{85}'
        | '\u{20}'..='\u{7E}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
        && c != '\u{FEFF}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breaks() {
        assert!(is_break('\n'));
        assert!(is_break('\u{2028}'));
        assert!(!is_break(' '));
        assert!(is_breakz('\0'));
        assert!(is_blank_or_breakz('\t'));
    }

    #[test]
    fn test_printable() {
        assert!(is_printable('a'));
        assert!(is_printable('😀'));
        assert!(is_printable('é'));
        assert!(!is_printable('\u{7}'));
        assert!(!is_printable('\u{FEFF}'));
        assert!(!is_printable('\u{1B}'));
    }

    #[test]
    fn test_uri_chars() {
        assert!(is_uri_char('%'));
        assert!(is_uri_char(':'));
        assert!(!is_uri_char(' '));
        assert!(!is_uri_char('{'));
        assert!(!is_uri_char(','));
        assert_eq!(as_hex('f'), 15);
        assert_eq!(as_hex('A'), 10);
    }
}
