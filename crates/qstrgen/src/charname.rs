//! Code-point naming for identifier sanitization.
//!
//! Qstr contents are arbitrary text, but the generated table needs a bare
//! identifier per entry. Every character outside `[A-Za-z0-9_]` is replaced
//! by `_<name>_`, where `<name>` comes from a static naming table: the HTML
//! named-entity names for the ASCII and Latin-1 ranges, overridden with
//! shorter names for the punctuation that shows up constantly in qstrs
//! (`.` is `dot`, not `period`, and so on). Code points without an entry
//! fall back to lowercase hex, `_0xNN_`, widening past two digits for code
//! points above 0xFF (e.g. `_0x2192_`).

/// Names for code points outside `[A-Za-z0-9_]`.
static CODEPOINT_NAMES: phf::Map<char, &'static str> = phf::phf_map! {
    ' ' => "space",
    '!' => "bang",
    '"' => "quot",
    '#' => "hash",
    '$' => "dollar",
    '%' => "percent",
    '&' => "amp",
    '\'' => "squot",
    '(' => "paren_open",
    ')' => "paren_close",
    '*' => "star",
    '+' => "plus",
    ',' => "comma",
    '-' => "hyphen",
    '.' => "dot",
    '/' => "slash",
    ':' => "colon",
    ';' => "semicolon",
    '<' => "lt",
    '=' => "equals",
    '>' => "gt",
    '?' => "question",
    '@' => "at_sign",
    '[' => "bracket_open",
    '\\' => "backslash",
    ']' => "bracket_close",
    '^' => "caret",
    '{' => "brace_open",
    '|' => "pipe",
    '}' => "brace_close",
    '~' => "tilde",

    '\u{a0}' => "nbsp",
    '\u{a1}' => "iexcl",
    '\u{a2}' => "cent",
    '\u{a3}' => "pound",
    '\u{a4}' => "curren",
    '\u{a5}' => "yen",
    '\u{a6}' => "brvbar",
    '\u{a7}' => "sect",
    '\u{a8}' => "uml",
    '\u{a9}' => "copy",
    '\u{aa}' => "ordf",
    '\u{ab}' => "laquo",
    '\u{ac}' => "not",
    '\u{ad}' => "shy",
    '\u{ae}' => "reg",
    '\u{af}' => "macr",
    '\u{b0}' => "deg",
    '\u{b1}' => "plusmn",
    '\u{b2}' => "sup2",
    '\u{b3}' => "sup3",
    '\u{b4}' => "acute",
    '\u{b5}' => "micro",
    '\u{b6}' => "para",
    '\u{b7}' => "middot",
    '\u{b8}' => "cedil",
    '\u{b9}' => "sup1",
    '\u{ba}' => "ordm",
    '\u{bb}' => "raquo",
    '\u{bc}' => "frac14",
    '\u{bd}' => "frac12",
    '\u{be}' => "frac34",
    '\u{bf}' => "iquest",
    '\u{c0}' => "Agrave",
    '\u{c1}' => "Aacute",
    '\u{c2}' => "Acirc",
    '\u{c3}' => "Atilde",
    '\u{c4}' => "Auml",
    '\u{c5}' => "Aring",
    '\u{c6}' => "AElig",
    '\u{c7}' => "Ccedil",
    '\u{c8}' => "Egrave",
    '\u{c9}' => "Eacute",
    '\u{ca}' => "Ecirc",
    '\u{cb}' => "Euml",
    '\u{cc}' => "Igrave",
    '\u{cd}' => "Iacute",
    '\u{ce}' => "Icirc",
    '\u{cf}' => "Iuml",
    '\u{d0}' => "ETH",
    '\u{d1}' => "Ntilde",
    '\u{d2}' => "Ograve",
    '\u{d3}' => "Oacute",
    '\u{d4}' => "Ocirc",
    '\u{d5}' => "Otilde",
    '\u{d6}' => "Ouml",
    '\u{d7}' => "times",
    '\u{d8}' => "Oslash",
    '\u{d9}' => "Ugrave",
    '\u{da}' => "Uacute",
    '\u{db}' => "Ucirc",
    '\u{dc}' => "Uuml",
    '\u{dd}' => "Yacute",
    '\u{de}' => "THORN",
    '\u{df}' => "szlig",
    '\u{e0}' => "agrave",
    '\u{e1}' => "aacute",
    '\u{e2}' => "acirc",
    '\u{e3}' => "atilde",
    '\u{e4}' => "auml",
    '\u{e5}' => "aring",
    '\u{e6}' => "aelig",
    '\u{e7}' => "ccedil",
    '\u{e8}' => "egrave",
    '\u{e9}' => "eacute",
    '\u{ea}' => "ecirc",
    '\u{eb}' => "euml",
    '\u{ec}' => "igrave",
    '\u{ed}' => "iacute",
    '\u{ee}' => "icirc",
    '\u{ef}' => "iuml",
    '\u{f0}' => "eth",
    '\u{f1}' => "ntilde",
    '\u{f2}' => "ograve",
    '\u{f3}' => "oacute",
    '\u{f4}' => "ocirc",
    '\u{f5}' => "otilde",
    '\u{f6}' => "ouml",
    '\u{f7}' => "divide",
    '\u{f8}' => "oslash",
    '\u{f9}' => "ugrave",
    '\u{fa}' => "uacute",
    '\u{fb}' => "ucirc",
    '\u{fc}' => "uuml",
    '\u{fd}' => "yacute",
    '\u{fe}' => "thorn",
    '\u{ff}' => "yuml",
};

/// Renders a qstr's content as a bare identifier fragment.
///
/// Characters in `[A-Za-z0-9_]` pass through; everything else becomes
/// `_<name>_`. The result is the table's deduplication key and the suffix
/// of the generated `MP_QSTR_` symbol.
pub fn escape_ident(qstr: &str) -> String {
    let mut out = String::with_capacity(qstr.len());
    for c in qstr.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c);
        } else {
            out.push('_');
            match CODEPOINT_NAMES.get(&c) {
                Some(name) => out.push_str(name),
                None => out.push_str(&format!("0x{:02x}", c as u32)),
            }
            out.push('_');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_ident(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    #[test]
    fn passthrough() {
        assert_eq!(escape_ident("hello"), "hello");
        assert_eq!(escape_ident("foo_bar2"), "foo_bar2");
        assert_eq!(escape_ident(""), "");
    }

    #[test]
    fn named_replacements() {
        assert_eq!(escape_ident("a.b"), "a_dot_b");
        assert_eq!(escape_ident("<module>"), "_lt_module_gt_");
        assert_eq!(escape_ident("foo/bar"), "foo_slash_bar");
        assert_eq!(escape_ident("x y"), "x_space_y");
        assert_eq!(escape_ident("-"), "_hyphen_");
        assert_eq!(escape_ident("\\"), "_backslash_");
    }

    #[test]
    fn latin1_entity_names() {
        assert_eq!(escape_ident("\u{b5}"), "_micro_");
        assert_eq!(escape_ident("\u{e9}"), "_eacute_");
    }

    #[test]
    fn hex_fallback() {
        // Backtick and control characters have no entity name.
        assert_eq!(escape_ident("`"), "_0x60_");
        assert_eq!(escape_ident("\n"), "_0x0a_");
        assert_eq!(escape_ident("\x01"), "_0x01_");
    }

    #[test]
    fn hex_fallback_widens_above_one_byte() {
        assert_eq!(escape_ident("\u{2192}"), "_0x2192_");
        assert_eq!(escape_ident("\u{1f600}"), "_0x1f600_");
    }

    #[test]
    fn output_is_always_identifier_safe() {
        for s in ["", "hello", "a.b, c!", "\u{fe}\u{2192}\n\\", "日本語"] {
            assert!(is_ident(&escape_ident(s)), "not an identifier: {s:?}");
        }
    }
}
