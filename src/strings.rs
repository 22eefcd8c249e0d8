// The language defines three escape codes in string literals: \n, \r and \t.
// Any other backslash-escaped character stands for itself, which covers \"
// and \\ without further table entries.

use bimap::BiMap;

lazy_static! {
    static ref ESCAPES: BiMap<char, char> = {
        let mut m = BiMap::new();
        m.insert('n', '\n');
        m.insert('r', '\r');
        m.insert('t', '\t');
        m
    };
}

pub(crate) fn unescape(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped) => out.push(ESCAPES.get_by_left(&escaped).copied().unwrap_or(escaped)),
                // A trailing backslash cannot escape anything; keep it.
                None => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub(crate) fn string_repr(src: &str) -> String {
    let mut out = String::new();
    out.push('"');
    for c in src.chars() {
        match ESCAPES.get_by_right(&c) {
            Some(&code) => {
                out.push('\\');
                out.push(code);
            }
            None if c == '"' || c == '\\' => {
                out.push('\\');
                out.push(c);
            }
            None => out.push(c),
        }
    }
    out.push('"');
    out
}
