//! SQL identifier quoting.
//!
//! Column and table names are wrapped in the configured quote character,
//! with dotted paths split so each segment is quoted on its own:
//! `users.id` becomes `` `users`.`id` ``. A `*` segment stays bare.
//!
//! Embedded quote characters are doubled. Beyond that, callers are
//! expected to supply well-formed identifiers; this is a builder, not a
//! sanitizer for arbitrary untrusted input.

/// Default identifier quote character (MySQL backtick).
pub const DEFAULT_QUOTE: char = '`';

/// Quote a possibly-dotted identifier, returning the rendered string.
pub fn quote_identifier(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    write_identifier(name, quote, &mut out);
    out
}

/// Quote a possibly-dotted identifier into `out`.
pub(crate) fn write_identifier(name: &str, quote: char, out: &mut String) {
    for (i, segment) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        write_segment(segment, quote, out);
    }
}

fn write_segment(segment: &str, quote: char, out: &mut String) {
    if segment == "*" {
        out.push('*');
        return;
    }
    out.push(quote);
    for ch in segment.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    out.push(quote);
}
