//! Escaping for the `data-json` placeholder attribute
//!
//! The placeholder stores the fence body in a single attribute. Quotes become `&quot;` and
//! newlines become the two characters `\n`, so the attribute stays on one line whatever
//! serializer writes it out. `&` and `\` are escaped as well, which makes [`decode_data_json`]
//! an exact inverse of [`encode_data_json`].
//!
//! The decoder also accepts `&lt;`, `&gt;` and `\"`, which older placeholders contain.

/// Escape a raw fence body for the `data-json` attribute.
pub fn encode_data_json(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

/// Recover the raw fence body from a `data-json` attribute value.
pub fn decode_data_json(attr: &str) -> String {
    unescape_backslashes(&decode_entities(attr))
}

/// Decode the entity escapes a placeholder may contain, in a single pass.
pub fn decode_entities(input: &str) -> String {
    const ENTITIES: &[(&str, char)] = &[
        ("&quot;", '"'),
        ("&amp;", '&'),
        ("&lt;", '<'),
        ("&gt;", '>'),
    ];

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Turn `\n`, `\r`, `\"` and `\\` back into the characters they stand for.
///
/// Any other backslash sequence is kept as written.
pub fn unescape_backslashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_quotes_and_newlines() {
        assert_eq!(
            encode_data_json("{\"title\":\"Hello\"}\n"),
            "{&quot;title&quot;:&quot;Hello&quot;}\\n"
        );
    }

    #[test]
    fn decodes_quote_and_newline_exactly() {
        let raw = "{\n  \"title\": \"He said \\\"hi\\\"\"\n}";
        assert_eq!(decode_data_json(&encode_data_json(raw)), raw);
    }

    #[test]
    fn decodes_legacy_escapes() {
        assert_eq!(decode_data_json("{&quot;a&quot;:1}\\n"), "{\"a\":1}\n");
        assert_eq!(decode_data_json("&lt;b&gt;"), "<b>");
        assert_eq!(decode_data_json("say \\\"x\\\""), "say \"x\"");
    }

    #[test]
    fn keeps_literal_entity_text() {
        let raw = "{\"title\":\"R&amp;D\"}";
        assert_eq!(decode_data_json(&encode_data_json(raw)), raw);
    }

    #[test]
    fn unknown_sequences_pass_through() {
        assert_eq!(decode_entities("a & b &nbsp;"), "a & b &nbsp;");
        assert_eq!(unescape_backslashes("\\u00e9 \\t"), "\\u00e9 \\t");
        assert_eq!(unescape_backslashes("trailing\\"), "trailing\\");
    }
}
