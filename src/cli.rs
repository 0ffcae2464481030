/// One command-line token, split into a command name and an optional value.
///
/// Grammar: an optional leading `-` or `/`, a name made of any characters
/// except `:` and `=`, then optionally a `:` or `=` separator followed by an
/// arbitrary value. The value may be empty and may contain further `:`/`=`
/// characters. Names are matched case-insensitively by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArg {
    pub name: String,
    pub value: Option<String>,
}

/// Split a raw argument into name and value, or fail on a malformed shape.
///
/// A separator with an empty value (`"switch:"`) parses the same as a bare
/// name, so scripts can leave a trailing `:` without changing meaning.
pub fn parse_arg(raw: &str) -> Option<ParsedArg> {
    let rest = raw.strip_prefix(['-', '/']).unwrap_or(raw);

    let (name, value) = match rest.find([':', '=']) {
        Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
        None => (rest, None),
    };

    if name.is_empty() {
        return None;
    }

    Some(ParsedArg {
        name: name.to_string(),
        value: match value {
            Some("") | None => None,
            Some(v) => Some(v.to_string()),
        },
    })
}
