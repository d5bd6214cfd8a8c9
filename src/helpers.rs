use std::borrow::Cow;

use crate::substitution::substitute;

/// Resolve a version field: the rule's `$N` template when present, capture
/// group 1 otherwise. Empty results become `None`.
pub(crate) fn resolve_template<'a>(
    template: Option<&'a str>,
    captures: &fancy_regex::Captures<'a>,
) -> Option<Cow<'a, str>> {
    let value = match template {
        Some(tpl) => substitute(tpl, captures),
        None => Cow::Borrowed(captures.get(1)?.as_str()),
    };
    non_empty(value)
}

pub(crate) fn non_empty(value: Cow<'_, str>) -> Option<Cow<'_, str>> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Leading numeric component of a dotted version (`"116.0.5845"` → `"116"`).
pub(crate) fn major_version<'a>(version: &Cow<'a, str>) -> Option<Cow<'a, str>> {
    let end = version
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(version.len());
    if end == 0 {
        return None;
    }
    Some(match version {
        Cow::Borrowed(s) => {
            let s: &'a str = *s;
            Cow::Borrowed(&s[..end])
        }
        Cow::Owned(s) => Cow::Owned(s[..end].to_string()),
    })
}

/// iOS and macOS UAs write versions as `16_2_1`; display them dotted.
pub(crate) fn dotted_version(version: Cow<'_, str>) -> Cow<'_, str> {
    if version.contains('_') {
        Cow::Owned(version.replace('_', "."))
    } else {
        version
    }
}
