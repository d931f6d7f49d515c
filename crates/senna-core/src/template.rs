//! Named-placeholder templating for event descriptions and chat replies.
//!
//! Templates reference values as `{name}`. [`render`] substitutes every
//! occurrence in a single pass; substituted values are never re-scanned.

/// Placeholder names referenced by a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_name(&after[..close]) => {
                names.push(&after[..close]);
                rest = &after[close + 1..];
            }
            _ => rest = after,
        }
    }
    names
}

/// True when no `{name}` token remains in `text`
pub fn is_resolved(text: &str) -> bool {
    placeholders(text).is_empty()
}

/// Substitute `{name}` tokens with the supplied values.
///
/// Every placeholder the template references must be supplied; this is
/// checked in debug builds. Release builds leave unknown tokens verbatim.
pub fn render(template: &str, values: &[(&str, String)]) -> String {
    debug_assert!(
        placeholders(template)
            .iter()
            .all(|name| values.iter().any(|(key, _)| key == name)),
        "template {:?} references a placeholder that was not supplied",
        template
    );

    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let resolved = after.find('}').and_then(|close| {
            let name = &after[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (value, close))
        });
        match resolved {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_in_order() {
        let names = placeholders("{count} threats from {region}, {count} active");
        assert_eq!(names, vec!["count", "region", "count"]);
    }

    #[test]
    fn test_render_replaces_every_occurrence() {
        let out = render(
            "{count} threats, {count} blocked in {region}",
            &[("count", "3".to_string()), ("region", "Iran".to_string())],
        );
        assert_eq!(out, "3 threats, 3 blocked in Iran");
        assert!(is_resolved(&out));
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = render("{a}", &[("a", "{b}".to_string()), ("b", "x".to_string())]);
        assert_eq!(out, "{b}");
    }

    #[test]
    fn test_braces_without_names_pass_through() {
        let out = render("{} and { } stay", &[]);
        assert_eq!(out, "{} and { } stay");
        assert!(is_resolved(&out));
    }

    #[test]
    fn test_unused_values_are_ignored() {
        let out = render("no tokens here", &[("source", "USB".to_string())]);
        assert_eq!(out, "no tokens here");
    }

    #[test]
    #[should_panic(expected = "not supplied")]
    #[cfg(debug_assertions)]
    fn test_missing_value_fails_fast() {
        render("{source} traffic", &[]);
    }
}
