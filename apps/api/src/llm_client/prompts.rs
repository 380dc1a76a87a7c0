// Shared prompt-building utilities.
// Each service that needs completions defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Substitutes `{key}` placeholders in a prompt template in a single pass.
///
/// Values are inserted verbatim and never re-scanned, so user text that happens
/// to contain `{industry}` or similar stays untouched. Unknown placeholders are
/// left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match substituted {
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

/// Renders a numbered list of requested output sections.
pub fn numbered_sections(sections: &[&str]) -> String {
    sections
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {}", i + 1, s))
        .collect::<Vec<_>>()
        .join("\n")
}
