/// Replace `{key}` placeholders in `template` with the supplied values.
///
/// Tokens are applied in the order given. Values are inserted verbatim, so
/// anything that is not a URL-safe identifier must be encoded by the caller.
/// Placeholders without a matching token stay in the output as `{key}`.
pub fn substitute(template: &str, tokens: &[(&str, &str)]) -> String {
    tokens
        .iter()
        .fold(template.to_string(), |path, (key, value)| {
            path.replace(&format!("{{{}}}", key), value)
        })
}

/// Placeholders still present in a path, e.g. `["list_id"]` for `/lists/{list_id}`
pub fn unresolved_tokens(path: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = path;

    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if !name.is_empty() && !name.contains('{') {
                    found.push(name);
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }

    found
}
