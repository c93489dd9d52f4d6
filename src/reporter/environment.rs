//! Environment information parsing.
//!
//! The raw string is a list of `key=value` pairs separated by `;`, e.g.
//! `"browser=chrome; env = staging"`.

/// Row shown when no usable pair was supplied.
pub const NO_ENVIRONMENT_INFO: &str = "No additional environment information provided.";

/// Parse `key=value;key=value` into `(key, value)` pairs.
///
/// Keys and values are trimmed. A segment is kept only when it contains
/// exactly one `=` and both sides are non-empty; anything else is dropped.
#[must_use]
pub fn parse_environment_info(raw: &str) -> Vec<(&str, &str)> {
    raw.split(';')
        .filter_map(|segment| {
            let (key, value) = segment.split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            (!key.is_empty() && !value.is_empty() && !value.contains('=')).then_some((key, value))
        })
        .collect()
}

/// Rows for the environment panel, falling back to the placeholder.
#[must_use]
pub fn environment_rows(raw: &str) -> Vec<String> {
    let rows: Vec<String> = parse_environment_info(raw)
        .into_iter()
        .map(|(key, value)| format!("{key} = {value}"))
        .collect();

    if rows.is_empty() {
        vec![NO_ENVIRONMENT_INFO.to_string()]
    } else {
        rows
    }
}
