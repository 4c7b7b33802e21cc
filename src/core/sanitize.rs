// src/core/sanitize.rs

/// Non-breaking spaces and `&nbsp;` leftovers count as plain spaces.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace('\u{a0}', " ")
}

/// Collapse runs of whitespace into one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Comparison form for key codes and key-column cells: uppercase, then trim.
pub fn normalize_key(s: &str) -> String {
    s.to_uppercase().trim().to_string()
}

/// Case-insensitive substring test used for column hints.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.trim().to_uppercase().contains(&needle.trim().to_uppercase())
}

/// First `max` characters of `s` (not bytes).
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
