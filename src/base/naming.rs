//! Helpers for qualified paths, type names and grammar tokens.

/// Lower-case the first character: `IntFunction` → `intFunction`.
pub fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split a declared type name into its base path and collection depth.
///
/// `game.util.graph.Step[][]` → (`game.util.graph.Step`, 2).
/// Surrounding whitespace and whitespace between brackets is ignored.
pub fn parse_type_name(type_name: &str) -> (&str, usize) {
    let trimmed = type_name.trim();
    let base_end = trimmed.find('[').unwrap_or(trimmed.len());
    let nesting = trimmed[base_end..].matches('[').count();
    (trimmed[..base_end].trim_end(), nesting)
}

/// Everything before the last `.`; empty for unqualified paths.
pub fn package_of(path: &str) -> &str {
    path.rfind('.').map(|idx| &path[..idx]).unwrap_or("")
}

/// Everything after the last `.`.
pub fn simple_name_of(path: &str) -> &str {
    path.rfind('.').map(|idx| &path[idx + 1..]).unwrap_or(path)
}

/// True when `path` equals `namespace` or lies below it.
pub fn is_within(path: &str, namespace: &str) -> bool {
    path == namespace
        || (path.len() > namespace.len()
            && path.starts_with(namespace)
            && path.as_bytes()[namespace.len()] == b'.')
}
