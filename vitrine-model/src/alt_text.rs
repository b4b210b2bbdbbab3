/// Derive human-readable alt text from an asset filename.
///
/// The trailing extension is dropped, hyphens and underscores become spaces,
/// and the result is trimmed. An extension is a final `.` followed by at
/// least one character that is neither `/` nor `.`.
pub fn generate_alt_text(filename: &str) -> String {
    strip_extension(filename)
        .replace(['-', '_'], " ")
        .trim()
        .to_string()
}

fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) => {
            let ext = &filename[dot + 1..];
            if ext.is_empty() || ext.contains('/') {
                filename
            } else {
                &filename[..dot]
            }
        }
        None => filename,
    }
}
