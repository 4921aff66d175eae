/// Output file name for a collection: `all_posts_{collection}.json`.
///
/// Characters that are not allowed in file names are replaced by `_`.
pub fn output_filename(collection: &str) -> String {
    let sanitized: String = collection
        .trim()
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let sanitized = if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    };
    format!("all_posts_{sanitized}.json")
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
