use ammonia::Builder;
use std::collections::HashSet;

/// Strips every HTML tag from user supplied text, keeping the inner text.
pub fn strip_html(input: &str) -> String {
    Builder::default()
        .tags(HashSet::new())
        .clean(input)
        .to_string()
        .trim()
        .to_string()
}

pub fn strip_html_opt(input: Option<String>) -> Option<String> {
    input.map(|s| strip_html(&s)).filter(|s| !s.is_empty())
}

