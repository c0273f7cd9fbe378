//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and single hyphens.

pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && value.trim() == value
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Derives a slug from a display name: `"Clay Diya (Set of 4)"` becomes
/// `"clay-diya-set-of-4"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Uses `explicit` when given, otherwise derives the slug from `name`.
pub fn resolve_slug(explicit: Option<&str>, name: &str) -> Option<String> {
    let slug = match explicit {
        Some(s) => s.trim().to_string(),
        None => slugify(name),
    };
    is_valid_slug(&slug).then_some(slug)
}
