// Slug generation for section identifiers
use unicode_normalization::UnicodeNormalization;

/// Word used when a title is empty.
pub const PLACEHOLDER_SLUG: &str = "grafico";

/// Turn a display title into a lowercase `[a-z0-9-]` identifier.
///
/// Accents are removed by decomposing to NFD and dropping the combining
/// marks, every other run of non-alphanumeric characters collapses into a
/// single hyphen, and leading/trailing hyphens are stripped.
pub fn slugify(title: &str) -> String {
    let source = if title.is_empty() { PLACEHOLDER_SLUG } else { title };

    let mut slug = String::with_capacity(source.len());
    let mut pending_hyphen = false;
    for c in source.to_lowercase().nfd() {
        if is_combining_mark(c) {
            continue;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}
