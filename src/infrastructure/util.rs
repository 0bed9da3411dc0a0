use crate::application::ports::util::SlugGenerator;

/// Slug generation: lowercase, trim, discard anything that is not ASCII
/// alphanumeric / whitespace / hyphen / underscore, then collapse each run
/// of whitespace/underscore/hyphen into a single hyphen. Leading and
/// trailing hyphens never appear. May yield an empty string for inputs
/// that are all punctuation; callers substitute a fallback base.
#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        let mut slug = String::with_capacity(input.len());
        let mut pending_hyphen = false;

        for ch in input.trim().chars() {
            let ch = ch.to_ascii_lowercase();
            if ch.is_ascii_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.push(ch);
            } else if ch.is_whitespace() || ch == '-' || ch == '_' {
                pending_hyphen = true;
            }
            // Everything else is dropped without acting as a separator.
        }

        slug
    }
}
