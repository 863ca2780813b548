//! Unicode-aware slugs
//!
//! A slug is non-empty and made of letters, digits, underscores and hyphens
//! from any script, so Persian or Cyrillic names keep their own characters.

fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Check slug syntax (`^[-\w]+$` with unicode word characters)
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c == '-' || is_word_char(c))
}

/// Derive a slug from free text
///
/// Lowercases, drops everything except word characters, whitespace and
/// hyphens, collapses runs of whitespace and hyphens into one hyphen and
/// trims leading/trailing hyphens and underscores.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c == '-' || c.is_whitespace() {
            pending_hyphen = true;
        } else if is_word_char(c) {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_ascii() {
        assert_eq!(slugify("Home & Kitchen"), "home-kitchen");
        assert_eq!(slugify("  Laptops -- 2024 "), "laptops-2024");
    }

    #[test]
    fn test_slugify_keeps_unicode_letters() {
        assert_eq!(slugify("گوشی موبایل"), "گوشی-موبایل");
        assert_eq!(slugify("Ноутбуки"), "ноутбуки");
    }

    #[test]
    fn test_slugify_trims_underscores() {
        assert_eq!(slugify("_draft_"), "draft");
        assert_eq!(slugify("a_b"), "a_b");
    }

    #[test]
    fn test_slugify_of_symbols_is_empty() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slug_syntax() {
        assert!(is_valid_slug("mobile-phones"));
        assert!(is_valid_slug("لپ-تاپ"));
        assert!(is_valid_slug("a_1"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("two words"));
        assert!(!is_valid_slug("a/b"));
    }

    #[test]
    fn test_slugify_output_is_valid_slug() {
        for input in ["Home & Kitchen", "گوشی موبایل", "TV 4K"] {
            assert!(is_valid_slug(&slugify(input)), "{input}");
        }
    }
}
