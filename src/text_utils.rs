use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SLUG_STRIP_REGEX: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref SLUG_COLLAPSE_REGEX: Regex = Regex::new(r"[-\s]+").unwrap();
    static ref MARGIN_NOTE_REGEX: Regex = Regex::new(r"\[\[(.+?)\]\]").unwrap();
}

/// Number of characters kept when deriving an excerpt from a post body.
pub const EXCERPT_LEN: usize = 160;

/// Derives the filename slug of a post from its title.
///
/// The title is lowercased, characters outside word characters, whitespace
/// and hyphens are stripped, and whitespace/hyphen runs are collapsed to a
/// single hyphen. Hyphens left at either end are trimmed.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = SLUG_STRIP_REGEX.replace_all(&lowered, "");
    let collapsed = SLUG_COLLAPSE_REGEX.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Draft filenames keep the historical transform: lowercase plus
/// space-to-hyphen. Nothing else is stripped or collapsed.
pub fn draft_slug(title: &str) -> String {
    title.to_lowercase().replace(' ', "-")
}

pub fn make_excerpt(content: &str) -> String {
    if content.chars().count() > EXCERPT_LEN {
        let start: String = content.chars().take(EXCERPT_LEN).collect();
        format!("{}...", start)
    } else {
        content.to_string()
    }
}

/// Converts `[[note]]` syntax to margin note markup.
///
/// Each span becomes a trigger marker immediately followed by the note
/// text. Spans do not nest; the shortest match between `[[` and the next
/// `]]` wins.
pub fn rewrite_margin_notes(content: &str) -> String {
    MARGIN_NOTE_REGEX
        .replace_all(
            content,
            "<span class=\"margin-trigger\">*</span><span class=\"margin-note\">$1</span>",
        )
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("My Title!"), "my-title");
        assert_eq!(slugify("Hello, World?"), "hello-world");
        assert_eq!(slugify("already-hyphenated title"), "already-hyphenated-title");
        assert_eq!(slugify("spaces   and -- hyphen   runs"), "spaces-and-hyphen-runs");
        assert_eq!(slugify("--- trimmed ---"), "trimmed");
    }

    #[test]
    fn test_slugify_keeps_unicode_words() {
        assert_eq!(slugify("Café com leite"), "café-com-leite");
    }

    #[test]
    fn test_draft_slug_is_weaker() {
        assert_eq!(draft_slug("My Draft Title"), "my-draft-title");
        // Punctuation survives the draft transform
        assert_eq!(draft_slug("My Draft!"), "my-draft!");
    }

    #[test]
    fn test_excerpt_short_body_unchanged() {
        let body = "Hello world";
        assert_eq!(make_excerpt(body), "Hello world");
    }

    #[test]
    fn test_excerpt_at_limit_unchanged() {
        let body = "x".repeat(EXCERPT_LEN);
        assert_eq!(make_excerpt(&body), body);
    }

    #[test]
    fn test_excerpt_truncates_with_ellipsis() {
        let body = "y".repeat(EXCERPT_LEN + 1);
        let excerpt = make_excerpt(&body);
        assert_eq!(excerpt.chars().count(), EXCERPT_LEN + 3);
        assert!(excerpt.ends_with("..."));
        assert!(excerpt.starts_with("yyy"));
    }

    #[test]
    fn test_margin_notes() {
        let rewritten = rewrite_margin_notes("a [[note]] b");
        assert_eq!(
            rewritten,
            "a <span class=\"margin-trigger\">*</span><span class=\"margin-note\">note</span> b"
        );
        assert!(!rewritten.contains("[["));
        assert!(!rewritten.contains("]]"));
    }

    #[test]
    fn test_margin_notes_shortest_span() {
        let rewritten = rewrite_margin_notes("[[one]] and [[two]]");
        assert_eq!(
            rewritten,
            "<span class=\"margin-trigger\">*</span><span class=\"margin-note\">one</span> and <span class=\"margin-trigger\">*</span><span class=\"margin-note\">two</span>"
        );
    }

    #[test]
    fn test_margin_notes_without_spans() {
        assert_eq!(rewrite_margin_notes("plain text"), "plain text");
    }
}
