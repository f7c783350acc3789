//! Defines the [`Category`] type, which groups [`Project`]s under one display
//! tag, and [`slugify`], which derives both category slugs and project ids.

use crate::project::Project;
use serde::Serialize;

/// The category assigned to projects that don't list any.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Substituted when a string has no alphanumeric characters to slugify.
const EMPTY_SLUG: &str = "uncategorized";

/// Lowercases `value`, collapses every run of characters other than `a-z`
/// and `0-9` into a single `-`, and trims separators from both ends.
/// Non-ASCII letters count as separators: `"Café"` becomes `caf`. Distinct
/// inputs can produce the same slug (`"C++"` and `"C"` both become `c`); see
/// [`crate::catalog::Catalog::id_collisions`].
pub fn slugify(value: &str) -> String {
    // `slug` transliterates non-ASCII text, so strip it out first.
    let ascii: String = value
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    match slug::slugify(ascii) {
        s if s.is_empty() => EMPTY_SLUG.to_owned(),
        s => s,
    }
}

/// A group of projects sharing a category. Projects appear in the same
/// relative order as the catalog's project list.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The slugified category name; the key projects are grouped by.
    pub slug: String,

    /// The first spelling of the category encountered in sorted project
    /// order. `Games` and `games` share a slug; whichever comes first wins.
    pub display_name: String,

    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        for (input, wanted) in [
            ("Hello World", "hello-world"),
            ("  Web / Mobile  ", "web-mobile"),
            ("--Rust--", "rust"),
            ("Games", "games"),
            ("v2.0 Release!", "v2-0-release"),
        ] {
            assert_eq!(slugify(input), wanted, "slugify({:?})", input);
        }
    }

    #[test]
    fn test_slugify_empty_uses_sentinel() {
        assert_eq!(slugify(""), "uncategorized");
        assert_eq!(slugify("!!!"), "uncategorized");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        for (input, wanted) in [
            ("🦀 Crab", "crab"),
            ("日本語", "uncategorized"),
            ("Café", "caf"),
            ("Über Tool", "ber-tool"),
        ] {
            assert_eq!(slugify(input), wanted, "slugify({:?})", input);
        }
    }

    #[test]
    fn test_slugify_collisions_are_possible() {
        assert_eq!(slugify("C++"), slugify("C"));
    }
}
