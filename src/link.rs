//! Outbound project links and the URL clean-up applied to them.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").unwrap());

/// Cleans up a hand-written URL. Blank input yields `None`. Root-relative
/// paths and URLs with a scheme are returned as-is; anything else that
/// contains a dot is assumed to be a bare domain and gets `https://`.
///
/// ```
/// use showcase::link::normalize_url;
///
/// assert_eq!(normalize_url("example.com").as_deref(), Some("https://example.com"));
/// assert_eq!(normalize_url("/local/path").as_deref(), Some("/local/path"));
/// assert_eq!(normalize_url("  "), None);
/// ```
pub fn normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if url.starts_with('/') || SCHEME.is_match(url) || !url.contains('.') {
        return Some(url.to_owned());
    }
    Some(format!("https://{}", url))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Website,
    Github,
    Demo,
    External,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectLink {
    pub kind: LinkKind,

    /// Short button text, e.g. "Site" or "Code".
    pub label: String,

    pub url: String,
}

impl ProjectLink {
    fn new(kind: LinkKind, label: &str, url: String) -> ProjectLink {
        ProjectLink {
            kind,
            label: label.to_owned(),
            url,
        }
    }
}

/// The raw link fields of a project entry, before normalization.
#[derive(Default)]
pub struct LinkFields<'a> {
    pub website: Option<&'a str>,
    pub github: Option<&'a str>,
    pub video: Option<&'a str>,
    pub demo: Option<&'a str>,

    /// The single `link` field that predates the typed fields above.
    pub legacy: Option<&'a str>,
}

impl LinkFields<'_> {
    /// Builds the link list in display order: website, github, video, demo,
    /// then the legacy link. The legacy link is dropped when its URL
    /// duplicates one already added. It is labelled "More" next to a website
    /// link and stands in as the website ("View") otherwise.
    pub fn into_links(self) -> Vec<ProjectLink> {
        let website = self.website.and_then(normalize_url);
        let mut links = Vec::new();

        if let Some(url) = &website {
            links.push(ProjectLink::new(LinkKind::Website, "Site", url.clone()));
        }
        for (field, kind, label) in [
            (self.github, LinkKind::Github, "Code"),
            (self.video, LinkKind::External, "Video"),
            (self.demo, LinkKind::Demo, "Demo"),
        ] {
            if let Some(url) = field.and_then(normalize_url) {
                links.push(ProjectLink::new(kind, label, url));
            }
        }

        if let Some(url) = self.legacy.and_then(normalize_url) {
            if !links.iter().any(|link| link.url == url) {
                links.push(match website {
                    Some(_) => ProjectLink::new(LinkKind::External, "More", url),
                    None => ProjectLink::new(LinkKind::Website, "View", url),
                });
            }
        }

        links
    }
}
