//! Defines the [`Project`] type and the rules for building one from a single
//! entry of the projects document. Entries are loosely structured YAML; every
//! optional field has a fallback, and only a missing name or description
//! rejects an entry outright (see [`Rejection`]).

use crate::date::format_date;
use crate::link::{LinkFields, ProjectLink};
use crate::markdown::{render_block, render_inline};
use crate::tag::{slugify, UNCATEGORIZED};
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::fmt;

/// Unranked projects are ranked `UNRANKED_BASE + index`, which keeps them
/// after the ranked ones and in document order.
pub const UNRANKED_BASE: f64 = 9000.0;

/// One portfolio entry, with every derived field filled in.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Slug of `name`. Not guaranteed unique.
    pub id: String,
    pub date: String,
    pub date_display: String,
    pub name: String,
    pub name_html: String,
    pub tagline: String,
    pub tagline_html: String,
    pub description: String,
    pub description_html: String,
    pub thumbnail: String,
    pub categories: Vec<String>,

    /// `slugify` of each entry in `categories`, in the same order.
    pub category_slugs: Vec<String>,

    /// Lower sorts first.
    pub importance: f64,
    pub links: Vec<ProjectLink>,
}

impl Project {
    /// Builds a project from the `index`th entry of the document. The index
    /// is the entry's position in the raw sequence, counting entries that
    /// were rejected.
    pub fn from_entry(
        entry: &Value,
        index: usize,
        fallback_thumbnail: &str,
    ) -> Result<Project, Rejection> {
        let entry = match entry {
            Value::Mapping(mapping) => Entry(mapping),
            _ => return Err(Rejection::NotAMapping),
        };

        let name = entry.string("name").map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(Rejection::MissingName);
        }

        let description = entry.string("description").unwrap_or_default();
        if description.is_empty() {
            return Err(Rejection::MissingDescription(name.to_owned()));
        }

        let tagline = match entry.string("tagline").unwrap_or_default() {
            "" => match description.lines().next().map(str::trim) {
                Some(first_line) if !first_line.is_empty() => first_line,
                _ => name,
            },
            tagline => tagline,
        };

        let mut categories: Vec<String> = entry
            .get("categories")
            .and_then(Value::as_sequence)
            .map(|seq| {
                seq.iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|category| !category.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        if categories.is_empty() {
            categories.push(UNCATEGORIZED.to_owned());
        }

        let date = match entry.get("date") {
            Some(Value::String(date)) => date.clone(),
            Some(Value::Number(date)) => date.to_string(),
            _ => String::new(),
        };

        let thumbnail = match entry.string("thumbnail").map(str::trim) {
            Some(thumbnail) if !thumbnail.is_empty() => thumbnail,
            _ => fallback_thumbnail,
        };

        let links = LinkFields {
            website: entry.string("websiteURL"),
            github: entry.string("githubURL"),
            video: entry.string("videoURL"),
            demo: entry.string("demoURL"),
            legacy: entry.string("link"),
        }
        .into_links();

        Ok(Project {
            id: slugify(name),
            date_display: format_date(date.as_str()),
            date,
            name: name.to_owned(),
            name_html: render_inline(name),
            tagline: tagline.to_owned(),
            tagline_html: render_inline(tagline),
            description: description.to_owned(),
            description_html: render_block(description),
            thumbnail: thumbnail.to_owned(),
            category_slugs: categories.iter().map(|c| slugify(c)).collect(),
            categories,
            importance: importance(entry.get("importance"), index),
            links,
        })
    }
}

/// A borrowed project entry with string-keyed lookups.
struct Entry<'a>(&'a Mapping);

impl<'a> Entry<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.get(&Value::String(key.to_owned()))
    }

    /// Returns the field if it is a string. Other scalar types are ignored.
    fn string(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }
}

/// Reads an explicit rank from a number or a string with a leading integer
/// (`"12"`, `" 7 (high)"`). Anything else ranks by document position.
fn importance(value: Option<&Value>, index: usize) -> f64 {
    let explicit = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => leading_integer(s),
        _ => None,
    };
    explicit
        .filter(|n| n.is_finite())
        // Fold -0.0 into 0.0 so the two tie under `total_cmp`.
        .map(|n| if n == 0.0 { 0.0 } else { n })
        .unwrap_or(UNRANKED_BASE + index as f64)
}

fn leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    match digits {
        0 => None,
        _ => rest[..digits].parse::<f64>().ok().map(|n| sign * n),
    }
}

/// Why an entry was left out of the catalog.
#[derive(Debug, PartialEq)]
pub enum Rejection {
    /// The entry isn't a mapping (e.g. a bare string or `null`).
    NotAMapping,

    /// The entry has no non-empty string `name`.
    MissingName,

    /// The entry has no non-empty string `description`. Holds the name.
    MissingDescription(String),
}

impl fmt::Display for Rejection {
    /// Displays a [`Rejection`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rejection::NotAMapping => write!(f, "entry is not a mapping"),
            Rejection::MissingName => write!(f, "entry is missing a name"),
            Rejection::MissingDescription(name) => {
                write!(f, "project `{}` is missing a description", name)
            }
        }
    }
}

impl std::error::Error for Rejection {}
