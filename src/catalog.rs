//! Turns the raw projects document into a [`Catalog`]: validated projects in
//! display order, grouped into ordered [`Category`]s.
//!
//! The document is either a bare sequence of project entries (the legacy
//! shape) or a mapping with a `projects` sequence and an optional `tagOrder`
//! list of category names:
//!
//! ```yaml
//! tagOrder: [Games, Tools]
//! projects:
//!   - name: Thing
//!     description: Does things.
//!     categories: [Tools]
//!     importance: 1
//! ```
//!
//! Nothing in here fails. A missing or malformed document produces an empty
//! catalog, and a malformed entry is skipped; both are logged as warnings.

use crate::project::Project;
use crate::tag::Category;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

/// The thumbnail used by projects that don't name one.
pub const DEFAULT_THUMBNAIL: &str = "/thumbnails/placeholder.svg";

/// The tag route listing every project.
pub const ALL_TAG: &str = "all";

/// The result of normalizing a projects document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Every accepted project, ordered by importance and then by position in
    /// the document.
    pub projects: Vec<Project>,

    /// Categories ordered by `tag_order`, then by their most important
    /// member.
    pub categories: Vec<Category>,

    /// The document's explicit category order, if it has one.
    pub tag_order: Vec<String>,
}

impl Catalog {
    /// Looks up a category by slug.
    pub fn category(&self, slug: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// The routes for the tag pages: [`ALL_TAG`] followed by each category
    /// slug in display order.
    pub fn tag_routes(&self) -> Vec<String> {
        std::iter::once(ALL_TAG.to_owned())
            .chain(self.categories.iter().map(|c| c.slug.clone()))
            .collect()
    }

    /// Project ids shared by more than one project, in order of first
    /// appearance. Ids are slugs of names and nothing stops two names from
    /// slugifying identically.
    pub fn id_collisions(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for project in &self.projects {
            *counts.entry(project.id.as_str()).or_default() += 1;
        }

        let mut reported = HashSet::new();
        self.projects
            .iter()
            .map(|p| p.id.as_str())
            .filter(|id| counts[id] > 1 && reported.insert(*id))
            .collect()
    }
}

/// Normalizes projects documents. Holds the settings that aren't part of the
/// document itself.
pub struct Normalizer<'a> {
    fallback_thumbnail: &'a str,
}

impl Default for Normalizer<'_> {
    fn default() -> Self {
        Normalizer::new(DEFAULT_THUMBNAIL)
    }
}

impl<'a> Normalizer<'a> {
    /// Constructs a normalizer. `fallback_thumbnail` is used for projects
    /// without a thumbnail of their own.
    pub fn new(fallback_thumbnail: &'a str) -> Normalizer<'a> {
        Normalizer { fallback_thumbnail }
    }

    /// Reads and normalizes the projects file at `path`. A missing or
    /// unreadable file yields an empty catalog.
    pub fn load(&self, path: &Path) -> Catalog {
        if !path.exists() {
            warn!(path = %path.display(), "projects file not found");
            return Catalog::default();
        }
        match std::fs::read_to_string(path) {
            Ok(text) => self.normalize(&text),
            Err(err) => {
                warn!(path = %path.display(), %err, "reading projects file");
                Catalog::default()
            }
        }
    }

    /// Normalizes the text of a projects document. The result depends only
    /// on `text`; normalizing the same text twice gives equal catalogs.
    pub fn normalize(&self, text: &str) -> Catalog {
        let document: Value = match serde_yaml::from_str(text) {
            Ok(document) => document,
            Err(err) => {
                warn!(%err, "parsing projects document");
                return Catalog::default();
            }
        };

        let (entries, tag_order) = match &document {
            Value::Sequence(entries) => (entries.as_slice(), Vec::new()),
            Value::Mapping(mapping) => (
                match field(mapping, "projects").and_then(Value::as_sequence) {
                    Some(entries) => entries.as_slice(),
                    None => {
                        warn!("projects document has no `projects` sequence");
                        &[]
                    }
                },
                field(mapping, "tagOrder")
                    .and_then(Value::as_sequence)
                    .map(|seq| {
                        seq.iter()
                            .filter_map(Value::as_str)
                            .map(str::to_owned)
                            .collect()
                    })
                    .unwrap_or_default(),
            ),
            _ => {
                warn!("projects document must be a sequence or a mapping with `projects`");
                return Catalog::default();
            }
        };

        let mut ranked: Vec<(usize, Project)> = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                match Project::from_entry(entry, index, self.fallback_thumbnail) {
                    Ok(project) => Some((index, project)),
                    Err(rejection) => {
                        warn!(index, "skipping project entry: {}", rejection);
                        None
                    }
                }
            })
            .collect();
        ranked.sort_by(|(a_index, a), (b_index, b)| {
            a.importance
                .total_cmp(&b.importance)
                .then(a_index.cmp(b_index))
        });
        let projects: Vec<Project> = ranked.into_iter().map(|(_, project)| project).collect();

        let categories = order_categories(group(&projects), &tag_order);
        debug!(
            projects = projects.len(),
            categories = categories.len(),
            skipped = entries.len() - projects.len(),
            "normalized projects document"
        );

        let catalog = Catalog {
            projects,
            categories,
            tag_order,
        };
        for id in catalog.id_collisions() {
            warn!(id, "several projects share this id");
        }
        catalog
    }
}

/// Normalizes `text` with the default settings. See [`Normalizer::normalize`].
pub fn normalize(text: &str) -> Catalog {
    Normalizer::default().normalize(text)
}

fn field<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping.get(&Value::String(key.to_owned()))
}

/// A category under construction, with the importance of its most important
/// member.
struct Group {
    category: Category,
    rank: f64,
}

/// Groups the sorted `projects` by category slug. Groups are returned in the
/// order their slugs were first seen, which is only used to break rank ties.
fn group(projects: &[Project]) -> Vec<Group> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for project in projects {
        // A project listing both `Games` and `games` joins the group once.
        let mut joined = HashSet::new();
        for (name, slug) in project.categories.iter().zip(&project.category_slugs) {
            if !joined.insert(slug.as_str()) {
                continue;
            }
            match slots.get(slug.as_str()) {
                Some(&slot) => {
                    let group = &mut groups[slot];
                    group.category.projects.push(project.clone());
                    group.rank = group.rank.min(project.importance);
                }
                None => {
                    slots.insert(slug, groups.len());
                    groups.push(Group {
                        category: Category {
                            slug: slug.clone(),
                            display_name: name.clone(),
                            projects: vec![project.clone()],
                        },
                        rank: project.importance,
                    });
                }
            }
        }
    }

    groups
}

/// Orders groups by position in `tag_order`; groups it doesn't mention come
/// after all that it does, by rank. The sort is stable, so equal ranks keep
/// first-seen order.
fn order_categories(mut groups: Vec<Group>, tag_order: &[String]) -> Vec<Category> {
    let position = |g: &Group| tag_order.iter().position(|t| *t == g.category.display_name);
    groups.sort_by(|a, b| match (position(a), position(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.rank.total_cmp(&b.rank),
    });
    groups.into_iter().map(|g| g.category).collect()
}
