//! Conversions from catalog types into template [`Value`]s. Keys use the same
//! camelCase names as the serialized catalog, so `{{.nameHtml}}` works in a
//! template exactly as `nameHtml` does in the JSON output.

use crate::link::{LinkKind, ProjectLink};
use crate::project::Project;
use crate::tag::Category;
use gtmpl_value::Value;
use std::collections::HashMap;

fn object<const N: usize>(fields: [(&str, Value); N]) -> Value {
    Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key.to_owned(), value))
            .collect::<HashMap<String, Value>>(),
    )
}

fn string(s: &str) -> Value {
    Value::String(s.to_owned())
}

fn strings(items: &[String]) -> Value {
    Value::Array(items.iter().map(|s| string(s)).collect())
}

impl From<LinkKind> for Value {
    fn from(kind: LinkKind) -> Value {
        string(match kind {
            LinkKind::Website => "website",
            LinkKind::Github => "github",
            LinkKind::Demo => "demo",
            LinkKind::External => "external",
        })
    }
}

impl From<&ProjectLink> for Value {
    fn from(link: &ProjectLink) -> Value {
        object([
            ("kind", link.kind.into()),
            ("label", string(&link.label)),
            ("url", string(&link.url)),
        ])
    }
}

impl From<&Project> for Value {
    /// Converts a [`Project`] into a [`Value`] for templating. The `*Html`
    /// fields are already rendered and should be emitted as-is.
    fn from(p: &Project) -> Value {
        object([
            ("id", string(&p.id)),
            ("date", string(&p.date)),
            ("dateDisplay", string(&p.date_display)),
            ("name", string(&p.name)),
            ("nameHtml", string(&p.name_html)),
            ("tagline", string(&p.tagline)),
            ("taglineHtml", string(&p.tagline_html)),
            ("description", string(&p.description)),
            ("descriptionHtml", string(&p.description_html)),
            ("thumbnail", string(&p.thumbnail)),
            ("categories", strings(&p.categories)),
            ("categorySlugs", strings(&p.category_slugs)),
            ("importance", Value::from(p.importance)),
            ("links", Value::Array(p.links.iter().map(Value::from).collect())),
        ])
    }
}

impl From<&Category> for Value {
    fn from(c: &Category) -> Value {
        object([
            ("slug", string(&c.slug)),
            ("displayName", string(&c.display_name)),
            (
                "projects",
                Value::Array(c.projects.iter().map(Value::from).collect()),
            ),
        ])
    }
}
