use crate::catalog::{Catalog, ALL_TAG};
use crate::project::Project;
use gtmpl::{Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Responsible for templating and writing the tag pages of a [`Catalog`] to
/// disk.
pub struct Writer<'a> {
    /// The template for every tag page.
    pub projects_template: &'a Template,

    /// The site title, made available to the template as `title`.
    pub title: &'a str,

    /// The base URL for tag pages. The page listing every project is
    /// `{projects_url}index.html`; the page for a category is
    /// `{projects_url}{slug}/index.html`.
    pub projects_url: &'a Url,

    /// The directory the tag pages are written into, laid out like
    /// `projects_url`.
    pub projects_output_directory: &'a Path,

    /// The URL for the site's home page. This is made available to the
    /// template, typically as the destination for the site-header link.
    pub home_page: &'a Url,

    /// The URL for the static assets. This is made available to the
    /// template, typically for the theme's stylesheet.
    pub static_url: &'a Url,
}

impl Writer<'_> {
    /// Takes a single [`Page`], templates it, and writes it to disk.
    fn write_page(&self, page: &Page, navigation: &Value, tag_order: &Value) -> Result<()> {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("title".to_owned(), Value::String(self.title.to_owned()));
        m.insert("tag".to_owned(), Value::String(page.tag.to_owned()));
        m.insert("url".to_owned(), Value::String(page.url.to_string()));
        m.insert(
            "projects".to_owned(),
            Value::Array(page.projects.iter().map(|p| Value::from(*p)).collect()),
        );
        m.insert("categories".to_owned(), navigation.clone());
        m.insert("tag_order".to_owned(), tag_order.clone());
        m.insert(
            "home_page".to_owned(),
            Value::String(self.home_page.to_string()),
        );
        m.insert(
            "static_url".to_owned(),
            Value::String(self.static_url.to_string()),
        );

        if let Some(dir) = page.file_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        self.projects_template.execute(
            &mut std::fs::File::create(&page.file_path)?,
            &gtmpl::Context::from(Value::Object(m))?,
        )?;
        Ok(())
    }

    /// Writes the page listing every project plus one page per category.
    pub fn write_catalog(&self, catalog: &Catalog) -> Result<()> {
        let pages = pages(catalog, self.projects_url, self.projects_output_directory)?;

        // Every page links to every category, so this is built once.
        let navigation = Value::Array(
            catalog
                .categories
                .iter()
                .zip(pages.iter().skip(1))
                .map(|(category, page)| {
                    let mut value = Value::from(category);
                    if let Value::Object(obj) = &mut value {
                        obj.insert("url".to_owned(), Value::String(page.url.to_string()));
                    }
                    value
                })
                .collect(),
        );
        let tag_order = Value::Array(
            catalog
                .tag_order
                .iter()
                .map(|t| Value::String(t.clone()))
                .collect(),
        );

        pages
            .iter()
            .try_for_each(|page| self.write_page(page, &navigation, &tag_order))
    }
}

/// An output HTML file: the projects listed under one tag.
struct Page<'a> {
    /// [`ALL_TAG`] or a category slug.
    tag: &'a str,

    url: Url,

    /// The target location on disk for the output file.
    file_path: PathBuf,

    projects: Vec<&'a Project>,
}

/// Creates the [`ALL_TAG`] page followed by one page per category, in
/// category display order.
fn pages<'a>(catalog: &'a Catalog, base_url: &Url, base_directory: &Path) -> Result<Vec<Page<'a>>> {
    let mut pages = Vec::with_capacity(catalog.categories.len() + 1);
    pages.push(Page {
        tag: ALL_TAG,
        url: base_url.join("index.html")?,
        file_path: base_directory.join("index.html"),
        projects: catalog.projects.iter().collect(),
    });

    for category in &catalog.categories {
        pages.push(Page {
            tag: &category.slug,
            // `base_url.join(slug).join("index.html")` would drop the slug:
            // without a trailing slash the last segment is a file name.
            url: base_url.join(&format!("{}/index.html", category.slug))?,
            file_path: base_directory.join(&category.slug).join("index.html"),
            projects: category.projects.iter().collect(),
        });
    }

    Ok(pages)
}

/// The result of a fallible page-writing operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// Returned when a page URL can't be derived from the base URL.
    UrlParse(url::ParseError),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. This allows us to use
    /// the `?` operator for URL joining.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::UrlParse(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}
