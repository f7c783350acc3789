//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: loading the catalog
//! ([`crate::catalog`]), rendering the tag pages ([`crate::write`]), and
//! copying the static source directory into the static output directory.

use crate::catalog::{Catalog, Normalizer};
use crate::config::Config;
use crate::write::{Error as WriteError, Writer};
use gtmpl::Template;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::info;

/// Builds the site from a [`Config`] object and returns the catalog it was
/// built from. A missing or malformed projects file still produces a site,
/// just one without projects.
pub fn build_site(config: &Config) -> Result<Catalog> {
    let catalog = Normalizer::new(&config.fallback_thumbnail).load(&config.projects_file);

    let projects_template = parse_template(config.projects_template.iter())?;

    // Blow away the old output directories so stale tag pages from renamed
    // categories don't linger.
    rmdir(&config.projects_output_directory)?;
    rmdir(&config.static_output_directory)?;

    let writer = Writer {
        projects_template: &projects_template,
        title: &config.title,
        projects_url: &config.projects_url,
        projects_output_directory: &config.projects_output_directory,
        home_page: &config.home_page,
        static_url: &config.static_url,
    };
    writer.write_catalog(&catalog)?;

    if config.static_source_directory.is_dir() {
        copy_dir(
            &config.static_source_directory,
            &config.static_output_directory,
        )?;
    }

    // copy /projects/index.html to /index.html
    std::fs::copy(
        config.projects_output_directory.join("index.html"),
        config.root_output_directory.join("index.html"),
    )?;

    info!(
        projects = catalog.projects.len(),
        categories = catalog.categories.len(),
        output = %config.root_output_directory.display(),
        "built site"
    );
    Ok(catalog)
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &dst.join(entry.file_name()))?;
        } else {
            std::fs::copy(entry.path(), dst.join(entry.file_name()))?;
        }
    }

    Ok(())
}

// Loads the template file contents, concatenates them, and parses the result
// into a template.
fn parse_template<P: AsRef<Path>>(template_files: impl Iterator<Item = P>) -> Result<Template> {
    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(template_file)
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?
            .read_to_string(&mut contents)?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during writing,
/// cleaning output directories, parsing template files, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors writing the tag pages.
    Write(WriteError),

    /// Returned for I/O problems while cleaning output directories.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Write(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Write(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}

fn rmdir(dir: &Path) -> Result<()> {
    match std::fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}
