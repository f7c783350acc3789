//! Site configuration. A site is a directory containing a `showcase.yaml`
//! project file, a `projects/` directory with the projects document, a
//! `theme/` directory with a `theme.yaml` and its templates, and optionally a
//! `static/` directory of assets copied verbatim into the output.

use crate::catalog::DEFAULT_THUMBNAIL;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use url::Url;

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "showcase.yaml";

#[derive(Deserialize)]
struct Site {
    #[serde(default = "default_title")]
    title: String,

    site_root: Url,

    #[serde(default = "default_projects_file")]
    projects_file: PathBuf,

    #[serde(default = "default_fallback_thumbnail")]
    fallback_thumbnail: String,
}

fn default_title() -> String {
    "Projects".to_owned()
}

fn default_projects_file() -> PathBuf {
    PathBuf::from("projects/projects.yaml")
}

fn default_fallback_thumbnail() -> String {
    DEFAULT_THUMBNAIL.to_owned()
}

#[derive(Deserialize)]
struct Theme {
    projects_template: Vec<PathBuf>,
}

/// Everything needed to build a site, with relative paths resolved against
/// the directory holding `showcase.yaml` and URLs resolved against
/// `site_root`.
pub struct Config {
    pub title: String,

    /// The site's root URL. Always ends in a slash.
    pub home_page: Url,

    pub projects_file: PathBuf,
    pub fallback_thumbnail: String,

    /// Template files, concatenated in order and parsed as one template.
    pub projects_template: Vec<PathBuf>,
    pub static_source_directory: PathBuf,

    pub root_output_directory: PathBuf,
    pub projects_output_directory: PathBuf,
    pub static_output_directory: PathBuf,

    /// The base URL for the tag pages, `{home_page}projects/`.
    pub projects_url: Url,
    pub static_url: Url,
}

impl Config {
    /// Searches `dir` and then each of its ancestors for a `showcase.yaml`
    /// and loads the first one found.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            return Config::from_project_file(&path, output_directory);
        }
        match dir.parent() {
            Some(parent) => Config::from_directory(parent, output_directory),
            None => Err(Error::ProjectFileNotFound),
        }
    }

    /// Loads the configuration from the project file at `path`.
    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let site: Site = serde_yaml::from_reader(open(path)?)?;
        let project_root = path
            .parent()
            .ok_or_else(|| Error::NoParentDirectory(path.to_owned()))?;

        let theme_dir = project_root.join("theme");
        let theme: Theme = serde_yaml::from_reader(open(&theme_dir.join("theme.yaml"))?)?;

        let home_page = with_trailing_slash(site.site_root);
        Ok(Config {
            title: site.title,
            projects_url: home_page.join("projects/")?,
            static_url: home_page.join("static/")?,
            home_page,
            projects_file: project_root.join(site.projects_file),
            fallback_thumbnail: site.fallback_thumbnail,
            projects_template: theme
                .projects_template
                .iter()
                .map(|relpath| theme_dir.join(relpath))
                .collect(),
            static_source_directory: project_root.join("static"),
            root_output_directory: output_directory.to_owned(),
            projects_output_directory: output_directory.join("projects"),
            static_output_directory: output_directory.join("static"),
        })
    }
}

// `Url::join` treats a final segment without a trailing slash as a file name
// and replaces it, so `https://example.org/me` would lose `me`.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|err| Error::Open {
        path: path.to_owned(),
        err,
    })
}

/// The result of loading a [`Config`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`Config`].
#[derive(Debug)]
pub enum Error {
    /// Returned when no ancestor directory contains a `showcase.yaml`.
    ProjectFileNotFound,

    /// Returned when the project file path has no parent directory.
    NoParentDirectory(PathBuf),

    /// Returned when the project or theme file can't be opened.
    Open { path: PathBuf, err: std::io::Error },

    /// Returned when the project or theme file isn't valid YAML for its
    /// schema.
    DeserializeYaml(serde_yaml::Error),

    /// Returned when a URL can't be derived from `site_root`.
    UrlParse(url::ParseError),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::ProjectFileNotFound => write!(
                f,
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            ),
            Error::NoParentDirectory(path) => write!(
                f,
                "Can't get parent directory for project file '{}'",
                path.display()
            ),
            Error::Open { path, err } => {
                write!(f, "Opening '{}': {}", path.display(), err)
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::UrlParse(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ProjectFileNotFound => None,
            Error::NoParentDirectory(_) => None,
            Error::Open { path: _, err } => Some(err),
            Error::DeserializeYaml(err) => Some(err),
            Error::UrlParse(err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. It allows us to use
    /// the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<url::ParseError> for Error {
    /// Converts a [`url::ParseError`] into an [`Error`]. It allows us to use
    /// the `?` operator for URL joining functions.
    fn from(err: url::ParseError) -> Error {
        Error::UrlParse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_site(root: &Path, project_file: &str) -> std::io::Result<()> {
        fs::create_dir_all(root.join("theme"))?;
        fs::write(root.join(PROJECT_FILE), project_file)?;
        fs::write(
            root.join("theme/theme.yaml"),
            "projects_template: [base.html, projects.html]\n",
        )
    }

    #[test]
    fn test_defaults() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        write_site(dir.path(), "site_root: https://example.org/me\n")?;

        let config = Config::from_directory(dir.path(), Path::new("/tmp/out"))?;
        assert_eq!(config.title, "Projects");
        assert_eq!(config.home_page.as_str(), "https://example.org/me/");
        assert_eq!(config.projects_url.as_str(), "https://example.org/me/projects/");
        assert_eq!(config.static_url.as_str(), "https://example.org/me/static/");
        assert_eq!(config.projects_file, dir.path().join("projects/projects.yaml"));
        assert_eq!(config.fallback_thumbnail, DEFAULT_THUMBNAIL);
        assert_eq!(
            config.projects_template,
            vec![
                dir.path().join("theme/base.html"),
                dir.path().join("theme/projects.html")
            ]
        );
        assert_eq!(config.projects_output_directory, Path::new("/tmp/out/projects"));
        Ok(())
    }

    #[test]
    fn test_found_from_subdirectory() -> std::result::Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        write_site(
            dir.path(),
            "title: Things I made\nsite_root: https://example.org/\nprojects_file: data/p.yaml\nfallback_thumbnail: /none.png\n",
        )?;
        let nested = dir.path().join("projects/deeper");
        fs::create_dir_all(&nested)?;

        let config = Config::from_directory(&nested, Path::new("out"))?;
        assert_eq!(config.title, "Things I made");
        assert_eq!(config.projects_file, dir.path().join("data/p.yaml"));
        assert_eq!(config.fallback_thumbnail, "/none.png");
        Ok(())
    }

    #[test]
    fn test_missing_theme() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(PROJECT_FILE), "site_root: https://example.org/\n")?;
        match Config::from_directory(dir.path(), Path::new("out")) {
            Err(Error::Open { path, .. }) => assert!(path.ends_with("theme/theme.yaml")),
            Err(err) => panic!("unexpected error: {}", err),
            Ok(_) => panic!("expected an error"),
        }
        Ok(())
    }

    #[test]
    fn test_invalid_site_root() -> std::io::Result<()> {
        let dir = tempfile::tempdir()?;
        write_site(dir.path(), "site_root: not a url\n")?;
        assert!(matches!(
            Config::from_directory(dir.path(), Path::new("out")),
            Err(Error::DeserializeYaml(_))
        ));
        Ok(())
    }
}
