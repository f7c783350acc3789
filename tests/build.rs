use showcase::build::build_site;
use showcase::config::Config;
use std::error::Error;
use std::fs;
use std::path::Path;

const PROJECTS: &str = r#"
tagOrder: [Games]
projects:
  - name: Saw
    description: |
      Cuts things.
      Mostly wood.
    categories: [Tools]
    importance: 1
    date: Aug 8-11, 2025
    githubURL: github.com/me/saw
  - name: Chess
    description: A board game.
    categories: [Games, Tools]
    importance: 2
  - description: Nameless, so skipped.
"#;

const TEMPLATE: &str = r#"<h1>{{.title}}</h1>
{{range .categories}}<a href="{{.url}}">{{.displayName}}</a>
{{end}}{{range .projects}}<article id="{{.id}}">{{.nameHtml}} {{.dateDisplay}}{{range .links}} {{.label}}={{.url}}{{end}}</article>
{{end}}"#;

fn write_site(root: &Path) -> std::io::Result<()> {
    fs::create_dir_all(root.join("theme"))?;
    fs::create_dir_all(root.join("projects"))?;
    fs::create_dir_all(root.join("static/css"))?;
    fs::write(
        root.join("showcase.yaml"),
        "title: My Projects\nsite_root: https://example.org/\n",
    )?;
    fs::write(
        root.join("theme/theme.yaml"),
        "projects_template: [projects.html]\n",
    )?;
    fs::write(root.join("theme/projects.html"), TEMPLATE)?;
    fs::write(root.join("projects/projects.yaml"), PROJECTS)?;
    fs::write(root.join("static/css/site.css"), "body {}")
}

#[test]
fn test_build_site() -> Result<(), Box<dyn Error>> {
    let site = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    write_site(site.path())?;

    let config = Config::from_directory(site.path(), output.path())?;
    let catalog = build_site(&config)?;
    assert_eq!(catalog.projects.len(), 2);

    let all = fs::read_to_string(output.path().join("projects/index.html"))?;
    assert!(all.starts_with("<h1>My Projects</h1>"));
    let games_link = all.find(r#"<a href="https://example.org/projects/games/index.html">Games</a>"#);
    let tools_link = all.find(r#"<a href="https://example.org/projects/tools/index.html">Tools</a>"#);
    assert!(games_link.is_some() && tools_link.is_some());
    assert!(games_link < tools_link, "tagOrder puts Games first:\n{}", all);
    assert!(all.contains(
        r#"<article id="saw">Saw Aug 8-11th 2025 Code=https://github.com/me/saw</article>"#
    ));
    assert!(all.find(r#"id="saw""#) < all.find(r#"id="chess""#));

    let games = fs::read_to_string(output.path().join("projects/games/index.html"))?;
    assert!(games.contains(r#"id="chess""#));
    assert!(!games.contains(r#"id="saw""#));

    assert_eq!(fs::read_to_string(output.path().join("index.html"))?, all);
    assert_eq!(
        fs::read_to_string(output.path().join("static/css/site.css"))?,
        "body {}"
    );
    Ok(())
}

#[test]
fn test_build_without_projects_file() -> Result<(), Box<dyn Error>> {
    let site = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    write_site(site.path())?;
    fs::remove_file(site.path().join("projects/projects.yaml"))?;

    let config = Config::from_directory(site.path(), output.path())?;
    let catalog = build_site(&config)?;
    assert!(catalog.projects.is_empty());
    assert!(output.path().join("projects/index.html").is_file());
    assert!(!output.path().join("projects/games").exists());
    Ok(())
}

#[test]
fn test_rebuild_removes_stale_pages() -> Result<(), Box<dyn Error>> {
    let site = tempfile::tempdir()?;
    let output = tempfile::tempdir()?;
    write_site(site.path())?;
    let config = Config::from_directory(site.path(), output.path())?;
    build_site(&config)?;
    assert!(output.path().join("projects/tools/index.html").is_file());

    fs::write(
        site.path().join("projects/projects.yaml"),
        "- {name: Saw, description: d, categories: [Hardware]}",
    )?;
    build_site(&config)?;
    assert!(!output.path().join("projects/tools").exists());
    assert!(output.path().join("projects/hardware/index.html").is_file());
    Ok(())
}
