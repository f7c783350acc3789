use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use showcase::build::build_site;
use showcase::catalog::Normalizer;
use showcase::config::Config;
use showcase::date::format_date;
use std::error::Error;
use std::path::Path;
use tracing::error;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let matches = App::new("showcase")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Builds a static portfolio site from a YAML projects file")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Renders the site into an output directory")
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .takes_value(true)
                        .default_value("_output")
                        .help("The directory to write the site into"),
                ),
        )
        .subcommand(
            SubCommand::with_name("catalog")
                .about("Prints the normalized projects catalog as JSON"),
        )
        .subcommand(
            SubCommand::with_name("check")
                .about("Fails if two projects slugify to the same id"),
        )
        .subcommand(
            SubCommand::with_name("date")
                .about("Prints the display form of a date string")
                .arg(Arg::with_name("TEXT").required(true).index(1)),
        )
        .get_matches();

    match run(&matches) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            error!("{}", err);
            std::process::exit(1);
        }
    }
}

/// Runs the selected subcommand. Returns `Ok(false)` when the command ran but
/// found problems.
fn run(matches: &ArgMatches) -> Result<bool> {
    match matches.subcommand() {
        ("build", Some(sub)) => {
            let output = Path::new(sub.value_of("output").unwrap_or("_output"));
            build_site(&load_config(output)?)?;
        }
        ("catalog", Some(_)) => {
            let config = load_config(Path::new("_output"))?;
            let catalog = Normalizer::new(&config.fallback_thumbnail).load(&config.projects_file);
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        ("check", Some(_)) => {
            let config = load_config(Path::new("_output"))?;
            let catalog = Normalizer::new(&config.fallback_thumbnail).load(&config.projects_file);
            let collisions = catalog.id_collisions();
            for id in &collisions {
                println!("duplicate project id: {}", id);
            }
            return Ok(collisions.is_empty());
        }
        ("date", Some(sub)) => println!("{}", format_date(sub.value_of("TEXT"))),
        _ => unreachable!("clap requires a subcommand"),
    }
    Ok(true)
}

fn load_config(output: &Path) -> Result<Config> {
    Ok(Config::from_directory(&std::env::current_dir()?, output)?)
}
