use std::io::{self, Write};

use anyhow::{Context, Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use hauler_registry::{ConnectorEntry, ConnectorRegistry};
use hauler_types::JobType;
use hauler_util::{DEFAULT_LOCALE, StringBundle};
use tracing::Level;

mod display;

fn main() -> Result<()> {
    init_tracing();
    let registry = ConnectorRegistry::from_config();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("connectors", _)) => run_connectors(&registry),
        Some(("describe", sub)) => run_describe(&registry, sub),
        Some(("config", sub)) => run_config(&registry, sub),
        _ => bail!("expected a subcommand"),
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}

fn build_cli() -> Command {
    Command::new("hauler")
        .about("Terminal client for the Hauler bulk data-transfer service")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("locale")
                .long("locale")
                .help("Locale used to resolve labels and help text")
                .global(true)
                .action(ArgAction::Set)
                .default_value(DEFAULT_LOCALE),
        )
        .subcommand(Command::new("connectors").about("List registered connectors"))
        .subcommand(
            Command::new("describe")
                .about("Show the form metadata a connector exposes")
                .arg(Arg::new("connector").required(true).index(1).help("Connector name")),
        )
        .subcommand(
            Command::new("config")
                .about("Show the current form values of a connector")
                .arg(Arg::new("connector").required(true).index(1).help("Connector name"))
                .arg(
                    Arg::new("job-type")
                        .long("job-type")
                        .help("Render the forms of this job type instead of the connection forms")
                        .action(ArgAction::Set)
                        .value_parser(clap::builder::PossibleValuesParser::new(["import", "export"])),
                ),
        )
}

fn run_connectors(registry: &ConnectorRegistry) -> Result<()> {
    if registry.connectors.is_empty() {
        println!("No connectors registered");
        return Ok(());
    }
    for entry in &registry.connectors {
        println!("{}  {}", entry.metadata.name, entry.metadata.version);
    }
    Ok(())
}

fn run_describe(registry: &ConnectorRegistry, sub: &ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("connector").context("expected a connector name")?;
    let entry = registry.find_connector(name)?;
    let bundle = resolve_bundle(entry, locale_of(sub))?;

    let mut out = io::stdout().lock();
    writeln!(out, "Connector: {}", entry.metadata.name)?;
    writeln!(out, "Version: {}", entry.metadata.version)?;
    display::render_framework_metadata(&mut out, &entry.metadata, bundle)
        .with_context(|| format!("failed to render metadata for connector '{name}'"))?;
    Ok(())
}

fn run_config(registry: &ConnectorRegistry, sub: &ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("connector").context("expected a connector name")?;
    let entry = registry.find_connector(name)?;
    let bundle = resolve_bundle(entry, locale_of(sub))?;

    let forms = match sub.get_one::<String>("job-type") {
        Some(raw) => {
            let job_type: JobType = raw.parse().with_context(|| format!("invalid job type '{raw}'"))?;
            entry
                .metadata
                .forms_for(job_type)
                .with_context(|| format!("connector '{name}' does not support {job_type} jobs"))?
        }
        None => entry.metadata.connection_forms.as_slice(),
    };

    let mut out = io::stdout().lock();
    display::render_forms(&mut out, forms, bundle).with_context(|| format!("failed to render forms for connector '{name}'"))?;
    Ok(())
}

/// Locale requested on the command line; global flags propagate into every
/// subcommand's matches.
fn locale_of(sub: &ArgMatches) -> &str {
    sub.get_one::<String>("locale").map(String::as_str).unwrap_or(DEFAULT_LOCALE)
}

fn resolve_bundle<'a>(entry: &'a ConnectorEntry, locale: &str) -> Result<&'a StringBundle> {
    entry
        .bundles
        .for_locale(locale)
        .with_context(|| format!("connector '{}' has no string bundle for locale '{locale}'", entry.metadata.name))
}
