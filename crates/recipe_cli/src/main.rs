use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use cauldron_core::{BrewConfig, BrewSetup, Item};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "Inspect cauldron recipe configurations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a config, printing what it defines.
    Check(ConfigArgs),
    /// Print every recipe in declaration order.
    List(ConfigArgs),
    /// Evaluate a list of ingredients against the recipe table.
    Mix(MixArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Config file; the bundled recipes are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct MixArgs {
    #[command(flatten)]
    source: ConfigArgs,
    #[arg(long)]
    json: bool,
    #[arg(required = true)]
    ingredients: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
struct MixReport {
    ingredients: Vec<String>,
    result: Option<String>,
    /// Index of the matching recipe in declaration order.
    recipe: Option<usize>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check(args) => handle_check(args),
        Commands::List(args) => handle_list(args),
        Commands::Mix(args) => handle_mix(args),
    }
}

fn load(args: &ConfigArgs) -> Result<BrewSetup> {
    let config = match &args.config {
        Some(path) => BrewConfig::from_path(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => BrewConfig::builtin().context("bundled config is invalid")?,
    };
    let setup = config
        .build()
        .with_context(|| format!("invalid config {}", describe(args.config.as_deref())))?;
    debug!(target: "cauldron.config", recipes = setup.recipes.len(), "config loaded");
    Ok(setup)
}

fn describe(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "<builtin>".to_string())
}

fn handle_check(args: ConfigArgs) -> Result<()> {
    let setup = load(&args)?;
    info!(target: "cauldron.config", source = %describe(args.config.as_deref()), "config ok");
    println!(
        "{}: {} items, {} recipes, {} placements, {} starting inventory items",
        describe(args.config.as_deref()),
        setup.catalog.len(),
        setup.recipes.len(),
        setup.placements.len(),
        setup.starting_inventory.len()
    );
    Ok(())
}

fn handle_list(args: ConfigArgs) -> Result<()> {
    let setup = load(&args)?;
    for recipe in setup.recipes.iter() {
        println!("{recipe}");
    }
    Ok(())
}

fn handle_mix(args: MixArgs) -> Result<()> {
    let setup = load(&args.source)?;
    let report = evaluate(&setup, &args.ingredients)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match &report.result {
            Some(result) => println!("{} => {result}", report.ingredients.join(" + ")),
            None => println!("{} => no match", report.ingredients.join(" + ")),
        }
    }
    Ok(())
}

fn evaluate(setup: &BrewSetup, names: &[String]) -> Result<MixReport> {
    let contents = names
        .iter()
        .map(|name| {
            setup
                .catalog
                .get(name)
                .cloned()
                .ok_or_else(|| anyhow!("unknown ingredient `{name}`"))
        })
        .collect::<Result<Vec<Item>>>()?;

    let recipe = setup.recipes.position_of_match(&contents);
    let result = recipe
        .and_then(|index| setup.recipes.iter().nth(index))
        .map(|recipe| recipe.result().name().to_string());
    Ok(MixReport {
        ingredients: names.to_vec(),
        result,
        recipe,
    })
}
