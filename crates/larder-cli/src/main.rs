mod api;
mod config;
mod generate_cmd;
mod recipes_cmd;
mod serve_cmd;
#[cfg(test)]
mod test_util;

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use larder_core::diet::PlanDuration;
use larder_store::Catalog;
use larder_store::models::{MacroRange, NutritionRange};

use config::{LarderConfig, Overrides};
use generate_cmd::{GenerateOptions, parse_macro_range};

#[derive(Parser)]
#[command(name = "larder", about = "Pantry-aware meal plan generator")]
struct Cli {
    /// Recipe catalog path (overrides LARDER_RECIPES_PATH env var)
    #[arg(long, global = true)]
    recipes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a larder config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Start the HTTP API
    Serve {
        /// Address to bind to (overrides LARDER_BIND)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (overrides LARDER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// List recipes that can be made from the given ingredients
    Recipes {
        /// Comma-separated ingredient ids
        #[arg(long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,
    },
    /// Generate a meal plan without starting the server
    Generate {
        /// Comma-separated ingredient ids
        #[arg(long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,
        /// Plan length: day, week, or month
        #[arg(long, default_value = "day")]
        duration: PlanDuration,
        /// Daily calories as MIN..MAX
        #[arg(long, value_parser = parse_macro_range)]
        calories: Option<MacroRange>,
        /// Daily proteins (g) as MIN..MAX
        #[arg(long, value_parser = parse_macro_range)]
        proteins: Option<MacroRange>,
        /// Daily carbs (g) as MIN..MAX
        #[arg(long, value_parser = parse_macro_range)]
        carbs: Option<MacroRange>,
        /// Daily fats (g) as MIN..MAX
        #[arg(long, value_parser = parse_macro_range)]
        fats: Option<MacroRange>,
        /// Daily fibres (g) as MIN..MAX
        #[arg(long, value_parser = parse_macro_range)]
        fibres: Option<MacroRange>,
        /// Seed the generator for reproducible plans
        #[arg(long)]
        seed: Option<u64>,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

/// Execute the `larder init` command: write the config file.
fn cmd_init(recipes: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let recipes = match recipes {
        Some(p) => p,
        None => std::env::current_dir()
            .context("failed to read current directory")?
            .join(larder_store::StoreConfig::DEFAULT_RECIPES_PATH),
    };

    let cfg = config::ConfigFile {
        catalog: config::CatalogSection {
            path: Some(recipes.clone()),
        },
        server: config::ServerSection {
            bind: Some(config::DEFAULT_BIND.to_string()),
            port: Some(config::DEFAULT_PORT),
            allowed_origins: Some(vec![config::DEFAULT_ALLOWED_ORIGIN.to_string()]),
        },
        generation: config::GenerationSection::default(),
    };

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  catalog.path = {}", recipes.display());
    println!("  server = {}:{}", config::DEFAULT_BIND, config::DEFAULT_PORT);
    println!();
    println!("Next: run `larder serve` to start the API.");

    Ok(())
}

fn load_catalog(config: &LarderConfig) -> anyhow::Result<Catalog> {
    let path = config.store.recipes_path();
    Catalog::load(path).with_context(|| format!("failed to load recipe catalog {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let recipes = cli.recipes.as_deref();

    match cli.command {
        Commands::Init { force } => cmd_init(cli.recipes.clone(), force)?,
        Commands::Serve { bind, port } => {
            let config = LarderConfig::resolve(Overrides {
                recipes,
                bind: bind.as_deref(),
                port,
            })?;
            let catalog = load_catalog(&config)?;
            serve_cmd::run_serve(&config, catalog).await?;
        }
        Commands::Recipes { ingredients } => {
            let config = LarderConfig::resolve(Overrides {
                recipes,
                ..Overrides::default()
            })?;
            let catalog = load_catalog(&config)?;
            recipes_cmd::run_recipes(&catalog, &ingredients);
        }
        Commands::Generate {
            ingredients,
            duration,
            calories,
            proteins,
            carbs,
            fats,
            fibres,
            seed,
            json,
        } => {
            let config = LarderConfig::resolve(Overrides {
                recipes,
                ..Overrides::default()
            })?;
            let catalog = load_catalog(&config)?;
            let range = NutritionRange {
                calories: calories.unwrap_or_else(MacroRange::unbounded),
                proteins: proteins.unwrap_or_else(MacroRange::unbounded),
                carbs: carbs.unwrap_or_else(MacroRange::unbounded),
                fats: fats.unwrap_or_else(MacroRange::unbounded),
                fibres: fibres.unwrap_or_else(MacroRange::unbounded),
            };
            let options = GenerateOptions {
                ingredients,
                duration,
                range,
                seed,
                json,
            };
            generate_cmd::run_generate(&catalog, &config.limits, &options)?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "larder", &mut std::io::stdout());
        }
    }

    Ok(())
}
