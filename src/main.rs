//! PC Build Advisor
//!
//! Command-line front end for the budget-tiered build recommender.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use rusqlite::Connection;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pc_build_advisor::price::format_price;
use pc_build_advisor::{Catalog, Category, Cooling, Resolution, TierPolicy, UserProfile, db, import};

#[derive(Parser)]
#[command(name = "pc-build-advisor")]
#[command(about = "Budget-tiered PC build recommendations")]
struct Cli {
    /// Path to a SQLite catalog; the built-in catalog is used when omitted
    #[arg(short, long, env = "PC_ADVISOR_DB", global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize an empty catalog database
    Init,

    /// Store the built-in catalog in the database
    LoadSample,

    /// Import JSON price sheets from a directory
    Import {
        /// Directory containing *.json price sheets
        dir: PathBuf,

        /// Clear existing catalog data before importing
        #[arg(long)]
        clear: bool,
    },

    /// List catalog components
    ListComponents {
        /// Only show one category (e.g. "GPU")
        #[arg(short, long)]
        category: Option<Category>,
    },

    /// Search known games and applications
    Titles {
        /// Case-insensitive part of the title
        query: Option<String>,
    },

    /// Show the target performance score for a profile
    Estimate(ProfileArgs),

    /// Show the three budget ceilings for a nominal budget
    Tiers {
        /// Nominal budget in COP (e.g. 2000000 or "$2.000.000")
        #[arg(short, long, value_parser = parse_budget)]
        budget: u64,
    },

    /// Recommend economy, balanced and performance builds
    Recommend {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct ProfileArgs {
    /// Intended use (gaming, design, workstation, ...); repeatable
    #[arg(short, long = "use-case", required = true)]
    use_cases: Vec<String>,

    /// Application the build must run; repeatable
    #[arg(long = "app")]
    apps: Vec<String>,

    /// Game the build must run; repeatable
    #[arg(short, long = "game")]
    games: Vec<String>,

    /// Nominal budget in COP (e.g. 2000000 or "$2.000.000")
    #[arg(short, long, default_value = "2000000", value_parser = parse_budget)]
    budget: u64,

    /// Display resolution: 1080p, 1440p or 4k
    #[arg(short, long, default_value = "1080p")]
    resolution: Resolution,

    /// Also pick a monitor, keyboard and mouse
    #[arg(short, long)]
    peripherals: bool,

    /// Cooling preference: air or liquid
    #[arg(short, long, default_value = "air")]
    cooling: Cooling,
}

impl From<ProfileArgs> for UserProfile {
    fn from(args: ProfileArgs) -> Self {
        UserProfile {
            use_cases: args.use_cases.into_iter().collect(),
            selected_apps: args.apps.into_iter().collect(),
            selected_games: args.games.into_iter().collect(),
            budget: args.budget,
            resolution: args.resolution,
            wants_peripherals: args.peripherals,
            cooling: args.cooling,
        }
    }
}

fn parse_budget(text: &str) -> Result<u64, String> {
    match pc_build_advisor::price::parse_price(text) {
        Some(0) => Err("budget must be a positive amount".to_string()),
        Some(pesos) => Ok(pesos),
        None => Err(format!("'{text}' is not a peso amount")),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "pc_build_advisor=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let path = require_database(cli.database.as_deref())?;
            open_database(path)?;
            println!("Database initialized at: {}", path.display());
        }

        Commands::LoadSample => {
            let path = require_database(cli.database.as_deref())?;
            let mut conn = open_database(path)?;
            db::clear_catalog(&conn)?;
            let catalog = Catalog::builtin();
            db::store_catalog(&mut conn, &catalog)?;
            println!(
                "Loaded {} components and {} requirements",
                catalog.components().len(),
                catalog.requirements().len()
            );
        }

        Commands::Import { dir, clear } => {
            let path = require_database(cli.database.as_deref())?;
            let conn = open_database(path)?;
            if clear {
                println!("Clearing existing catalog...");
                db::clear_catalog(&conn)?;
            }
            let stats = import::import_directory(&conn, &dir)?;
            println!("{}", stats);

            db::load_catalog(&conn).context("imported catalog is not usable")?;
        }

        Commands::ListComponents { category } => {
            let components = match cli.database.as_deref() {
                Some(path) => db::list_components(&open_database(path)?, category)?,
                None => {
                    let mut all: Vec<_> = Catalog::builtin()
                        .components()
                        .iter()
                        .filter(|c| category.is_none_or(|cat| c.category == cat))
                        .cloned()
                        .collect();
                    all.sort_by_key(|c| (c.category, c.price));
                    all
                }
            };

            if components.is_empty() {
                println!("No components in catalog. Run 'load-sample' or 'import' first.");
            } else {
                println!("{:<16} {:<12} {:<32} {:>12} {:>6}", "ID", "Category", "Name", "Price", "Perf");
                println!("{}", "-".repeat(82));
                for c in components {
                    println!(
                        "{:<16} {:<12} {:<32} {:>12} {:>6}",
                        c.id,
                        c.category.as_str(),
                        c.name,
                        format_price(c.price),
                        c.performance
                    );
                }
            }
        }

        Commands::Titles { query } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let titles = catalog.search_titles(query.as_deref().unwrap_or(""));
            if titles.is_empty() {
                println!("No matching titles");
            } else {
                for title in titles {
                    let score = catalog.requirement(title).unwrap_or(0);
                    println!("  {:<24} {:>4}", title, score);
                }
            }
        }

        Commands::Estimate(args) => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let profile = UserProfile::from(args);
            let target = pc_build_advisor::estimate_target(&catalog, &profile)?;
            println!("Target performance: {}", target);
        }

        Commands::Tiers { budget } => {
            for tier in pc_build_advisor::derive_tiers(budget)? {
                println!("{:<12} {:>14}", tier.label.title(), format_price(tier.ceiling));
            }
        }

        Commands::Recommend { profile, json } => {
            let catalog = load_catalog(cli.database.as_deref())?;
            let profile = UserProfile::from(profile);
            let report = pc_build_advisor::recommend(&catalog, &profile, &TierPolicy::default())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report);
            }
        }
    }

    Ok(())
}

fn require_database(path: Option<&Path>) -> Result<&Path> {
    match path {
        Some(p) => Ok(p),
        None => bail!("this command needs --database <path>"),
    }
}

fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    db::init_schema(&conn)?;
    Ok(conn)
}

/// Load the catalog from the database, or the built-in one when there is none
fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };

    let catalog = db::load_catalog(&open_database(path)?)?;
    if catalog.is_empty() {
        tracing::warn!(database = %path.display(), "catalog database is empty, using built-in catalog");
        return Ok(Catalog::builtin());
    }
    Ok(catalog)
}
