mod fetch;
mod input;
mod query;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gadgetcmp_catalog::{FeatureId, SortKey};
use gadgetcmp_core::Category;

#[derive(Debug, Parser)]
#[command(name = "gadgetcmp")]
#[command(about = "Catalog normalization, filtering, and comparison for gadget listings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Normalize a JSON dump and print the filtered, sorted cards
    Inspect {
        /// JSON file holding raw catalog records
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        category: Category,
        /// Free-text search over name, brand, and key specs
        #[arg(long)]
        search: Option<String>,
        /// Filter selection as `group=value`, repeatable (e.g. `brand=samsung`)
        #[arg(long = "filter")]
        filters: Vec<String>,
        #[arg(long)]
        min_price: Option<u64>,
        #[arg(long)]
        max_price: Option<u64>,
        /// Sort key such as `price-low` or `battery-high`
        #[arg(long)]
        sort: Option<SortKey>,
        /// Order by strength of a feature such as `fast-charging`
        #[arg(long)]
        feature: Option<FeatureId>,
        /// Maximum number of cards to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Print the facets of a JSON dump as JSON
    Facets {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        category: Category,
        /// Selected type values; exactly one enables the type-specific panel
        #[arg(long = "type")]
        types: Vec<String>,
    },
    /// Build a compare set from card keys and print it side by side
    Compare {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        category: Category,
        /// Compare keys as printed by `inspect`, repeatable
        #[arg(long = "key", required = true)]
        keys: Vec<String>,
    },
    /// Download raw records from the catalog API
    Fetch {
        #[arg(long, conflicts_with = "all", required_unless_present = "all")]
        category: Option<Category>,
        /// Fetch every category concurrently
        #[arg(long)]
        all: bool,
        /// Write JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the store directory
    Stores {
        /// Read the directory from the catalog API instead of the local file
        #[arg(long)]
        remote: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = gadgetcmp_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Inspect {
            input,
            category,
            search,
            filters,
            min_price,
            max_price,
            sort,
            feature,
            limit,
        }) => {
            let options = query::InspectOptions {
                search,
                filters,
                min_price,
                max_price,
                sort,
                feature,
                limit,
            };
            query::run_inspect(&config, &input, category, &options).await?;
        }
        Some(Commands::Facets {
            input,
            category,
            types,
        }) => query::run_facets(&input, category, &types)?,
        Some(Commands::Compare {
            input,
            category,
            keys,
        }) => query::run_compare(&config, &input, category, &keys).await?,
        Some(Commands::Fetch {
            category,
            all,
            output,
        }) => fetch::run_fetch(&config, category, all, output.as_deref()).await?,
        Some(Commands::Stores { remote }) => fetch::run_stores(&config, remote).await?,
        None => println!("gadgetcmp: run with --help to list commands"),
    }

    Ok(())
}
