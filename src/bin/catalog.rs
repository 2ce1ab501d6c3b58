use anyhow::Result;
use boutique_catalog::catalog::select::{self, CategoryAliases};
use boutique_catalog::cli::{load_products, print_products};
use boutique_catalog::util::env;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog", version, about = "Boutique catalog admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(rename_all = "kebab-case")]
enum Commands {
    /// Fetch the feed once and list the normalized catalog
    Fetch,
    /// Free-text search over name + category
    Search {
        /// Query text (case-insensitive substring)
        query: String,
    },
    /// List a category (alias redirects + substring matching)
    Category {
        /// Category name as shown in navigation, e.g. "Sarees & Dupattas"
        name: String,
    },
    /// List a promotional tag by URL path segment, e.g. "flat50"
    Tag {
        /// Path segment; punctuation and case are ignored
        segment: String,
    },
    /// List a curated home section: new-arrivals, favourites or trending
    Sections {
        /// Section slug
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env::init_env();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let products = load_products().await?;

    match cli.command {
        Commands::Fetch => print_products(&products),
        Commands::Search { query } => {
            print_products(&select::search_text(&products, &query));
        }
        Commands::Category { name } => {
            let aliases = CategoryAliases::with_defaults();
            print_products(&select::select_category(&products, &aliases, &name));
        }
        Commands::Tag { segment } => {
            print_products(&select::select_tag(&products, &segment));
        }
        Commands::Sections { name } => match select::Section::from_slug(&name) {
            Some(section) => print_products(&select::select_section(&products, section)),
            None => anyhow::bail!("unknown section: {name} (try new-arrivals, favourites, trending)"),
        },
    }

    Ok(())
}
