use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use spdlog::{info, warn};

use inkpost::config::Config;
use inkpost::content::markdown_renderer::MarkdownRenderer;
use inkpost::logger::configure_logger;
use inkpost::post_collection::{TaxonomyFilter, TaxonomyKind};
use inkpost::post_processor::load_config_posts;
use inkpost::site_export::{export_site, taxonomy_values};

use crate::config::open_config;

mod config;

const CFG_FILE_NAME: &str = "inkpost.toml";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Config path
    #[arg(short, long)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Index every post and write the site data into the output dir
    Build,
    /// Print one page of posts, newest first
    List {
        #[arg(long, conflicts_with = "tag")]
        category: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Print every category or tag with its post count
    Taxonomies {
        #[arg(value_enum)]
        kind: KindArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Categories,
    Tags,
}

impl From<KindArg> for TaxonomyKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Categories => TaxonomyKind::Categories,
            KindArg::Tags => TaxonomyKind::Tags,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config_path.map(PathBuf::from);

    let config = match open_config(config_path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Please run inkpost --help");
            return Err(err);
        }
    };

    if let Err(err) = configure_logger(&config) {
        warn!("Error creating logger sinks. Using console instead. Desc={}", err);
    }

    match args.command {
        Command::Build => build(&config),
        Command::List { category, tag, page } => list(&config, category, tag, page),
        Command::Taxonomies { kind } => taxonomies(&config, kind.into()),
    }
}

fn build(config: &Config) -> Result<()> {
    info!("Building site from {}", config.paths.posts_dir.display());
    let collection = load_config_posts(config)?;
    let summary = export_site(config, &collection, &MarkdownRenderer {})?;
    info!("Done. {} routes, {} files", summary.routes, summary.files);
    Ok(())
}

fn list(config: &Config, category: Option<String>, tag: Option<String>, page: u32) -> Result<()> {
    let filter = match (category, tag) {
        (Some(category), _) => Some(TaxonomyFilter::Category(category.parse()?)),
        (None, Some(tag)) => Some(TaxonomyFilter::Tag(tag)),
        (None, None) => None,
    };
    let page_size = match filter {
        Some(_) => config.defaults.taxonomy_page_size,
        None => config.defaults.page_size,
    };

    let collection = load_config_posts(config)?;
    let result = collection.paginate(page, page_size, filter.as_ref())?;
    for post in &result.posts {
        println!("{}", post);
    }
    println!("Page {} of {}", result.current_page, result.page_count);
    Ok(())
}

fn taxonomies(config: &Config, kind: TaxonomyKind) -> Result<()> {
    let collection = load_config_posts(config)?;
    for value in taxonomy_values(&collection, kind)? {
        println!("{} ({})  {}", value.name, value.count, value.url);
    }
    Ok(())
}
