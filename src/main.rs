// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use nutrient_resolver::utils::logging::{
    format_error, format_info, format_item, format_success, format_warning, init_logger,
};
use nutrient_resolver::{
    Config, DataType, DetailFormat, FoodSource, NormalizedFood, NutritionError, SearchOptions,
    SearchOrchestrator, SearchPreference, SearchResult, ServiceStats, Validator,
};
use serde::Serialize;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "nutrient_resolver")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Food and nutrient lookup backed by USDA FoodData Central with a local fallback", long_about = None)]
struct Cli {
    /// Defaults to config/default.toml when present
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, env = "FDC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Never query the remote database for searches
    #[arg(long, action = ArgAction::SetTrue)]
    local_first: bool,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search foods by name, brand or category
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[arg(short = 'n', long)]
        page_size: Option<usize>,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Comma separated, e.g. "Foundation,SR Legacy"
        #[arg(long, value_delimiter = ',')]
        data_type: Vec<DataType>,

        #[arg(long)]
        category: Option<String>,
    },

    /// Show one food by FoodData Central id or local id (local_<n>)
    Details {
        id: String,

        #[arg(short, long, default_value = "abridged")]
        format: DetailFormat,
    },

    /// Suggest queries for a partial input
    Suggest {
        #[arg(default_value = "")]
        partial: String,
    },

    Stats,

    /// List categories of the local dataset
    Categories,

    /// Interactive session; cache and history live until it ends
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    info!(
        "Remote database: {} ({})",
        config.remote.base_url,
        if config.remote.api_key.is_some() { "API key set" } else { "no API key" }
    );

    let service = SearchOrchestrator::from_config(&config);
    if let Some(key) = Validator::sanitize_api_key(cli.api_key.clone()) {
        service.set_api_key(Some(key)).await;
    }
    if cli.local_first {
        service.set_search_preference(SearchPreference::LocalFirst);
    }

    match cli.command {
        Commands::Search {
            query,
            page_size,
            page,
            data_type,
            category,
        } => {
            let mut options = service.default_options().page_number(page);
            if let Some(size) = page_size {
                options = options.page_size(size);
            }
            if !data_type.is_empty() {
                options = options.data_types(data_type);
            }
            if let Some(category) = category {
                options = options.category(category);
            }
            cmd_search(&service, &query.join(" "), &options, cli.json).await?;
        }
        Commands::Details { id, format } => {
            cmd_details(&service, &id, format, cli.json).await?;
        }
        Commands::Suggest { partial } => {
            cmd_suggest(&service, &partial, cli.json).await?;
        }
        Commands::Stats => {
            cmd_stats(&service, cli.json).await?;
        }
        Commands::Categories => {
            cmd_categories(&service, cli.json)?;
        }
        Commands::Shell => {
            cmd_shell(&service, cli.json).await?;
        }
    }

    Ok(())
}

async fn cmd_search(
    service: &SearchOrchestrator,
    query: &str,
    options: &SearchOptions,
    json: bool,
) -> Result<()> {
    let result = service.search_foods(query, options).await;
    if json {
        return print_json(&result);
    }
    print_search(&result);
    Ok(())
}

async fn cmd_details(
    service: &SearchOrchestrator,
    id: &str,
    format: DetailFormat,
    json: bool,
) -> Result<()> {
    match service.get_food_details(id, format).await {
        Ok(food) => {
            if json {
                return print_json(&food);
            }
            print_food(&food);
            Ok(())
        }
        Err(NutritionError::NotFound(id)) => {
            println!("{}", format_warning(&format!("No food found for id {}", id)));
            Ok(())
        }
        Err(e) => Err(e).context("Detail lookup failed"),
    }
}

async fn cmd_suggest(service: &SearchOrchestrator, partial: &str, json: bool) -> Result<()> {
    let suggestions = service.get_search_suggestions(partial).await;
    if json {
        return print_json(&suggestions);
    }
    print_list("Suggestions", &suggestions);
    Ok(())
}

async fn cmd_stats(service: &SearchOrchestrator, json: bool) -> Result<()> {
    let stats = service.get_stats().await;
    if json {
        return print_json(&stats);
    }
    print_stats(&stats);
    Ok(())
}

fn cmd_categories(service: &SearchOrchestrator, json: bool) -> Result<()> {
    let categories: Vec<String> = service
        .repository()
        .categories()
        .into_iter()
        .map(str::to_string)
        .collect();
    if json {
        return print_json(&categories);
    }
    print_list("Categories", &categories);
    Ok(())
}

async fn cmd_history(service: &SearchOrchestrator, json: bool) -> Result<()> {
    let recent = service.recent_searches().await;
    if json {
        return print_json(&recent);
    }
    let lines: Vec<String> = recent
        .iter()
        .map(|entry| {
            format!(
                "{} ({} results, {})",
                entry.query,
                entry.result_count,
                entry.timestamp.format("%H:%M:%S")
            )
        })
        .collect();
    print_list("Recent searches", &lines);
    Ok(())
}

const SHELL_HELP: &str = "\
commands:
  search <query>          search foods
  details <id> [full]     show one food
  suggest <partial>       query suggestions
  history                 recent searches
  categories              local categories
  stats                   cache and history statistics
  prefer <remote|local>   change search preference
  key [value]             set or clear the API key
  clear                   clear caches
  help                    this text
  quit                    leave the shell";

async fn cmd_shell(service: &SearchOrchestrator, json: bool) -> Result<()> {
    println!("{}", format_info("Nutrient resolver shell. Type 'help' for commands."));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let outcome = match command.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "help" => {
                println!("{}", SHELL_HELP);
                Ok(())
            }
            "search" => cmd_search(service, rest, &service.default_options(), json).await,
            "details" => {
                let (id, format) = rest.split_once(' ').unwrap_or((rest, ""));
                match format.trim() {
                    "" => cmd_details(service, id, DetailFormat::Abridged, json).await,
                    other => match other.parse::<DetailFormat>() {
                        Ok(format) => cmd_details(service, id, format, json).await,
                        Err(e) => Err(anyhow::anyhow!(e)),
                    },
                }
            }
            "suggest" => cmd_suggest(service, rest, json).await,
            "history" => cmd_history(service, json).await,
            "categories" => cmd_categories(service, json),
            "stats" => cmd_stats(service, json).await,
            "prefer" => match rest.parse::<SearchPreference>() {
                Ok(preference) => {
                    service.set_search_preference(preference);
                    println!("{}", format_success(&format!("Preference: {}", preference)));
                    Ok(())
                }
                Err(e) => Err(anyhow::anyhow!(e)),
            },
            "key" => {
                let key = (!rest.is_empty()).then(|| rest.to_string());
                let cleared = key.is_none();
                service.set_api_key(key).await;
                let message = if cleared { "API key cleared" } else { "API key set" };
                println!("{}", format_success(message));
                Ok(())
            }
            "clear" => {
                service.clear_cache().await;
                println!("{}", format_success("Caches cleared"));
                Ok(())
            }
            other => Err(anyhow::anyhow!("Unknown command '{}', try 'help'", other)),
        };

        if let Err(e) = outcome {
            warn!("Shell command failed: {:#}", e);
            println!("{}", format_error(&e.to_string()));
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

fn print_search(result: &SearchResult) {
    match result.source {
        FoodSource::Error => {
            let reason = result.error.as_deref().unwrap_or("unknown error");
            println!("{}", format_error(&format!("Search failed: {}", reason)));
            return;
        }
        _ if result.is_empty() => {
            println!(
                "{}",
                format_warning(&format!("No foods found for \"{}\"", result.query))
            );
            return;
        }
        _ => {}
    }

    println!("\n{}", format_success(&result.format_summary()));
    println!("{}", "=".repeat(80));
    for (idx, food) in result.foods.iter().enumerate() {
        println!(
            "{}",
            format_item(idx + 1, &Validator::truncate_text(&food.format_summary(), 110))
        );
    }
    println!("{}", "=".repeat(80));
}

fn print_food(food: &NormalizedFood) {
    println!("\n{}", format_success(&format!("{} [{}]", food.description, food.id)));
    if let Some(brand) = &food.brand {
        println!("   Brand: {}", brand);
    }
    if let Some(category) = &food.category {
        println!("   Category: {}", category);
    }
    if let Some(data_type) = &food.data_type {
        println!("   Data type: {}", data_type);
    }
    if let (Some(size), Some(unit)) = (food.serving_size, &food.serving_size_unit) {
        println!("   Serving: {} {}", size, unit);
    }
    if let Some(household) = &food.household_serving {
        println!("   Household serving: {}", household);
    }
    println!("   Source: {}", food.source);

    println!("   Nutrients:");
    if food.nutrients.is_empty() {
        println!("     (none reported)");
    }
    for nutrient in food.nutrients.values() {
        println!(
            "     {:<40} {:>10.2} {}",
            nutrient.name, nutrient.value, nutrient.unit
        );
    }
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        println!("{}", format_warning(&format!("{}: none", title)));
        return;
    }
    println!("{}", format_info(title));
    for (idx, item) in items.iter().enumerate() {
        println!("{}", format_item(idx + 1, item));
    }
}

fn print_stats(stats: &ServiceStats) {
    println!("{}", format_info("Service statistics"));
    println!("   Preference:      {}", stats.preference);
    println!("   API key:         {}", if stats.has_api_key { "set" } else { "not set" });
    println!("   Cached entries:  {}", stats.cache_size);
    println!("   History entries: {}", stats.history_count);
    println!(
        "   Search cache:    {}/{} entries, {} hits, {} misses, {} evictions",
        stats.search_cache.entries,
        stats.search_cache.capacity,
        stats.search_cache.hits,
        stats.search_cache.misses,
        stats.search_cache.evictions
    );
    println!(
        "   Details cache:   {}/{} entries, {} hits, {} misses, {} evictions",
        stats.details_cache.entries,
        stats.details_cache.capacity,
        stats.details_cache.hits,
        stats.details_cache.misses,
        stats.details_cache.evictions
    );
    println!("   Hit rate:        {:.1}%", stats.hit_rate());
}
