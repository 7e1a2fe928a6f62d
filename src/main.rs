use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, warn};
use recipe_finder::{load_config, FinderError, RecipeFinder, RecipeRecord};

#[derive(Parser, Debug)]
#[command(name = "recipe-finder", version, about = "Find a recipe for a dish on the web")]
struct Cli {
    /// Dish to look up; starts an interactive session when omitted
    dish: Vec<String>,

    /// Extract the recipe from this page instead of searching
    #[arg(long, conflicts_with = "dish")]
    url: Option<String>,

    /// Print the recipe as JSON
    #[arg(long)]
    json: bool,

    /// Wrap width for ingredients and steps
    #[arg(long)]
    wrap: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Pause between failed candidates in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Number of search results to consider
    #[arg(long)]
    max_candidates: Option<usize>,

    /// Preferred domain suffix; repeat to list several (replaces the defaults)
    #[arg(long = "prefer", value_name = "DOMAIN")]
    prefer: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let finder = build_finder(&cli)?;

    if let Some(url) = &cli.url {
        return Ok(match finder.scrape(url).await {
            Ok(recipe) => {
                print_recipe(&finder, &recipe, cli.json)?;
                ExitCode::SUCCESS
            }
            Err(failure) => {
                println!("Couldn't extract a recipe: {failure}");
                ExitCode::FAILURE
            }
        });
    }

    if !cli.dish.is_empty() {
        let found = search_and_print(&finder, &cli.dish.join(" "), cli.json).await?;
        return Ok(if found {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    interactive(&finder, cli.json).await?;
    Ok(ExitCode::SUCCESS)
}

fn build_finder(cli: &Cli) -> Result<RecipeFinder, FinderError> {
    let mut builder = RecipeFinder::builder().config(load_config()?);
    if let Some(width) = cli.wrap {
        builder = builder.wrap_width(width);
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(ms) = cli.delay_ms {
        builder = builder.request_delay(Duration::from_millis(ms));
    }
    if let Some(max) = cli.max_candidates {
        builder = builder.max_candidates(max);
    }
    if !cli.prefer.is_empty() {
        builder = builder.preferred_domains(cli.prefer.iter().cloned());
    }
    builder.build()
}

async fn interactive(finder: &RecipeFinder, json: bool) -> io::Result<()> {
    println!("What shall we cook? Type a dish name, or 'exit' to quit.");
    let stdin = io::stdin();

    loop {
        print!("\nDish: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!("\nGoodbye!");
            return Ok(());
        }

        let dish = line.trim();
        if dish.is_empty() {
            println!("Please enter a dish name.");
            continue;
        }
        if matches!(dish.to_lowercase().as_str(), "exit" | "quit" | "q") {
            println!("Goodbye!");
            return Ok(());
        }

        search_and_print(finder, dish, json).await?;
    }
}

/// Returns whether a recipe was printed
async fn search_and_print(finder: &RecipeFinder, dish: &str, json: bool) -> io::Result<bool> {
    println!("Searching: {} recipe", dish);

    let result = finder
        .find_with_progress(dish, |rank, url| println!("→ Checking {rank}: {url}"))
        .await;

    match result {
        Ok(recipe) => {
            print_recipe(finder, &recipe, json)?;
            Ok(true)
        }
        Err(FinderError::Search(e)) => {
            warn!("{}", e);
            println!("Search failed.");
            Ok(false)
        }
        Err(FinderError::NoResults) => {
            println!("No results.");
            Ok(false)
        }
        Err(err @ FinderError::NotFound { .. }) => {
            println!("\nCouldn't extract a recipe from top results.");
            for reason in err.top_reasons(3) {
                println!(" - {reason}");
            }
            Ok(false)
        }
        Err(e) => {
            error!("{}", e);
            println!("Error: {e}");
            Ok(false)
        }
    }
}

fn print_recipe(finder: &RecipeFinder, recipe: &RecipeRecord, json: bool) -> io::Result<()> {
    if json {
        let text = serde_json::to_string_pretty(recipe)?;
        println!("{text}");
    } else {
        println!("\n{}", finder.render(recipe));
    }
    Ok(())
}
