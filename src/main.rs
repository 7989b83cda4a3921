//! `dadly`: browse recipes from the command line.
//!
//! ```bash
//! # Vegan recipes from a saved feed, quickest first
//! dadly list --input feed.json --diet vegan --sort total-time --order ascending
//!
//! # Live feed from the configured API
//! DADLY__API__BASE_URL=https://api.example.com dadly list --search soup
//!
//! # Dietary labels of every recipe
//! dadly tags --input feed.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;

use dadly::{
    available_ingredients, fetch_hydrated_feed, format_difficulty, format_minutes,
    load_recipes_file, tag_recipes, DadlyConfig, DietaryTag, PrepTimeBucket, Recipe, RecipeApi,
    RecipeQuery, Session, SortKey, SortOrder,
};

#[derive(Parser)]
#[command(name = "dadly", version, about = "Browse, tag and sort recipes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Filter and sort recipes
    List(ListArgs),
    /// Show the dietary labels of each recipe
    Tags(SourceArgs),
    /// List every distinct ingredient
    Ingredients(SourceArgs),
    /// Show who the configured access token belongs to
    Whoami,
}

#[derive(Args)]
struct SourceArgs {
    /// JSON file holding an array of recipes; the API feed is used when omitted
    #[arg(long, short)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct ListArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Case-insensitive substring of the recipe name
    #[arg(long)]
    search: Option<String>,
    /// Case-insensitive substring of an ingredient
    #[arg(long)]
    ingredient: Option<String>,
    /// easy, medium, hard, ...
    #[arg(long)]
    difficulty: Option<String>,
    /// quick, medium or long
    #[arg(long)]
    prep: Option<PrepTimeBucket>,
    /// all, vegetarian, vegan, gluten-free or dairy-free
    #[arg(long)]
    diet: Option<DietaryTag>,
    /// alphabetical, prep-time, cook-time, total-time, difficulty,
    /// popularity, recently-saved or your-rating
    #[arg(long, default_value = "recently-saved")]
    sort: SortKey,
    /// ascending or descending (defaults to the configured order)
    #[arg(long)]
    order: Option<SortOrder>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

async fn load(
    source: &SourceArgs,
    config: &DadlyConfig,
) -> Result<Vec<Recipe>, Box<dyn std::error::Error>> {
    if let Some(path) = &source.input {
        return Ok(load_recipes_file(path).await?);
    }

    let api = RecipeApi::from_config(&config.api)?;
    let session = session_from(config);
    info!("Fetching {} recipes from {}", config.feed.limit, api.base_url());
    Ok(fetch_hydrated_feed(&api, &session, config.feed.limit).await?)
}

fn session_from(config: &DadlyConfig) -> Session {
    config
        .api
        .access_token
        .as_deref()
        .map(Session::with_token)
        .unwrap_or_default()
}

fn print_table(recipes: &[&Recipe]) {
    for recipe in recipes {
        println!(
            "{:<32} prep {:>3}m  cook {:>3}m  {:<8} ♥ {}",
            recipe.name,
            format_minutes(recipe.prep_time),
            format_minutes(recipe.cook_time),
            format_difficulty(recipe.difficulty.as_deref()),
            recipe.likes()
        );
    }
    println!(
        "{} {}",
        recipes.len(),
        if recipes.len() == 1 { "recipe" } else { "recipes" }
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DadlyConfig::load()?;

    match cli.command {
        Command::List(args) => {
            let recipes = load(&args.source, &config).await?;
            let mut builder = RecipeQuery::builder()
                .sort_by(args.sort)
                .order(args.order.unwrap_or(config.display.default_order));
            if let Some(search) = args.search {
                builder = builder.search(search);
            }
            if let Some(ingredient) = args.ingredient {
                builder = builder.ingredient(ingredient);
            }
            if let Some(difficulty) = args.difficulty {
                builder = builder.difficulty(difficulty);
            }
            if let Some(bucket) = args.prep {
                builder = builder.prep_time(bucket);
            }
            if let Some(tag) = args.diet {
                builder = builder.dietary_tag(tag);
            }
            let query = builder.build();

            let shown = query.apply(&recipes);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                print_table(&shown);
            }
        }
        Command::Tags(source) => {
            let recipes = load(&source, &config).await?;
            for tagged in tag_recipes(recipes) {
                println!(
                    "{:<32} {}",
                    tagged.recipe.name,
                    tagged.dietary_tags.labels().join(", ")
                );
            }
        }
        Command::Ingredients(source) => {
            let recipes = load(&source, &config).await?;
            for ingredient in available_ingredients(&recipes) {
                println!("{ingredient}");
            }
        }
        Command::Whoami => {
            let api = RecipeApi::from_config(&config.api)?;
            let session = api.identify(session_from(&config)).await?;
            match session.user() {
                Some(user) => println!(
                    "{} <{}>",
                    user.name.as_deref().unwrap_or("unnamed"),
                    user.email.as_deref().unwrap_or("no email")
                ),
                None => println!("Not signed in"),
            }
        }
    }

    Ok(())
}
