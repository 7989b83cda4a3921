//! Recipe discovery core for Dadly.
//!
//! Recipes arrive from the API loosely typed; [`model`] normalizes them at
//! the boundary, [`dietary`] labels them, and [`collection`] filters and
//! orders them for display. The rest is the glue a client needs around
//! that: an explicit [`Session`], a thin [`RecipeApi`], pantry helpers and
//! the swipe game.
//!
//! ```
//! use dadly::{classify, filter_and_sort, DietaryTag, FilterCriteria, Recipe, SortKey, SortSpec};
//!
//! let recipes: Vec<Recipe> = serde_json::from_str(
//!     r#"[{"name": "Lentil Soup", "ingredients": "lentils, carrot, onion", "prep_time": 15},
//!         {"name": "Chicken Pie", "ingredients": ["chicken", "flour", "butter"], "prep_time": 40}]"#,
//! )
//! .unwrap();
//!
//! assert!(classify(&recipes[0]).contains(DietaryTag::Vegan));
//!
//! let criteria = FilterCriteria {
//!     dietary_tag: Some(DietaryTag::Vegetarian),
//!     ..Default::default()
//! };
//! let shown = filter_and_sort(&recipes, &criteria, SortSpec::ascending(SortKey::Alphabetical));
//! assert_eq!(shown.len(), 1);
//! assert_eq!(shown[0].name, "Lentil Soup");
//! ```

pub mod api;
pub mod builder;
pub mod collection;
pub mod config;
pub mod dietary;
pub mod error;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod pantry;
pub mod session;
pub mod sort;
pub mod swipe;

pub use api::{LikedPage, RecipeApi};
pub use builder::{RecipeQuery, RecipeQueryBuilder};
pub use collection::{
    available_ingredients, filter_and_sort, format_difficulty, format_minutes, hydrate_ratings,
    ListType,
};
pub use config::DadlyConfig;
pub use dietary::{classify, tag_recipes, DietaryTag, DietaryTags, TaggedRecipe};
pub use error::DadlyError;
pub use filter::{FilterCriteria, PrepTimeBucket};
pub use model::{PantryItem, RatedEntry, RawIngredients, Recipe, SavedAt};
pub use pantry::{dedupe_bulk, normalize_ingredient_name, pantry_coverage, PantryCoverage};
pub use session::{Session, SessionUser};
pub use sort::{sort_recipes, SortKey, SortOrder, SortSpec};
pub use swipe::{Side, SwipeCard, SwipeGame, SwipeOutcome};

use std::path::Path;

use log::debug;

/// Read a JSON array of recipes from a file.
///
/// Individual records degrade gracefully; only a file that is not a JSON
/// array of objects is an error.
pub async fn load_recipes_file(path: &Path) -> Result<Vec<Recipe>, DadlyError> {
    let body = tokio::fs::read_to_string(path).await?;
    let recipes: Vec<Recipe> = serde_json::from_str(&body)?;
    debug!("Loaded {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// Fetch the feed and fill in each entry's full record.
pub async fn fetch_hydrated_feed(
    api: &RecipeApi,
    session: &Session,
    limit: u32,
) -> Result<Vec<Recipe>, DadlyError> {
    let feed = api.fetch_feed(session, limit, &[]).await?;
    Ok(api.hydrate_feed(session, feed).await)
}
